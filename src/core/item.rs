//! core::item
//!
//! The item value this crate operates on.
//!
//! # Ownership
//!
//! An item is owned by the calling pipeline for the duration of a single
//! packet. Operations here receive exclusive, temporary mutable access to
//! one item's metadata tree and retain nothing after returning.
//!
//! # Empty slots
//!
//! An empty inventory slot is `Option<Item>`; slot-level pipeline entry
//! points treat `None` as pass-through.

use serde::{Deserialize, Serialize};

use crate::nbt::CompoundTag;

/// Well-known key of the display sub-compound.
pub const DISPLAY_KEY: &str = "display";

/// Well-known key of the custom name inside the display compound.
pub const NAME_KEY: &str = "Name";

/// Well-known key of the lore list inside the display compound.
pub const LORE_KEY: &str = "Lore";

/// A single item stack with zero or one attached metadata tree.
///
/// # Example
///
/// ```
/// use keepsake::core::item::Item;
/// use keepsake::nbt::Tag;
///
/// let mut item = Item::new(276, 1);
/// assert!(item.display().is_none());
///
/// item.display_mut_or_create().insert("Name", Tag::from("Iron Sword"));
/// assert_eq!(item.display().and_then(|d| d.get_str("Name")), Some("Iron Sword"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Protocol item id.
    pub identifier: i32,

    /// Stack size.
    pub amount: u8,

    /// Attached metadata tree, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<CompoundTag>,
}

impl Item {
    /// Create an item without metadata.
    pub fn new(identifier: i32, amount: u8) -> Self {
        Self {
            identifier,
            amount,
            tag: None,
        }
    }

    /// Create an item with an attached metadata tree.
    pub fn with_tag(identifier: i32, amount: u8, tag: CompoundTag) -> Self {
        Self {
            identifier,
            amount,
            tag: Some(tag),
        }
    }

    /// Get the display sub-compound, if present.
    ///
    /// Returns `None` when the item has no metadata, no `display` entry, or
    /// a `display` entry of another kind.
    pub fn display(&self) -> Option<&CompoundTag> {
        self.tag.as_ref()?.get_compound(DISPLAY_KEY)
    }

    /// Get the display sub-compound mutably, if present.
    pub fn display_mut(&mut self) -> Option<&mut CompoundTag> {
        self.tag.as_mut()?.get_compound_mut(DISPLAY_KEY)
    }

    /// Get the display sub-compound, creating the metadata tree and the
    /// `display` entry as needed.
    ///
    /// The forward direction uses this before overwriting a display field
    /// on an item that had none.
    pub fn display_mut_or_create(&mut self) -> &mut CompoundTag {
        self.tag
            .get_or_insert_with(CompoundTag::new)
            .compound_entry(DISPLAY_KEY)
    }
}
