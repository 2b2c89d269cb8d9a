//! rewrite::stage
//!
//! The seam a concrete translation stage implements.
//!
//! # Contract
//!
//! A stage owns one [`DisplayBackup`] engine and two hooks, one per
//! direction. The reverse hook has a default body that runs the restore
//! unconditionally; implementations that override it must still call
//! [`DisplayBackup::restore_on_return`], or saved originals leak and
//! synthesized names stick.

use crate::core::item::Item;

use super::backup::DisplayBackup;

/// One translation stage between two adjacent protocol versions.
///
/// # Example
///
/// ```
/// use keepsake::core::item::{Item, NAME_KEY};
/// use keepsake::core::types::{NameFormat, StageTag};
/// use keepsake::nbt::Tag;
/// use keepsake::rewrite::{DisplayBackup, ItemStage};
///
/// /// Downgrades by forcing a fixed display name.
/// struct FlattenName {
///     backup: DisplayBackup,
/// }
///
/// impl ItemStage for FlattenName {
///     fn backup(&self) -> &DisplayBackup {
///         &self.backup
///     }
///
///     fn downgrade_item(&self, item: &mut Item) {
///         let display = item.display_mut_or_create();
///         if let Some(original) = display.get_str(NAME_KEY).map(String::from) {
///             self.backup.save_string(display, &original, NAME_KEY);
///         }
///         display.insert(NAME_KEY, Tag::from("Old Sword"));
///     }
/// }
///
/// let stage = FlattenName {
///     backup: DisplayBackup::new(StageTag::new("demo").unwrap(), NameFormat::Plain),
/// };
///
/// let mut item = Item::new(276, 1);
/// item.display_mut_or_create().insert(NAME_KEY, Tag::from("Authored"));
///
/// stage.downgrade_item(&mut item);
/// assert_eq!(item.display().and_then(|d| d.get_str(NAME_KEY)), Some("Old Sword"));
///
/// stage.upgrade_item(&mut item);
/// assert_eq!(item.display().and_then(|d| d.get_str(NAME_KEY)), Some("Authored"));
/// ```
pub trait ItemStage {
    /// The backup engine owning this stage's slots.
    fn backup(&self) -> &DisplayBackup;

    /// Forward hook: rewrite an item from the newer version down to the
    /// older one.
    ///
    /// Call the engine's save operations before overwriting a display
    /// field, supplying the pre-mutation value.
    fn downgrade_item(&self, item: &mut Item);

    /// Reverse hook: rewrite an item from the older version back up to the
    /// newer one.
    ///
    /// The default body restores this stage's display edits and nothing
    /// else.
    fn upgrade_item(&self, item: &mut Item) {
        self.backup().restore_on_return(item);
    }
}
