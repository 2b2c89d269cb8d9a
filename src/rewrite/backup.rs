//! rewrite::backup
//!
//! The display-metadata backup/restore engine.
//!
//! # Key Convention
//!
//! The engine's only externally visible contract is the keys it writes as
//! siblings of the fields they back up, inside the `display` compound:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `<stage>\|o<Field>` | Backup slot holding the pre-mutation value of `<Field>` |
//! | `<stage>\|customName` | Marker: `Name` was synthesized, not an overridden original |
//!
//! Backup slots are ordinary metadata entries. They survive any handling
//! that forwards the item untouched and are consumed by the matching
//! restore; an item that never returns simply carries them until it dies.
//!
//! # Invariants
//!
//! - A slot is written at most once per round trip per stage (first writer
//!   wins)
//! - A saved value is a structural clone of the pre-mutation value
//! - After [`DisplayBackup::restore_on_return`], no slot or marker owned by
//!   this stage remains
//! - The marker and a restorable `Name` backup are mutually exclusive
//!   outcomes; when both are present the marker wins and the stale slot is
//!   discarded

use tracing::debug;

use crate::core::config::StageConfig;
use crate::core::item::{Item, LORE_KEY, NAME_KEY};
use crate::core::types::{NameFormat, StageTag};
use crate::nbt::{CompoundTag, ListTag, Tag};

/// Separator between the stage tag and a backed-up field name.
const BACKUP_INFIX: &str = "|o";

/// Suffix of the synthesized-name marker key.
const CUSTOM_NAME_SUFFIX: &str = "|customName";

/// The backup/restore engine for one translation stage.
///
/// Holds no mutable state beyond its immutable configuration; one instance
/// may serve any number of items, including concurrently, as long as no two
/// callers mutate the same item's tree at once.
///
/// # Example
///
/// ```
/// use keepsake::core::item::{Item, NAME_KEY};
/// use keepsake::core::types::{NameFormat, StageTag};
/// use keepsake::nbt::Tag;
/// use keepsake::rewrite::DisplayBackup;
///
/// let backup = DisplayBackup::new(
///     StageTag::new("vb|1.12to1.11").unwrap(),
///     NameFormat::Plain,
/// );
///
/// let mut item = Item::new(276, 1);
/// let display = item.display_mut_or_create();
/// display.insert(NAME_KEY, Tag::from("Steve's Sword"));
///
/// // Forward direction: save, then overwrite.
/// backup.save_string(display, "Steve's Sword", NAME_KEY);
/// display.insert(NAME_KEY, Tag::from("Iron Sword"));
///
/// // Reverse direction: the original comes back, the slot is gone.
/// backup.restore_on_return(&mut item);
/// let display = item.display().unwrap();
/// assert_eq!(display.get_str(NAME_KEY), Some("Steve's Sword"));
/// assert_eq!(display.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DisplayBackup {
    stage: StageTag,
    name_format: NameFormat,
}

impl DisplayBackup {
    /// Create an engine for the stage identified by `stage`.
    pub fn new(stage: StageTag, name_format: NameFormat) -> Self {
        Self { stage, name_format }
    }

    /// Create an engine from one stage's configuration.
    pub fn from_config(config: &StageConfig) -> Self {
        Self::new(config.tag.clone(), config.name_format)
    }

    /// The tag identifying this stage.
    ///
    /// Other components use it to recognize which stage produced a given
    /// backup slot.
    pub fn stage_tag(&self) -> &StageTag {
        &self.stage
    }

    /// How the version this stage translates down from encodes names.
    pub fn name_format(&self) -> NameFormat {
        self.name_format
    }

    /// The backup slot key for `field`.
    pub fn backup_key(&self, field: &str) -> String {
        format!("{}{BACKUP_INFIX}{field}", self.stage)
    }

    /// The synthesized-name marker key.
    pub fn custom_name_key(&self) -> String {
        format!("{}{CUSTOM_NAME_SUFFIX}", self.stage)
    }

    /// Check whether a backup slot for `field` exists.
    ///
    /// Upstream mutation logic uses this to skip re-deriving an original
    /// value it already saved.
    pub fn has_backup(&self, display: &CompoundTag, field: &str) -> bool {
        display.contains_key(&self.backup_key(field))
    }

    /// Save the pre-mutation value of a string field.
    ///
    /// Call before overwriting `field`. If a slot for `field` already
    /// exists this is a no-op; multiple rewrite paths may try to back up
    /// the same field in one pass.
    pub fn save_string(&self, display: &mut CompoundTag, original: &str, field: &str) {
        let key = self.backup_key(field);
        if !display.contains_key(&key) {
            display.insert(key, Tag::from(original));
        }
    }

    /// Save the pre-mutation value of a list field.
    ///
    /// Same first-writer-wins contract as [`Self::save_string`]. The list
    /// is cloned entry by entry, so later in-place edits of the live field
    /// cannot reach the backup.
    pub fn save_list(&self, display: &mut CompoundTag, original: &ListTag, field: &str) {
        let key = self.backup_key(field);
        if !display.contains_key(&key) {
            display.insert(key, Tag::List(original.clone()));
        }
    }

    /// Record that this stage synthesized the `Name` field from non-text
    /// data.
    ///
    /// The marker tells the reverse direction to drop `Name` instead of
    /// restoring anything: the name was never an authored override, and
    /// removing it lets the upstream default apply.
    pub fn mark_custom_name(&self, display: &mut CompoundTag) {
        let key = self.custom_name_key();
        if !display.contains_key(&key) {
            display.insert(key, Tag::Byte(1));
        }
    }

    /// Undo this stage's display edits on an item heading back to the newer
    /// version.
    ///
    /// Runs unconditionally on every returning item; the tree itself says
    /// whether anything needs doing. Items without metadata or without a
    /// display compound pass through untouched.
    pub fn restore_on_return(&self, item: &mut Item) {
        if let Some(display) = item.display_mut() {
            self.restore_display(display);
        }
    }

    /// Undo this stage's edits directly on a display compound.
    pub fn restore_display(&self, display: &mut CompoundTag) {
        // Remove the synthesized name or restore the original one.
        if display.remove(&self.custom_name_key()).is_some() {
            display.remove(NAME_KEY);
            // A stale slot must not outlive the round trip.
            display.remove(&self.backup_key(NAME_KEY));
            debug!(stage = %self.stage, "dropped synthesized name");
        } else {
            self.restore_string(display, NAME_KEY);
        }

        self.restore_list(display, LORE_KEY);
    }

    /// Move a backed-up string out of its slot and back into `field`.
    ///
    /// A slot holding a tag of another kind is consumed without touching
    /// `field`; only this engine writes these slots, and it writes strings.
    fn restore_string(&self, display: &mut CompoundTag, field: &str) {
        if let Some(Tag::String(original)) = display.remove(&self.backup_key(field)) {
            debug!(stage = %self.stage, field, "restored original value");
            display.insert(field, Tag::String(original));
        }
    }

    /// Move a backed-up list out of its slot and back into `field`.
    fn restore_list(&self, display: &mut CompoundTag, field: &str) {
        if let Some(Tag::List(original)) = display.remove(&self.backup_key(field)) {
            debug!(stage = %self.stage, field, "restored original value");
            display.insert(field, Tag::List(original));
        }
    }
}
