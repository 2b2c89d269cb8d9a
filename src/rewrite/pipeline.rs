//! rewrite::pipeline
//!
//! Ordered stacking of translation stages.
//!
//! # Ordering
//!
//! Stages are registered newest-to-oldest. The forward direction applies
//! them in registration order; the reverse direction applies them in
//! reverse, so each stage undoes its own edits on the way back and restores
//! see exactly the tree their saves produced.
//!
//! # Isolation
//!
//! Each stage writes slots under its own tag, so a restore only consumes
//! what its stage saved; other stages' slots pass through untouched.

use tracing::trace;

use crate::core::item::Item;

use super::stage::ItemStage;

/// A stack of translation stages applied as one unit.
///
/// # Example
///
/// ```
/// use keepsake::core::item::{Item, NAME_KEY};
/// use keepsake::core::types::{NameFormat, StageTag};
/// use keepsake::nbt::Tag;
/// use keepsake::rewrite::{DisplayBackup, ItemStage, Pipeline};
///
/// struct Strip {
///     backup: DisplayBackup,
/// }
///
/// impl ItemStage for Strip {
///     fn backup(&self) -> &DisplayBackup {
///         &self.backup
///     }
///
///     fn downgrade_item(&self, item: &mut Item) {
///         let display = item.display_mut_or_create();
///         if let Some(name) = display.get_str(NAME_KEY).map(String::from) {
///             self.backup.save_string(display, &name, NAME_KEY);
///             display.remove(NAME_KEY);
///         }
///     }
/// }
///
/// let mut pipeline = Pipeline::new();
/// pipeline.push(Box::new(Strip {
///     backup: DisplayBackup::new(StageTag::new("strip").unwrap(), NameFormat::Plain),
/// }));
///
/// let mut slot = Some(Item::new(276, 1));
/// slot.as_mut().unwrap().display_mut_or_create().insert(NAME_KEY, Tag::from("Authored"));
///
/// pipeline.downgrade_slot(&mut slot);
/// pipeline.upgrade_slot(&mut slot);
///
/// let item = slot.unwrap();
/// assert_eq!(item.display().and_then(|d| d.get_str(NAME_KEY)), Some("Authored"));
/// ```
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ItemStage>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage at the old end of the stack.
    pub fn push(&mut self, stage: Box<dyn ItemStage>) {
        self.stages.push(stage);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the forward direction over one item.
    pub fn downgrade_item(&self, item: &mut Item) {
        trace!(stages = self.stages.len(), "downgrading item");
        for stage in &self.stages {
            stage.downgrade_item(item);
        }
    }

    /// Run the reverse direction over one item.
    pub fn upgrade_item(&self, item: &mut Item) {
        trace!(stages = self.stages.len(), "upgrading item");
        for stage in self.stages.iter().rev() {
            stage.upgrade_item(item);
        }
    }

    /// Run the forward direction over one inventory slot.
    ///
    /// An empty slot passes through untouched.
    pub fn downgrade_slot(&self, slot: &mut Option<Item>) {
        if let Some(item) = slot {
            self.downgrade_item(item);
        }
    }

    /// Run the reverse direction over one inventory slot.
    pub fn upgrade_slot(&self, slot: &mut Option<Item>) {
        if let Some(item) = slot {
            self.upgrade_item(item);
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<_> = self
            .stages
            .iter()
            .map(|stage| stage.backup().stage_tag().as_str())
            .collect();
        f.debug_struct("Pipeline").field("stages", &tags).finish()
    }
}
