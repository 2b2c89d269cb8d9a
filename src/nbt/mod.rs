//! nbt
//!
//! The tagged metadata tree attached to items.
//!
//! # Modules
//!
//! - [`tag`] - The closed [`Tag`] sum type and [`TagKind`]
//! - [`list`] - [`ListTag`], an ordered sequence of tags
//! - [`compound`] - [`CompoundTag`], a keyed node with stable entry order
//!
//! # Design
//!
//! The tree is a closed sum type: reads match exhaustively and unrecognized
//! structure is ignored rather than assumed. Cloning any node is structural;
//! a clone shares no storage with its source, which is what makes saved
//! backups immune to later in-place edits of the live tree.
//!
//! # Serialization
//!
//! Compounds serialize as maps that preserve entry order. The binary wire
//! encoding of the surrounding protocol is not handled here; hosts bring
//! their own codec and hand this crate already-decoded trees.

pub mod compound;
pub mod list;
pub mod tag;

pub use compound::CompoundTag;
pub use list::ListTag;
pub use tag::{Tag, TagKind};
