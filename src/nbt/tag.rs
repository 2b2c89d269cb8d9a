//! nbt::tag
//!
//! The closed sum type for metadata tree values.
//!
//! # Reading
//!
//! Use the `as_*` accessors to read a tag as a specific kind. They return
//! `None` on a kind mismatch; callers treat that as "structure absent",
//! never as an error.
//!
//! # Display
//!
//! Tags render in the stringified surface syntax (`{Name:"Steve"}`) for
//! logs and test snapshots. This is a diagnostic format, not a codec.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::compound::CompoundTag;
use super::list::ListTag;

/// The kind of a [`Tag`].
///
/// Used for diagnostics and for list element-kind checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl TagKind {
    /// Get the kind name as a string slice.
    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Byte => "byte",
            TagKind::Short => "short",
            TagKind::Int => "int",
            TagKind::Long => "long",
            TagKind::Float => "float",
            TagKind::Double => "double",
            TagKind::ByteArray => "byte-array",
            TagKind::String => "string",
            TagKind::List => "list",
            TagKind::Compound => "compound",
            TagKind::IntArray => "int-array",
            TagKind::LongArray => "long-array",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single value in the metadata tree.
///
/// This is a closed sum: every variant the tree can hold is listed here,
/// reads match exhaustively, and writes go through explicit constructors.
///
/// # Example
///
/// ```
/// use keepsake::nbt::{CompoundTag, Tag};
///
/// let mut display = CompoundTag::new();
/// display.insert("Name", Tag::from("Steve's Sword"));
///
/// assert_eq!(display.get_str("Name"), Some("Steve's Sword"));
/// assert_eq!(display.get("Name").map(Tag::kind).unwrap().name(), "string");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Get the kind of this tag.
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Read this tag as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read this tag as a list.
    pub fn as_list(&self) -> Option<&ListTag> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    /// Read this tag as a mutable list.
    pub fn as_list_mut(&mut self) -> Option<&mut ListTag> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    /// Read this tag as a compound.
    pub fn as_compound(&self) -> Option<&CompoundTag> {
        match self {
            Tag::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Read this tag as a mutable compound.
    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundTag> {
        match self {
            Tag::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::String(s.to_owned())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag::String(s)
    }
}

impl From<ListTag> for Tag {
    fn from(list: ListTag) -> Self {
        Tag::List(list)
    }
}

impl From<CompoundTag> for Tag {
    fn from(compound: CompoundTag) -> Self {
        Tag::Compound(compound)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Byte(v) => write!(f, "{v}b"),
            Tag::Short(v) => write!(f, "{v}s"),
            Tag::Int(v) => write!(f, "{v}"),
            Tag::Long(v) => write!(f, "{v}L"),
            Tag::Float(v) => write!(f, "{v}f"),
            Tag::Double(v) => write!(f, "{v}d"),
            Tag::ByteArray(values) => write_array(f, "B", values, "b"),
            Tag::String(s) => write_quoted(f, s),
            Tag::List(list) => write!(f, "{list}"),
            Tag::Compound(compound) => write!(f, "{compound}"),
            Tag::IntArray(values) => write_array(f, "I", values, ""),
            Tag::LongArray(values) => write_array(f, "L", values, "L"),
        }
    }
}

fn write_array<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    values: &[T],
    suffix: &str,
) -> fmt::Result {
    write!(f, "[{prefix};")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{value}{suffix}")?;
    }
    write!(f, "]")
}

/// Write a string in double quotes, escaping quotes and backslashes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            _ => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}
