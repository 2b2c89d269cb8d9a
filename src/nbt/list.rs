//! nbt::list
//!
//! Ordered sequences of tags.
//!
//! # Homogeneity
//!
//! The binary wire format requires a list's elements to share one kind.
//! Enforcing that belongs to the host's codec; here a list stores any tags
//! and exposes [`ListTag::element_kind`] so a codec can check at its
//! boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tag::{Tag, TagKind};

/// An ordered sequence of tags.
///
/// # Example
///
/// ```
/// use keepsake::nbt::{ListTag, Tag, TagKind};
///
/// let mut lore = ListTag::new();
/// lore.push(Tag::from("First line"));
/// lore.push(Tag::from("Second line"));
///
/// assert_eq!(lore.len(), 2);
/// assert_eq!(lore.element_kind(), Some(TagKind::String));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListTag(Vec<Tag>);

impl ListTag {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag to the end of the list.
    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Get the tag at `index`.
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.0.get(index)
    }

    /// Get the tag at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.0.get_mut(index)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    /// Iterate mutably over the elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tag> {
        self.0.iter_mut()
    }

    /// The kind of the first element, or `None` for an empty list.
    pub fn element_kind(&self) -> Option<TagKind> {
        self.0.first().map(Tag::kind)
    }
}

impl From<Vec<Tag>> for ListTag {
    fn from(tags: Vec<Tag>) -> Self {
        Self(tags)
    }
}

impl FromIterator<Tag> for ListTag {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ListTag {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ListTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get() {
        let mut list = ListTag::new();
        assert!(list.is_empty());
        assert_eq!(list.element_kind(), None);

        list.push(Tag::from("a"));
        list.push(Tag::from("b"));

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).and_then(Tag::as_str), Some("a"));
        assert_eq!(list.get(2), None);
        assert_eq!(list.element_kind(), Some(TagKind::String));
    }

    #[test]
    fn collects_from_iterator() {
        let list: ListTag = ["x", "y"].into_iter().map(Tag::from).collect();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn display_nested() {
        let inner: ListTag = [Tag::Int(1), Tag::Int(2)].into_iter().collect();
        let outer: ListTag = [Tag::List(inner), Tag::from("z")].into_iter().collect();
        insta::assert_snapshot!(outer.to_string(), @r#"[[1,2],"z"]"#);
    }
}
