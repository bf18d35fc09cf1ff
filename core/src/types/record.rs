use dicom_core::Tag;
use serde::{Serialize, Serializer};
use std::fmt;

/// Tag identifier rendered as `(GGGG,EEEE)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(pub Tag);

impl TagId {
    /// Group number
    pub fn group(&self) -> u16 {
        self.0.group()
    }

    /// Element number
    pub fn element(&self) -> u16 {
        self.0.element()
    }
}

impl From<Tag> for TagId {
    fn from(tag: Tag) -> Self {
        TagId(tag)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group(), self.element())
    }
}

impl Serialize for TagId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One extracted metadata element
///
/// `value` is always text. Binary payloads and nested sequences are
/// rendered to a string before they get here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    /// Tag identifier
    pub tag: TagId,

    /// Dictionary keyword, or a placeholder for unknown tags
    pub keyword: String,

    /// Rendered value
    pub value: String,
}

impl MetadataRecord {
    pub fn new(tag: impl Into<TagId>, keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            keyword: keyword.into(),
            value: value.into(),
        }
    }
}

/// Records extracted from one file, in header order
pub type FileResult = Vec<MetadataRecord>;
