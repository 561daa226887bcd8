//! Stored documents and the validated records derived from them.
//!
//! The document store is schema-less, so every stored field is optional on
//! the `*Document` side. Conversion into a `*Record` is where a document is
//! accepted or skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw pose document as stored in the `poses` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseDocument {
    #[serde(rename = "nama_gerakan", default, skip_serializing_if = "Option::is_none")]
    pub movement_name: Option<String>,
}

/// Raw video document as stored in the `pilates_videos` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "channelTitle", default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    /// Publish timestamp, kept as text until bucketing parses it.
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl PoseDocument {
    pub fn new(movement_name: impl Into<String>) -> Self {
        Self {
            movement_name: Some(movement_name.into()),
        }
    }
}

impl VideoDocument {
    pub fn new(
        title: impl Into<String>,
        channel_title: impl Into<String>,
        published_at: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            channel_title: Some(channel_title.into()),
            published_at: Some(published_at.into()),
        }
    }
}

/// A validated pose record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub movement_name: String,
}

/// A validated video record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
}

/// Why a document was rejected on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing or empty field '{}'", self.0)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, MissingField> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MissingField(field)),
    }
}

impl TryFrom<PoseDocument> for PoseRecord {
    type Error = MissingField;

    fn try_from(doc: PoseDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            movement_name: required(doc.movement_name, "nama_gerakan")?,
        })
    }
}

impl TryFrom<VideoDocument> for VideoRecord {
    type Error = MissingField;

    fn try_from(doc: VideoDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(doc.title, "title")?,
            channel_title: required(doc.channel_title, "channelTitle")?,
            published_at: required(doc.published_at, "publishedAt")?,
        })
    }
}

/// Records accepted from one full collection read.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    /// Documents dropped because a required field was absent.
    pub skipped: usize,
}

impl<T> Snapshot<T> {
    /// Validate a batch of documents, skipping the ones that fail.
    pub fn from_documents<D>(collection: &str, documents: Vec<D>) -> Self
    where
        T: TryFrom<D, Error = MissingField>,
    {
        let total = documents.len();
        let mut records = Vec::with_capacity(total);
        let mut skipped = 0;

        for (index, doc) in documents.into_iter().enumerate() {
            match T::try_from(doc) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    log::warn!("Skipping {} document #{}: {}", collection, index, reason);
                    skipped += 1;
                }
            }
        }

        log::debug!(
            "Loaded {} of {} {} documents ({} skipped)",
            records.len(),
            total,
            collection,
            skipped
        );

        Self { records, skipped }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
