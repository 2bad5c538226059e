//! Core types for flyertown

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record snapshot from a PocketBase collection
///
/// Only `id` is guaranteed. Every other field, system fields like
/// `collectionId` included, stays in `fields` in the order the backend sent
/// them so the record can be re-emitted unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique record identifier
    pub id: String,

    /// All remaining fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Look up a field other than `id`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field value as a string, if it is one
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Id of the collection the record belongs to
    pub fn collection_id(&self) -> Option<&str> {
        self.get_str("collectionId").filter(|s| !s.is_empty())
    }

    /// Name of the collection the record belongs to
    pub fn collection_name(&self) -> Option<&str> {
        self.get_str("collectionName").filter(|s| !s.is_empty())
    }

    /// File name stored in `field`
    ///
    /// Single-file fields hold a string; multi-file fields hold an array of
    /// names, in which case the first non-empty name is used. Returns `None`
    /// for an absent or empty field.
    pub fn file_name(&self, field: &str) -> Option<&str> {
        match self.get(field)? {
            Value::String(name) if !name.is_empty() => Some(name.as_str()),
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| !name.is_empty()),
            _ => None,
        }
    }
}

/// One page of a list result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub per_page: u32,
    /// Total number of matching records at fetch time
    pub total_items: i64,
    /// Total number of pages at fetch time
    pub total_pages: i64,
    /// Records on this page, in backend order
    pub items: Vec<Record>,
}

impl RecordPage {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether more pages exist after this one
    pub fn has_more(&self) -> bool {
        i64::from(self.page) < self.total_pages
    }
}

/// An authenticated session, the result of a successful password login
///
/// Only a session can issue list requests, which keeps the
/// unauthenticated → authenticated order in the types.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Auth token sent back in the `Authorization` header
    pub token: String,
    /// The authenticated account record
    pub record: Record,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("record", &self.record.id)
            .finish()
    }
}

/// A record combined with its derived image URL, ready for display
///
/// Serializes flat: every original field followed by `imageUrl`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordView {
    /// The record as fetched
    #[serde(flatten)]
    pub record: Record,
    /// Absolute URL of the record's image, or "" when it has none
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}
