//! Resource types for the Content Management API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// System metadata carried by every resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    /// Resource id
    #[serde(default)]
    pub id: String,
    /// Resource type, e.g. `Entry` or `Space`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Current version, incremented by every write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Version that is currently published, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u32>,
    /// Version that is currently archived, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u32>,
    /// Link to the owning space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    /// Link to the entry's content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    /// Creation timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last-update timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A link to another resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Link metadata
    pub sys: LinkSys,
}

/// The body of a [`Link`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    /// Target resource id
    pub id: String,
    /// Always `Link`
    #[serde(rename = "type")]
    pub kind: String,
    /// Target resource type, e.g. `Space` or `ContentType`
    pub link_type: String,
}

/// A space, the top-level content container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    /// System metadata
    pub sys: Sys,
    /// Human-readable space name
    pub name: String,
}

/// An environment within a space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// System metadata
    pub sys: Sys,
    /// Environment name
    #[serde(default)]
    pub name: String,
}

/// An entry: localized field values shaped by a content type
///
/// Fields are kept as raw JSON since their shape is dictated by the entry's
/// content type, with one nesting level per locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// System metadata
    pub sys: Sys,
    /// Field values, keyed by field id then locale
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    /// A single field value in the given locale
    pub fn field(&self, name: &str, locale: &str) -> Option<&Value> {
        self.fields.get(name)?.get(locale)
    }

    /// Whether any version of this entry is published
    pub const fn is_published(&self) -> bool {
        self.sys.published_version.is_some()
    }

    /// Whether this entry is archived
    pub const fn is_archived(&self) -> bool {
        self.sys.archived_version.is_some()
    }
}

/// An asset: a localized media file with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// System metadata
    pub sys: Sys,
    /// Localized asset fields
    #[serde(default)]
    pub fields: AssetFields,
}

/// The fields of an [`Asset`], each keyed by locale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFields {
    /// Title per locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Map<String, Value>>,
    /// Description per locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Map<String, Value>>,
    /// File info per locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Map<String, Value>>,
}

/// A content type: the schema entries are validated against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// System metadata
    pub sys: Sys,
    /// Content type name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field used as the display title for entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    /// Field definitions
    #[serde(default)]
    pub fields: Vec<ContentField>,
}

/// A single field definition within a [`ContentType`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentField {
    /// Field id, used as the key in entry fields
    pub id: String,
    /// Human-readable field name
    pub name: String,
    /// Field type, e.g. `Symbol`, `Text`, `Link`
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether a value is required for publishing
    #[serde(default)]
    pub required: bool,
    /// Whether the field holds per-locale values
    #[serde(default)]
    pub localized: bool,
    /// Whether the field is hidden from editors
    #[serde(default)]
    pub disabled: bool,
}

/// The pagination envelope wrapping every collection endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    /// Total number of resources matching the query
    #[serde(default)]
    pub total: u64,
    /// Offset of this page
    #[serde(default)]
    pub skip: u64,
    /// Page size
    #[serde(default)]
    pub limit: u64,
    /// Resources on this page
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    /// Whether another page exists past this one
    pub const fn has_next_page(&self) -> bool {
        self.skip + self.limit < self.total
    }
}

/// Query options for collection endpoints
#[derive(Debug, Clone, Default)]
pub struct CollectionQuery {
    /// Offset into the collection
    pub skip: Option<u64>,
    /// Maximum number of items to return
    pub limit: Option<u64>,
    /// Restrict entries to a single content type
    pub content_type: Option<String>,
}

impl CollectionQuery {
    /// Render as query-string pairs
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(content_type) = &self.content_type {
            pairs.push(("content_type", content_type.clone()));
        }
        pairs
    }
}
