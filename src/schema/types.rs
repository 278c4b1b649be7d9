use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The base type of a [`Schema`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Boolean,
    Integer,
    Number,
    Object,
    Array,
}

/// Optional refinement of a [`SchemaKind`].
///
/// Only meaningful for `string`, `integer`, and `number` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaFormat {
    #[serde(rename = "int32")]
    Int32,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "float")]
    Float,
    /// RFC3339 timestamp.
    #[serde(rename = "date-time")]
    DateTime,
}

/// An OpenAPI-style schema object describing a data shape.
///
/// Serializes with every empty/absent member omitted, matching the wire form
/// the documentation layer embeds:
///
/// ```json
/// { "type": "object", "properties": { "id": { "type": "integer", "format": "int64" } }, "required": ["id"] }
/// ```
///
/// Exactly one of `properties`(+`required`), `items`, or neither is populated,
/// consistent with `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<SchemaFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Literal example value. Never set by the compiler; reserved for
    /// annotation by the documentation layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Schema {
    /// A bare schema of the given kind with every other member empty.
    pub fn of(kind: SchemaKind) -> Self {
        Schema {
            kind,
            format: None,
            description: None,
            items: None,
            properties: BTreeMap::new(),
            additional_properties: None,
            required: Vec::new(),
            example: None,
        }
    }

    /// A primitive schema with a format refinement.
    pub fn with_format(kind: SchemaKind, format: SchemaFormat) -> Self {
        Schema {
            format: Some(format),
            ..Schema::of(kind)
        }
    }
}
