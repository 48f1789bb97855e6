//! # Wire Format
//!
//! The structured JSON form of a [`Document`]:
//!
//! ```json
//! {
//!   "text": "Elon Musk is a member of the PayPal Mafia.",
//!   "denotations": [{"begin": 29, "end": 41, "obj": "Organization"}],
//!   "config": {"entity types": [{"id": "https://example.org/Organization", "label": "Organization"}]}
//! }
//! ```
//!
//! `config` carries label definitions and is omitted when there are none.
//!
//! [`decode`] accepts either this form or raw inline text. Structured input
//! is recognised first and loaded as-is, so an already-parsed payload never
//! goes through the bracket parser a second time.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Number, Value};

use crate::{
    models::{Document, Span},
    parsing::parse,
};

/// Both keys must be present for input to count as structured.
pub const TEXT_KEY: &str = "text";
pub const DENOTATIONS_KEY: &str = "denotations";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDocument {
    pub text: String,
    pub denotations: Vec<Denotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<WireConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denotation {
    #[serde(deserialize_with = "offset")]
    pub begin: i64,
    #[serde(deserialize_with = "offset")]
    pub end: i64,
    pub obj: String,
}

/// Accepts any JSON integer. Values past `i64::MAX` saturate; they are out
/// of range either way and the generator reports them as such.
fn offset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_u64().map(|_| i64::MAX))
        .ok_or_else(|| D::Error::custom(format!("offset {number} is not an integer")))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConfig {
    #[serde(rename = "entity types", default)]
    pub entity_types: Vec<EntityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    pub id: String,
    pub label: String,
}

impl From<&Document> for WireDocument {
    fn from(doc: &Document) -> Self {
        let config = (!doc.label_definitions.is_empty()).then(|| WireConfig {
            entity_types: doc
                .label_definitions
                .iter()
                .map(|(label, url)| EntityType {
                    id: url.clone(),
                    label: label.clone(),
                })
                .collect(),
        });
        Self {
            text: doc.text.clone(),
            denotations: doc
                .spans
                .iter()
                .map(|s| Denotation {
                    begin: s.begin,
                    end: s.end,
                    obj: s.label.clone(),
                })
                .collect(),
            config,
        }
    }
}

impl From<WireDocument> for Document {
    fn from(wire: WireDocument) -> Self {
        Self {
            text: wire.text,
            spans: wire
                .denotations
                .into_iter()
                .map(|d| Span::new(d.begin, d.end, d.obj))
                .collect(),
            label_definitions: wire
                .config
                .unwrap_or_default()
                .entity_types
                .into_iter()
                .map(|t| (t.label, t.id))
                .collect(),
        }
    }
}

/// Decodes either wire JSON or raw inline text into a [`Document`].
///
/// Input that is not JSON, or JSON without both `text` and `denotations`,
/// or with those keys holding the wrong shapes, is parsed as inline text.
pub fn decode(input: &str) -> Document {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => {
            if let Some(doc) = wire_document(&value) {
                return doc;
            }
            log::debug!("JSON input is not a wire document, parsing as inline text");
        }
        Err(err) => log::debug!("input is not JSON ({err}), parsing as inline text"),
    }
    parse(input)
}

/// Like [`decode`] for a payload that has already been deserialised.
///
/// A JSON string is decoded as its contents; any other non-wire value is
/// parsed as the inline text of its JSON rendering.
pub fn decode_value(value: &Value) -> Document {
    if let Some(doc) = wire_document(value) {
        return doc;
    }
    match value {
        Value::String(s) => decode(s),
        other => parse(&other.to_string()),
    }
}

/// Loads `value` directly when it is a wire document: an object holding
/// both keys, with integer offsets. Offsets are not checked against the text.
pub fn wire_document(value: &Value) -> Option<Document> {
    let map = value.as_object()?;
    if !(map.contains_key(TEXT_KEY) && map.contains_key(DENOTATIONS_KEY)) {
        return None;
    }
    match WireDocument::deserialize(value) {
        Ok(wire) => Some(wire.into()),
        Err(err) => {
            log::debug!("wire document has unexpected shape: {err}");
            None
        }
    }
}

pub fn encode(doc: &Document) -> serde_json::Result<Value> {
    serde_json::to_value(WireDocument::from(doc))
}

pub fn to_json_string(doc: &Document, pretty: bool) -> serde_json::Result<String> {
    let wire = WireDocument::from(doc);
    if pretty {
        serde_json::to_string_pretty(&wire)
    } else {
        serde_json::to_string(&wire)
    }
}
