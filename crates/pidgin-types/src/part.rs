use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored-data handles with this prefix are NotebookLM notebooks. They
/// always travel as plain URL text and are never filed in a content store.
pub const NOTEBOOKLM_URL_PREFIX: &str = "https://notebooklm.google.com/notebook/";

/// Inline binary payload. `data` is already encoded (typically base64) by
/// the producer; the engine never looks inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Reference to data held somewhere else, identified by an opaque handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredData {
    pub handle: String,
    pub mime_type: String,
}

impl StoredData {
    /// Whether the handle points at a NotebookLM notebook.
    #[must_use]
    pub fn is_notebooklm(&self) -> bool {
        self.handle.starts_with(NOTEBOOKLM_URL_PREFIX)
    }
}

/// One atomic unit of content.
///
/// The JSON shape is the generative-model API's: a single-key object whose
/// key names the kind of part.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────┐
/// │ Variant     │ JSON                                             │
/// ├─────────────┼──────────────────────────────────────────────────┤
/// │ Text        │ {"text": "..."}                                  │
/// │ InlineData  │ {"inlineData": {"mimeType": "...", "data": ".."}}│
/// │ StoredData  │ {"storedData": {"handle": "..", "mimeType": ".."}│
/// │ Other       │ anything else, kept verbatim                     │
/// └─────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// `Other` keeps unknown part shapes (`fileData`, `functionCall`, a text
/// part with extra keys, an `inlineData` missing its `mimeType`, ...) so
/// they survive a trip through the engine unchanged. Parsing a part never
/// fails. Only `Text` counts as a *pure* text part for merging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum Part {
    Text { text: String },
    InlineData(Blob),
    StoredData(StoredData),
    Other(Map<String, Value>),
}

impl Part {
    /// Build a pure text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Build an inline-data part.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData(Blob {
            mime_type: mime_type.into(),
            data: data.into(),
        })
    }

    /// Build a stored-data part.
    pub fn stored_data(handle: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::StoredData(StoredData {
            handle: handle.into(),
            mime_type: mime_type.into(),
        })
    }

    /// The text carried by this part, if any.
    ///
    /// Returns the text of a pure text part, and also of an `Other` part
    /// whose `text` key holds a string. The encoder treats both as text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Other(map) => map.get("text").and_then(Value::as_str),
            Self::InlineData(_) | Self::StoredData(_) => None,
        }
    }

    /// `true` only for a part whose single key is `text`.
    #[must_use]
    pub fn is_pure_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// The mime type of a data part.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::InlineData(blob) => Some(&blob.mime_type),
            Self::StoredData(stored) => Some(&stored.mime_type),
            Self::Text { .. } | Self::Other(_) => None,
        }
    }
}

impl From<Map<String, Value>> for Part {
    fn from(map: Map<String, Value>) -> Self {
        if map.len() == 1 {
            if let Some(Value::String(text)) = map.get("text") {
                return Self::text(text.clone());
            }
            if let Some(blob) = map.get("inlineData").and_then(|v| Blob::deserialize(v).ok()) {
                return Self::InlineData(blob);
            }
            if let Some(stored) = map
                .get("storedData")
                .and_then(|v| StoredData::deserialize(v).ok())
            {
                return Self::StoredData(stored);
            }
        }
        Self::Other(map)
    }
}

impl From<Part> for Map<String, Value> {
    fn from(part: Part) -> Self {
        let mut map = Map::new();
        match part {
            Part::Text { text } => {
                map.insert("text".into(), Value::String(text));
            }
            Part::InlineData(blob) => {
                let mut inner = Map::new();
                inner.insert("mimeType".into(), Value::String(blob.mime_type));
                inner.insert("data".into(), Value::String(blob.data));
                map.insert("inlineData".into(), Value::Object(inner));
            }
            Part::StoredData(stored) => {
                let mut inner = Map::new();
                inner.insert("handle".into(), Value::String(stored.handle));
                inner.insert("mimeType".into(), Value::String(stored.mime_type));
                map.insert("storedData".into(), Value::Object(inner));
            }
            Part::Other(other) => return other,
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_part_parses_as_pure_text() {
        let part: Part = serde_json::from_value(json!({"text": "hello"})).unwrap();
        assert_eq!(part, Part::text("hello"));
        assert!(part.is_pure_text());
    }

    #[test]
    fn inline_data_uses_camel_case_keys() {
        let part: Part =
            serde_json::from_value(json!({"inlineData": {"mimeType": "image/png", "data": "abc"}}))
                .unwrap();
        assert_eq!(part, Part::inline_data("image/png", "abc"));
        assert_eq!(part.mime_type(), Some("image/png"));

        let back = serde_json::to_value(&part).unwrap();
        assert_eq!(back, json!({"inlineData": {"mimeType": "image/png", "data": "abc"}}));
    }

    #[test]
    fn text_with_extra_keys_is_other_but_still_text() {
        let part: Part = serde_json::from_value(json!({"text": "hmm", "thought": true})).unwrap();
        assert!(matches!(part, Part::Other(_)));
        assert!(!part.is_pure_text());
        assert_eq!(part.as_text(), Some("hmm"));
    }

    #[test]
    fn unknown_shape_survives_serialization() {
        let raw = json!({"fileData": {"fileUri": "gs://bucket/x", "mimeType": "video/mp4"}});
        let part: Part = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(part, Part::Other(_)));
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }

    #[test]
    fn malformed_inline_data_falls_back_to_other() {
        let raw = json!({"inlineData": {"data": "x"}});
        let part: Part = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(part, Part::Other(_)));
        assert_eq!(part.mime_type(), None);
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }

    #[test]
    fn malformed_stored_data_falls_back_to_other() {
        let part: Part = serde_json::from_value(json!({"storedData": {"handle": 7}})).unwrap();
        assert!(matches!(part, Part::Other(_)));
    }

    #[test]
    fn notebooklm_handles_are_detected() {
        let nlm = StoredData {
            handle: format!("{NOTEBOOKLM_URL_PREFIX}abc123"),
            mime_type: "application/x-notebooklm".into(),
        };
        assert!(nlm.is_notebooklm());

        let drive = StoredData {
            handle: "https://drive.google.com/file/d/1".into(),
            mime_type: "application/pdf".into(),
        };
        assert!(!drive.is_notebooklm());
    }
}
