use serde::{Deserialize, Serialize};

use crate::content::Content;

/// Tool path that turns a tool segment into a routing link.
pub const ROUTE_TOOL_PATH: &str = "control-flow/routing";

/// Tool path that switches on the memory tool.
pub const MEMORY_TOOL_PATH: &str = "function-group/use-memory";

/// Tool path that switches on the NotebookLM tool.
pub const NOTEBOOKLM_TOOL_PATH: &str = "function-group/notebooklm";

/// One encoder input unit.
///
/// Segments arrive as loosely typed JSON objects keyed by `type`. The
/// decoding rules for that key are deliberately asymmetric:
///
/// ```text
/// ┌─────────────────────────────┬──────────────────────────────┐
/// │ "type"                      │ Variant                      │
/// ├─────────────────────────────┼──────────────────────────────┤
/// │ "text"                      │ Text                         │
/// │ "asset"                     │ Asset                        │
/// │ "input"                     │ Input                        │
/// │ "tool"                      │ Tool                         │
/// │ absent or ""                │ Untyped  (skipped)           │
/// │ any other string            │ Unknown  (encode error)      │
/// └─────────────────────────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSegment", into = "RawSegment")]
pub enum Segment {
    /// Verbatim prompt text.
    Text { text: String },
    /// A titled block of content supplied by the caller.
    Asset {
        title: String,
        content: Option<Content>,
    },
    /// A titled block of another agent's output.
    Input {
        title: String,
        content: Option<Content>,
    },
    /// A reference to a callable capability.
    Tool(ToolRef),
    /// A segment whose `type` is not recognized.
    Unknown { kind: String },
    /// A segment with no `type` at all.
    Untyped,
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn asset(title: impl Into<String>, content: Content) -> Self {
        Self::Asset {
            title: title.into(),
            content: Some(content),
        }
    }

    pub fn input(title: impl Into<String>, content: Content) -> Self {
        Self::Input {
            title: title.into(),
            content: Some(content),
        }
    }

    pub fn tool(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Tool(ToolRef {
            path: path.into(),
            title: title.into(),
            instance: None,
        })
    }

    /// A routing tool segment pointing at `instance`.
    pub fn route(title: impl Into<String>, instance: impl Into<String>) -> Self {
        Self::Tool(ToolRef {
            path: ROUTE_TOOL_PATH.to_string(),
            title: title.into(),
            instance: Some(instance.into()),
        })
    }
}

/// The payload of a `tool` segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRef {
    pub path: String,
    pub title: String,
    /// Routing target. Only meaningful for [`ROUTE_TOOL_PATH`].
    pub instance: Option<String>,
}

/// What a tool path means to the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    Route,
    Memory,
    NotebookLm,
    Custom,
}

impl ToolRef {
    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self.path.as_str() {
            ROUTE_TOOL_PATH => ToolKind::Route,
            MEMORY_TOOL_PATH => ToolKind::Memory,
            NOTEBOOKLM_TOOL_PATH => ToolKind::NotebookLm,
            _ => ToolKind::Custom,
        }
    }

    /// The routing instance, treating an empty string as absent.
    #[must_use]
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref().filter(|i| !i.is_empty())
    }
}

/// A custom tool referenced by a prompt, to be loaded by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomToolUrl {
    pub url: String,
    pub title: String,
}

/// Flat wire form of a segment. Every field is optional so that
/// classification happens in [`From<RawSegment>`] rather than in serde.
#[derive(Clone, Default, Serialize, Deserialize)]
struct RawSegment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance: Option<String>,
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        let kind = raw.kind.unwrap_or_default();
        match kind.as_str() {
            "" => Self::Untyped,
            "text" => Self::Text {
                text: raw.text.unwrap_or_default(),
            },
            "asset" => Self::Asset {
                title: raw.title.unwrap_or_else(|| "asset".to_string()),
                content: raw.content,
            },
            "input" => Self::Input {
                title: raw.title.unwrap_or_else(|| "input".to_string()),
                content: raw.content,
            },
            "tool" => Self::Tool(ToolRef {
                path: raw.path.unwrap_or_default(),
                title: raw.title.unwrap_or_default(),
                instance: raw.instance,
            }),
            _ => Self::Unknown { kind },
        }
    }
}

impl From<Segment> for RawSegment {
    fn from(segment: Segment) -> Self {
        match segment {
            Segment::Text { text } => Self {
                kind: Some("text".into()),
                text: Some(text),
                ..Self::default()
            },
            Segment::Asset { title, content } => Self {
                kind: Some("asset".into()),
                title: Some(title),
                content,
                ..Self::default()
            },
            Segment::Input { title, content } => Self {
                kind: Some("input".into()),
                title: Some(title),
                content,
                ..Self::default()
            },
            Segment::Tool(tool) => Self {
                kind: Some("tool".into()),
                title: Some(tool.title),
                path: Some(tool.path),
                instance: tool.instance,
                ..Self::default()
            },
            Segment::Unknown { kind } => Self {
                kind: Some(kind),
                ..Self::default()
            },
            Segment::Untyped => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Segment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_type_is_untyped() {
        assert_eq!(parse(json!({"text": "orphan"})), Segment::Untyped);
        assert_eq!(parse(json!({"type": ""})), Segment::Untyped);
    }

    #[test]
    fn unrecognized_type_is_unknown() {
        assert_eq!(
            parse(json!({"type": "video"})),
            Segment::Unknown {
                kind: "video".into()
            }
        );
    }

    #[test]
    fn titles_fall_back_to_segment_kind() {
        let asset = parse(json!({"type": "asset", "content": {"parts": [{"text": "x"}]}}));
        assert!(matches!(asset, Segment::Asset { ref title, .. } if title == "asset"));

        let input = parse(json!({"type": "input"}));
        assert!(matches!(input, Segment::Input { ref title, content: None } if title == "input"));
    }

    #[test]
    fn tool_kinds_follow_reserved_paths() {
        let tool = |path: &str| ToolRef {
            path: path.into(),
            title: String::new(),
            instance: None,
        };
        assert_eq!(tool(ROUTE_TOOL_PATH).kind(), ToolKind::Route);
        assert_eq!(tool(MEMORY_TOOL_PATH).kind(), ToolKind::Memory);
        assert_eq!(tool(NOTEBOOKLM_TOOL_PATH).kind(), ToolKind::NotebookLm);
        assert_eq!(tool("https://example.com/tool.bgl.json").kind(), ToolKind::Custom);
    }

    #[test]
    fn empty_instance_counts_as_missing() {
        let segment = parse(json!({"type": "tool", "path": ROUTE_TOOL_PATH, "instance": ""}));
        let Segment::Tool(tool) = segment else {
            panic!("expected a tool segment");
        };
        assert_eq!(tool.instance(), None);
    }

    #[test]
    fn route_segment_serializes_flat() {
        let value =
            serde_json::to_value(Segment::route("Next", "https://example.com/run")).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "tool",
                "title": "Next",
                "path": ROUTE_TOOL_PATH,
                "instance": "https://example.com/run"
            })
        );
    }
}
