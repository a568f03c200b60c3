//! Sample inputs shared by the integration tests and benches.

use pidgin_types::segment::{MEMORY_TOOL_PATH, NOTEBOOKLM_TOOL_PATH};
use pidgin_types::{Content, NOTEBOOKLM_URL_PREFIX, Part, Segment};

/// A small PNG header, base64. Stands in for any inline image.
pub const PNG_DATA: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// A NotebookLM notebook URL.
#[must_use]
pub fn notebooklm_url() -> String {
    format!("{NOTEBOOKLM_URL_PREFIX}0f1e2d3c")
}

/// Text of exactly `n` characters.
#[must_use]
pub fn text_of_len(n: usize) -> String {
    "lorem ipsum ".chars().cycle().take(n).collect()
}

/// A prompt touching every kind of segment the encoder accepts.
#[must_use]
pub fn full_prompt() -> Vec<Segment> {
    vec![
        Segment::text("You are a careful editor.\n"),
        Segment::asset(
            "Draft",
            Content::new(vec![
                Part::text("Chapter one."),
                Part::inline_data("image/png", PNG_DATA),
            ]),
        ),
        Segment::text("\n"),
        Segment::input(
            "Style Agent",
            Content::new(vec![Part::text("Prefer short sentences.")]),
        ),
        Segment::text("\nWhen done, hand off to "),
        Segment::route("the reviewer", "agents/reviewer"),
        Segment::text(".\n"),
        Segment::tool(MEMORY_TOOL_PATH, "Memory"),
        Segment::tool(NOTEBOOKLM_TOOL_PATH, "NotebookLM"),
        Segment::tool("https://example.com/tools/search.bgl.json", "Search"),
    ]
}

/// A long prompt of `assets` asset blocks, each mixing short text, long
/// text and an image.
#[must_use]
pub fn bulk_prompt(assets: usize) -> Vec<Segment> {
    (0..assets)
        .map(|i| {
            Segment::asset(
                format!("Asset {i}"),
                Content::new(vec![
                    Part::text(format!("Summary of asset {i}.")),
                    Part::text(text_of_len(1500 + i)),
                    Part::inline_data("image/jpeg", format!("{PNG_DATA}{i}")),
                ]),
            )
        })
        .collect()
}
