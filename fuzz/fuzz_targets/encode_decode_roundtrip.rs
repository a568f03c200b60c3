#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pidgin_decoder::PidginDecoder;
use pidgin_encoder::{EncoderConfig, MemoryContentStore, PidginEncoder};
use pidgin_types::{Content, Part, Segment};

#[derive(Debug, Arbitrary)]
enum FuzzPart {
    Text(String),
    Image(Vec<u8>),
    Stored { handle: String, pdf: bool },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    title: String,
    parts: Vec<FuzzPart>,
    max_inline_chars: u8,
}

fn to_part(part: FuzzPart) -> Part {
    match part {
        FuzzPart::Text(text) => Part::text(text),
        FuzzPart::Image(bytes) => {
            let data: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            Part::inline_data("image/png", data)
        }
        FuzzPart::Stored { handle, pdf } => {
            let mime = if pdf { "application/pdf" } else { "text/plain" };
            Part::stored_data(handle, mime)
        }
    }
}

// Every data part of an asset block must come back from the decoder
// unchanged and in order, whatever the surrounding text contains. Text
// that itself looks like a tag is skipped, since it would decode as one.
fuzz_target!(|input: FuzzInput| {
    let parts: Vec<Part> = input.parts.into_iter().map(to_part).collect();
    if parts.is_empty()
        || parts
            .iter()
            .filter_map(Part::as_text)
            .chain(std::iter::once(input.title.as_str()))
            .any(|t| t.contains('<'))
    {
        return;
    }
    if parts.iter().any(|p| matches!(p, Part::StoredData(s) if s.is_notebooklm())) {
        return;
    }

    let store = MemoryContentStore::new();
    let config = EncoderConfig {
        max_inline_chars: usize::from(input.max_inline_chars),
        ..EncoderConfig::default()
    };
    let encoded = PidginEncoder::with_config(&store, config)
        .encode(&[Segment::asset(input.title, Content::new(parts.clone()))])
        .expect("non-empty asset must encode");
    let decoded = PidginDecoder::decode(&encoded.text, &store).expect("own handles must resolve");

    let sent: Vec<&Part> = parts.iter().filter(|p| !p.is_pure_text()).collect();
    let received: Vec<&Part> = decoded.parts.iter().filter(|p| !p.is_pure_text()).collect();
    assert_eq!(sent, received);
});
