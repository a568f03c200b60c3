#![no_main]

use libfuzzer_sys::fuzz_target;
use pidgin_decoder::{merge_text_parts, PidginDecoder};
use pidgin_encoder::MemoryContentStore;
use pidgin_types::ContentStore;

fuzz_target!(|text: &str| {
    let store = MemoryContentStore::new();
    store.write("a.txt", "alpha");
    store.write("b.md", "# beta");

    // Decoding never panics; the output is already fully merged.
    if let Ok(content) = PidginDecoder::decode(text, &store) {
        assert_eq!(merge_text_parts(content.parts.clone()), content.parts);
    }
});
