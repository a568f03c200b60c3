#![no_main]

use libfuzzer_sys::fuzz_target;
use pidgin_wire::{tokenize, Token};

// Text runs are never empty and tag values never contain their own
// delimiters.
fuzz_target!(|text: &str| {
    let mut covered = 0;
    for token in tokenize(text) {
        match token {
            Token::Text(run) => {
                assert!(!run.is_empty());
                covered += run.len();
            }
            Token::File { src } => assert!(!src.contains('"')),
            Token::Link { href, title } => {
                assert!(!href.contains('"'));
                assert!(!title.contains('<'));
            }
        }
    }
    assert!(covered <= text.len());
});
