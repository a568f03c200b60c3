/// A lexical token of decoder input.
///
/// The scanner recognizes exactly two tags. Everything else, including
/// `<content>`, `<asset>` and any malformed tag, is literal text.
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────────┐
/// │ Token  │ Grammar (\s = whitespace)                        │
/// ├────────┼──────────────────────────────────────────────────┤
/// │ File   │ <file\s+src\s*=\s*"[^"]*"\s*/>                   │
/// │ Link   │ <a\s+href\s*=\s*"[^"]*"\s*>[^<]*</a>             │
/// │ Text   │ any non-empty run between tags                   │
/// └────────┴──────────────────────────────────────────────────┘
/// ```
///
/// `\s` is Unicode `White_Space` as tested by [`char::is_whitespace`]. The
/// ASCII separators U+001C to U+001F are not whitespace here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    File { src: &'a str },
    /// `title` is the raw text between `>` and `</a>`, untrimmed.
    Link { href: &'a str, title: &'a str },
}

/// Remembers the answer to "where does the run starting at `from` end".
///
/// For every query position inside `[from, to]` the answer is the same
/// `to`, so overlapping tag attempts that share a tail (the same closing
/// quote, the same whitespace run, the same next `<`) are answered without
/// rescanning.
#[derive(Clone, Copy, Default)]
struct Memo {
    from: usize,
    to: usize,
    valid: bool,
}

impl Memo {
    fn lookup(&mut self, at: usize, compute: impl FnOnce(usize) -> usize) -> usize {
        if self.valid && self.from <= at && at <= self.to {
            return self.to;
        }
        let to = compute(at);
        *self = Memo {
            from: at,
            to,
            valid: true,
        };
        to
    }
}

/// Explicit state scanner over pidgin text.
///
/// The scanner alternates between two states: *plain text*, where it looks
/// for the next `<`, and *inside tag*, where it tries to match a `<file>` or
/// `<a>` tag starting at that `<`. A failed match drops back to plain text
/// one byte later, so matches are found leftmost-first and never nest.
///
/// Tokens borrow from the input. Empty text runs are never produced, so an
/// empty input yields no tokens at all.
///
/// # Example
///
/// ```rust
/// use pidgin_wire::{Token, tokenize};
///
/// let tokens: Vec<_> = tokenize(r#"See <file src="/mnt/a.md" /> now"#).collect();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Text("See "),
///         Token::File { src: "/mnt/a.md" },
///         Token::Text(" now"),
///     ]
/// );
/// ```
pub struct Scanner<'a> {
    src: &'a str,
    /// Start of the text not yet emitted.
    pos: usize,
    /// Tag found after a text run, emitted on the following call.
    pending: Option<Token<'a>>,
    whitespace: Memo,
    quote: Memo,
    open_angle: Memo,
}

/// Scan `text` into tokens.
#[must_use]
pub fn tokenize(text: &str) -> Scanner<'_> {
    Scanner::new(text)
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            pending: None,
            whitespace: Memo::default(),
            quote: Memo::default(),
            open_angle: Memo::default(),
        }
    }

    fn match_tag(&mut self, start: usize) -> Option<(Token<'a>, usize)> {
        let rest = &self.src[start..];
        if rest.starts_with("<file") {
            self.match_file(start + "<file".len())
        } else if rest.starts_with("<a") {
            self.match_link(start + "<a".len())
        } else {
            None
        }
    }

    fn match_file(&mut self, at: usize) -> Option<(Token<'a>, usize)> {
        let (src, after) = self.attribute(at, "src")?;
        let i = self.skip_whitespace(after);
        let end = self.expect(i, "/>")?;
        Some((Token::File { src }, end))
    }

    fn match_link(&mut self, at: usize) -> Option<(Token<'a>, usize)> {
        let (href, after) = self.attribute(at, "href")?;
        let i = self.skip_whitespace(after);
        let title_start = self.expect(i, ">")?;
        let title_end = self.next_open_angle(title_start);
        let end = self.expect(title_end, "</a>")?;
        let src = self.src;
        Some((
            Token::Link {
                href,
                title: &src[title_start..title_end],
            },
            end,
        ))
    }

    /// Match `\s+name\s*=\s*"value"` and return the value and the position
    /// just past the closing quote.
    fn attribute(&mut self, at: usize, name: &str) -> Option<(&'a str, usize)> {
        let i = self.skip_whitespace(at);
        if i == at {
            return None;
        }
        let i = self.expect(i, name)?;
        let i = self.skip_whitespace(i);
        let i = self.expect(i, "=")?;
        let i = self.skip_whitespace(i);
        let open = self.expect(i, "\"")?;
        let close = self.next_quote(open)?;
        let src = self.src;
        Some((&src[open..close], close + 1))
    }

    fn expect(&self, at: usize, literal: &str) -> Option<usize> {
        self.src[at..]
            .starts_with(literal)
            .then_some(at + literal.len())
    }

    fn skip_whitespace(&mut self, at: usize) -> usize {
        let src = self.src;
        self.whitespace.lookup(at, |at| {
            src[at..]
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map_or(src.len(), |(offset, _)| at + offset)
        })
    }

    fn next_quote(&mut self, at: usize) -> Option<usize> {
        let src = self.src;
        let found = self
            .quote
            .lookup(at, |at| src[at..].find('"').map_or(src.len(), |o| at + o));
        (found < src.len()).then_some(found)
    }

    /// Position of the next `<` at or after `at`, or the input length.
    fn next_open_angle(&mut self, at: usize) -> usize {
        let src = self.src;
        self.open_angle
            .lookup(at, |at| src[at..].find('<').map_or(src.len(), |o| at + o))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let src = self.src;
        let mut cursor = self.pos;
        while let Some(offset) = src[cursor..].find('<') {
            let start = cursor + offset;
            if let Some((token, end)) = self.match_tag(start) {
                let text = &src[self.pos..start];
                self.pos = end;
                if text.is_empty() {
                    return Some(token);
                }
                self.pending = Some(token);
                return Some(Token::Text(text));
            }
            cursor = start + 1;
        }

        if self.pos < src.len() {
            let text = &src[self.pos..];
            self.pos = src.len();
            return Some(Token::Text(text));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Token<'_>> {
        tokenize(text).collect()
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(scan("hello world"), vec![Token::Text("hello world")]);
    }

    #[test]
    fn file_tag_splits_text() {
        assert_eq!(
            scan(r#"See the report: <file src="/mnt/report.md" />"#),
            vec![
                Token::Text("See the report: "),
                Token::File {
                    src: "/mnt/report.md"
                },
            ]
        );
    }

    #[test]
    fn file_tag_whitespace_is_flexible() {
        assert_eq!(
            scan("<file\n  src = \"x\"/>"),
            vec![Token::File { src: "x" }]
        );
        assert_eq!(
            scan("<file\tsrc=\"y\"    />"),
            vec![Token::File { src: "y" }]
        );
    }

    #[test]
    fn unit_separator_is_not_whitespace() {
        let text = "<file\u{1f}src=\"x\" />";
        assert_eq!(scan(text), vec![Token::Text(text)]);
        assert_eq!(
            scan("<file\u{2003}src=\"x\" />"),
            vec![Token::File { src: "x" }]
        );
    }

    #[test]
    fn file_tag_requires_whitespace_before_src() {
        assert_eq!(
            scan(r#"<filesrc="x" />"#),
            vec![Token::Text(r#"<filesrc="x" />"#)]
        );
    }

    #[test]
    fn link_keeps_raw_title() {
        assert_eq!(
            scan(r#"Go to <a href="/agents/writer">  the writer </a> for help"#),
            vec![
                Token::Text("Go to "),
                Token::Link {
                    href: "/agents/writer",
                    title: "  the writer "
                },
                Token::Text(" for help"),
            ]
        );
    }

    #[test]
    fn link_title_cannot_contain_tags() {
        let text = r#"<a href="x">a <b>bold</b> move</a>"#;
        assert_eq!(scan(text), vec![Token::Text(text)]);
    }

    #[test]
    fn content_tag_is_plain_text() {
        let text = "<content src=\"/mnt/text1.txt\">\nbody</content>";
        assert_eq!(scan(text), vec![Token::Text(text)]);
    }

    #[test]
    fn tags_never_nest() {
        assert_eq!(
            scan(r#"<a href="x"><file src="y" /></a>"#),
            vec![
                Token::Text(r#"<a href="x">"#),
                Token::File { src: "y" },
                Token::Text("</a>"),
            ]
        );
    }

    #[test]
    fn src_value_may_contain_angle_brackets() {
        assert_eq!(
            scan(r#"<file src="a<b" />"#),
            vec![Token::File { src: "a<b" }]
        );
    }

    #[test]
    fn adjacent_tags_have_no_text_between() {
        assert_eq!(
            scan(r#"<file src="a" /><a href="r">t</a>"#),
            vec![
                Token::File { src: "a" },
                Token::Link {
                    href: "r",
                    title: "t"
                },
            ]
        );
    }

    #[test]
    fn unterminated_tags_fall_back_to_text() {
        let text = "<file src=\"never closed".repeat(2_000);
        assert_eq!(scan(&text), vec![Token::Text(text.as_str())]);

        let text = "<a href=\"x\">".repeat(2_000);
        assert_eq!(scan(&text), vec![Token::Text(text.as_str())]);
    }

    #[test]
    fn multibyte_text_around_tags() {
        assert_eq!(
            scan("héllo <file src=\"ü\" /> wörld"),
            vec![
                Token::Text("héllo "),
                Token::File { src: "ü" },
                Token::Text(" wörld"),
            ]
        );
    }
}
