//! Single-line query tokenizer.
//!
//! Splits a raw search query into [`Token`]s: whitespace runs, `name:value`
//! filter clauses, and plain literals. The resolver only needs this coarse
//! structure; value grammar (regexes, quoting) is left to the search backend.
//!
//! Every character of the input is covered by exactly one token, so any
//! caret column inside the text (or just past its end) lands on some token.

use crate::token::{CharRange, Literal, Token};

/// Whether `text` is a plausible filter name: an optional leading `-`
/// (negation) followed by one or more ASCII letters.
fn is_filter_name(text: &str) -> bool {
    let name = text.strip_prefix('-').unwrap_or(text);
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// Tokenize a single-line query into an ordered, non-overlapping sequence
/// of tokens covering the whole string.
pub fn scan_query(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let start = pos;

        if chars[pos].is_whitespace() {
            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
            tokens.push(Token::Whitespace {
                range: CharRange::new(start, pos),
            });
            continue;
        }

        // Consume a run of non-whitespace characters.
        while pos < chars.len() && !chars[pos].is_whitespace() {
            pos += 1;
        }
        let run: String = chars[start..pos].iter().collect();

        // A run is a filter clause when the text before its first colon
        // looks like a filter name. Anything else stays a literal
        // (so `:foo` or `127.0.0.1:80` never parse as filters).
        let filter = run.find(':').and_then(|idx| {
            let name_text = &run[..idx];
            if !is_filter_name(name_text) {
                return None;
            }
            // `find` returns a byte index; names are ASCII so it is also
            // the character offset within the run.
            let colon = start + idx;
            let name = Literal {
                value: name_text.to_string(),
                range: CharRange::new(start, colon),
            };
            let value = if colon + 1 < pos {
                Some(Literal {
                    value: run[idx + 1..].to_string(),
                    range: CharRange::new(colon + 1, pos),
                })
            } else {
                None
            };
            Some(Token::Filter {
                range: CharRange::new(start, pos),
                name,
                value,
            })
        });

        tokens.push(filter.unwrap_or_else(|| {
            Token::Literal(Literal {
                value: run,
                range: CharRange::new(start, pos),
            })
        }));
    }

    tokens
}
