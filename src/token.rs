//! Query token model.
//!
//! Tokens are produced by [`crate::scan::scan_query`] and consumed read-only
//! by the completion resolver. Ranges are measured in characters (the editor
//! column unit), 0-based and end-exclusive. Caret columns are 1-based.

use tower_lsp::lsp_types::{Position, Range};

/// A character range within the single-line query text.
///
/// `start` is inclusive, `end` exclusive, both 0-based character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether a 1-based caret column falls on this token.
    ///
    /// The test is deliberately inclusive on both sides
    /// (`start + 1 <= column <= end + 1`): a caret sitting immediately
    /// before or immediately after the token still counts, so completion
    /// keeps working at token boundaries. A consequence is that a boundary
    /// column can match two adjacent tokens; callers resolve the tie by
    /// taking the first token in sequence order.
    pub fn contains_column(&self, column: u32) -> bool {
        let column = column as usize;
        self.start + 1 <= column && column <= self.end + 1
    }

    /// Convert to an LSP range on line 0 of the query.
    pub fn to_lsp_range(&self) -> Range {
        Range {
            start: Position {
                line: 0,
                character: self.start as u32,
            },
            end: Position {
                line: 0,
                character: self.end as u32,
            },
        }
    }
}

/// Zero-width LSP range at a 1-based caret column.
pub fn caret_range(column: u32) -> Range {
    let character = column.saturating_sub(1);
    Range {
        start: Position { line: 0, character },
        end: Position { line: 0, character },
    }
}

/// A contiguous run of text with its range. Used both for standalone
/// literal tokens and for the name/value sub-tokens of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
    pub range: CharRange,
}

/// A unit of the tokenized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Free text that is not (yet) part of a filter.
    Literal(Literal),
    /// A run of whitespace between clauses.
    Whitespace { range: CharRange },
    /// A `name:value` clause. `range` spans the whole clause including the
    /// colon; `name` covers the filter name only; `value` is absent when
    /// nothing has been typed after the colon.
    Filter {
        range: CharRange,
        name: Literal,
        value: Option<Literal>,
    },
}

impl Token {
    pub fn range(&self) -> CharRange {
        match self {
            Token::Literal(literal) => literal.range,
            Token::Whitespace { range } => *range,
            Token::Filter { range, .. } => *range,
        }
    }
}
