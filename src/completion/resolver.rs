//! Completion resolution.
//!
//! Maps (raw query, token sequence, caret column) to a completion mode and
//! assembles the candidate list:
//!
//! - caret at column 1: the full static filter-name list, no fetch;
//! - caret on a literal or whitespace token: static filter names (prefix
//!   filtered for literals) followed by dynamically fetched suggestions;
//! - caret in a filter's value: the filter's discrete values, or fetched
//!   suggestions narrowed to the filter's category;
//! - caret in a filter's name portion, unknown filter, or filter with no
//!   value mechanism: no completions (`Ok(None)`).
//!
//! A caret that lands on no token at all is a caller bug (tokens cover the
//! whole query text) and surfaces as [`ResolveError::NoTokenAtColumn`].

use tower_lsp::lsp_types::{CompletionItem, CompletionList};
use tracing::debug;

use crate::completion::builder;
use crate::suggest::{SuggestionError, SuggestionSource};
use crate::token::{Token, caret_range};

/// Failure modes of [`resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The caret column fell outside every token. Tokens cover the whole
    /// query text, so this means the caller's tokens and caret are out of
    /// sync; it is reported rather than swallowed.
    #[error("no token at column {column}")]
    NoTokenAtColumn { column: u32 },
    /// The suggestion source failed; propagated unmodified, no partial
    /// result is built.
    #[error(transparent)]
    Fetch(#[from] SuggestionError),
}

fn with_sort_text(mut items: Vec<CompletionItem>, sort_text: &str) -> Vec<CompletionItem> {
    for item in &mut items {
        item.sort_text = Some(sort_text.to_string());
    }
    items
}

/// Resolve completions for a caret position within a tokenized query.
///
/// `column` is 1-based. `tokens` is the ordered sequence covering
/// `raw_query`; when a boundary column matches two adjacent tokens, the
/// first in sequence order wins. The suggestion source is invoked at most
/// once per call, always with the full raw query.
///
/// Returns `Ok(None)` for positions where completion deliberately offers
/// nothing; identical inputs and a deterministic source yield identical
/// results.
pub async fn resolve(
    raw_query: &str,
    tokens: &[Token],
    column: u32,
    source: &dyn SuggestionSource,
) -> Result<Option<CompletionList>, ResolveError> {
    // Show all filter suggestions on the first column.
    if column == 1 {
        return Ok(Some(CompletionList {
            is_incomplete: false,
            items: builder::filter_name_items(caret_range(column)),
        }));
    }

    let token = tokens
        .iter()
        .find(|token| token.range().contains_column(column))
        .ok_or(ResolveError::NoTokenAtColumn { column })?;

    match token {
        // Free-text position: static filter names first, then dynamic
        // suggestions. The sort_text buckets keep that order in the client
        // regardless of how the lists interleave.
        Token::Literal(_) | Token::Whitespace { .. } => {
            let range = token.range().to_lsp_range();

            let static_items: Vec<CompletionItem> = builder::filter_name_items(range)
                .into_iter()
                .filter(|item| match token {
                    Token::Literal(literal) => item.label.starts_with(&literal.value),
                    _ => true,
                })
                .collect();
            let mut items = with_sort_text(static_items, "0");

            let suggestions = source.fetch(raw_query).await?;
            debug!(count = suggestions.len(), "fetched suggestions");
            let dynamic_items: Vec<CompletionItem> = suggestions
                .iter()
                .filter_map(|suggestion| builder::suggestion_to_item(suggestion, range))
                .collect();
            items.extend(with_sort_text(dynamic_items, "1"));

            // More may exist server-side; have the client re-request as
            // the user types.
            Ok(Some(CompletionList {
                is_incomplete: true,
                items,
            }))
        }
        Token::Filter { name, value, .. } => {
            // With a value present, the caret must be at or past its
            // start; otherwise it sits in the filter name, where no
            // completions are offered. With no value yet, any position on
            // the filter token counts as starting the value.
            let completing_value = match value {
                Some(value) => value.range.start + 1 <= column as usize,
                None => true,
            };
            if !completing_value {
                return Ok(None);
            }

            let Some(definition) = crate::filters::filter_definition(&name.value) else {
                debug!(filter = %name.value, "unknown filter");
                return Ok(None);
            };

            let range = value
                .as_ref()
                .map(|value| value.range.to_lsp_range())
                .unwrap_or_else(|| caret_range(column));

            if let Some(category) = definition.suggestions {
                let suggestions = source.fetch(raw_query).await?;
                let items: Vec<CompletionItem> = suggestions
                    .iter()
                    .filter(|suggestion| suggestion.category() == category)
                    .filter_map(|suggestion| builder::suggestion_to_item(suggestion, range))
                    .map(|mut item| {
                        // Value completions are plain, non-chaining.
                        item.command = None;
                        item
                    })
                    .collect();
                return Ok(Some(CompletionList {
                    is_incomplete: false,
                    items,
                }));
            }

            if let Some(values) = definition.discrete_values {
                return Ok(Some(CompletionList {
                    is_incomplete: false,
                    items: builder::discrete_value_items(values, range),
                }));
            }

            Ok(None)
        }
    }
}
