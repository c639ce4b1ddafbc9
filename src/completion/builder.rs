//! Completion item building.
//!
//! Turns filter grammar entries and [`Suggestion`] records into LSP
//! `CompletionItem`s. The resolver decides *which* items to build and in
//! what order; this module only knows what a single item looks like.

use tower_lsp::lsp_types::*;

use crate::filters::FILTERS;
use crate::suggest::{Suggestion, SymbolKind};

/// Command asking the client to re-open the suggest widget. Attached to
/// insertions that end with a space and naturally chain into the next
/// clause (repository and file completions).
fn retrigger_suggest() -> Command {
    Command {
        title: "Suggest".to_string(),
        command: "editor.action.triggerSuggest".to_string(),
        arguments: None,
    }
}

fn with_edit(mut item: CompletionItem, range: Range, new_text: String) -> CompletionItem {
    item.text_edit = Some(CompletionTextEdit::Edit(TextEdit { range, new_text }));
    item
}

/// One completion item per alias of every filter in the grammar table.
///
/// Each item inserts `alias:` and carries the filter's description as
/// detail. The replacement range is supplied by the caller since it
/// depends on the completion context (token range or zero-width caret).
pub fn filter_name_items(range: Range) -> Vec<CompletionItem> {
    FILTERS
        .iter()
        .flat_map(|def| {
            def.aliases.iter().map(move |&alias| {
                with_edit(
                    CompletionItem {
                        label: alias.to_string(),
                        kind: Some(CompletionItemKind::OPERATOR),
                        detail: Some(def.description.to_string()),
                        filter_text: Some(alias.to_string()),
                        ..CompletionItem::default()
                    },
                    range,
                    format!("{}:", alias),
                )
            })
        })
        .collect()
}

/// Map search-backend symbol kinds to LSP completion item kinds.
fn symbol_kind_to_item_kind(kind: SymbolKind) -> CompletionItemKind {
    match kind {
        SymbolKind::File => CompletionItemKind::FILE,
        SymbolKind::Module | SymbolKind::Namespace | SymbolKind::Package => {
            CompletionItemKind::MODULE
        }
        SymbolKind::Class => CompletionItemKind::CLASS,
        SymbolKind::Method => CompletionItemKind::METHOD,
        SymbolKind::Property | SymbolKind::Key => CompletionItemKind::PROPERTY,
        SymbolKind::Field => CompletionItemKind::FIELD,
        SymbolKind::Constructor => CompletionItemKind::CONSTRUCTOR,
        SymbolKind::Enum => CompletionItemKind::ENUM,
        SymbolKind::Interface => CompletionItemKind::INTERFACE,
        SymbolKind::Function => CompletionItemKind::FUNCTION,
        SymbolKind::Variable => CompletionItemKind::VARIABLE,
        SymbolKind::Constant => CompletionItemKind::CONSTANT,
        SymbolKind::EnumMember => CompletionItemKind::ENUM_MEMBER,
        SymbolKind::Struct => CompletionItemKind::STRUCT,
        SymbolKind::Event => CompletionItemKind::EVENT,
        SymbolKind::Operator => CompletionItemKind::OPERATOR,
        SymbolKind::TypeParameter => CompletionItemKind::TYPE_PARAMETER,
        SymbolKind::Unknown
        | SymbolKind::String
        | SymbolKind::Number
        | SymbolKind::Boolean
        | SymbolKind::Array
        | SymbolKind::Object
        | SymbolKind::Null => CompletionItemKind::VALUE,
    }
}

/// Map one suggestion record to a completion item, or `None` when the
/// record has nothing completable (a language with an empty name).
///
/// - Repository: inserts an anchored regex over the repo name, trailing
///   space, chains into the next clause.
/// - File: inserts an anchored regex over the path; folder vs. file kind;
///   detail shows `path - repository`.
/// - Symbol: inserts the bare name; detail shows `Kind - repository`.
/// - Language: inserts the bare name.
pub fn suggestion_to_item(suggestion: &Suggestion, range: Range) -> Option<CompletionItem> {
    let item = match suggestion {
        Suggestion::Repository { name } => with_edit(
            CompletionItem {
                label: name.clone(),
                kind: Some(CompletionItemKind::MODULE),
                filter_text: Some(name.clone()),
                command: Some(retrigger_suggest()),
                ..CompletionItem::default()
            },
            range,
            format!("^{}$ ", regex::escape(name)),
        ),
        Suggestion::File {
            name,
            path,
            repository,
            is_directory,
        } => with_edit(
            CompletionItem {
                label: name.clone(),
                kind: Some(if *is_directory {
                    CompletionItemKind::FOLDER
                } else {
                    CompletionItemKind::FILE
                }),
                detail: Some(format!("{} - {}", path, repository)),
                filter_text: Some(name.clone()),
                command: Some(retrigger_suggest()),
                ..CompletionItem::default()
            },
            range,
            format!("^{}$ ", regex::escape(path)),
        ),
        Suggestion::Symbol {
            name,
            kind,
            repository,
        } => with_edit(
            CompletionItem {
                label: name.clone(),
                kind: Some(symbol_kind_to_item_kind(*kind)),
                detail: Some(format!("{} - {}", kind.label(), repository)),
                filter_text: Some(name.clone()),
                ..CompletionItem::default()
            },
            range,
            name.clone(),
        ),
        Suggestion::Language { name } => {
            if name.is_empty() {
                return None;
            }
            with_edit(
                CompletionItem {
                    label: name.clone(),
                    kind: Some(CompletionItemKind::TYPE_PARAMETER),
                    filter_text: Some(name.clone()),
                    ..CompletionItem::default()
                },
                range,
                name.clone(),
            )
        }
    };
    Some(item)
}

/// One completion item per discrete filter value, order preserved.
/// Inserts the value plus a trailing space so the caret lands ready for
/// the next clause.
pub fn discrete_value_items(values: &[&str], range: Range) -> Vec<CompletionItem> {
    values
        .iter()
        .map(|&value| {
            with_edit(
                CompletionItem {
                    label: value.to_string(),
                    kind: Some(CompletionItemKind::VALUE),
                    filter_text: Some(value.to_string()),
                    ..CompletionItem::default()
                },
                range,
                format!("{} ", value),
            )
        })
        .collect()
}
