#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use searchq_lsp::Backend;
use searchq_lsp::suggest::{Suggestion, SuggestionError, SuggestionSource, SymbolKind};
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::*;

/// Suggestion source that records every query it is asked for and returns
/// a canned record list (or a fixed error).
pub struct RecordingSource {
    calls: Mutex<Vec<String>>,
    records: Vec<Suggestion>,
    fail: bool,
}

impl RecordingSource {
    pub fn new(records: Vec<Suggestion>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            records,
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            records: Vec::new(),
            fail: true,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[tower_lsp::async_trait]
impl SuggestionSource for RecordingSource {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, SuggestionError> {
        self.calls.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(SuggestionError::Unavailable("stub failure".to_string()));
        }
        Ok(self.records.clone())
    }
}

/// A small mixed corpus: one of each record kind, plus a language record
/// with an empty name (which must never surface as a completion).
pub fn sample_records() -> Vec<Suggestion> {
    vec![
        Suggestion::Repository {
            name: "github.com/gorilla/mux".to_string(),
        },
        Suggestion::File {
            name: "mux.go".to_string(),
            path: "mux.go".to_string(),
            repository: "github.com/gorilla/mux".to_string(),
            is_directory: false,
        },
        Suggestion::Symbol {
            name: "NewRouter".to_string(),
            kind: SymbolKind::Function,
            repository: "github.com/gorilla/mux".to_string(),
        },
        Suggestion::Language {
            name: "go".to_string(),
        },
        Suggestion::Language {
            name: String::new(),
        },
    ]
}

pub fn create_test_backend() -> (Backend, Arc<RecordingSource>) {
    let source = RecordingSource::new(sample_records());
    let backend = Backend::new_test_with_source(source.clone());
    (backend, source)
}

pub async fn open_query(backend: &Backend, uri: &Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "searchquery".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

/// Request completion at a 0-based character offset on line 0.
pub async fn request_completion(
    backend: &Backend,
    uri: &Url,
    character: u32,
) -> jsonrpc::Result<Option<CompletionResponse>> {
    backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position { line: 0, character },
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
}

/// Unwrap a completion response into its item list, asserting it is the
/// `List` form the server always produces.
pub fn into_list(response: CompletionResponse) -> CompletionList {
    match response {
        CompletionResponse::List(list) => list,
        other => panic!("expected CompletionResponse::List, got {:?}", other),
    }
}

/// Total number of filter-name completions (one per alias).
pub fn total_filter_aliases() -> usize {
    searchq_lsp::filters::FILTERS
        .iter()
        .map(|def| def.aliases.len())
        .sum()
}

/// The `new_text` of an item's text edit.
pub fn edit_text(item: &CompletionItem) -> &str {
    match &item.text_edit {
        Some(CompletionTextEdit::Edit(edit)) => &edit.new_text,
        other => panic!("expected plain text edit, got {:?}", other),
    }
}

/// The range of an item's text edit.
pub fn edit_range(item: &CompletionItem) -> Range {
    match &item.text_edit {
        Some(CompletionTextEdit::Edit(edit)) => edit.range,
        other => panic!("expected plain text edit, got {:?}", other),
    }
}
