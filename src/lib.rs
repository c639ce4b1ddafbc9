//! Language server for a structured code-search query language.
//!
//! Queries are single-line strings mixing free-text terms with
//! `filter:value` clauses (`repo:gorilla/mux lang:go NewRouter`). The
//! server's one substantive capability is completion: filter names from a
//! static grammar table, filter values from either fixed discrete sets or
//! a pluggable asynchronous suggestion source.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;

pub mod completion;
pub mod filters;
pub mod scan;
pub mod server;
pub mod suggest;
pub mod token;

use suggest::{StaticSuggestionSource, SuggestionSource};

/// File name looked up under the workspace root for a local suggestion
/// corpus.
pub const SUGGESTIONS_FILE: &str = "search-suggestions.json";

pub struct Backend {
    name: String,
    version: String,
    /// Maps a document URI to its current text.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// The active suggestion source. Swapped once at `initialized` time
    /// when a workspace corpus file exists; cloned out of the mutex before
    /// any fetch so no guard is held across an await.
    suggestions: Arc<Mutex<Arc<dyn SuggestionSource>>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            name: "SearchQLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            suggestions: Arc::new(Mutex::new(Arc::new(StaticSuggestionSource::default()))),
            client: Some(client),
        }
    }

    /// Backend without a client, for tests that drive the trait directly.
    pub fn new_test() -> Self {
        Self {
            name: "SearchQLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            suggestions: Arc::new(Mutex::new(Arc::new(StaticSuggestionSource::default()))),
            client: None,
        }
    }

    /// Backend with a caller-supplied suggestion source, for tests.
    pub fn new_test_with_source(source: Arc<dyn SuggestionSource>) -> Self {
        let backend = Self::new_test();
        backend.set_suggestion_source(source);
        backend
    }

    /// Replace the active suggestion source.
    pub fn set_suggestion_source(&self, source: Arc<dyn SuggestionSource>) {
        if let Ok(mut guard) = self.suggestions.lock() {
            *guard = source;
        }
    }

    /// Clone the active suggestion source out of its lock.
    pub(crate) fn suggestion_source(&self) -> Arc<dyn SuggestionSource> {
        self.suggestions
            .lock()
            .map(|guard| Arc::clone(&guard))
            .unwrap_or_else(|poisoned| Arc::clone(&poisoned.into_inner()))
    }

    /// Public helper for tests: get the stored text for a document URI.
    pub fn get_document(&self, uri: &str) -> Option<String> {
        if let Ok(files) = self.open_files.lock() {
            files.get(uri).cloned()
        } else {
            None
        }
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
