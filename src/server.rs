//! LSP server trait implementation.
//!
//! This module contains the `impl LanguageServer for Backend` block, which
//! handles all LSP protocol messages (initialize, didOpen, didChange,
//! didClose, completion). Query documents are single-line; the line the
//! caret sits on is tokenized and handed to the completion resolver.

use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tracing::{error, warn};

use crate::completion::resolver::{self, ResolveError};
use crate::scan;
use crate::suggest::StaticSuggestionSource;
use crate::{Backend, SUGGESTIONS_FILE};

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract and store the workspace root path
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());

        if let Some(root) = workspace_root
            && let Ok(mut wr) = self.workspace_root.lock()
        {
            *wr = Some(root);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![":".to_string(), "-".to_string()]),
                    all_commit_characters: None,
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: None,
                    },
                    completion_item: None,
                }),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        // Load a workspace-local suggestion corpus if one exists.
        let workspace_root = self
            .workspace_root
            .lock()
            .ok()
            .and_then(|guard| guard.clone());

        if let Some(root) = workspace_root {
            let path = root.join(SUGGESTIONS_FILE);
            if path.is_file() {
                match StaticSuggestionSource::from_file(&path) {
                    Ok(source) => {
                        let count = source.len();
                        self.set_suggestion_source(std::sync::Arc::new(source));
                        self.log(
                            MessageType::INFO,
                            format!(
                                "SearchQLSP initialized! Loaded {} suggestion record(s) from {}",
                                count, SUGGESTIONS_FILE
                            ),
                        )
                        .await;
                        return;
                    }
                    Err(err) => {
                        warn!(%err, "failed to load workspace suggestion corpus");
                        self.log(
                            MessageType::WARNING,
                            format!("Could not load {}: {}", SUGGESTIONS_FILE, err),
                        )
                        .await;
                    }
                }
            }
        }

        self.log(MessageType::INFO, "SearchQLSP initialized!".to_string())
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();

        if let Ok(mut files) = self.open_files.lock() {
            files.insert(uri.clone(), doc.text);
        }

        self.log(MessageType::INFO, format!("Opened query: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        if let Some(change) = params.content_changes.first()
            && let Ok(mut files) = self.open_files.lock()
        {
            files.insert(uri, change.text.clone());
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        if let Ok(mut files) = self.open_files.lock() {
            files.remove(&uri);
        }

        self.log(MessageType::INFO, format!("Closed query: {}", uri))
            .await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri.to_string();
        let position = params.text_document_position.position;

        let content = if let Ok(files) = self.open_files.lock() {
            files.get(&uri).cloned()
        } else {
            None
        };
        let Some(content) = content else {
            return Ok(None);
        };

        // Queries are one line; complete within the line the caret is on.
        // An empty document still completes (column 1 offers every filter).
        let line = content.lines().nth(position.line as usize).unwrap_or("");

        let tokens = scan::scan_query(line);
        // LSP positions are 0-based; the resolver speaks 1-based editor
        // columns.
        let column = position.character + 1;
        let source = self.suggestion_source();

        match resolver::resolve(line, &tokens, column, source.as_ref()).await {
            Ok(Some(list)) => Ok(Some(CompletionResponse::List(list))),
            Ok(None) => Ok(None),
            Err(err @ ResolveError::NoTokenAtColumn { .. }) => {
                // Tokens cover the whole line, so this is a caret/token
                // desynchronization; report it instead of returning an
                // empty result.
                error!(%err, %uri, "completion contract violation");
                Err(Error::invalid_params(err.to_string()))
            }
            Err(ResolveError::Fetch(err)) => {
                error!(%err, %uri, "suggestion fetch failed");
                Err(Error {
                    code: tower_lsp::jsonrpc::ErrorCode::InternalError,
                    message: err.to_string().into(),
                    data: None,
                })
            }
        }
    }
}
