//! Suggestion records and the source boundary.
//!
//! A [`SuggestionSource`] takes the full raw query and returns an ordered
//! list of typed [`Suggestion`] records. The resolver classifies and maps
//! them; it never fetches anything itself beyond this one call per
//! resolution. [`StaticSuggestionSource`] is the built-in implementation,
//! deserialized from a workspace JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A suggestion record returned by a source.
///
/// The wire shape is tagged on `type`, e.g.
/// `{"type": "Repository", "name": "github.com/gorilla/mux"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Suggestion {
    Repository {
        name: String,
    },
    File {
        name: String,
        path: String,
        repository: String,
        #[serde(default, rename = "isDirectory")]
        is_directory: bool,
    },
    Symbol {
        name: String,
        kind: SymbolKind,
        repository: String,
    },
    Language {
        name: String,
    },
}

impl Suggestion {
    pub fn category(&self) -> SuggestionCategory {
        match self {
            Suggestion::Repository { .. } => SuggestionCategory::Repository,
            Suggestion::File { .. } => SuggestionCategory::File,
            Suggestion::Symbol { .. } => SuggestionCategory::Symbol,
            Suggestion::Language { .. } => SuggestionCategory::Language,
        }
    }
}

/// The kind tag of a [`Suggestion`], used by filter definitions to say
/// which records fill a filter's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionCategory {
    Repository,
    File,
    Symbol,
    Language,
}

/// Symbol kinds as reported by the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SymbolKind {
    Unknown,
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
}

impl SymbolKind {
    /// Human-readable label used in completion detail text.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Unknown => "Unknown",
            SymbolKind::File => "File",
            SymbolKind::Module => "Module",
            SymbolKind::Namespace => "Namespace",
            SymbolKind::Package => "Package",
            SymbolKind::Class => "Class",
            SymbolKind::Method => "Method",
            SymbolKind::Property => "Property",
            SymbolKind::Field => "Field",
            SymbolKind::Constructor => "Constructor",
            SymbolKind::Enum => "Enum",
            SymbolKind::Interface => "Interface",
            SymbolKind::Function => "Function",
            SymbolKind::Variable => "Variable",
            SymbolKind::Constant => "Constant",
            SymbolKind::String => "String",
            SymbolKind::Number => "Number",
            SymbolKind::Boolean => "Boolean",
            SymbolKind::Array => "Array",
            SymbolKind::Object => "Object",
            SymbolKind::Key => "Key",
            SymbolKind::Null => "Null",
            SymbolKind::EnumMember => "Enum member",
            SymbolKind::Struct => "Struct",
            SymbolKind::Event => "Event",
            SymbolKind::Operator => "Operator",
            SymbolKind::TypeParameter => "Type parameter",
        }
    }
}

/// Failure to produce suggestions.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("failed to read suggestion corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse suggestion corpus: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("suggestion source unavailable: {0}")]
    Unavailable(String),
}

/// The injected fetcher: full raw query in, ordered suggestion records out.
///
/// Implementations receive the whole query, not the sub-token being
/// completed; narrowing to the focused token is theirs to do (or to skip,
/// as the static source does). Errors propagate to the completion caller
/// unmodified; the resolver performs no retries and builds no partial
/// results on failure.
#[tower_lsp::async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, SuggestionError>;
}

/// In-memory suggestion source backed by a fixed record list.
///
/// The server loads one from `search-suggestions.json` under the workspace
/// root at `initialized` time. It ignores the query and returns the whole
/// corpus; client-side fuzzy filtering narrows the list as the user types.
#[derive(Debug, Default, Clone)]
pub struct StaticSuggestionSource {
    records: Vec<Suggestion>,
}

impl StaticSuggestionSource {
    pub fn new(records: Vec<Suggestion>) -> Self {
        Self { records }
    }

    /// Load a corpus from a JSON file containing an array of records.
    pub fn from_file(path: &Path) -> Result<Self, SuggestionError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<Suggestion> = serde_json::from_str(&content)?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[tower_lsp::async_trait]
impl SuggestionSource for StaticSuggestionSource {
    async fn fetch(&self, _query: &str) -> Result<Vec<Suggestion>, SuggestionError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_wire_shape_round_trips() {
        let json = r#"[
            {"type": "Repository", "name": "github.com/gorilla/mux"},
            {"type": "File", "name": "mux.go", "path": "mux.go",
             "repository": "github.com/gorilla/mux"},
            {"type": "Symbol", "name": "NewRouter", "kind": "FUNCTION",
             "repository": "github.com/gorilla/mux"},
            {"type": "Language", "name": "go"}
        ]"#;
        let records: Vec<Suggestion> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].category(), SuggestionCategory::Repository);
        assert!(matches!(
            &records[1],
            Suggestion::File { is_directory, .. } if !is_directory
        ));
        assert!(matches!(
            &records[2],
            Suggestion::Symbol {
                kind: SymbolKind::Function,
                ..
            }
        ));
    }

    #[test]
    fn enummember_kind_parses() {
        let json = r#"{"type": "Symbol", "name": "Red", "kind": "ENUMMEMBER",
                       "repository": "r"}"#;
        let record: Suggestion = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record,
            Suggestion::Symbol {
                kind: SymbolKind::EnumMember,
                ..
            }
        ));
    }
}
