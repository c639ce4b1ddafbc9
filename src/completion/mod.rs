/// Completion-related modules.
///
/// This sub-module groups all completion logic:
/// - **builder**: Constructing LSP `CompletionItem`s from the filter
///   grammar and from fetched suggestion records
/// - **resolver**: Deciding the completion mode for a caret position and
///   merging static and dynamic candidates into one ordered list
pub mod builder;
pub mod resolver;
