//! Static filter grammar.
//!
//! The table of recognized search filters: their aliases, a human-readable
//! description shown as completion detail, and how their values are
//! completed — either a dynamic suggestion category served by the active
//! [`crate::suggest::SuggestionSource`], or a fixed list of discrete values.
//!
//! The table is immutable, read-only configuration; the resolver only ever
//! looks definitions up by alias.

use crate::suggest::SuggestionCategory;

/// Definition of a single search filter.
#[derive(Debug, Clone, Copy)]
pub struct FilterDefinition {
    /// All names this filter answers to (e.g. `repo` and `r`).
    pub aliases: &'static [&'static str],
    /// Shown as completion detail next to the filter name.
    pub description: &'static str,
    /// Which suggestion-record kind fills this filter's values, when
    /// values are fetched dynamically.
    pub suggestions: Option<SuggestionCategory>,
    /// Fixed value set, when the filter takes one of a few known values.
    pub discrete_values: Option<&'static [&'static str]>,
}

/// All recognized filters, in display order.
pub const FILTERS: &[FilterDefinition] = &[
    FilterDefinition {
        aliases: &["repo", "r"],
        description: "Include only results from repositories matching the given regex pattern",
        suggestions: Some(SuggestionCategory::Repository),
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["repogroup", "g"],
        description: "Include only results from the named group of repositories",
        suggestions: None,
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["file", "f"],
        description: "Include only results from file paths matching the given regex pattern",
        suggestions: Some(SuggestionCategory::File),
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["repohasfile"],
        description: "Include only results from repositories containing a matching file path",
        suggestions: None,
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["repohascommitafter"],
        description: "Include only repositories with a commit after the given date",
        suggestions: None,
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["type"],
        description: "Limit results to the given search type",
        suggestions: None,
        discrete_values: Some(&["code", "diff", "commit", "symbol"]),
    },
    FilterDefinition {
        aliases: &["case"],
        description: "Match case sensitively",
        suggestions: None,
        discrete_values: Some(&["yes", "no"]),
    },
    FilterDefinition {
        aliases: &["lang", "l", "language"],
        description: "Include only results from files in the given language",
        suggestions: Some(SuggestionCategory::Language),
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["fork"],
        description: "Include results from forked repositories",
        suggestions: None,
        discrete_values: Some(&["yes", "no", "only"]),
    },
    FilterDefinition {
        aliases: &["archived"],
        description: "Include results from archived repositories",
        suggestions: None,
        discrete_values: Some(&["yes", "no", "only"]),
    },
    FilterDefinition {
        aliases: &["count"],
        description: "Maximum number of results to fetch",
        suggestions: None,
        discrete_values: None,
    },
    FilterDefinition {
        aliases: &["timeout"],
        description: "Duration before the search times out (e.g. 10s)",
        suggestions: None,
        discrete_values: None,
    },
];

/// Look up a filter definition by name.
///
/// Matching is case-insensitive and tolerates a leading `-` (negated
/// filters complete the same way as their positive form).
pub fn filter_definition(name: &str) -> Option<&'static FilterDefinition> {
    let name = name.strip_prefix('-').unwrap_or(name);
    FILTERS
        .iter()
        .find(|def| def.aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_primary_alias() {
        let def = filter_definition("repo").expect("repo should be defined");
        assert_eq!(def.suggestions, Some(SuggestionCategory::Repository));
    }

    #[test]
    fn lookup_by_short_alias() {
        let def = filter_definition("l").expect("l should alias lang");
        assert_eq!(def.suggestions, Some(SuggestionCategory::Language));
    }

    #[test]
    fn lookup_is_case_insensitive_and_negation_tolerant() {
        assert!(filter_definition("Repo").is_some());
        assert!(filter_definition("-file").is_some());
    }

    #[test]
    fn lookup_unknown_filter() {
        assert!(filter_definition("frobnicate").is_none());
    }

    #[test]
    fn discrete_values_preserve_declaration_order() {
        let def = filter_definition("fork").unwrap();
        assert_eq!(def.discrete_values, Some(&["yes", "no", "only"][..]));
    }
}
