//! `prompt-vars` - utilities for working with LLM prompt template variables.
//!
//! Prompt templates mix free-form text with `{{ variable }}` interpolation
//! expressions and `{% if ... %}`-style statement expressions. Before such a
//! template can be rendered, an application needs to know which user-defined
//! variables it references, collect a value for each one, and then substitute
//! them in. This crate provides each of those steps as a small, sharp tool:
//!
//! - [`extract`]: scan a template for the distinct variable names it
//!   references, excluding reserved placeholder tokens and template keywords.
//! - [`metadata`]: an immutable string key/value mapping for holding collected
//!   variable values or arbitrary prompt metadata.
//! - [`prompt`]: render a template against a set of bindings, reporting any
//!   variables that are still missing a value.

pub mod extract;
pub mod metadata;
pub mod prompt;

pub use extract::{ExtractorConfig, VariableExtractor};
pub use metadata::Metadata;
pub use prompt::{RenderError, render_prompt, render_with_bindings};

/// Extracts the distinct user-defined variable names referenced by a template.
///
/// This function scans with the default configuration (standard reserved
/// placeholder tokens, default maximum name length). For control over either,
/// see [`extract::VariableExtractor`].
///
/// Names are returned in first-occurrence order, left to right across the
/// template, with duplicates collapsed. Malformed expressions are skipped
/// rather than reported; the scan never fails.
///
/// # Example
///
/// ```
/// let vars = prompt_vars::extract_variables("Hello {{ user.name }}, re: {{ topic }}");
/// assert_eq!(vars, vec!["user.name", "topic"]);
/// ```
pub fn extract_variables(template: &str) -> Vec<String> {
    let extractor = VariableExtractor::new();
    extractor.extract(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_variables_plain_text() {
        assert!(extract_variables("no expressions here").is_empty());
    }

    #[test]
    fn test_extract_variables_mixed_expressions() {
        let template = "{% if is_admin %}{{ admin.name }}{% endif %}";
        assert_eq!(extract_variables(template), vec!["is_admin", "admin.name"]);
    }

    #[test]
    fn test_extract_variables_is_idempotent() {
        let template = "{{ a }} and {{ b.c }}";
        assert_eq!(extract_variables(template), extract_variables(template));
    }
}
