/// Reserved interpolation expressions with special meaning to the host
/// application. These are compared against the full bracketed text of a match,
/// so `{{#context#}}` is reserved while `{{ context }}` is an ordinary
/// variable named `context`.
pub const RESERVED_PLACEHOLDERS: [&str; 4] = [
    "{{#context#}}",
    "{{#history#}}",
    "{{#query#}}",
    "{{#pre_prompt#}}",
];

/// Reserved words of the template mini-language. Identifiers matching one of
/// these (case-insensitively) are never extracted from statement bodies.
pub const TEMPLATE_KEYWORDS: [&str; 16] = [
    "and", "or", "not", "is", "in", "true", "false", "none", "for", "if", "else", "elif", "endif",
    "endfor", "set", "range",
];

/// Default upper bound on the length of an extracted variable name.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 64;

/// Configuration for variable extraction.
///
/// Passed to [`VariableExtractor`](super::VariableExtractor) at construction
/// time; there is no process-global configuration.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Full-token reserved placeholder expressions to exclude.
    pub reserved_placeholders: Vec<String>,

    /// Candidates longer than this are discarded.
    pub max_name_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            reserved_placeholders: RESERVED_PLACEHOLDERS.iter().map(|p| p.to_string()).collect(),
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl ExtractorConfig {
    /// Replace the reserved placeholder set.
    pub fn with_reserved_placeholders<I, S>(mut self, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_placeholders = placeholders.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the maximum variable name length.
    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.reserved_placeholders.len(), 4);
        assert_eq!(config.max_name_length, DEFAULT_MAX_NAME_LENGTH);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ExtractorConfig::default()
            .with_reserved_placeholders(["{{#memory#}}"])
            .with_max_name_length(8);
        assert_eq!(config.reserved_placeholders, vec!["{{#memory#}}"]);
        assert_eq!(config.max_name_length, 8);
    }
}
