use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::config::{ExtractorConfig, TEMPLATE_KEYWORDS};

/// Matches an interpolation expression: `{{ user.name }}`, optionally with a
/// filter tail (`{{ user.name | upper }}`). The identifier capture also admits
/// a leading/trailing `#` so that reserved placeholder tokens like
/// `{{#context#}}` are matched and can be compared against the reserved set;
/// such candidates are rejected later by the strict identifier check.
static INTERPOLATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{\{\s*(#?[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*#?)\s*(?:\|[^}]*)?\}\}",
    )
    .expect("interpolation pattern is valid")
});

/// Matches a statement expression whose body can reference variables:
/// `{% if ... %}`, `{% elif ... %}`, `{% for x in ... %}`, `{% set x = ... %}`.
/// Closing statements like `{% endif %}` are intentionally not matched.
static STATEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{%\s*((?:(?:if|elif)\b|for\s+[a-zA-Z_][a-zA-Z0-9_]*\s+in\b|set\s+[a-zA-Z_][a-zA-Z0-9_]*\s*=)[^%]*?)\s*%\}",
    )
    .expect("statement pattern is valid")
});

/// Single- or double-quoted string literals inside a statement body.
static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'[^']*'|"[^"]*""#).expect("string literal pattern is valid"));

/// An identifier-path token: dot-separated identifier segments.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*")
        .expect("token pattern is valid")
});

/// Full-match validation of an interpolation candidate as an identifier path.
static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*$")
        .expect("identifier pattern is valid")
});

/// A matched expression span, tagged by kind.
enum Expression<'a> {
    /// `{{ ... }}`: the full bracketed text and the captured identifier path.
    Interpolation { full: &'a str, path: &'a str },
    /// `{% ... %}`: the captured statement body, leading keyword included.
    Statement { body: &'a str },
}

/// Extracts the distinct variable names referenced by a prompt template.
///
/// The extractor is pure and stateless across calls: it holds only its
/// configuration, performs no I/O, and never fails. Malformed or unterminated
/// expressions simply yield no match, which suits live-typing scenarios where
/// the template is frequently in a transiently invalid state.
pub struct VariableExtractor {
    config: ExtractorConfig,
    debug_mode: bool,
}

impl VariableExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create an extractor with an explicit configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            debug_mode: false,
        }
    }

    /// Enable debug logging of skipped candidates.
    pub fn with_debug(mut self) -> Self {
        self.debug_mode = true;
        self
    }

    /// The configuration this extractor was built with.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scan `template` and return the distinct variable names it references,
    /// in first-occurrence order.
    pub fn extract(&self, template: &str) -> Vec<String> {
        let mut expressions: Vec<(usize, Expression)> = Vec::new();

        for caps in INTERPOLATION_RE.captures_iter(template) {
            let full = caps.get(0).map(|m| (m.start(), m.as_str()));
            let path = caps.get(1).map(|m| m.as_str());
            if let (Some((start, full)), Some(path)) = (full, path) {
                expressions.push((start, Expression::Interpolation { full, path }));
            }
        }
        for caps in STATEMENT_RE.captures_iter(template) {
            let start = caps.get(0).map(|m| m.start());
            let body = caps.get(1).map(|m| m.as_str());
            if let (Some(start), Some(body)) = (start, body) {
                expressions.push((start, Expression::Statement { body }));
            }
        }

        // First occurrence in the template decides output order, regardless
        // of expression kind.
        expressions.sort_by_key(|(start, _)| *start);

        let mut names = Vec::new();
        let mut seen = HashSet::new();
        for (_, expression) in expressions {
            match expression {
                Expression::Interpolation { full, path } => {
                    self.collect_interpolation(full, path, &mut names, &mut seen);
                }
                Expression::Statement { body } => {
                    self.collect_statement_body(body, &mut names, &mut seen);
                }
            }
        }
        names
    }

    fn collect_interpolation(
        &self,
        full: &str,
        path: &str,
        names: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) {
        // Reserved placeholders are compared against the full bracketed text,
        // not the inner identifier.
        if self.config.reserved_placeholders.iter().any(|p| p == full) {
            if self.debug_mode {
                debug!("skipping reserved placeholder: {full}");
            }
            return;
        }
        if !IDENT_RE.is_match(path) {
            return;
        }
        if path.len() > self.config.max_name_length {
            if self.debug_mode {
                debug!("skipping over-long variable name: {path}");
            }
            return;
        }
        push_unique(names, seen, path);
    }

    fn collect_statement_body(
        &self,
        body: &str,
        names: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) {
        // Strip quoted string literals first so their contents are not
        // mistaken for identifiers.
        let stripped = STRING_LITERAL_RE.replace_all(body, " ");
        for token in TOKEN_RE.find_iter(&stripped) {
            let token = token.as_str();
            if is_keyword(token) {
                continue;
            }
            if token.len() > self.config.max_name_length {
                if self.debug_mode {
                    debug!("skipping over-long variable name: {token}");
                }
                continue;
            }
            push_unique(names, seen, token);
        }
    }
}

impl Default for VariableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword comparison is case-insensitive: `{% if NOT x %}` excludes `NOT`.
fn is_keyword(token: &str) -> bool {
    TEMPLATE_KEYWORDS.iter().any(|k| token.eq_ignore_ascii_case(k))
}

fn push_unique(names: &mut Vec<String>, seen: &mut HashSet<String>, candidate: &str) {
    if seen.insert(candidate.to_string()) {
        names.push(candidate.to_string());
    }
}
