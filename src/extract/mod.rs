//! Template variable extraction.
//!
//! This module scans prompt template text for the user-defined variables it
//! references, for use in building a "fill in these variables" form. Two kinds
//! of expression contribute names:
//!
//! - **Interpolation expressions**: `{{ user.name }}`, optionally with a
//!   filter tail (`{{ user.name | upper }}`) that is ignored for extraction.
//! - **Statement expressions**: `{% if ... %}`, `{% elif ... %}`,
//!   `{% for x in ... %}` and `{% set x = ... %}`, whose bodies are scanned
//!   for identifiers after string literals are stripped and template keywords
//!   are excluded.
//!
//! Reserved placeholder tokens (such as `{{#context#}}`) carry special meaning
//! to the host application and are never reported as variables.
//!
//! # Examples
//!
//! ```rust
//! use prompt_vars::extract::VariableExtractor;
//!
//! let extractor = VariableExtractor::new();
//! let vars = extractor.extract("{% if urgent %}[URGENT] {% endif %}{{ subject }}");
//! assert_eq!(vars, vec!["urgent", "subject"]);
//! ```

pub mod config;
pub mod extractors;

pub use self::config::{
    DEFAULT_MAX_NAME_LENGTH, ExtractorConfig, RESERVED_PLACEHOLDERS, TEMPLATE_KEYWORDS,
};
pub use self::extractors::VariableExtractor;
