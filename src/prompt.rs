//! Rendering prompt templates against variable bindings.

use std::collections::BTreeMap;

use minijinja::Environment;
use serde::Serialize;

use crate::extract::VariableExtractor;
use crate::metadata::Metadata;

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The template references variables with no binding. Names are listed in
    /// extraction order.
    #[error("missing values for template variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    /// The template engine rejected the template or its context.
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders a prompt from a template string and a serializable context.
///
/// # Example
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     name: &'static str,
/// }
///
/// let rendered = prompt_vars::render_prompt(
///     "Hello {{ user.name }}!",
///     minijinja::context! { user => User { name: "Mai" } },
/// ).unwrap();
/// assert_eq!(rendered, "Hello Mai!");
/// ```
pub fn render_prompt<T: Serialize>(template: &str, context: T) -> Result<String, RenderError> {
    let mut env = Environment::new();
    env.add_template("prompt", template)?;
    let tmpl = env.get_template("prompt")?;
    Ok(tmpl.render(context)?)
}

/// Renders a template against flat string bindings, as collected from a
/// variable-binding form.
///
/// Every variable the `extractor` finds in `template` must have a binding
/// under its full extracted name (`user.name` binds under the key
/// `"user.name"`); otherwise [`RenderError::MissingVariables`] lists the
/// unbound names. Dotted names are nested into a structured context before
/// rendering, so `{{ user.name }}` resolves as expected.
pub fn render_with_bindings(
    extractor: &VariableExtractor,
    template: &str,
    bindings: &Metadata,
) -> Result<String, RenderError> {
    let missing: Vec<String> = extractor
        .extract(template)
        .into_iter()
        .filter(|name| !bindings.contains_key(name))
        .collect();
    if !missing.is_empty() {
        return Err(RenderError::MissingVariables(missing));
    }

    let mut context = BTreeMap::new();
    for (key, value) in bindings.iter() {
        insert_path(&mut context, key, value);
    }
    render_prompt(template, &context)
}

/// A rendering context node assembled from flat dotted bindings.
#[derive(Serialize)]
#[serde(untagged)]
enum ContextNode {
    Leaf(String),
    Branch(BTreeMap<String, ContextNode>),
}

fn insert_path(nodes: &mut BTreeMap<String, ContextNode>, path: &str, value: &str) {
    match path.split_once('.') {
        None => {
            nodes.insert(path.to_string(), ContextNode::Leaf(value.to_string()));
        }
        Some((head, rest)) => {
            let entry = nodes
                .entry(head.to_string())
                .or_insert_with(|| ContextNode::Branch(BTreeMap::new()));
            // A leaf binding under the same head gives way to the branch.
            if matches!(entry, ContextNode::Leaf(_)) {
                *entry = ContextNode::Branch(BTreeMap::new());
            }
            if let ContextNode::Branch(children) = entry {
                insert_path(children, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_basic() {
        let rendered = render_prompt(
            "Hi {{ name }}",
            minijinja::context! { name => "Yui" },
        )
        .unwrap();
        assert_eq!(rendered, "Hi Yui");
    }

    #[test]
    fn test_render_with_flat_bindings() {
        let extractor = VariableExtractor::new();
        let bindings = Metadata::from_pairs([("name", "Yui"), ("topic", "macros")]);
        let rendered =
            render_with_bindings(&extractor, "{{ name }} re: {{ topic }}", &bindings).unwrap();
        assert_eq!(rendered, "Yui re: macros");
    }

    #[test]
    fn test_render_nests_dotted_bindings() {
        let extractor = VariableExtractor::new();
        let bindings = Metadata::from_pairs([("user.name", "Mai"), ("user.role", "UX")]);
        let rendered = render_with_bindings(
            &extractor,
            "{{ user.name }} ({{ user.role }})",
            &bindings,
        )
        .unwrap();
        assert_eq!(rendered, "Mai (UX)");
    }

    #[test]
    fn test_render_with_conditional() {
        let extractor = VariableExtractor::new();
        let bindings = Metadata::from_pairs([("urgent", "yes"), ("subject", "renewal")]);
        let rendered = render_with_bindings(
            &extractor,
            "{% if urgent %}[URGENT] {% endif %}{{ subject }}",
            &bindings,
        )
        .unwrap();
        assert_eq!(rendered, "[URGENT] renewal");
    }

    #[test]
    fn test_missing_bindings_are_reported_in_order() {
        let extractor = VariableExtractor::new();
        let bindings = Metadata::from_pairs([("b", "bound")]);
        let err = render_with_bindings(&extractor, "{{ a }}{{ b }}{{ c }}", &bindings)
            .unwrap_err();
        match err {
            RenderError::MissingVariables(names) => assert_eq!(names, vec!["a", "c"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_template_is_a_template_error() {
        let err = render_prompt("{% if %}", minijinja::context! {}).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }
}
