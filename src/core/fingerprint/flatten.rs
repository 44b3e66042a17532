//! Reduction of selector constructs to their default variant.
//!
//! Fingerprinting must not branch: translators may reorder, add or drop
//! non-default variants (plural forms, platform switches) without that
//! being a defect, so comparison always uses the canonical default-branch
//! rendering. The transform is expressed over the parsed AST: parse the
//! message, rewrite every select expression to keep only its default
//! variant (recursively), serialize back to text.
//!
//! A select expression with no default variant is a configuration error in
//! the message itself and is reported as such, never papered over.

use anyhow::{Result, anyhow};
use fluent_syntax::{ast, parser, serializer};

/// Marker that a raw message text contains a selector construct. Only such
/// messages pay for the parse/flatten/serialize round trip.
pub const SELECTOR_MARKER: &str = "*[";

/// Flatten all selector constructs in a raw message value to their default
/// variants and return the serialized text.
///
/// The value is wrapped in a synthetic message so it can be parsed as a
/// resource; the wrapper id ends up in the output, which is harmless since
/// reference and translation pass through the same wrapping. Parse errors
/// degrade: the recoverable part of the resource is used and junk is
/// dropped by the serializer.
pub fn flatten_message(text: &str) -> Result<String> {
    let source = format!("temp-id = {text}");
    let mut resource = match parser::parse(source) {
        Ok(resource) => resource,
        Err((partial, _errors)) => partial,
    };
    flatten_resource(&mut resource)?;
    Ok(serializer::serialize(&resource))
}

/// Keep only the default variant of every select expression in the
/// resource, recursively.
pub fn flatten_resource(resource: &mut ast::Resource<String>) -> Result<()> {
    for entry in &mut resource.body {
        match entry {
            ast::Entry::Message(message) => {
                if let Some(pattern) = &mut message.value {
                    flatten_pattern(pattern)?;
                }
                for attribute in &mut message.attributes {
                    flatten_pattern(&mut attribute.value)?;
                }
            }
            ast::Entry::Term(term) => {
                flatten_pattern(&mut term.value)?;
                for attribute in &mut term.attributes {
                    flatten_pattern(&mut attribute.value)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn flatten_pattern(pattern: &mut ast::Pattern<String>) -> Result<()> {
    for element in &mut pattern.elements {
        if let ast::PatternElement::Placeable { expression } = element {
            flatten_expression(expression)?;
        }
    }
    Ok(())
}

fn flatten_expression(expression: &mut ast::Expression<String>) -> Result<()> {
    match expression {
        ast::Expression::Select { variants, .. } => {
            let index = variants
                .iter()
                .position(|variant| variant.default)
                .ok_or_else(|| anyhow!("select expression has no default variant"))?;
            let mut default = variants.swap_remove(index);
            flatten_pattern(&mut default.value)?;
            *variants = vec![default];
            Ok(())
        }
        ast::Expression::Inline(inline) => {
            if let ast::InlineExpression::Placeable { expression } = inline {
                flatten_expression(expression)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_keeps_default_variant() {
        let text = "{ $count ->\n    [one] one <b>tab</b>\n   *[other] { $count } <b>tabs</b>\n }";
        let flattened = flatten_message(text).expect("flattens");
        assert!(flattened.contains("<b>tabs</b>"));
        assert!(!flattened.contains("<b>tab</b> "));
        assert!(!flattened.contains("[one]"));
    }

    #[test]
    fn test_flatten_recurses_into_nested_selects() {
        let text = "{ $a ->\n    [x] never\n   *[y] { $b ->\n        [p] inner\n       *[q] <i>deep</i>\n    }\n }";
        let flattened = flatten_message(text).expect("flattens");
        assert!(flattened.contains("<i>deep</i>"));
        assert!(!flattened.contains("inner"));
        assert!(!flattened.contains("never"));
    }

    #[test]
    fn test_no_default_variant_is_an_error() {
        // Hand-built AST: the parser itself rejects a select without a
        // default, but upstream tooling can produce one.
        let mut resource = match parser::parse("m = { $n ->\n   *[other] x\n }".to_string()) {
            Ok(resource) => resource,
            Err((partial, _)) => partial,
        };
        if let ast::Entry::Message(message) = &mut resource.body[0]
            && let Some(pattern) = &mut message.value
            && let ast::PatternElement::Placeable {
                expression: ast::Expression::Select { variants, .. },
            } = &mut pattern.elements[0]
        {
            variants[0].default = false;
        }
        assert!(flatten_resource(&mut resource).is_err());
    }

    #[test]
    fn test_plain_text_passes_through() {
        let flattened = flatten_message("no selector here").expect("flattens");
        assert_eq!(flattened, "temp-id = no selector here\n");
    }

    #[test]
    fn test_selector_marker() {
        assert!("{ $n ->\n   *[other] x\n }".contains(SELECTOR_MARKER));
        assert!(!"plain".contains(SELECTOR_MARKER));
    }
}
