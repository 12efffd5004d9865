//! Named-placeholder prompt templates.
//!
//! `{name}` is replaced with the value bound to `name`; `{{` and `}}` render
//! as literal braces. A brace that does not open a well-formed placeholder
//! (e.g. the `{ "a": 1 }` of an inline JSON example) is copied through
//! unchanged.

use crate::error::{Result, StrategistError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        if pos > 0 {
            out.push(Segment::Text(&rest[..pos]));
        }
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push(Segment::Text(&tail[..1]));
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(name) = placeholder_name(&tail[1..]) {
                out.push(Segment::Placeholder(name));
                rest = &tail[name.len() + 2..];
                continue;
            }
        }

        out.push(Segment::Text(&tail[..1]));
        rest = &tail[1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

fn placeholder_name(after_brace: &str) -> Option<&str> {
    let end = after_brace.find('}')?;
    let name = &after_brace[..end];
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(name)
    } else {
        None
    }
}

/// Names referenced by a template, in order of first appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in segments(template) {
        if let Segment::Placeholder(name) = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Substitute every placeholder with its bound value.
///
/// A placeholder with no binding is a configuration error; bindings the
/// template never references are ignored.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());

    for segment in segments(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                let value = vars
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        StrategistError::configuration(format!(
                            "template placeholder {{{name}}} has no value"
                        ))
                    })?;
                out.push_str(value);
            }
        }
    }

    Ok(out)
}
