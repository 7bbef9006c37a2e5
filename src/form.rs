use serde::{Deserialize, Serialize};

use crate::dom::Element;

/// Tags that count as form controls for the validity check.
pub const CONTROL_TAGS: &[&str] = &["input", "textarea", "select", "button"];

/// Tags whose edits trigger re-derivation.
pub const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];

const NON_SUCCESSFUL_INPUT_TYPES: &[&str] = &["submit", "button", "image", "reset", "file"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
}

impl FieldEntry {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

pub fn is_control(el: &Element) -> bool {
    CONTROL_TAGS.iter().any(|t| el.is(t))
}

fn is_checkable(el: &Element) -> bool {
    el.is("input") && matches!(el.input_type().as_str(), "checkbox" | "radio")
}

pub fn option_value(opt: &Element) -> String {
    opt.attr("value")
        .map(str::to_string)
        .or_else(|| opt.text.as_deref().map(|t| t.trim().to_string()))
        .unwrap_or_default()
}

pub fn options(select: &Element) -> impl Iterator<Item = &Element> {
    select.children.iter().flat_map(|c| {
        if c.is("optgroup") {
            c.children.iter().filter(|o| o.is("option")).collect::<Vec<_>>()
        } else if c.is("option") {
            vec![c]
        } else {
            Vec::new()
        }
    })
}

fn selected_values(select: &Element) -> Vec<String> {
    let chosen: Vec<String> = options(select)
        .filter(|o| o.checked && !o.disabled)
        .map(option_value)
        .collect();
    if !chosen.is_empty() || select.has_attr("multiple") {
        return if select.has_attr("multiple") {
            chosen
        } else {
            chosen.into_iter().last().into_iter().collect()
        };
    }
    options(select).next().map(option_value).into_iter().collect()
}

/// Current value of any control, as a host's `value` property would report it.
///
/// Multi-selects report their selected values comma-joined; checkbox/radio inputs
/// without an explicit value report `on`.
pub fn control_value(el: &Element) -> String {
    if el.is("select") {
        return selected_values(el).join(",");
    }
    if let Some(v) = el.value.as_deref().or_else(|| el.attr("value")) {
        return v.to_string();
    }
    if el.is("textarea") {
        return el.text.clone().unwrap_or_default();
    }
    if is_checkable(el) {
        return "on".to_string();
    }
    String::new()
}

fn normalize_line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}

fn is_successful(el: &Element) -> bool {
    if el.name().is_none() || el.disabled || el.is("button") {
        return false;
    }
    if el.is("input") {
        let ty = el.input_type();
        if NON_SUCCESSFUL_INPUT_TYPES.contains(&ty.as_str()) {
            return false;
        }
        if is_checkable(el) && !el.checked {
            return false;
        }
    }
    FIELD_TAGS.iter().any(|t| el.is(t))
}

fn collect(el: &Element, in_disabled_fieldset: bool, out: &mut Vec<FieldEntry>) {
    if is_control(el) {
        if in_disabled_fieldset || !is_successful(el) {
            return;
        }
        let name = el.name().unwrap_or_default();
        let values = if el.is("select") {
            selected_values(el)
        } else {
            vec![control_value(el)]
        };
        out.extend(values.iter().map(|v| FieldEntry {
            name: name.to_string(),
            value: normalize_line_breaks(v),
        }));
        return;
    }
    let disabled = in_disabled_fieldset || (el.is("fieldset") && el.disabled);
    for child in &el.children {
        collect(child, disabled, out);
    }
}

/// Snapshot the successful controls under `scope` in document order.
///
/// Follows native form serialization: unnamed, disabled, unchecked checkable and
/// button-like controls are skipped.
pub fn serialize_fields(scope: &Element) -> Vec<FieldEntry> {
    let mut out = Vec::new();
    collect(scope, false, &mut out);
    out
}
