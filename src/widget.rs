use std::time::Duration;

use chrono::NaiveDate;

use crate::clipboard::{Clipboard, CopyEvent};
use crate::config::{OptionsLayer, ValidateOn, WidgetConfig};
use crate::derive;
use crate::dom::{Element, NodePath};
use crate::events::{HandlerRegistry, TriggerKind, WidgetEvent};
use crate::form::{self, CONTROL_TAGS, FIELD_TAGS};

pub const OUTPUT_AREA_ATTR: &str = "data-output-area";
pub const SUCCESS_MSG_ATTR: &str = "data-success-msg";
pub const FORM_ATTR: &str = "data-form";
/// Attribute the clipboard action reads at copy time.
pub const COPY_SOURCE_ATTR: &str = "data-clipboard-text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Copied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Fast,
    Normal,
}

impl Fade {
    pub fn duration(self) -> Duration {
        match self {
            Fade::Fast => Duration::from_millis(200),
            Fade::Normal => Duration::from_millis(400),
        }
    }
}

/// Derives a branch name from the form inside one container and keeps it in
/// the container's output element.
#[derive(Debug)]
pub struct BranchNameWidget {
    container: Element,
    config: WidgetConfig,
    inputs: Vec<NodePath>,
    output_area: Vec<NodePath>,
    success_msg: Vec<NodePath>,
    form_scope: Vec<NodePath>,
    handlers: HandlerRegistry,
    copy_targets: Vec<NodePath>,
    pointer_leave_bound: bool,
    selection: Option<NodePath>,
    date: Option<NaiveDate>,
    render_count: u64,
}

impl BranchNameWidget {
    pub fn new(container: Element, explicit: &OptionsLayer) -> Self {
        let data = OptionsLayer::from_data_attributes(&container.attrs);
        let config = WidgetConfig::resolve(&data, explicit);

        let inputs = container.find_by_tags(FIELD_TAGS);
        let output_area = container.find_by_attr(OUTPUT_AREA_ATTR);
        let success_msg = container.find_by_attr(SUCCESS_MSG_ATTR);
        let form_scope = container.find_by_attr(FORM_ATTR);
        tracing::debug!(
            inputs = inputs.len(),
            outputs = output_area.len(),
            forms = form_scope.len(),
            validate_on = config.validate_on.as_str(),
            live_validate = config.live_validate,
            validate_on_blur = config.validate_on_blur,
            "mounting branch name widget"
        );

        let mut widget = Self {
            container,
            config,
            inputs,
            output_area,
            success_msg,
            form_scope,
            handlers: HandlerRegistry::default(),
            copy_targets: Vec::new(),
            pointer_leave_bound: false,
            selection: None,
            date: None,
            render_count: 0,
        };
        widget.bind_events();
        widget.render_output();
        widget
    }

    /// Pin the date used for hotfix stamps and re-render.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self.render_output();
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[NodePath] {
        &self.inputs
    }

    pub fn control(&self, path: &NodePath) -> Option<&Element> {
        self.container.get(path)
    }

    pub fn controls_named(&self, name: &str) -> Vec<NodePath> {
        self.inputs
            .iter()
            .filter(|p| self.container.get(p).and_then(Element::name) == Some(name))
            .cloned()
            .collect()
    }

    /// Safe to call repeatedly: each trigger kind keeps a single handler.
    pub fn bind_events(&mut self) {
        self.copy_targets = self.output_area.clone();

        if self.config.validate_on == ValidateOn::FieldChange {
            self.handlers.bind(TriggerKind::Change, self.inputs.clone());
        }
        if self.config.live_validate {
            self.handlers.bind(TriggerKind::Input, self.inputs.clone());
        }
        if self.config.validate_on_blur {
            self.handlers.bind(TriggerKind::Blur, self.inputs.clone());
        }

        self.pointer_leave_bound = true;
    }

    /// Returns whether the event caused a re-render.
    pub fn handle(&mut self, event: &WidgetEvent) -> bool {
        match event {
            WidgetEvent::Field { kind, target } => {
                if !self.handlers.handles(*kind, target) {
                    return false;
                }
                tracing::trace!(kind = kind.as_str(), %target, "field event");
                self.render_output();
                true
            }
            WidgetEvent::PointerLeave => {
                if self.pointer_leave_bound && self.success_visible() {
                    self.fade_out(Fade::Fast);
                }
                false
            }
            WidgetEvent::FadeComplete => {
                if self.success_visible() {
                    self.fade_out(Fade::Normal);
                }
                false
            }
        }
    }

    pub fn process(&self) -> String {
        let fields: Vec<form::FieldEntry> = self
            .form_scope
            .iter()
            .filter_map(|p| self.container.get(p))
            .flat_map(form::serialize_fields)
            .collect();
        let date = self.date.unwrap_or_else(derive::today);
        derive::derive_branch_name(&fields, date)
    }

    pub fn render_output(&mut self) {
        let output = self.process();
        for path in &self.output_area {
            if let Some(el) = self.container.get_mut(path) {
                el.text = Some(output.clone());
                el.attrs.insert(COPY_SOURCE_ATTR.to_string(), output.clone());
            }
        }
        self.render_count += 1;
        tracing::debug!(branch = %output, renders = self.render_count, "rendered output");
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn output_text(&self) -> Option<&str> {
        self.output_area
            .first()
            .and_then(|p| self.container.get(p))
            .and_then(|e| e.text.as_deref())
    }

    pub fn copy_source(&self) -> Option<&str> {
        self.output_area
            .first()
            .and_then(|p| self.container.get(p))
            .and_then(|e| e.attr(COPY_SOURCE_ATTR))
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_msg
            .first()
            .and_then(|p| self.container.get(p))
            .and_then(|e| e.text.as_deref())
    }

    fn success_visible(&self) -> bool {
        self.success_msg
            .iter()
            .filter_map(|p| self.container.get(p))
            .any(Element::is_visible)
    }

    pub fn state(&self) -> WidgetState {
        if self.success_visible() {
            WidgetState::Copied
        } else {
            WidgetState::Idle
        }
    }

    pub fn render_copy_success(&mut self) {
        for path in &self.success_msg {
            if let Some(el) = self.container.get_mut(path) {
                el.set_visible(true);
            }
        }
        tracing::debug!(
            fade_ms = Fade::Normal.duration().as_millis() as u64,
            "fade in success message"
        );
    }

    fn fade_out(&mut self, fade: Fade) {
        for path in &self.success_msg {
            if let Some(el) = self.container.get_mut(path) {
                el.set_visible(false);
            }
        }
        tracing::debug!(
            fade_ms = fade.duration().as_millis() as u64,
            "fade out success message"
        );
    }

    pub fn select_output(&mut self) {
        self.selection = self.output_area.first().cloned();
    }

    pub fn selection(&self) -> Option<&NodePath> {
        self.selection.as_ref()
    }

    /// Copy the output's copy source. Failures are logged and reported as `false`.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(target) = self.copy_targets.first().cloned() else {
            return false;
        };
        let text = self
            .container
            .get(&target)
            .and_then(|e| e.attr(COPY_SOURCE_ATTR))
            .unwrap_or_default()
            .to_string();
        self.selection = Some(target);

        match clipboard.write_text(&text) {
            Ok(()) => {
                self.render_copy_success();
                let mut event = CopyEvent::new(&text, &mut self.selection);
                event.clear_selection();
                tracing::info!(branch = %text, "copied branch name");
                true
            }
            Err(e) => {
                tracing::warn!("copy failed: {e:#}");
                false
            }
        }
    }

    /// Update a control's value without firing events. Selects pick the option
    /// with a matching value; checkboxes and radios treat `value` as checkedness
    /// when it is `true`/`false`. Returns false if the value cannot be applied.
    pub fn set_value(&mut self, path: &NodePath, value: &str) -> bool {
        let Some(el) = self.container.get_mut(path) else {
            return false;
        };
        if el.is("select") {
            if !form::options(el).any(|o| form::option_value(o) == value) {
                return false;
            }
            let multiple = el.has_attr("multiple");
            for opt in el
                .children
                .iter_mut()
                .flat_map(|c| {
                    if c.is("optgroup") {
                        c.children.iter_mut().collect::<Vec<_>>()
                    } else {
                        vec![c]
                    }
                })
                .filter(|o| o.is("option"))
            {
                if form::option_value(opt) == value {
                    opt.checked = true;
                } else if !multiple {
                    opt.checked = false;
                }
            }
            return true;
        }
        if el.is("input") && matches!(el.input_type().as_str(), "checkbox" | "radio") {
            match value {
                "true" => return self.set_checked(path, true),
                "false" => return self.set_checked(path, false),
                other => el.value = Some(other.to_string()),
            }
            return self.set_checked(path, true);
        }
        el.value = Some(value.to_string());
        true
    }

    /// Check or uncheck a checkbox/radio. Checking a radio unchecks the other
    /// radios of its group. Returns false for any other kind of control.
    pub fn set_checked(&mut self, path: &NodePath, checked: bool) -> bool {
        let Some(el) = self.container.get(path) else {
            return false;
        };
        let ty = el.input_type();
        if !el.is("input") || !matches!(ty.as_str(), "checkbox" | "radio") {
            return false;
        }
        if ty == "radio" && checked {
            if let Some(group) = el.name().map(str::to_string) {
                for other in self.controls_named(&group) {
                    if let Some(radio) = self.container.get_mut(&other) {
                        if radio.is("input") && radio.input_type() == "radio" {
                            radio.checked = false;
                        }
                    }
                }
            }
        }
        if let Some(el) = self.container.get_mut(path) {
            el.checked = checked;
        }
        true
    }

    /// Every native control in the container has a non-blank value.
    pub fn check_form_validity(&self) -> bool {
        self.container
            .find_by_tags(CONTROL_TAGS)
            .iter()
            .filter_map(|p| self.container.get(p))
            .all(|el| !form::control_value(el).trim().is_empty())
    }
}
