use crate::config::OptionsLayer;
use crate::dom::{Element, Page};
use crate::widget::BranchNameWidget;

/// Marker attribute that opts a container into a widget.
pub const ENABLE_ATTR: &str = "data-branch-name-generator";

fn collect_containers(el: &Element, out: &mut Vec<Element>) {
    if el.has_attr(ENABLE_ATTR) {
        out.push(el.clone());
    }
    for child in &el.children {
        collect_containers(child, out);
    }
}

/// Every enabled container on `page`, in document order. A container nested in
/// another one appears twice: inside the outer copy and as its own entry.
pub fn containers(page: &Page) -> Vec<Element> {
    let mut out = Vec::new();
    for el in &page.elements {
        collect_containers(el, &mut out);
    }
    out
}

/// One widget per enabled container, configured from its data attributes only.
pub fn mount(page: Page) -> Vec<BranchNameWidget> {
    mount_with(page, &OptionsLayer::default())
}

pub fn mount_with(page: Page, explicit: &OptionsLayer) -> Vec<BranchNameWidget> {
    let widgets: Vec<BranchNameWidget> = containers(&page)
        .into_iter()
        .map(|c| BranchNameWidget::new(c, explicit))
        .collect();
    tracing::debug!(count = widgets.len(), "mounted widgets");
    widgets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{FORM_ATTR, OUTPUT_AREA_ATTR};

    fn generator(project: &str) -> Element {
        Element::new("section")
            .with_attr(ENABLE_ATTR, "")
            .with_child(
                Element::new("form").with_attr(FORM_ATTR, "").with_child(
                    Element::new("input")
                        .with_attr("name", "project")
                        .with_value(project),
                ),
            )
            .with_child(Element::new("pre").with_attr(OUTPUT_AREA_ATTR, ""))
    }

    #[test]
    fn mounts_each_container_in_document_order() {
        let page = Page {
            elements: vec![
                Element::new("header"),
                Element::new("main")
                    .with_child(generator("first"))
                    .with_child(Element::new("div").with_child(generator("second"))),
            ],
        };
        let widgets = mount(page);
        let outputs: Vec<_> = widgets.iter().map(|w| w.output_text()).collect();
        assert_eq!(outputs, vec![Some("first"), Some("second")]);
    }

    #[test]
    fn nested_container_gets_its_own_widget() {
        let page = Page {
            elements: vec![generator("outer").with_child(generator("inner"))],
        };
        let widgets = mount(page);
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].output_text(), Some("outer_inner"));
        assert_eq!(widgets[1].output_text(), Some("inner"));
    }

    #[test]
    fn page_without_containers_mounts_nothing() {
        let page = Page {
            elements: vec![Element::new("form").with_attr(FORM_ATTR, "")],
        };
        assert!(mount(page).is_empty());
    }

    #[test]
    fn explicit_options_apply_to_every_widget() {
        let page = Page {
            elements: vec![generator("a"), generator("b")],
        };
        let explicit = OptionsLayer {
            validate_on_blur: Some(true),
            ..OptionsLayer::default()
        };
        assert!(mount_with(page, &explicit)
            .iter()
            .all(|w| w.config().validate_on_blur));
    }
}
