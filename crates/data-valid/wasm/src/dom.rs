//! `FieldElement` over real DOM inputs

use data_valid_core::FieldElement;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Node};

/// A tagged `<input>` in the page
#[derive(Debug, Clone)]
pub struct DomField(HtmlInputElement);

impl DomField {
    pub fn new(input: HtmlInputElement) -> Self {
        Self(input)
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.0
    }

    pub fn node(&self) -> &Node {
        self.0.as_ref()
    }

    fn parent(&self) -> Option<Element> {
        self.0.parent_element()
    }
}

fn report(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        web_sys::console::warn_2(&format!("data-valid: failed to {}", action).into(), &err);
    }
}

impl FieldElement for DomField {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn value(&self) -> String {
        self.0.value()
    }

    fn add_class(&self, class: &str) {
        report("add class", self.0.class_list().add_1(class));
    }

    fn remove_class(&self, class: &str) {
        report("remove class", self.0.class_list().remove_1(class));
    }

    fn position_parent(&self) {
        if let Some(parent) = self.parent().and_then(|p| p.dyn_into::<HtmlElement>().ok()) {
            report(
                "position parent",
                parent.style().set_property("position", "relative"),
            );
        }
    }

    fn add_parent_class(&self, class: &str) {
        if let Some(parent) = self.parent() {
            report("add parent class", parent.class_list().add_1(class));
        }
    }

    fn remove_parent_class(&self, class: &str) {
        if let Some(parent) = self.parent() {
            report("remove parent class", parent.class_list().remove_1(class));
        }
    }

    fn parent_has_class(&self, class: &str) -> bool {
        self.parent()
            .map(|p| p.class_list().contains(class))
            .unwrap_or(false)
    }

    fn remove_tips(&self, class: &str) {
        let Some(parent) = self.parent() else {
            return;
        };
        // Collect first: the collection is live
        let children = parent.children();
        let tips: Vec<Element> = (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|child| child.class_list().contains(class))
            .collect();
        for tip in tips {
            tip.remove();
        }
    }

    fn append_tip(&self, class: &str, message: &str) {
        let Some(parent) = self.parent() else {
            return;
        };
        let Some(document) = self.0.owner_document() else {
            return;
        };
        report("append tip", append_tip(&document, &parent, class, message));
    }

    fn is_same(&self, other: &Self) -> bool {
        self.node().is_same_node(Some(other.node()))
    }

    fn is_connected(&self) -> bool {
        self.node().is_connected()
    }
}

fn append_tip(
    document: &Document,
    parent: &Element,
    class: &str,
    message: &str,
) -> Result<(), JsValue> {
    let tip = document.create_element("div")?;
    tip.set_class_name(class);
    tip.set_text_content(Some(message));
    parent.append_child(&tip)?;
    Ok(())
}

/// Every `<input>` under `document` matching `selector`
pub fn tagged_inputs(document: &Document, selector: &str) -> Result<Vec<DomField>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
        .map(DomField::new)
        .collect())
}
