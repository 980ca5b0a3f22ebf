//! Error presentation
//!
//! The error state of a field lives on the page: a border class on the field,
//! a container class on its parent and one tip element inside the parent.

use crate::settings::Classes;

/// Element operations the validator needs from a tagged field.
///
/// Methods take `&self`: implementations wrap shared element handles, as
/// the DOM does.
pub trait FieldElement {
    fn attribute(&self, name: &str) -> Option<String>;

    /// Current raw value
    fn value(&self) -> String;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Make the parent a positioning context for the tip
    fn position_parent(&self);

    fn add_parent_class(&self, class: &str);

    fn remove_parent_class(&self, class: &str);

    fn parent_has_class(&self, class: &str) -> bool;

    /// Remove every child of the parent carrying `class`
    fn remove_tips(&self, class: &str);

    /// Append a tip with `class` and text `message` to the parent
    fn append_tip(&self, class: &str, message: &str);

    /// Whether both handles refer to the same element
    fn is_same(&self, other: &Self) -> bool;

    /// Whether the element is still attached to the document
    fn is_connected(&self) -> bool;
}

/// Mark a field as failed and show `message` beside it.
///
/// Replaces any tip already in the parent, so repeated calls leave one tip.
pub fn show_error<F: FieldElement>(field: &F, classes: &Classes, message: &str) {
    field.add_class(&classes.field_error);
    field.position_parent();
    field.add_parent_class(&classes.container_error);
    field.remove_tips(&classes.tip);
    field.append_tip(&classes.tip, message);
}

/// Remove a field's error state. Safe on a field with no error.
///
/// The container class and the tip always go; the field's own class stays
/// when `classes.keep_field_error` is set.
pub fn clear_error<F: FieldElement>(field: &F, classes: &Classes) {
    field.remove_parent_class(&classes.container_error);
    field.remove_tips(&classes.tip);
    if !classes.keep_field_error {
        field.remove_class(&classes.field_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Node;
    use pretty_assertions::assert_eq;

    fn field_in_container() -> (Node, Node) {
        let container = Node::element("div");
        let input = Node::input(r#"{"type":"validNull"}"#);
        container.append(&input);
        (container, input)
    }

    #[test]
    fn test_show_error() {
        let (container, input) = field_in_container();
        let classes = Classes::default();

        show_error(&input, &classes, "输入不能为空");

        assert!(input.has_class("error-border"));
        assert!(container.has_class("valid-error"));
        assert_eq!(container.style("position").as_deref(), Some("relative"));

        let tips = container.find_by_class("error-tip");
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].text(), "输入不能为空");
        assert_eq!(tips[0].tag(), "div");
    }

    #[test]
    fn test_show_error_is_idempotent() {
        let (container, input) = field_in_container();
        let classes = Classes::default();

        show_error(&input, &classes, "first");
        show_error(&input, &classes, "second");
        show_error(&input, &classes, "third");

        let tips = container.find_by_class("error-tip");
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].text(), "third");
        assert_eq!(container.children().len(), 2);
    }

    #[test]
    fn test_clear_error() {
        let (container, input) = field_in_container();
        let classes = Classes::default();

        show_error(&input, &classes, "oops");
        clear_error(&input, &classes);

        assert!(!container.has_class("valid-error"));
        assert!(!input.has_class("error-border"));
        assert!(container.find_by_class("error-tip").is_empty());

        // Clearing twice is harmless
        clear_error(&input, &classes);
        assert_eq!(container.children().len(), 1);
    }

    #[test]
    fn test_clear_error_can_keep_field_class() {
        let (container, input) = field_in_container();
        let classes = Classes {
            keep_field_error: true,
            ..Classes::default()
        };

        show_error(&input, &classes, "oops");
        clear_error(&input, &classes);

        assert!(input.has_class("error-border"));
        assert!(!container.has_class("valid-error"));
        assert!(container.find_by_class("error-tip").is_empty());
    }

    #[test]
    fn test_message_is_text_not_markup() {
        let (container, input) = field_in_container();
        show_error(&input, &Classes::default(), "<b>bold</b>");

        let tip = &container.find_by_class("error-tip")[0];
        assert_eq!(tip.text(), "<b>bold</b>");
        assert!(tip.children().is_empty());
    }

    #[test]
    fn test_orphan_field_only_gets_border() {
        let input = Node::input(r#"{"type":"validNull"}"#);
        show_error(&input, &Classes::default(), "oops");
        assert!(input.has_class("error-border"));
        assert!(!input.parent_has_class("valid-error"));
    }
}
