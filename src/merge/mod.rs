//! Dominant/recessive merging of document trees
//!
//! This module folds a recessive tree into a dominant one. The dominant tree
//! wins every tie: its values and attributes are kept, and recessive content
//! only fills the gaps. Two attributes on the dominant side steer the merge:
//!
//! - `combine.self="override"` ignores the recessive element and its whole
//!   subtree.
//! - `combine.children="append"` appends recessive children instead of
//!   merging them into same-named dominant children. Containers that collect
//!   repeated entries (`dependencies`, `modules`, ...) carry this attribute so
//!   successive merges accumulate entries rather than colliding on name.
//!
//! Attributes missing on the dominant side are copied from the recessive side
//! before children are considered, so an append marker on a recessive
//! fragment propagates to an existing dominant container.

use crate::tree::{
    Element, Node, CHILDREN_COMBINATION_APPEND, CHILDREN_COMBINATION_MODE,
    SELF_COMBINATION_MODE, SELF_COMBINATION_OVERRIDE,
};

/// Merge `recessive` into `dominant` and return the mutated dominant tree
///
/// # Examples
///
/// ```
/// use pax_construct::merge::merge;
/// use pax_construct::tree::Element;
///
/// let mut dominant = Element::new("project").with_child(Element::leaf("version", "2"));
/// let recessive = Element::new("project")
///     .with_child(Element::leaf("version", "1"))
///     .with_child(Element::leaf("packaging", "pom"));
///
/// merge(&mut dominant, Some(&recessive));
/// assert_eq!(dominant.child_text("version"), Some("2"));
/// assert_eq!(dominant.child_text("packaging"), Some("pom"));
/// ```
pub fn merge<'a>(dominant: &'a mut Element, recessive: Option<&Element>) -> &'a mut Element {
    merge_with_override(dominant, recessive, None)
}

/// Merge with an explicit children mode
///
/// `children_override` forces the children mode for every level of the
/// merge: `Some(true)` merges by name, `Some(false)` always appends, and
/// `None` follows each dominant element's `combine.children` attribute.
pub fn merge_with_override<'a>(
    dominant: &'a mut Element,
    recessive: Option<&Element>,
    children_override: Option<bool>,
) -> &'a mut Element {
    let Some(recessive) = recessive else {
        return dominant;
    };

    let merge_self = dominant.attribute(SELF_COMBINATION_MODE) != Some(SELF_COMBINATION_OVERRIDE);
    if !merge_self {
        return dominant;
    }

    if dominant.text().is_none() {
        if let Some(value) = &recessive.value {
            dominant.value = Some(value.clone());
        }
    }

    for (key, value) in &recessive.attributes {
        if !dominant.attributes.contains_key(key) {
            dominant.attributes.insert(key.clone(), value.clone());
        }
    }

    let merge_children = children_override.unwrap_or_else(|| {
        dominant.attribute(CHILDREN_COMBINATION_MODE) != Some(CHILDREN_COMBINATION_APPEND)
    });

    for child in &recessive.children {
        match child {
            Node::Element(recessive_child) if merge_children => {
                match dominant.child_mut(&recessive_child.name) {
                    Some(dominant_child) => {
                        merge_with_override(dominant_child, Some(recessive_child), children_override);
                    }
                    None => dominant.children.push(child.clone()),
                }
            }
            _ => dominant.children.push(child.clone()),
        }
    }

    dominant
}

/// Mark an element so its children are appended by later merges
pub fn mark_append(element: &mut Element) {
    element.attributes.insert(
        CHILDREN_COMBINATION_MODE.to_string(),
        CHILDREN_COMBINATION_APPEND.to_string(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules(names: &[&str]) -> Element {
        let mut modules = Element::new("modules");
        for name in names {
            modules.children.push(Element::leaf("module", *name).into());
        }
        modules
    }

    #[test]
    fn test_absent_recessive_is_noop() {
        let mut dominant = Element::leaf("version", "1");
        let before = dominant.clone();
        merge(&mut dominant, None);
        assert_eq!(dominant, before);
    }

    #[test]
    fn test_dominant_value_wins() {
        let mut dominant = Element::leaf("version", "2");
        merge(&mut dominant, Some(&Element::leaf("version", "1")));
        assert_eq!(dominant.text(), Some("2"));
    }

    #[test]
    fn test_empty_dominant_value_is_filled() {
        let mut dominant = Element::leaf("version", "");
        merge(&mut dominant, Some(&Element::leaf("version", "1")));
        assert_eq!(dominant.text(), Some("1"));
    }

    #[test]
    fn test_attributes_copied_only_when_missing() {
        let mut dominant = Element::new("plugin").with_attribute("a", "dominant");
        let recessive = Element::new("plugin")
            .with_attribute("a", "recessive")
            .with_attribute("b", "recessive");
        merge(&mut dominant, Some(&recessive));
        assert_eq!(dominant.attribute("a"), Some("dominant"));
        assert_eq!(dominant.attribute("b"), Some("recessive"));
    }

    #[test]
    fn test_override_ignores_recessive_subtree() {
        let mut dominant = Element::new("configuration")
            .with_attribute(SELF_COMBINATION_MODE, SELF_COMBINATION_OVERRIDE);
        let recessive = Element::new("configuration")
            .with_attribute("x", "y")
            .with_child(Element::leaf("debug", "true"));
        merge(&mut dominant, Some(&recessive));
        assert!(dominant.children.is_empty());
        assert_eq!(dominant.attribute("x"), None);
    }

    #[test]
    fn test_children_merge_by_name_first_match() {
        let mut dominant = modules(&["a", "b"]);
        merge(&mut dominant, Some(&modules(&["c"])));
        // first <module> already has a value, so the recessive one is absorbed
        assert_eq!(dominant.elements().count(), 2);
        assert_eq!(dominant.elements().next().unwrap().text(), Some("a"));
    }

    #[test]
    fn test_append_marker_on_recessive_propagates() {
        let mut dominant = Element::new("project").with_child(modules(&["a"]));
        let mut fragment = modules(&["b"]);
        mark_append(&mut fragment);
        let recessive = Element::new("project").with_child(fragment);

        merge(&mut dominant, Some(&recessive));
        let merged = dominant.child("modules").unwrap();
        let names: Vec<_> = merged.elements().filter_map(Element::text).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_children_are_appended() {
        let mut dominant = Element::new("project").with_child(Element::leaf("groupId", "g"));
        let recessive = Element::new("project")
            .with_child(Node::Comment(" deps ".to_string()))
            .with_child(modules(&["a"]));
        merge(&mut dominant, Some(&recessive));
        assert_eq!(dominant.children.len(), 3);
        assert_eq!(dominant.children[1], Node::Comment(" deps ".to_string()));
        assert!(dominant.children[2].is_named("modules"));
    }

    #[test]
    fn test_forced_append_override() {
        let mut dominant = modules(&["a"]);
        merge_with_override(&mut dominant, Some(&modules(&["b"])), Some(false));
        assert_eq!(dominant.elements().count(), 2);
    }

    #[test]
    fn test_forced_merge_override_beats_attribute() {
        let mut dominant = modules(&["a"]);
        mark_append(&mut dominant);
        merge_with_override(&mut dominant, Some(&modules(&["b"])), Some(true));
        assert_eq!(dominant.elements().count(), 1);
    }
}
