//! Nodes of the annotation graph
//!
//! Every node carries exactly one label and is identified, within that
//! label, by its `name` property.

use super::property::{PropertyMap, PropertyValue};
use super::schema::NAME;
use super::types::{Label, NodeId};

/// A labelled node with properties
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,

    pub label: Label,

    pub properties: PropertyMap,
}

impl Node {
    /// Create a node whose identity is `name`
    pub fn new(id: NodeId, label: impl Into<Label>, name: impl Into<String>) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(NAME.to_string(), PropertyValue::String(name.into()));

        Node {
            id,
            label: label.into(),
            properties,
        }
    }

    /// The identity property
    pub fn name(&self) -> &str {
        self.get_str(NAME).unwrap_or_default()
    }

    pub fn has_label(&self, label: &Label) -> bool {
        &self.label == label
    }

    /// Set a property value, returning the previous one
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// String view of a property, `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_property(key).and_then(PropertyValue::as_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::schema::{DESCRIPTION, PROTEIN, SYSNAME};

    #[test]
    fn test_new_node_carries_name() {
        let node = Node::new(NodeId::new(1), PROTEIN, "ABC1");
        assert_eq!(node.name(), "ABC1");
        assert!(node.has_label(&Label::new(PROTEIN)));
        assert_eq!(node.properties.len(), 1);
    }

    #[test]
    fn test_set_property_returns_previous() {
        let mut node = Node::new(NodeId::new(2), PROTEIN, "ABC1");
        assert_eq!(node.set_property(SYSNAME, "YAL001C"), None);
        let old = node.set_property(SYSNAME, "YAL002W");
        assert_eq!(old, Some(PropertyValue::from("YAL001C")));
        assert_eq!(node.get_str(SYSNAME), Some("YAL002W"));
        assert_eq!(node.get_str(DESCRIPTION), None);
    }
}
