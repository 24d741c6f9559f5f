use std::collections::BTreeMap;

use serde::Serialize;

use crate::ModuleRequest;

/// Rendered node tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element; attributes serialize in name order
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Plain text, escaped on output
    Text { content: String },

    /// Author-supplied markup, emitted verbatim
    Html { content: String },

    /// Slot for content supplied at render time by a content provider
    Module {
        request: ModuleRequest,
        block_id: String,
    },

    /// Visible marker for a block that could not be rendered
    Placeholder { kind: String, message: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        VNode::Html {
            content: content.into(),
        }
    }

    pub fn placeholder(kind: impl Into<String>, message: impl Into<String>) -> Self {
        VNode::Placeholder {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of placeholder nodes in this subtree
    pub fn placeholder_count(&self) -> usize {
        match self {
            VNode::Placeholder { .. } => 1,
            VNode::Element { children, .. } => {
                children.iter().map(VNode::placeholder_count).sum()
            }
            _ => 0,
        }
    }

    /// Unresolved module slots in this subtree
    pub fn module_slots(&self) -> Vec<&ModuleRequest> {
        let mut slots = Vec::new();
        self.collect_modules(&mut slots);
        slots
    }

    fn collect_modules<'a>(&'a self, slots: &mut Vec<&'a ModuleRequest>) {
        match self {
            VNode::Module { request, .. } => slots.push(request),
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_modules(slots);
                }
            }
            _ => {}
        }
    }
}
