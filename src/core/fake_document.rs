//! In-memory `Document` used by the extractor tests. Each node answers a
//! selector with the children registered under that exact selector string.

use crate::domain::ports::{Document, Element};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<String, Vec<FakeNode>>,
}

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, selector: &str, node: FakeNode) -> Self {
        self.children
            .entry(selector.to_string())
            .or_default()
            .push(node);
        self
    }
}

impl Element for FakeNode {
    fn select_all(&self, selector: &str) -> Vec<Self> {
        self.children.get(selector).cloned().unwrap_or_default()
    }

    fn text(&self, strip: bool) -> String {
        if strip {
            self.text.trim().to_string()
        } else {
            self.text.clone()
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }
}

pub struct FakeDocument {
    pub root: FakeNode,
}

impl Document for FakeDocument {
    type Element<'a> = FakeNode
    where
        Self: 'a;

    fn select_all(&self, selector: &str) -> Vec<FakeNode> {
        Element::select_all(&self.root, selector)
    }
}
