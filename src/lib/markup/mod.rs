//! A small typed markup tree. Every string that reaches the output passes
//! through `escape_text` or `escape_attr` in `render_into`, and nowhere else.

use crate::utils::{escape_attr, escape_text};

const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[cfg(test)]
    pub fn tag(&self) -> &str {
        self.tag
    }

    #[cfg(test)]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn fragment<I>(nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::Fragment(nodes.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Node::Fragment(Vec::new())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.render_into(out)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                el.children.iter().for_each(|n| n.render_into(out));
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text content, unescaped.
    #[cfg(test)]
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Fragment(nodes) => nodes.iter().map(Node::text_content).collect(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for elements matching `pred`.
    #[cfg(test)]
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(pred, &mut found);
        found
    }

    #[cfg(test)]
    fn walk<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        match self {
            Node::Text(_) => {}
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.walk(pred, found)),
            Node::Element(el) => {
                if pred(el) {
                    found.push(el);
                }
                el.children.iter().for_each(|n| n.walk(pred, found));
            }
        }
    }
}

/// Elements carrying `class` among their space-separated classes.
#[cfg(test)]
pub fn has_class(el: &Element, class: &str) -> bool {
    el.get_attr("class")
        .is_some_and(|c| c.split_whitespace().any(|c| c == class))
}

#[cfg(test)]
mod tests;
