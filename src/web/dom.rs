//! A minimal node tree for the rendered page.
//!
//! Renders build fresh trees every pass; nothing is patched in place. An
//! element can carry the [`Action`] its click should trigger, so rebuilding
//! a region also rebinds every control inside it.
//!
//! [`to_html`] is the surface for embedding the page in a browser view;
//! [`to_text`] serves terminals.

use std::fmt::Write;

/// What a clickable element does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Unregister { activity: String, email: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub on_click: Option<Action>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            on_click: None,
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    fn is_block(&self) -> bool {
        matches!(
            self.tag,
            "div" | "p" | "h4" | "h5" | "ul" | "li" | "option" | "select"
        )
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first walk over every element, this one included.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_elements(&mut out);
        out
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            out.push(e);
            e.children.iter().for_each(|c| c.collect_elements(out));
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(out, r#" {}="{}""#, name, escape_html(value));
                }
                out.push('>');
                e.children.iter().for_each(|c| c.write_html(out));
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }
}

/// Serialises a region's nodes back to back.
pub fn to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

/// Plain-text rendering for terminals. Block elements start on their own
/// line, list items get a dash, and every clickable element is shown as
/// `[n]` numbered from 1 in document order.
pub fn to_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut clickables = 0;
    for node in nodes {
        write_text(node, &mut out, &mut clickables);
    }
    out.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_text(node: &Node, out: &mut String, clickables: &mut usize) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element(e) => {
            if e.is_block() {
                out.push('\n');
            }
            if e.tag == "li" {
                out.push_str("  - ");
            }
            if e.on_click.is_some() {
                *clickables += 1;
                let _ = write!(out, " [{}]", clickables);
            } else {
                e.children.iter().for_each(|c| write_text(c, out, clickables));
            }
            if e.is_block() {
                out.push('\n');
            }
        }
    }
}

/// Every action bound in `nodes`, in document order.
pub fn actions(nodes: &[Node]) -> Vec<Action> {
    nodes
        .iter()
        .flat_map(Node::elements)
        .filter_map(|e| e.on_click.clone())
        .collect()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
