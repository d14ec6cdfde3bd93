//! Handles to the page regions and controls the controller writes to and
//! reads from. Handles are cheap `Rc` clones: whoever embeds the page keeps
//! a clone to display regions and to set control values before raising a
//! [`PageEvent`](super::controller::PageEvent).

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{ListQuery, SortKey};
use super::dom::{self, Action, Node};

/// A block of the page whose content is replaced wholesale on each render.
#[derive(Debug, Clone, Default)]
pub struct Region {
    nodes: Rc<RefCell<Vec<Node>>>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, nodes: Vec<Node>) {
        *self.nodes.borrow_mut() = nodes;
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.borrow().clone()
    }

    pub fn to_html(&self) -> String {
        dom::to_html(&self.nodes.borrow())
    }

    pub fn to_text(&self) -> String {
        dom::to_text(&self.nodes.borrow())
    }

    pub fn text_content(&self) -> String {
        self.nodes.borrow().iter().map(Node::text_content).collect()
    }

    /// Actions currently bound inside the region, in document order.
    pub fn actions(&self) -> Vec<Action> {
        dom::actions(&self.nodes.borrow())
    }
}

/// A text input.
#[derive(Debug, Clone, Default)]
pub struct Input {
    value: Rc<RefCell<String>>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }
}

/// A dropdown: a replaceable list of `<option>` nodes plus the current
/// value. Replacing the options resets the value to the first option, the
/// way rebuilding a `<select>` does in a browser.
#[derive(Debug, Clone, Default)]
pub struct Select {
    options: Region,
    value: Input,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// A select with fixed options, starting on `value`.
    pub fn with_options(options: Vec<Node>, value: &str) -> Self {
        let select = Self::new();
        select.options.replace(options);
        select.value.set_value(value);
        select
    }

    pub fn replace_options(&self, options: Vec<Node>) {
        let first = first_option_value(&options);
        self.options.replace(options);
        self.value.set_value(first);
    }

    pub fn options(&self) -> &Region {
        &self.options
    }

    /// Values of every option, in order.
    pub fn option_values(&self) -> Vec<String> {
        self.options
            .nodes()
            .iter()
            .filter_map(Node::as_element)
            .filter(|e| e.tag == "option")
            .map(|e| e.get_attr("value").unwrap_or_default().to_string())
            .collect()
    }

    pub fn value(&self) -> String {
        self.value.value()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.value.set_value(value);
    }

    pub fn reset(&self) {
        self.value.set_value(first_option_value(&self.options.nodes()));
    }
}

fn first_option_value(options: &[Node]) -> String {
    options
        .iter()
        .filter_map(Node::as_element)
        .find(|e| e.tag == "option")
        .and_then(|e| e.get_attr("value"))
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Success,
    Error,
}

impl MessageStyle {
    pub fn as_class(&self) -> &'static str {
        match self {
            MessageStyle::Success => "success",
            MessageStyle::Error => "error",
        }
    }
}

#[derive(Debug)]
struct MessageState {
    text: String,
    style: Option<MessageStyle>,
    hidden: bool,
    generation: u64,
}

impl Default for MessageState {
    fn default() -> Self {
        Self {
            text: String::new(),
            style: None,
            hidden: true,
            generation: 0,
        }
    }
}

/// The transient status line under the signup form.
#[derive(Debug, Clone, Default)]
pub struct MessageBox {
    state: Rc<RefCell<MessageState>>,
}

impl MessageBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` and returns the generation a later hide must match.
    pub fn show(&self, text: impl Into<String>, style: MessageStyle) -> u64 {
        let mut state = self.state.borrow_mut();
        state.text = text.into();
        state.style = Some(style);
        state.hidden = false;
        state.generation += 1;
        state.generation
    }

    /// Hides the box unless a newer message replaced the one `generation`
    /// refers to. Returns whether it hid anything.
    pub fn hide_if_current(&self, generation: u64) -> bool {
        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            return false;
        }
        state.hidden = true;
        true
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn style(&self) -> Option<MessageStyle> {
        self.state.borrow().style
    }

    pub fn is_hidden(&self) -> bool {
        self.state.borrow().hidden
    }

    /// Class attribute as the page would carry it, e.g. `"error hidden"`.
    pub fn class(&self) -> String {
        let state = self.state.borrow();
        let mut classes: Vec<&str> = state.style.iter().map(MessageStyle::as_class).collect();
        if state.hidden {
            classes.push("hidden");
        }
        classes.join(" ")
    }
}

/// Every region and control the controller touches.
///
/// The toolbar controls are optional: a page without them lists every
/// activity sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub activities_list: Region,
    pub activity_select: Select,
    pub signup_email: Input,
    pub message: MessageBox,
    pub search_input: Option<Input>,
    pub category_filter: Option<Select>,
    pub sort_select: Option<Select>,
}

impl Page {
    /// A page with the full toolbar, sorting by `sort` initially.
    pub fn new(sort: SortKey) -> Self {
        Self {
            search_input: Some(Input::new()),
            category_filter: Some(Select::new()),
            sort_select: Some(Select::with_options(super::render::sort_options(), sort.as_str())),
            ..Self::default()
        }
    }

    /// Reads the toolbar. Missing controls contribute nothing to the
    /// filter; a missing sort control means sort by name.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            search: self.search_input.as_ref().map(Input::value).unwrap_or_default(),
            category: self.category_filter.as_ref().map(Select::value).unwrap_or_default(),
            sort: match &self.sort_select {
                Some(select) => SortKey::from_str(&select.value()),
                None => Some(SortKey::Name),
            },
        }
    }

    pub fn reset_signup_form(&self) {
        self.signup_email.set_value("");
        self.activity_select.reset();
    }
}
