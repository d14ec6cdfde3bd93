pub mod controller;
pub mod dom;
pub mod page;
pub mod render;

pub use controller::{Controller, PageEvent};
pub use dom::{Action, Element, Node};
pub use page::{Input, MessageBox, MessageStyle, Page, Region, Select};
