//! Line commands for the terminal front-end.

use crate::{
    domain::SortKey,
    web::{render, Controller, Page, PageEvent},
};

pub const HELP: &str = "\
Commands:
  show                         print the page
  html                         print the activity list as HTML
  refresh                      reload activities from the server
  search [<text>]              filter by name or description
  category [<name>]            filter by category (no name clears)
  sort <name|date>             change the sort order
  signup <email> <activity>    register for an activity
  remove <n>                   press removal control [n]
  help                         this text
  quit                         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Html,
    Refresh,
    Search(String),
    Category(String),
    Sort(SortKey),
    Signup { email: String, activity: String },
    Remove(usize),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "" | "show" => Ok(Command::Show),
            "html" => Ok(Command::Html),
            "refresh" => Ok(Command::Refresh),
            "search" => Ok(Command::Search(rest.to_string())),
            "category" => Ok(Command::Category(rest.to_string())),
            "sort" => SortKey::from_str(rest)
                .map(Command::Sort)
                .ok_or_else(|| format!("Unknown sort order '{}', expected name or date", rest)),
            "signup" => {
                let (email, activity) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "Usage: signup <email> <activity>".to_string())?;
                Ok(Command::Signup {
                    email: email.to_string(),
                    activity: activity.trim().to_string(),
                })
            }
            "remove" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Command::Remove)
                .ok_or_else(|| "Usage: remove <n>".to_string()),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'. Type help for a list.", other)),
        }
    }
}

/// Applies a command to the page. Returns text to print before the page,
/// if any.
pub async fn execute(controller: &Controller, command: Command) -> Option<String> {
    let page = controller.page();
    match command {
        Command::Show | Command::Quit => None,
        Command::Help => Some(HELP.to_string()),
        Command::Html => Some(page.activities_list.to_html()),
        Command::Refresh => {
            controller.refresh().await;
            None
        }
        Command::Search(text) => {
            let input = page.search_input.as_ref()?;
            input.set_value(text);
            controller.handle_event(PageEvent::SearchInput).await;
            None
        }
        Command::Category(name) => {
            let filter = page.category_filter.as_ref()?;
            if !filter.option_values().contains(&name) {
                return Some(format!("No category named '{}'", name));
            }
            filter.set_value(name);
            controller.handle_event(PageEvent::CategoryChanged).await;
            None
        }
        Command::Sort(key) => {
            let select = page.sort_select.as_ref()?;
            select.set_value(key.as_str());
            controller.handle_event(PageEvent::SortChanged).await;
            None
        }
        Command::Signup { email, activity } => {
            page.signup_email.set_value(email);
            page.activity_select.set_value(activity);
            controller.handle_event(PageEvent::SubmitSignup).await;
            None
        }
        Command::Remove(n) => {
            let action = n
                .checked_sub(1)
                .and_then(|i| page.activities_list.actions().into_iter().nth(i));
            match action {
                Some(action) => {
                    controller.handle_event(PageEvent::Click(action)).await;
                    None
                }
                None => Some(format!("No removal control [{}]", n)),
            }
        }
    }
}

/// The whole page as terminal text.
pub fn page_text(page: &Page) -> String {
    let mut lines = Vec::new();

    let search = page.search_input.as_ref().map(|i| i.value()).unwrap_or_default();
    let category = page
        .category_filter
        .as_ref()
        .map(|f| f.value())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| render::ALL_CATEGORIES.to_string());
    let sort = page.sort_select.as_ref().map(|s| s.value()).unwrap_or_else(|| "name".to_string());
    lines.push(format!("Search: \"{}\" | Category: {} | Sort: {}", search, category, sort));
    lines.push(String::new());
    lines.push(page.activities_list.to_text());

    if !page.message.is_hidden() {
        let style = page.message.style().map(|s| s.as_class()).unwrap_or_default();
        lines.push(String::new());
        lines.push(format!("[{}] {}", style, page.message.text()));
    }

    lines.join("\n")
}
