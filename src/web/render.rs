//! Pure renders from the catalog to page nodes. Each function returns the
//! complete new content of its region.

use crate::domain::{Activity, Catalog, ListQuery, SortKey};
use super::dom::{Action, Element, Node};

pub const ALL_CATEGORIES: &str = "All Categories";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const NO_ACTIVITIES: &str = "No activities found.";
pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

fn option(value: &str, label: &str) -> Node {
    Element::new("option").attr("value", value).text(label).into()
}

/// "All Categories" followed by one option per category.
pub fn category_options(categories: &[String]) -> Vec<Node> {
    std::iter::once(option("", ALL_CATEGORIES))
        .chain(categories.iter().map(|c| option(c, c)))
        .collect()
}

/// Placeholder followed by every activity name, unfiltered.
pub fn activity_options(catalog: &Catalog) -> Vec<Node> {
    std::iter::once(option("", SELECT_PLACEHOLDER))
        .chain(catalog.names().map(|n| option(n, n)))
        .collect()
}

pub fn sort_options() -> Vec<Node> {
    vec![
        option(SortKey::Name.as_str(), "Name"),
        option(SortKey::Date.as_str(), "Date"),
    ]
}

pub fn load_failure() -> Vec<Node> {
    vec![Element::new("p").text(LOAD_FAILED).into()]
}

/// The filtered, sorted list of activity cards.
pub fn activity_list(catalog: &Catalog, query: &ListQuery) -> Vec<Node> {
    let activities = catalog.query(query);
    if activities.is_empty() {
        return vec![Element::new("p").text(NO_ACTIVITIES).into()];
    }
    activities.into_iter().map(activity_card).collect()
}

fn labelled(label: &str, value: String) -> Node {
    Element::new("p")
        .child(Element::new("strong").text(label))
        .text(format!(" {}", value))
        .into()
}

pub fn activity_card(activity: &Activity) -> Node {
    Element::new("div")
        .class("activity-card")
        .child(Element::new("h4").text(&activity.name))
        .child(Element::new("p").text(&activity.description))
        .child(labelled("Schedule:", activity.schedule.clone()))
        .child(labelled(
            "Availability:",
            format!("{} spots left", activity.spots_left()),
        ))
        .child(
            Element::new("div")
                .class("participants-container")
                .child(participants(activity)),
        )
        .into()
}

fn participants(activity: &Activity) -> Node {
    if activity.participants.is_empty() {
        return Element::new("p")
            .child(Element::new("em").text(NO_PARTICIPANTS))
            .into();
    }

    let rows = activity.participants.iter().map(|email| {
        Node::from(Element::new("li")
            .child(Element::new("span").class("participant-email").text(email))
            .child(
                Element::new("button")
                    .class("delete-btn")
                    .attr("data-activity", &activity.name)
                    .attr("data-email", email)
                    .text("❌")
                    .on_click(Action::Unregister {
                        activity: activity.name.clone(),
                        email: email.clone(),
                    }),
            ))
    });

    Element::new("div")
        .class("participants-section")
        .child(Element::new("h5").text("Participants:"))
        .child(Element::new("ul").class("participants-list").children(rows))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess_club() -> Activity {
        Activity {
            name: "Chess Club".to_string(),
            description: "Strategy".to_string(),
            schedule: "Fridays".to_string(),
            max_participants: 10,
            participants: vec!["a@x.com".to_string(), "b@x.com".to_string()],
            category: Some("Games".to_string()),
            date: None,
        }
    }

    fn delete_buttons(node: &Node) -> Vec<&Element> {
        node.elements()
            .into_iter()
            .filter(|e| e.has_class("delete-btn"))
            .collect()
    }

    #[test]
    fn test_card_shows_spots_and_participants() {
        let card = activity_card(&chess_club());
        let text = card.text_content();
        assert!(text.contains("Chess Club"));
        assert!(text.contains("Schedule: Fridays"));
        assert!(text.contains("Availability: 8 spots left"));

        let buttons = delete_buttons(&card);
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].get_attr("data-email"), Some("a@x.com"));
        assert_eq!(
            buttons[1].on_click,
            Some(Action::Unregister {
                activity: "Chess Club".to_string(),
                email: "b@x.com".to_string(),
            })
        );
    }

    #[test]
    fn test_card_without_participants() {
        let mut activity = chess_club();
        activity.participants.clear();
        let card = activity_card(&activity);
        assert!(card.text_content().contains(NO_PARTICIPANTS));
        assert!(card.text_content().contains("10 spots left"));
        assert!(delete_buttons(&card).is_empty());
    }

    #[test]
    fn test_card_over_capacity_goes_negative() {
        let mut activity = chess_club();
        activity.max_participants = 1;
        assert!(activity_card(&activity).text_content().contains("-1 spots left"));
    }

    #[test]
    fn test_empty_result_message() {
        let catalog = Catalog::new(vec![chess_club()]);
        let query = ListQuery {
            search: "nothing matches".to_string(),
            ..Default::default()
        };
        let nodes = activity_list(&catalog, &query);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), NO_ACTIVITIES);
        assert!(nodes[0].elements().iter().all(|e| !e.has_class("activity-card")));

        let nodes = activity_list(&Catalog::default(), &ListQuery::default());
        assert_eq!(nodes[0].text_content(), NO_ACTIVITIES);
    }

    #[test]
    fn test_option_lists() {
        let categories = vec!["Games".to_string(), "Sports".to_string()];
        let nodes = category_options(&categories);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].to_html(), r#"<option value="">All Categories</option>"#);

        let nodes = activity_options(&Catalog::new(vec![chess_club()]));
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text_content(), SELECT_PLACEHOLDER);
        assert_eq!(nodes[1].to_html(), r#"<option value="Chess Club">Chess Club</option>"#);
    }

    #[test]
    fn test_card_html_is_escaped() {
        let mut activity = chess_club();
        activity.name = "<b>Bold</b>".to_string();
        let html = activity_card(&activity).to_html();
        assert!(html.contains("<h4>&lt;b&gt;Bold&lt;/b&gt;</h4>"));
        assert!(html.contains(r#"data-activity="&lt;b&gt;Bold&lt;/b&gt;""#));
    }
}
