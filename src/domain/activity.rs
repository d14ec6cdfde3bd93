use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// One entry of the activities mapping, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// Wire shape of an activity; the name travels as the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDetails {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Activity {
    pub fn from_details(name: String, details: ActivityDetails) -> Self {
        Self {
            name,
            description: details.description,
            schedule: details.schedule,
            max_participants: details.max_participants,
            participants: details.participants,
            category: details.category,
            date: details.date,
        }
    }

    /// Capacity minus registered count. Goes negative if the server ever
    /// reports more participants than seats.
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }

    /// The category, if it is set and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// The in-memory snapshot of every activity, in the order the server
/// listed them. Replaced wholesale on each successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    activities: Vec<Activity>,
}

impl Catalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        let mut catalog = Self::default();
        for activity in activities {
            catalog.insert(activity);
        }
        catalog
    }

    /// Adds an activity, replacing any existing entry with the same name
    /// in place.
    pub fn insert(&mut self, activity: Activity) {
        match self.activities.iter_mut().find(|a| a.name == activity.name) {
            Some(existing) => *existing = activity,
            None => self.activities.push(activity),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.activities.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Distinct non-empty categories, first occurrence wins the position.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for category in self.activities.iter().filter_map(Activity::category) {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Catalog, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = Catalog::default();
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    catalog.insert(Activity::from_details(name, details));
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Programming Class": {
            "description": "Learn programming fundamentals",
            "schedule": "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            "max_participants": 20,
            "participants": ["emma@mergington.edu"],
            "category": "Academic"
        },
        "Chess Club": {
            "description": "Learn strategies and compete in chess tournaments",
            "schedule": "Fridays, 3:30 PM - 5:00 PM",
            "max_participants": 12,
            "participants": ["michael@mergington.edu", "daniel@mergington.edu"],
            "category": "Games",
            "date": "2024-09-06"
        },
        "Art Studio": {
            "description": "Painting and drawing",
            "schedule": "Mondays",
            "max_participants": 10,
            "participants": [],
            "category": "Academic"
        },
        "Drop-in": {
            "description": "Open hall",
            "schedule": "Any time",
            "max_participants": 5,
            "participants": [],
            "category": ""
        }
    }"#;

    #[test]
    fn test_decode_keeps_server_order() {
        let catalog: Catalog = serde_json::from_str(SAMPLE).unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Programming Class", "Chess Club", "Art Studio", "Drop-in"]);

        let chess = catalog.get("Chess Club").unwrap();
        assert_eq!(chess.max_participants, 12);
        assert_eq!(chess.participants.len(), 2);
        assert_eq!(chess.date.as_deref(), Some("2024-09-06"));
        assert_eq!(catalog.get("Programming Class").unwrap().date, None);
    }

    #[test]
    fn test_categories_are_distinct_and_ordered() {
        let catalog: Catalog = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(catalog.categories(), vec!["Academic".to_string(), "Games".to_string()]);
    }

    #[test]
    fn test_spots_left_may_go_negative() {
        let mut catalog: Catalog = serde_json::from_str(SAMPLE).unwrap();
        let mut full = catalog.get("Drop-in").unwrap().clone();
        full.participants = (0..7).map(|i| format!("p{}@x.com", i)).collect();
        catalog.insert(full);

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("Drop-in").unwrap().spots_left(), -2);
        assert_eq!(catalog.get("Chess Club").unwrap().spots_left(), 10);
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert!(serde_json::from_str::<Catalog>(r#"{"detail": "Not found"}"#).is_err());
        assert!(serde_json::from_str::<Catalog>("[]").is_err());
    }
}
