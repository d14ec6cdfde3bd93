#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use roster::{
    api::ActivityApi,
    domain::{Activity, Catalog},
    error::{AppError, Result},
};

pub fn activity(name: &str, max: i64, participants: &[&str], category: Option<&str>) -> Activity {
    Activity {
        name: name.to_string(),
        description: format!("{} description", name),
        schedule: "Fridays, 3:30 PM".to_string(),
        max_participants: max,
        participants: participants.iter().map(|p| p.to_string()).collect(),
        category: category.map(str::to_string),
        date: None,
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        activity("Chess Club", 10, &["a@x.com", "b@x.com"], Some("Games")),
        activity("Yoga", 1, &["c@x.com"], Some("Sports")),
        activity("Basketball", 15, &[], Some("Sports")),
        activity("Drama", 20, &[], None),
    ])
}

fn rejected(status: u16, detail: &str) -> AppError {
    AppError::Status {
        status,
        detail: Some(detail.to_string()),
    }
}

/// In-memory stand-in for the activities service, with the same rules the
/// real one applies to signups.
#[derive(Default)]
pub struct FakeApi {
    catalog: Mutex<Catalog>,
    offline: AtomicBool,
    list_failures: AtomicBool,
    next_action_error: Mutex<Option<AppError>>,
    list_delays: Mutex<VecDeque<Duration>>,
    pub list_calls: AtomicUsize,
    pub action_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            ..Default::default()
        }
    }

    pub fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.lock().unwrap() = catalog;
    }

    /// Every request fails before reaching the server.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Only the list fetch fails.
    pub fn set_list_failing(&self, failing: bool) {
        self.list_failures.store(failing, Ordering::SeqCst);
    }

    pub fn fail_next_action(&self, err: AppError) {
        *self.next_action_error.lock().unwrap() = Some(err);
    }

    /// Delays the next list responses, one entry per call.
    pub fn delay_lists(&self, delays: &[Duration]) {
        self.list_delays.lock().unwrap().extend(delays.iter().copied());
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_action(&self) -> Result<()> {
        self.action_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Transport("connection refused".to_string()));
        }
        match self.next_action_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ActivityApi for FakeApi {
    async fn list_activities(&self) -> Result<Catalog> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.catalog.lock().unwrap().clone();
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.offline.load(Ordering::SeqCst) || self.list_failures.load(Ordering::SeqCst) {
            return Err(AppError::Decode("expected value at line 1 column 1".to_string()));
        }
        Ok(snapshot)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String> {
        self.check_action()?;
        let mut catalog = self.catalog.lock().unwrap();
        let mut entry = catalog
            .get(activity)
            .cloned()
            .ok_or_else(|| rejected(404, "Activity not found"))?;

        if entry.participants.iter().any(|p| p == email) {
            return Err(rejected(400, "Student is already signed up"));
        }
        if entry.participants.len() as i64 >= entry.max_participants {
            return Err(rejected(400, "Activity is full"));
        }

        entry.participants.push(email.to_string());
        catalog.insert(entry);
        Ok(format!("Signed up {} for {}", email, activity))
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String> {
        self.check_action()?;
        let mut catalog = self.catalog.lock().unwrap();
        let mut entry = catalog
            .get(activity)
            .cloned()
            .ok_or_else(|| rejected(404, "Activity not found"))?;

        let Some(position) = entry.participants.iter().position(|p| p == email) else {
            return Err(rejected(400, "Participant not found"));
        };

        entry.participants.remove(position);
        catalog.insert(entry);
        Ok(format!("Unregistered {} from {}", email, activity))
    }
}
