use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::ActivityApi,
    domain::Catalog,
    error::AppError,
};
use super::{
    dom::Action,
    page::{MessageStyle, Page},
    render,
};

pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

/// Something the user did on the page. Control values are read from the
/// page handles, so set them before raising the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SearchInput,
    CategoryChanged,
    SortChanged,
    SubmitSignup,
    Click(Action),
}

#[derive(Debug, Default)]
struct State {
    catalog: Catalog,
    categories: Vec<String>,
    refresh_generation: u64,
}

/// Owns the activity snapshot and drives every render and action for one
/// page.
///
/// All work happens on a single thread. Messages schedule their auto-hide
/// with [`tokio::task::spawn_local`], so the controller must be driven from
/// inside a [`tokio::task::LocalSet`].
pub struct Controller {
    api: Arc<dyn ActivityApi>,
    page: Page,
    message_timeout: Duration,
    state: RefCell<State>,
}

impl Controller {
    pub fn new(api: Arc<dyn ActivityApi>, page: Page, message_timeout: Duration) -> Self {
        Self {
            api,
            page,
            message_timeout,
            state: RefCell::new(State::default()),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn catalog(&self) -> Catalog {
        self.state.borrow().catalog.clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.state.borrow().categories.clone()
    }

    /// Re-fetches the catalog and re-renders everything.
    ///
    /// If another refresh was started while this one was in flight, the
    /// older response is dropped.
    pub async fn refresh(&self) {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.refresh_generation += 1;
            state.refresh_generation
        };

        let result = self.api.list_activities().await;

        if self.state.borrow().refresh_generation != generation {
            tracing::debug!("Discarding stale activities response (generation {})", generation);
            return;
        }

        match result {
            Ok(catalog) => {
                tracing::info!("Loaded {} activities", catalog.len());
                {
                    let mut state = self.state.borrow_mut();
                    state.categories = catalog.categories();
                    state.catalog = catalog;
                }
                self.render_categories();
                self.render_activities();
                self.render_activity_select();
            }
            Err(err) => {
                tracing::error!("Error fetching activities: {}", err);
                self.page.activities_list.replace(render::load_failure());
            }
        }
    }

    pub fn render_categories(&self) {
        let Some(filter) = &self.page.category_filter else {
            return;
        };
        let state = self.state.borrow();
        filter.replace_options(render::category_options(&state.categories));
    }

    pub fn render_activity_select(&self) {
        let state = self.state.borrow();
        self.page
            .activity_select
            .replace_options(render::activity_options(&state.catalog));
    }

    pub fn render_activities(&self) {
        let query = self.page.query();
        tracing::debug!("Rendering activities for {:?}", query);
        let state = self.state.borrow();
        self.page
            .activities_list
            .replace(render::activity_list(&state.catalog, &query));
    }

    /// Submits the signup form as it currently reads.
    pub async fn register(&self) {
        let email = self.page.signup_email.value();
        let activity = self.page.activity_select.value();

        match self.api.signup(&activity, &email).await {
            Ok(message) => {
                tracing::info!("Signed up {} for {}", email, activity);
                self.page.reset_signup_form();
                self.flash(message, MessageStyle::Success);
                self.refresh().await;
            }
            Err(err) => self.report_failure("signing up", err, SIGNUP_FAILED),
        }
    }

    pub async fn unregister(&self, activity: &str, email: &str) {
        match self.api.unregister(activity, email).await {
            Ok(message) => {
                tracing::info!("Unregistered {} from {}", email, activity);
                self.flash(message, MessageStyle::Success);
                self.refresh().await;
            }
            Err(err) => self.report_failure("unregistering", err, UNREGISTER_FAILED),
        }
    }

    pub async fn dispatch(&self, action: Action) {
        match action {
            Action::Unregister { activity, email } => self.unregister(&activity, &email).await,
        }
    }

    pub async fn handle_event(&self, event: PageEvent) {
        match event {
            PageEvent::SearchInput | PageEvent::CategoryChanged | PageEvent::SortChanged => {
                self.render_activities()
            }
            PageEvent::SubmitSignup => self.register().await,
            PageEvent::Click(action) => self.dispatch(action).await,
        }
    }

    fn report_failure(&self, doing: &str, err: AppError, fallback: &str) {
        match &err {
            AppError::Status { status, .. } => {
                tracing::warn!("Server rejected {} ({}): {}", doing, status, err)
            }
            _ => tracing::error!("Error {}: {}", doing, err),
        }
        self.flash(err.user_message(fallback), MessageStyle::Error);
    }

    /// Shows a message and schedules it to hide after the timeout. A newer
    /// message cancels the pending hide of an older one.
    fn flash(&self, text: String, style: MessageStyle) {
        let generation = self.page.message.show(text, style);
        let message = self.page.message.clone();
        let deadline = tokio::time::Instant::now() + self.message_timeout;
        tokio::task::spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            message.hide_if_current(generation);
        });
    }
}
