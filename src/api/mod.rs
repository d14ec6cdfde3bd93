use async_trait::async_trait;

use crate::domain::Catalog;
use crate::error::Result;

pub mod http;

pub use http::HttpActivityApi;

/// The activities service as seen by the page.
///
/// Mutations return the server's confirmation text. A rejection surfaces as
/// [`AppError::Status`](crate::error::AppError::Status) carrying the
/// server's `detail`, if any.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn list_activities(&self) -> Result<Catalog>;
    async fn signup(&self, activity: &str, email: &str) -> Result<String>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<String>;
}

pub const ACTIVITIES_PATH: &str = "/activities";

pub fn signup_path(activity: &str, email: &str) -> String {
    format!(
        "{}/{}/signup?email={}",
        ACTIVITIES_PATH,
        urlencoding::encode(activity),
        urlencoding::encode(email)
    )
}

pub fn unregister_path(activity: &str, email: &str) -> String {
    format!(
        "{}/{}/unregister?email={}",
        ACTIVITIES_PATH,
        urlencoding::encode(activity),
        urlencoding::encode(email)
    )
}
