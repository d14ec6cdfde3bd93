use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::{
    api::{signup_path, unregister_path, ActivityApi, ACTIVITIES_PATH},
    config::ApiConfig,
    domain::Catalog,
    error::{AppError, Result},
};

/// [`ActivityApi`] over HTTP. No auth headers and no request bodies; every
/// parameter travels in the path or query string.
pub struct HttpActivityApi {
    client: Client,
    base_url: String,
}

impl HttpActivityApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Only a string `detail` counts; FastAPI-style validation arrays do not.
fn detail_of(body: &Value) -> Option<String> {
    body.get("detail").and_then(Value::as_str).map(str::to_string)
}

/// Rejection for the list fetch, where the body may not be JSON at all.
fn rejection(status: StatusCode, body: &[u8]) -> AppError {
    AppError::Status {
        status: status.as_u16(),
        detail: serde_json::from_slice::<Value>(body).ok().as_ref().and_then(detail_of),
    }
}

/// Interprets a signup/unregister response. A body that is not JSON is a
/// decode failure whatever the status.
async fn action_outcome(response: Response) -> Result<String> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body: Value = serde_json::from_slice(&bytes)?;

    if status.is_success() {
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    } else {
        Err(AppError::Status {
            status: status.as_u16(),
            detail: detail_of(&body),
        })
    }
}

#[async_trait]
impl ActivityApi for HttpActivityApi {
    async fn list_activities(&self) -> Result<Catalog> {
        let url = self.url(ACTIVITIES_PATH);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(rejection(status, &body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String> {
        let url = self.url(&signup_path(activity, email));
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        action_outcome(response).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String> {
        let url = self.url(&unregister_path(activity, email));
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        action_outcome(response).await
    }
}
