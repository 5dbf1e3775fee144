use async_trait::async_trait;
use reqwest::{Method, header::AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

use crate::archive::normalize;
use crate::error::{LangolierError, RemoteError, Result};
use crate::item::{StatusId, resolve_id};

use super::oauth::Credentials;
use super::traits::{StatusApi, StatusFeed, StatusStream};
use super::types::{ApiStatus, ErrorBody};

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

/// Largest page the timeline and likes endpoints will return.
pub const MAX_PER_PAGE: u32 = 200;

/// REST v1.1 client authenticated as a single user.
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    per_page: u32,
}

impl TwitterClient {
    #[must_use]
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            per_page: MAX_PER_PAGE,
        }
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
    ) -> std::result::Result<String, RemoteError> {
        let url = format!("{}/{path}", self.base_url);
        let authorization = self
            .credentials
            .authorization(method.as_str(), &url, params);

        let response = self
            .client
            .request(method.clone(), &url)
            .query(params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|error| format!("<failed to read response body: {error}>"));

        if status.is_success() {
            debug!(method = method.as_str(), path, "request succeeded");
            return Ok(body);
        }

        Err(remote_error(status.as_u16(), &body))
    }

    async fn post_status(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> std::result::Result<(), RemoteError> {
        self.call(Method::POST, path, params).await.map(|_| ())
    }

    async fn fetch_page(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Vec<ApiStatus>> {
        let body = self.call(Method::GET, path, params).await?;
        parse_page(&body)
    }

    fn paginate<'a>(
        &'a self,
        path: &'static str,
        screen_name: &'a str,
        extra: &'static [(&'static str, &'static str)],
    ) -> StatusStream<'a> {
        Box::pin(async_stream::stream! {
            let mut max_id: Option<u64> = None;

            loop {
                let mut params = vec![
                    ("screen_name".to_string(), screen_name.to_string()),
                    ("count".to_string(), self.per_page.to_string()),
                    ("tweet_mode".to_string(), "extended".to_string()),
                ];
                params.extend(extra.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));
                if let Some(max) = max_id {
                    params.push(("max_id".to_string(), max.to_string()));
                }

                let page = match self.fetch_page(path, &params).await {
                    Ok(page) => page,
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                };
                debug!(path, statuses = page.len(), ?max_id, "fetched page");
                if page.is_empty() {
                    return;
                }

                let mut lowest: Option<u64> = None;
                for status in page {
                    match resolve_id(status.id_str.as_deref(), status.id.as_ref()) {
                        Ok(id) => lowest = Some(lowest.map_or(id.get(), |low| low.min(id.get()))),
                        Err(err) => {
                            yield Err(LangolierError::from(err));
                            return;
                        }
                    }
                    yield Ok(status);
                }

                // Ids only shrink while paging backwards; stop if that breaks.
                let next = match lowest {
                    Some(low) if low > 0 => low - 1,
                    _ => return,
                };
                if max_id.is_some_and(|previous| next >= previous) {
                    return;
                }
                max_id = Some(next);
            }
        })
    }
}

fn remote_error(status: u16, body: &str) -> RemoteError {
    let entry = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.errors.into_iter().next());

    match entry {
        Some(entry) => RemoteError {
            status: Some(status),
            code: Some(entry.code),
            message: entry.message,
        },
        None => RemoteError {
            status: Some(status),
            code: None,
            message: body.to_string(),
        },
    }
}

fn parse_page(body: &str) -> Result<Vec<ApiStatus>> {
    let mut value: Value = serde_json::from_str(body)
        .map_err(|err| LangolierError::MalformedResponse(format!("page is not JSON: {err}")))?;
    if !value.is_array() {
        return Err(LangolierError::MalformedResponse(
            "expected an array of statuses".into(),
        ));
    }
    normalize(&mut value)?;
    serde_json::from_value(value).map_err(|err| LangolierError::MalformedResponse(err.to_string()))
}

#[async_trait]
impl StatusApi for TwitterClient {
    async fn destroy_status(&self, id: StatusId) -> std::result::Result<(), RemoteError> {
        self.post_status(&format!("statuses/destroy/{id}.json"), &[])
            .await
    }

    async fn unretweet(&self, id: StatusId) -> std::result::Result<(), RemoteError> {
        self.post_status(&format!("statuses/unretweet/{id}.json"), &[])
            .await
    }

    async fn destroy_favorite(&self, id: StatusId) -> std::result::Result<(), RemoteError> {
        self.post_status("favorites/destroy.json", &[("id".to_string(), id.to_string())])
            .await
    }
}

impl StatusFeed for TwitterClient {
    fn likes<'a>(&'a self, screen_name: &'a str) -> StatusStream<'a> {
        self.paginate("favorites/list.json", screen_name, &[])
    }

    fn timeline<'a>(&'a self, screen_name: &'a str) -> StatusStream<'a> {
        self.paginate(
            "statuses/user_timeline.json",
            screen_name,
            &[("exclude_replies", "false"), ("include_rts", "true")],
        )
    }
}
