use super::dto::ConferenceResponse;
use super::model::{Category, Conferences};
use futures::future;
use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

pub const CONFERENCE_DATA_URL: &str =
    "https://raw.githubusercontent.com/tech-conferences/conference-data/master/conferences";

lazy_static! {
    static ref DEFAULT_API: ConfsTechAPI = ConfsTechAPI::default();
}

/// Fetches conferences from the confs.tech conference-data repository.
///
/// Every call is a single GET with no retries; files are laid out as
/// `{base_url}/{year}/{category}.json`.
#[derive(Debug, Clone)]
pub struct ConfsTechAPI {
    client: Client,
    base_url: String,
}

impl Default for ConfsTechAPI {
    fn default() -> Self {
        Self::with_base_url(CONFERENCE_DATA_URL)
    }
}

impl ConfsTechAPI {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, APIError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(APIError::Transport)?;

        Ok(Self { client, ..self })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn conferences_url(&self, category: &Category, year: i32) -> String {
        format!("{}/{}/{}.json", self.base_url, year, category.url_segment())
    }

    /**
    Returns the conferences of a category in a given year, in upstream order.
    * A year or category without data upstream fails with `APIError::HttpStatus` (404)
    */
    #[tracing::instrument(skip(self))]
    pub async fn get_conferences(
        &self,
        category: &Category,
        year: i32,
    ) -> Result<Conferences, APIError> {
        let url = self.conferences_url(category, year);

        info!("Getting conferences from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(APIError::Transport)?;

        let status = response.status();

        if status != StatusCode::OK {
            error!("Upstream answered with status {}", status);
            return Err(APIError::HttpStatus {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(APIError::BodyRead)?;

        let conferences = parse_conferences(&body)?;

        info!("Got {} conferences", conferences.len());

        Ok(conferences)
    }

    /**
    Fetches every category concurrently, pairing each one with its own result.
    * Results keep the order of `categories`
    */
    #[tracing::instrument(skip(self))]
    pub async fn get_conferences_by_category(
        &self,
        categories: &[Category],
        year: i32,
    ) -> Vec<(Category, Result<Conferences, APIError>)> {
        future::join_all(categories.iter().map(|category| async move {
            (*category, self.get_conferences(category, year).await)
        }))
        .await
    }
}

/// Fetches using a shared client pointed at the upstream repository
pub async fn get_conferences(category: &Category, year: i32) -> Result<Conferences, APIError> {
    DEFAULT_API.get_conferences(category, year).await
}

/// Decodes a whole upstream file; any invalid record fails the entire payload
pub fn parse_conferences(body: &[u8]) -> Result<Conferences, APIError> {
    match serde_json::from_slice::<Vec<ConferenceResponse>>(body) {
        Ok(parsed_response) => Ok(parsed_response
            .into_iter()
            .map(ConferenceResponse::into_model)
            .collect()),
        Err(e) => {
            error!("Response parse failed: {:?}", e);
            Err(APIError::Decode(e))
        }
    }
}

// reqwest only displays its outermost layer, the actual cause sits further down
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

#[derive(Debug, Error)]
pub enum APIError {
    #[error("error building HTTP request: {}", error_chain(.0))]
    Transport(#[source] reqwest::Error),

    #[error("error getting conferences: HTTP Status Code {status_code}")]
    HttpStatus { status_code: u16 },

    #[error("error reading HTTP response: {}", error_chain(.0))]
    BodyRead(#[source] reqwest::Error),

    #[error("error unmarshalling JSON data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl APIError {
    /// Upstream status code, only set when the request completed with a non-200 status
    pub fn status_code(&self) -> Option<u16> {
        match self {
            APIError::HttpStatus { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_build_upstream_url_from_year_and_category() {
        let api = ConfsTechAPI::default();

        assert_eq!(
            api.conferences_url(&Category::DevOps, 2019),
            "https://raw.githubusercontent.com/tech-conferences/conference-data/master/conferences/2019/devops.json"
        );
        assert_eq!(
            api.conferences_url(&Category::TechComm, 2024),
            "https://raw.githubusercontent.com/tech-conferences/conference-data/master/conferences/2024/tech-comm.json"
        );
    }

    #[test_log::test]
    fn should_trim_trailing_slash_of_base_url() {
        let api = ConfsTechAPI::with_base_url("http://localhost:8080/conferences/");

        assert_eq!(
            api.conferences_url(&Category::Rust, 2010),
            "http://localhost:8080/conferences/2010/rust.json"
        );
    }

    #[test_log::test]
    fn should_keep_upstream_order() {
        let conferences = parse_conferences(
            br##"[
                {"name": "B", "url": "https://b.example", "startDate": "2019-05-01", "endDate": "2019-05-02", "city": "Berlin", "country": "Germany"},
                {"name": "A", "url": "https://a.example", "startDate": "2019-01-01", "endDate": null, "city": "Amsterdam", "country": "Netherlands"},
                {"name": "C", "url": "https://c.example", "startDate": null, "endDate": null, "city": "Cork", "country": "Ireland"}
            ]"##,
        )
        .unwrap();

        let names: Vec<&str> = conferences.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test_log::test]
    fn empty_array_should_decode_to_an_empty_list() {
        assert_eq!(parse_conferences(b"[]").unwrap().len(), 0);
    }

    #[test_log::test]
    fn non_array_payload_should_be_a_decode_error() {
        let err = parse_conferences(br#"{"name": "Not a list"}"#).unwrap_err();

        assert!(matches!(err, APIError::Decode(_)), "{:?}", err);
        assert!(err.to_string().starts_with("error unmarshalling JSON data: "));
        assert_eq!(err.status_code(), None);
    }

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Outer(#[source] std::io::Error);

    #[test_log::test]
    fn error_chain_should_include_every_cause() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));

        assert_eq!(error_chain(&err), "connection reset: Connection refused");
    }

    #[test_log::test]
    fn status_error_should_embed_the_status_code() {
        let err = APIError::HttpStatus { status_code: 404 };

        assert_eq!(
            err.to_string(),
            "error getting conferences: HTTP Status Code 404"
        );
        assert_eq!(err.status_code(), Some(404));
    }
}
