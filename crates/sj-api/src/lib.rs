//! HTTP client for the sleep journal backend.
//!
//! The backend owns authentication, persistence, and authorization; this
//! crate only speaks its JSON dialect and converts it to and from the
//! `sj-core` types. All computation stays in `sj-core` — nothing here is
//! more than a request, a status check, and a (de)serialization.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sj_core::types::EntryId;
use sj_core::{DailyEntry, SleepPeriod};
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The hosted backend. Overridable through configuration.
pub const DEFAULT_BASE_URL: &str = "https://to-better-me-backend.onrender.com";

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL was unusable.
    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl { reason: &'static str },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The operation requires a bearer token but none is set.
    #[error("not signed in (no bearer token)")]
    MissingToken,
    /// The backend returned a non-success status.
    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Sleep journal backend client.
///
/// Safe to clone; clones share the underlying connection pool. The bearer
/// token, when present, is attached to every authenticated request.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the given backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or not http(s), or if the
    /// HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL cannot be empty",
            });
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL must start with http:// or https://",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attaches a bearer token for authenticated endpoints.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The backend this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::MissingToken)
    }

    /// Registers a new account, returning a bearer token.
    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/sign_up"))
            .json(&SignUpRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;
        let payload: TokenResponse = read_json(response).await?;
        Ok(payload.token)
    }

    /// Signs in, returning a bearer token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/sign_in"))
            .json(&SignInRequest { email, password })
            .send()
            .await?;
        let payload: TokenResponse = read_json(response).await?;
        Ok(payload.token)
    }

    /// Fetches the signed-in user's profile.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.url("/api/user/get_current"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let payload: CurrentUserResponse = read_json(response).await?;
        Ok(payload.current_user)
    }

    /// Fetches every persisted entry for the signed-in user.
    pub async fn entries(&self) -> Result<Vec<DailyEntry>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/user/get_all_entries"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let payload: Vec<EntryDto> = read_json(response).await?;
        payload.into_iter().map(EntryDto::into_entry).collect()
    }

    /// Submits a new daily entry.
    pub async fn create_entry(&self, payload: &EntryPayload) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/user/daily_entry"))
            .bearer_auth(self.bearer()?)
            .json(payload)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Replaces an existing entry's summary and sleep periods.
    pub async fn update_entry(&self, id: &EntryId, payload: &EntryPayload) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/api/user/update_entry/{id}")))
            .bearer_auth(self.bearer()?)
            .json(payload)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Consumes a response, mapping non-success statuses to [`ApiError::Api`].
async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    let message = parse_error_message(&body)
        .unwrap_or_else(|| if body.is_empty() { status.to_string() } else { body });
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let body = check_status(response).await?;
    serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

fn parse_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.message)
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// The signed-in user, as the backend reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "isSpecial", default)]
    pub is_special: bool,
}

#[derive(Debug, Deserialize)]
struct CurrentUserResponse {
    #[serde(rename = "currentUser")]
    current_user: User,
}

/// Wire form of a sleep period. Field names are the backend's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodDto {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "isExtra", default)]
    pub is_extra: bool,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&SleepPeriod> for PeriodDto {
    fn from(period: &SleepPeriod) -> Self {
        Self {
            start: period.start(),
            end: period.end(),
            is_extra: period.is_extra(),
            id: None,
        }
    }
}

/// Wire form of a persisted entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "sleepHours", default)]
    pub sleep_hours: Vec<PeriodDto>,
}

impl EntryDto {
    /// Converts into the domain type, validating the id and the
    /// end-after-start invariant of every period.
    fn into_entry(self) -> Result<DailyEntry, ApiError> {
        let id = EntryId::new(self.id).map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        let periods = self
            .sleep_hours
            .into_iter()
            .map(|dto| {
                SleepPeriod::new(dto.start, dto.end, dto.is_extra)
                    .map_err(|err| ApiError::InvalidResponse(format!("entry {id}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DailyEntry {
            id,
            date: self.date,
            summary: self.summary,
            periods,
        })
    }
}

/// Body of `POST /api/user/daily_entry` and `PUT /api/user/update_entry`.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPayload {
    pub date: DateTime<Utc>,
    pub summary: String,
    #[serde(rename = "sleepHours")]
    pub sleep_hours: Vec<PeriodDto>,
}

impl EntryPayload {
    /// Builds the request body for a day's entry.
    #[must_use]
    pub fn new(date: DateTime<Utc>, summary: impl Into<String>, periods: &[SleepPeriod]) -> Self {
        Self {
            date,
            summary: summary.into(),
            sleep_hours: periods.iter().map(PeriodDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn client_rejects_empty_base_url() {
        assert!(matches!(
            Client::new(""),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn client_rejects_non_http_base_url() {
        assert!(matches!(
            Client::new("ftp://example.com"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = Client::new("https://example.com/").unwrap();
        assert_eq!(client.url("/api/user/get_all_entries"),
            "https://example.com/api/user/get_all_entries");
    }

    #[test]
    fn client_debug_redacts_token() {
        let client = Client::new("https://example.com")
            .unwrap()
            .with_token("secret");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn entry_dto_parses_backend_shape() {
        // Captured from GET /api/user/get_all_entries
        let json = r#"{
            "_id": "66a1b2c3d4e5f60718293a4b",
            "userId": "669f00112233445566778899",
            "date": "2025-06-10T04:00:00.000Z",
            "summary": "slept well",
            "sleepHours": [
                {
                    "start": "2025-06-10T03:00:00.000Z",
                    "end": "2025-06-10T11:00:00.000Z",
                    "isExtra": false,
                    "_id": "66a1b2c3d4e5f60718293a4c"
                }
            ],
            "__v": 0
        }"#;
        let dto: EntryDto = serde_json::from_str(json).unwrap();
        let entry = dto.into_entry().unwrap();
        assert_eq!(entry.id.as_str(), "66a1b2c3d4e5f60718293a4b");
        assert_eq!(entry.summary, "slept well");
        assert_eq!(entry.periods.len(), 1);
        assert!((sj_core::total_hours(&entry.periods) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entry_dto_rejects_inverted_period() {
        let json = r#"{
            "_id": "66a1b2c3d4e5f60718293a4b",
            "date": "2025-06-10T04:00:00.000Z",
            "sleepHours": [
                {"start": "2025-06-10T11:00:00.000Z", "end": "2025-06-10T03:00:00.000Z"}
            ]
        }"#;
        let dto: EntryDto = serde_json::from_str(json).unwrap();
        assert!(matches!(
            dto.into_entry(),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn entry_payload_uses_backend_field_names() {
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 23, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 11, 7, 0, 0).unwrap();
        let period = SleepPeriod::new(start, end, true).unwrap();
        let payload = EntryPayload::new(
            Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap(),
            "long day",
            &[period],
        );

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("sleepHours").is_some());
        assert_eq!(value["summary"], "long day");
        let first = &value["sleepHours"][0];
        assert_eq!(first["isExtra"], true);
        // No _id is sent for freshly built periods
        assert!(first.get("_id").is_none());
    }

    #[test]
    fn error_message_parsing_prefers_backend_message() {
        assert_eq!(
            parse_error_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(parse_error_message("<html>502</html>"), None);
    }
}
