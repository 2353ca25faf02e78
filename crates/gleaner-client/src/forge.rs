//! Forge client for harvesting users and repositories from the remote catalog.
//!
//! The catalog paginates users by ID (`/users?since=N`) and exposes each
//! user's repositories under their login. Quota exhaustion travels in
//! response headers rather than a status code: `x-ratelimit-remaining: 0`
//! plus an `x-ratelimit-reset` epoch timestamp, which this client turns
//! into a transparent suspend-and-retry.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gleaner_core::error::AppError;
use gleaner_core::models::{Repo, User};
use gleaner_core::HttpConfig;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;

/// Wire format of one user on the catalog's `/users` page.
///
/// # Examples
///
/// ```
/// use gleaner_client::forge::ForgeUser;
/// use gleaner_core::User;
///
/// let json = r#"{
///     "id": 1,
///     "login": "mojombo",
///     "html_url": "https://github.com/mojombo"
/// }"#;
///
/// let user: ForgeUser = serde_json::from_str(json).unwrap();
/// let user = User::from(user);
/// assert_eq!(user.id, 1);
/// assert_eq!(user.url, "https://github.com/mojombo");
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct ForgeUser {
    /// Catalog-assigned user ID; the pagination cursor counts these.
    pub id: i64,
    /// Unique display name.
    pub login: String,
    /// Canonical profile URL.
    pub html_url: String,
}

/// Wire format of one repository on a user's `/repos` listing.
#[derive(Deserialize, Debug, Clone)]
pub struct ForgeRepo {
    /// Catalog-assigned repository ID.
    pub id: i64,
    /// Repository name.
    pub name: String,
    /// Canonical repository URL.
    pub html_url: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional dominant language label.
    pub language: Option<String>,
    /// Owning user; only the ID is kept.
    pub owner: ForgeRepoOwner,
}

/// The owner object nested in a repository payload.
#[derive(Deserialize, Debug, Clone)]
pub struct ForgeRepoOwner {
    pub id: i64,
}

impl From<ForgeUser> for User {
    fn from(user: ForgeUser) -> Self {
        User {
            id: user.id,
            login: user.login,
            url: user.html_url,
        }
    }
}

impl From<ForgeRepo> for Repo {
    fn from(repo: ForgeRepo) -> Self {
        Repo {
            id: repo.id,
            owner_id: repo.owner.id,
            url: repo.html_url,
            name: repo.name,
            description: repo.description,
            language: repo.language,
        }
    }
}

/// HTTP client for the forge catalog API.
///
/// Retry, backoff, and rate-limit suspension happen inside
/// [`request_with_retry`](Self::request_with_retry); an error escaping a
/// fetch method is fatal for that request and carries no retry left to try.
///
/// # Examples
///
/// ```no_run
/// use gleaner_client::ForgeClient;
/// use gleaner_core::traits::CatalogClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ForgeClient::new("https://api.github.com")?;
/// let users = client.list_users_since(0).await?;
/// println!("First page holds {} users", users.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ForgeClient {
    client: Client,
    base_url: Url,
    config: HttpConfig,
}

impl ForgeClient {
    /// Maximum backoff delay between transient-failure retries.
    const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

    /// Maximum retries for rate-limited responses.
    /// Higher than the transient budget because a quota pause resolves on
    /// its own once the reset time passes.
    const RATE_LIMIT_MAX_RETRIES: u32 = 10;

    /// Creates a new client with default HTTP configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url_str` - The catalog root (e.g., <https://api.github.com>)
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidBaseUrl` if the URL is malformed and
    /// `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(base_url_str: &str) -> Result<Self, AppError> {
        Self::with_config(base_url_str, HttpConfig::default())
    }

    /// Creates a new client with explicit timeout and retry tuning.
    pub fn with_config(base_url_str: &str, config: HttpConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url_str)
            .map_err(|_| AppError::InvalidBaseUrl(base_url_str.to_string()))?;

        let client = Client::builder()
            .user_agent(concat!("gleaner/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Fetches one page of users with IDs strictly greater than `since`.
    ///
    /// The page size is chosen by the catalog; an empty page means there
    /// is nothing past the cursor.
    pub async fn fetch_users_since(&self, since: i64) -> Result<Vec<ForgeUser>, AppError> {
        let mut url = self
            .base_url
            .join("users")
            .map_err(|e| AppError::InvalidBaseUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("since", &since.to_string());

        self.get_json(&url).await
    }

    /// Fetches all repositories owned by `login`.
    pub async fn fetch_repos(&self, login: &str) -> Result<Vec<ForgeRepo>, AppError> {
        let url = self
            .base_url
            .join(&format!("users/{login}/repos"))
            .map_err(|e| AppError::InvalidBaseUrl(e.to_string()))?;

        self.get_json(&url).await
    }

    /// One logical GET: retries resolved internally, body decoded to `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, AppError> {
        let resp = self.request_with_retry(url).await?;
        resp.json()
            .await
            .map_err(|e| AppError::ClientError(format!("malformed response body: {e}")))
    }

    /// Issues the request, classifying each response until one resolves.
    ///
    /// Classification order per attempt:
    /// 1. Zero remaining quota in the headers, regardless of status:
    ///    sleep until the advertised reset time, then re-issue.
    /// 2. Success: return the response.
    /// 3. HTTP 500 (specifically, not all 5xx): exponential backoff within
    ///    the configured retry budget.
    /// 4. Any other non-success status: fatal, no retry.
    ///
    /// Timeouts and connection failures retry like transient failures;
    /// other transport errors are fatal.
    async fn request_with_retry(&self, url: &Url) -> Result<Response, AppError> {
        let max_retries = self.config.max_retries;
        // Rate-limit pauses get a larger budget than transient failures,
        // so a harvest spanning several quota windows still completes.
        let effective_max = Self::RATE_LIMIT_MAX_RETRIES.max(max_retries);
        let mut last_error = AppError::ClientError(format!("no attempts made for {url}"));

        for attempt in 1..=effective_max {
            match self.client.get(url.clone()).send().await {
                Ok(resp) => {
                    if let Some(delay) = rate_limit_delay(resp.headers()) {
                        last_error = AppError::RateLimitExceeded;
                        if attempt < effective_max {
                            tracing::info!(
                                delay_secs = delay.as_secs(),
                                %url,
                                "Rate limited, suspending until quota resets"
                            );
                            sleep(delay).await;
                            continue;
                        }
                        break;
                    }

                    let status = resp.status();

                    if status.is_success() {
                        return Ok(resp);
                    }

                    if status == StatusCode::INTERNAL_SERVER_ERROR {
                        last_error =
                            AppError::ClientError(format!("Server error: HTTP 500 from {url}"));
                        if attempt < max_retries {
                            let delay = self.backoff_delay(attempt);
                            tracing::debug!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                %url,
                                "Transient server failure, backing off"
                            );
                            sleep(delay).await;
                            continue;
                        }
                    }

                    return Err(AppError::ClientError(format!(
                        "HTTP {} from {}",
                        status.as_u16(),
                        url
                    )));
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = AppError::Timeout(self.config.timeout.as_secs());
                    } else if e.is_connect() {
                        last_error = AppError::NetworkError(format!("Connection failed: {e}"));
                    } else {
                        return Err(AppError::ClientError(e.to_string()));
                    }

                    if attempt < max_retries {
                        let delay = self.backoff_delay(attempt);
                        tracing::debug!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            %url,
                            "Transport failure, backing off"
                        );
                        sleep(delay).await;
                        continue;
                    }

                    return Err(last_error);
                }
            }
        }

        Err(last_error)
    }

    /// Backoff for the given attempt: base delay doubling each time, capped.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.config
            .retry_base_delay
            .saturating_mul(factor)
            .min(Self::MAX_RETRY_DELAY)
    }
}

/// Reads the quota headers: `Some(delay)` when no requests remain.
///
/// The delay is the advertised reset time minus now, clamped at zero; a
/// missing or unparseable reset value counts as an immediate retry rather
/// than an error.
fn rate_limit_delay(headers: &HeaderMap) -> Option<Duration> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?;
    if remaining.trim() != "0" {
        return None;
    }

    let reset = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    Some(Duration::from_secs(reset.saturating_sub(now)))
}


// =============================================================================
// Trait Implementation: CatalogClient
// =============================================================================

impl gleaner_core::traits::CatalogClient for ForgeClient {
    async fn list_users_since(&self, since: i64) -> Result<Vec<User>, AppError> {
        let users = self.fetch_users_since(since).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn list_repos(&self, login: &str) -> Result<Vec<Repo>, AppError> {
        let repos = self.fetch_repos(login).await?;
        Ok(repos.into_iter().map(Repo::from).collect())
    }
}
