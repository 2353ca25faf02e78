use thiserror::Error;

/// Application-wide error types.
///
/// This enum represents all possible errors that can occur in the gleaner
/// application. It uses the `thiserror` crate for ergonomic error handling
/// and automatic conversion from underlying library errors.
///
/// # Error Conversion
///
/// Errors from the core libraries convert automatically via `#[from]`:
/// - `sqlx::Error` → `AppError::DatabaseError`
/// - `serde_json::Error` → `AppError::SerializationError`
///
/// The fetch client resolves retryable conditions (rate limits, transient
/// server failures) internally, so an `AppError` escaping a component is
/// either fatal for the current item or fatal for the whole run; the
/// harvest pipeline decides which.
///
/// # Examples
///
/// ```no_run
/// use gleaner_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     // Errors automatically convert
///     Err(AppError::Generic("Something went wrong".to_string()))
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed.
    ///
    /// This error wraps all errors from SQLx store operations, including
    /// open failures, upsert errors, and constraint violations.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// HTTP request failed with a fatal status.
    ///
    /// This error occurs when the catalog answers with a non-success
    /// status that is neither a rate-limit signal nor a transient server
    /// failure, or when a response body cannot be decoded.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// JSON serialization or deserialization failed.
    ///
    /// This error occurs when converting between Rust types and JSON
    /// outside the HTTP layer, typically when rendering stored records.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Network or connection error.
    ///
    /// This error occurs when a request fails due to connectivity issues,
    /// DNS resolution failures, or the remote server being unreachable.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    ///
    /// This error occurs when a request takes longer than the configured
    /// timeout on every attempt.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limit exceeded.
    ///
    /// This error occurs only when rate-limit suspensions exhaust their
    /// retry budget; ordinary quota pauses are handled transparently.
    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimitExceeded,

    /// Invalid catalog base URL provided.
    ///
    /// This error occurs when the configured base URL is malformed or
    /// cannot be used to construct valid API endpoints.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Configuration error.
    ///
    /// This error occurs when command-line or environment configuration
    /// is missing or contains invalid values.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic application error for cases not covered by specific variants.
    ///
    /// Use this sparingly - prefer creating specific error variants
    /// for better error handling and debugging.
    #[error("Error: {0}")]
    Generic(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DatabaseError(e) => {
                if e.to_string().contains("unable to open") {
                    "Cannot open the store file.\n   Check the --db path and its permissions."
                        .to_string()
                } else {
                    format!("Database error: {}", e)
                }
            }
            AppError::ClientError(msg) => format!("API error: {}", msg),
            AppError::SerializationError(e) => format!("Malformed data: {}", e),
            AppError::NetworkError(msg) => {
                format!(
                    "Cannot reach the catalog: {}\n   Check your internet connection and the API URL.",
                    msg
                )
            }
            AppError::Timeout(secs) => {
                format!(
                    "Request timed out after {} seconds. The catalog may be slow or unreachable.\n   Try again later.",
                    secs
                )
            }
            AppError::RateLimitExceeded => {
                "The catalog kept rate-limiting us.\n   Wait a while and run again; progress so far is saved."
                    .to_string()
            }
            AppError::InvalidBaseUrl(url) => {
                format!("'{}' is not a valid API URL.\n   Expected something like https://api.github.com", url)
            }
            AppError::ConfigError(msg) => format!("Configuration error: {}", msg),
            AppError::Generic(msg) => msg.clone(),
        }
    }

    /// Returns true when retrying the same operation later could succeed.
    ///
    /// The fetch client already retries these internally, so seeing one
    /// means the retry budget ran out, not that retrying is pointless.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkError(_) | AppError::Timeout(_) | AppError::RateLimitExceeded
        )
    }
}
