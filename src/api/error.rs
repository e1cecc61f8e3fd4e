use thiserror::Error;

/// Fallback when neither the server nor the transport supplied a message.
const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Maximum length for raw response bodies echoed into error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 from the server. Carries the server's own message when it sent
    /// one; recoverable once via the refresh-and-retry path.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    /// Validation/business error reported by the API envelope, surfaced
    /// verbatim.
    #[error("{0}")]
    Api(String),

    /// No response received. The transport's message is flattened to a
    /// string so reqwest error shapes never cross the client boundary.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Truncate a response body to avoid echoing excessive data.
    /// The cut lands on a char boundary; bodies are arbitrary server
    /// output and may be non-ASCII.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let cut = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= MAX_ERROR_BODY_LENGTH)
            .last()
            .unwrap_or(0);
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    /// Pull the human-readable message out of an error response body.
    /// The API wraps errors as `{ success: false, error?, message? }`;
    /// `error` wins over `message`, and a non-envelope body yields None.
    fn extract_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        field("error").or_else(|| field("message"))
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::extract_message(body);
        if status.as_u16() == 401 {
            return ApiError::Unauthorized(
                message.unwrap_or_else(|| "Unauthorized - session may have expired".to_string()),
            );
        }

        // Non-envelope bodies are echoed (truncated) rather than dropped
        let raw_body = if body.trim().is_empty() {
            None
        } else {
            Some(Self::truncate_body(body))
        };
        let resolve = |fallback: String| {
            message
                .clone()
                .or_else(|| raw_body.clone())
                .unwrap_or(fallback)
        };

        match status.as_u16() {
            403 => ApiError::AccessDenied(resolve("access denied".to_string())),
            404 => ApiError::NotFound(resolve("no such resource".to_string())),
            500..=599 => ApiError::ServerError(resolve("internal server error".to_string())),
            _ => ApiError::Api(resolve(format!("Request failed with status {}", status))),
        }
    }

    pub fn from_transport(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            ApiError::Network(GENERIC_ERROR_MESSAGE.to_string())
        } else {
            ApiError::Network(message)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}
