use thiserror::Error;

/// Failure of a call to one of the backend services, or of a client-side
/// check before the call. `Display` is the text shown in error panels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The service answered with `success: false`.
    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session expired, please sign in again")]
    Unauthorized,
}

impl ApiError {
    /// Map a non-2xx status to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            "no details".to_string()
        } else {
            body.trim().chars().take(300).collect()
        };
        match status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            _ => ApiError::Http { status, message },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_status(404, "contract 7"),
            ApiError::NotFound("contract 7".to_string())
        );
        assert_eq!(
            ApiError::from_status(500, "  ").to_string(),
            "Server error 500: no details"
        );
    }
}
