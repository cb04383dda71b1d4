//! Response envelopes shared by the backend services.

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};

/// `{ success, message?, data }` wrapper used by most non-paged endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// `success == false` becomes [`ApiError::Backend`] with the service
    /// message; a successful envelope without data is treated as not found.
    pub fn into_result(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Backend(
                self.message
                    .unwrap_or_else(|| "The service rejected the request".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            ApiError::NotFound(self.message.unwrap_or_else(|| "empty response".to_string()))
        })
    }
}

/// Services are inconsistent about wrapping: accept both the envelope and
/// the bare payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped(ApiResponse<T>),
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_result(self) -> ApiResult<T> {
        match self {
            MaybeWrapped::Wrapped(envelope) => envelope.into_result(),
            MaybeWrapped::Bare(data) => Ok(data),
        }
    }
}

/// Decode a response body into `T`, unwrapping the envelope when present.
pub fn decode_body<T>(body: &str) -> ApiResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str::<MaybeWrapped<T>>(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::Page;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Dto {
        id: i64,
    }

    #[test]
    fn test_success_envelope() {
        let dto: Dto = decode_body(r#"{"success":true,"data":{"id":3}}"#).unwrap();
        assert_eq!(dto, Dto { id: 3 });
    }

    #[test]
    fn test_failed_envelope_keeps_message() {
        let err = decode_body::<Dto>(r#"{"success":false,"message":"Contract is locked","data":null}"#)
            .unwrap_err();
        assert_eq!(err, ApiError::Backend("Contract is locked".to_string()));
        assert_eq!(err.to_string(), "Contract is locked");
    }

    #[test]
    fn test_bare_payload_and_page() {
        let dto: Dto = decode_body(r#"{"id":9}"#).unwrap();
        assert_eq!(dto.id, 9);

        let page: Page<Dto> = decode_body(
            r#"{"content":[{"id":1}],"totalElements":1,"totalPages":1,"number":0,"size":20}"#,
        )
        .unwrap();
        assert_eq!(page.content, vec![Dto { id: 1 }]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            decode_body::<Dto>("<html>"),
            Err(ApiError::Decode(_))
        ));
    }
}
