use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::ApiError;

/// The envelope every API endpoint responds with:
/// `{ success, data, message?, error? }`. Services hand it back unchanged;
/// callers check `success` (or use the helpers below).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The server's message for a failed envelope: `error` wins over
    /// `message`, falling back to the supplied default.
    pub fn error_message(&self, fallback: &str) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Unwrap the payload of a data-bearing response.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self.error_message("Request failed");
            return Err(ApiError::Api(message));
        }
        self.data.ok_or_else(|| {
            ApiError::InvalidResponse("response marked success but carried no data".to_string())
        })
    }

    /// Check `success` for responses whose payload is irrelevant
    /// (deletes return `data: null`).
    pub fn ok(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Api(self.error_message("Request failed")))
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub(crate) fn from_json(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
