//
// Copyright © 2025 Hardcore Engineering Inc.
//
// Licensed under the Eclipse Public License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may
// obtain a copy of the License at https://www.eclipse.org/legal/epl-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//
// See the License for the specific language governing permissions and
// limitations under the License.
//

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::de::{Error as _, value::UnitDeserializer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::*;

use super::constants::ApiErrorCode;
use crate::Error;

/// Failure raised by a host handler, translated into a failure envelope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} {message}")]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Unauthorized, message)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = match &error {
            Error::Validation(_) => ApiErrorCode::ValidationError,
            Error::UnknownDeleteFlag(_) | Error::UnknownErrorCode(_) | Error::Serde(_) => {
                ApiErrorCode::InputError
            }
            Error::Jwt(_) => ApiErrorCode::Unauthorized,
            Error::UninitializedField(_) | Error::Config(_) => ApiErrorCode::SystemError,
        };

        ApiError::new(code, error.to_string())
    }
}

/// Resolves a message catalog key (see [`ApiErrorCode::label`]) into text
pub trait MessageResolver {
    fn resolve(&self, key: &str) -> Option<String>;
}

impl<S: BuildHasher> MessageResolver for HashMap<String, String, S> {
    fn resolve(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome<T> {
    Success(T),
    Failure(ApiError),
}

/// Uniform reply envelope. Carries either a payload or an error, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    outcome: Outcome<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            outcome: Outcome::Success(data),
        }
    }

    pub fn failure(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self::from_error(ApiError::new(code, message))
    }

    /// Failure whose message is looked up by the code's label, falling back
    /// to the label itself when the catalog has no entry.
    pub fn localized_failure<R: MessageResolver + ?Sized>(
        code: ApiErrorCode,
        resolver: &R,
    ) -> Self {
        let label = code.label();

        let message = match resolver.resolve(&label) {
            Some(message) => message,
            None => {
                warn!(%label, "No message for error label");
                label
            }
        };

        Self::failure(code, message)
    }

    pub fn from_error(error: ApiError) -> Self {
        debug!(code = %error.code, message = %error.message, "failure response");

        Self {
            outcome: Outcome::Failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self.outcome {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn error_code(&self) -> Option<ApiErrorCode> {
        self.error().map(|error| error.code)
    }

    pub fn message(&self) -> Option<&str> {
        self.error().map(|error| error.message.as_str())
    }

    /// HTTP status the envelope should be sent with
    pub fn status_code(&self) -> u16 {
        match &self.outcome {
            Outcome::Success(_) => 200,
            Outcome::Failure(error) => error.code.status_code(),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        match self.outcome {
            Outcome::Success(data) => ApiResponse::success(f(data)),
            Outcome::Failure(error) => ApiResponse {
                outcome: Outcome::Failure(error),
            },
        }
    }

    pub fn into_result(self) -> std::result::Result<T, ApiError> {
        match self.outcome {
            Outcome::Success(data) => Ok(data),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<T> From<ApiError> for ApiResponse<T> {
    fn from(error: ApiError) -> Self {
        Self::from_error(error)
    }
}

impl<T, E: Into<ApiError>> From<std::result::Result<T, E>> for ApiResponse<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::from_error(error.into()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, T> {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<ApiErrorCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error_code: Option<ApiErrorCode>,
    message: Option<String>,
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let envelope = match &self.outcome {
            Outcome::Success(data) => EnvelopeRef {
                success: true,
                data: Some(data),
                error_code: None,
                message: None,
            },

            Outcome::Failure(error) => EnvelopeRef {
                success: false,
                data: None,
                error_code: Some(error.code),
                message: Some(&error.message),
            },
        };

        envelope.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Envelope::<T>::deserialize(deserializer)? {
            Envelope {
                success: true,
                data,
                error_code: None,
                message: None,
            } => {
                // "data": null and a missing payload both read as the unit value
                let data = match data {
                    Some(data) => data,
                    None => T::deserialize(UnitDeserializer::<D::Error>::new())?,
                };

                Ok(ApiResponse::success(data))
            }

            Envelope {
                success: false,
                data: None,
                error_code: Some(code),
                message,
            } => Ok(ApiResponse::from_error(ApiError::new(
                code,
                message.unwrap_or_else(|| code.label()),
            ))),

            envelope => {
                let reason = match envelope {
                    Envelope { success: true, error_code: Some(_), .. } => {
                        "successful envelope must not carry an error code"
                    }
                    Envelope { success: true, .. } => {
                        "successful envelope must not carry a message"
                    }
                    Envelope { data: Some(_), .. } => "failed envelope must not carry a payload",
                    Envelope { .. } => "failed envelope must carry an error code",
                };

                debug!(%reason, "Malformed envelope");
                Err(D::Error::custom(reason))
            }
        }
    }
}

#[cfg(feature = "actix")]
mod actix {
    use actix_web::{
        HttpRequest, HttpResponse, Responder, ResponseError, body::BoxBody, http::StatusCode,
    };
    use serde::Serialize;

    use super::{ApiError, ApiResponse};

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    impl<T: Serialize> Responder for ApiResponse<T> {
        type Body = BoxBody;

        fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
            HttpResponse::build(status(self.status_code())).json(&self)
        }
    }

    impl ResponseError for ApiError {
        fn status_code(&self) -> StatusCode {
            status(self.code.status_code())
        }

        fn error_response(&self) -> HttpResponse<BoxBody> {
            HttpResponse::build(ResponseError::status_code(self))
                .json(ApiResponse::<()>::from_error(self.clone()))
        }
    }

}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    fn item() -> Item {
        Item {
            id: 7,
            name: String::from("seven"),
        }
    }

    #[test]
    fn success_carries_payload_only() {
        let response = ApiResponse::success(item());

        assert!(response.is_success());
        assert_eq!(response.error_code(), None);
        assert_eq!(response.message(), None);
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.into_data(), Some(item()));
    }

    #[test]
    fn failure_carries_code_and_message_only() {
        let response = ApiResponse::<Item>::failure(ApiErrorCode::ValidationError, "bad input");

        assert!(!response.is_success());
        assert_eq!(response.data(), None);
        assert_eq!(response.error_code(), Some(ApiErrorCode::ValidationError));
        assert_eq!(response.message(), Some("bad input"));
        assert_eq!(response.status_code(), 400);
    }

    #[test]
    fn wire_shape() {
        let success = serde_json::to_value(ApiResponse::success(item())).unwrap();
        assert_eq!(
            success,
            json!({"success": true, "data": {"id": 7, "name": "seven"}})
        );

        let failure =
            serde_json::to_value(ApiResponse::<Item>::failure(ApiErrorCode::NotFound, "missing"))
                .unwrap();
        assert_eq!(
            failure,
            json!({"success": false, "errorCode": "NOT_FOUND", "message": "missing"})
        );
    }

    #[test]
    fn json_round_trip() -> anyhow::Result<()> {
        let success = ApiResponse::success(vec![item(), item()]);
        let json = serde_json::to_string(&success)?;
        assert_eq!(serde_json::from_str::<ApiResponse<Vec<Item>>>(&json)?, success);

        let failure = ApiResponse::<Item>::failure(ApiErrorCode::PermissionError, "no access");
        let json = serde_json::to_string(&failure)?;
        assert_eq!(serde_json::from_str::<ApiResponse<Item>>(&json)?, failure);

        let empty = ApiResponse::success(());
        let json = serde_json::to_string(&empty)?;
        assert_eq!(serde_json::from_str::<ApiResponse<()>>(&json)?, empty);

        Ok(())
    }

    #[test]
    fn rejects_ambiguous_envelopes() {
        let both = json!({"success": true, "data": 1, "errorCode": "SYSTEM_ERROR"});
        assert!(serde_json::from_value::<ApiResponse<u32>>(both).is_err());

        let failure_with_data = json!({"success": false, "data": 1, "errorCode": "SYSTEM_ERROR"});
        assert!(serde_json::from_value::<ApiResponse<u32>>(failure_with_data).is_err());

        let failure_without_code = json!({"success": false, "message": "oops"});
        assert!(serde_json::from_value::<ApiResponse<u32>>(failure_without_code).is_err());

        let missing_payload = json!({"success": true});
        assert!(serde_json::from_value::<ApiResponse<u32>>(missing_payload).is_err());
    }

    #[test]
    fn malformed_envelope_reasons() {
        let reason = |value: serde_json::Value| {
            serde_json::from_value::<ApiResponse<u32>>(value)
                .unwrap_err()
                .to_string()
        };

        assert!(
            reason(json!({"success": true, "data": 1, "errorCode": "SYSTEM_ERROR"}))
                .contains("must not carry an error code")
        );
        assert!(
            reason(json!({"success": true, "data": 1, "message": "x"}))
                .contains("must not carry a message")
        );
        assert!(
            reason(json!({"success": false, "data": 1, "errorCode": "SYSTEM_ERROR"}))
                .contains("must not carry a payload")
        );
        assert!(reason(json!({"success": false})).contains("must carry an error code"));
    }

    #[test]
    fn failure_without_message_falls_back_to_label() {
        let response: ApiResponse<u32> =
            serde_json::from_value(json!({"success": false, "errorCode": "GENERAL_ERROR"}))
                .unwrap();

        assert_eq!(response.message(), Some("apierrorcode.general_error"));
    }

    #[test]
    fn localized_failure_resolves_label() {
        let catalog = HashMap::from([(
            String::from("apierrorcode.not_found"),
            String::from("Resource not found"),
        )]);

        let found = ApiResponse::<()>::localized_failure(ApiErrorCode::NotFound, &catalog);
        assert_eq!(found.message(), Some("Resource not found"));

        let fallback = ApiResponse::<()>::localized_failure(ApiErrorCode::SystemError, &catalog);
        assert_eq!(fallback.message(), Some("apierrorcode.system_error"));
    }

    #[test]
    fn from_result() {
        let ok: ApiResponse<u32> = Ok::<_, ApiError>(5).into();
        assert_eq!(ok.into_result(), Ok(5));

        let err: ApiResponse<u32> =
            Err::<u32, _>(Error::Validation(String::from("pageSize"))).into();
        assert_eq!(err.error_code(), Some(ApiErrorCode::ValidationError));
        assert_eq!(err.message(), Some("Validation failed: pageSize"));
    }

    #[test]
    fn map_keeps_failure() {
        let doubled = ApiResponse::success(21).map(|n| n * 2);
        assert_eq!(doubled.data(), Some(&42));

        let failure = ApiResponse::<u32>::from(ApiError::unauthorized("expired")).map(|n| n * 2);
        assert_eq!(failure.error_code(), Some(ApiErrorCode::Unauthorized));
    }
}
