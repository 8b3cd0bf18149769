//! HTTP helpers for Lambda functions.

use lambda_http::http::header::{ALLOW, CONTENT_TYPE};
use lambda_http::{Body, Response};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Error payload returned on every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Create the error response for a failed request.
///
/// Only [`Error::public_message`] reaches the caller.
pub fn error_response(error: &Error) -> Result<Response<Body>, lambda_http::Error> {
    let mut response = json_response(
        error.status_code(),
        &ErrorBody {
            error: error.public_message(),
        },
    )?;

    if matches!(error, Error::MethodNotAllowed) {
        response
            .headers_mut()
            .insert(ALLOW, lambda_http::http::HeaderValue::from_static("POST"));
    }

    Ok(response)
}
