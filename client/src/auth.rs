use reqwest::header::HeaderValue;

use crate::{
    dto::{Envelope, LoginData},
    errors::ClientError,
};

/// `Authorization` header value for a session token.
pub fn bearer_header(token: &str) -> Result<HeaderValue, ClientError> {
    Ok(HeaderValue::from_str(&format!("Bearer {token}"))?)
}

/// Interpret the raw text the login endpoint answers with.
///
/// The body is expected to hold an envelope; login succeeded when its status
/// is `200`. The username the server echoes back wins over the submitted one.
pub fn parse_login_reply(text: &str, submitted: &str) -> Result<(String, LoginData), ClientError> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| ClientError::decode(format!("login reply is not an envelope: {e}")))?;

    if !envelope.is_ok() {
        return Err(ClientError::Status {
            status: reqwest::StatusCode::from_u16(envelope.status)
                .unwrap_or(reqwest::StatusCode::UNAUTHORIZED),
            message: envelope.message,
        });
    }

    let data: LoginData = serde_json::from_value(envelope.data)
        .map_err(|e| ClientError::decode(format!("login data: {e}")))?;
    let username = data
        .username
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| submitted.to_owned());

    Ok((username, data))
}
