//! Single point of contact with the forum backend.
//!
//! The gateway owns transport details only: URL construction against the
//! configured base, the bearer header, HTTP status mapping and envelope
//! decoding. It never retries and sets no timeout.

use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header::AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{auth::bearer_header, dto::Envelope, errors::ClientError, session::Session};

/// Bytes escaped inside one path segment: the URL path set plus every
/// character a parser would read as structure.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Verb-shaped calls against one backend.
///
/// Paths are relative to the configured base (`post`, `community/Science`).
/// Values that come from users must go through [`segment`] first.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Envelope, ClientError>;

    async fn post(&self, path: &str, payload: &Value) -> Result<Envelope, ClientError>;

    async fn patch(&self, path: &str, payload: &Value) -> Result<Envelope, ClientError>;

    async fn delete(&self, path: &str, payload: Option<&Value>) -> Result<Envelope, ClientError>;

    /// POST whose reply is handed back as raw text instead of being decoded.
    async fn post_text(&self, path: &str, payload: &Value) -> Result<String, ClientError>;
}

/// Join a base address and a resource path with exactly one `/`.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode `raw` so it reaches the server as exactly one path segment.
///
/// Empty, `.` and `..` segments are refused: URL parsers collapse them no
/// matter how they are escaped.
pub fn segment(raw: &str) -> Result<String, ClientError> {
    if matches!(raw, "" | "." | "..") {
        return Err(ClientError::InvalidSegment(raw.to_owned()));
    }
    Ok(utf8_percent_encode(raw, SEGMENT).to_string())
}

/// `{prefix}/{segment(raw)}`
pub fn resource_path(prefix: &str, raw: &str) -> Result<String, ClientError> {
    Ok(format!("{prefix}/{}", segment(raw)?))
}

/// Reqwest-backed gateway.
pub struct HttpGateway {
    client: Client,
    base: String,
    session: Session,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: &Url, session: Session) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("forum-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base, session))
    }

    pub fn with_client(client: Client, base: &Url, session: Session) -> Self {
        Self {
            client,
            base: base.as_str().trim_end_matches('/').to_owned(),
            session,
        }
    }

    pub fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&join_url(&self.base, path))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.url_for(path)?;
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => Ok(builder.header(AUTHORIZATION, bearer_header(&token)?)),
            None => Ok(builder),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, ClientError> {
        let response = builder.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ClientError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Response {} ({} bytes)", status, body.len());

        if !status.is_success() {
            warn!("Backend answered {}", status);
            return Err(status_error(status, &body));
        }
        Ok(body)
    }

    async fn send_json(&self, builder: RequestBuilder) -> Result<Envelope, ClientError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable response body: {}", e);
            ClientError::decode(format!("response is not an envelope: {e}"))
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Envelope, ClientError> {
        let builder = self.request(Method::GET, path)?;
        let builder = if query.is_empty() {
            builder
        } else {
            builder.query(query)
        };
        self.send_json(builder).await
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Envelope, ClientError> {
        let builder = self.request(Method::POST, path)?.json(payload);
        self.send_json(builder).await
    }

    async fn patch(&self, path: &str, payload: &Value) -> Result<Envelope, ClientError> {
        let builder = self.request(Method::PATCH, path)?.json(payload);
        self.send_json(builder).await
    }

    async fn delete(&self, path: &str, payload: Option<&Value>) -> Result<Envelope, ClientError> {
        let builder = self.request(Method::DELETE, path)?;
        let builder = match payload {
            Some(payload) => builder.json(payload),
            None => builder,
        };
        // A bare 204 carries no envelope.
        let body = self.send(builder).await?;
        if body.trim().is_empty() {
            return Ok(Envelope {
                status: 204,
                message: String::new(),
                code: None,
                data: Value::Null,
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| ClientError::decode(format!("response is not an envelope: {e}")))
    }

    async fn post_text(&self, path: &str, payload: &Value) -> Result<String, ClientError> {
        let builder = self.request(Method::POST, path)?.json(payload);
        self.send(builder).await
    }
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<Envelope>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.chars().take(200).collect());
    ClientError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080", "user")]
    #[case("http://localhost:8080/", "user")]
    #[case("http://localhost:8080", "/user")]
    #[case("http://localhost:8080/", "/user")]
    #[case("http://localhost:8080//", "//user")]
    fn join_url_uses_exactly_one_separator(#[case] base: &str, #[case] path: &str) {
        assert_eq!(join_url(base, path), "http://localhost:8080/user");
    }

    #[rstest]
    fn join_url_keeps_nested_paths() {
        assert_eq!(
            join_url("https://forum.example/api", "community/Science"),
            "https://forum.example/api/community/Science"
        );
    }

    #[rstest]
    fn gateway_urls_keep_base_path() {
        let base = Url::parse("https://forum.example/api/").expect("valid url");
        let gateway = HttpGateway::with_client(Client::new(), &base, Session::new());
        let url = gateway.url_for("post/p1").expect("valid url");
        assert_eq!(url.as_str(), "https://forum.example/api/post/p1");
    }

    fn gateway() -> HttpGateway {
        let base = Url::parse("http://forum.example/api").expect("valid url");
        HttpGateway::with_client(Client::new(), &base, Session::new())
    }

    #[rstest]
    #[case("../user/alice", "/api/community/..%2Fuser%2Falice")]
    #[case("C#", "/api/community/C%23")]
    #[case("a?b=1", "/api/community/a%3Fb=1")]
    #[case("x/y", "/api/community/x%2Fy")]
    #[case("50%", "/api/community/50%25")]
    #[case("..\\user", "/api/community/..%5Cuser")]
    #[case("Rust Lang", "/api/community/Rust%20Lang")]
    fn names_stay_inside_one_segment(#[case] name: &str, #[case] expected: &str) {
        let path = resource_path("community", name).expect("usable name");
        let url = gateway().url_for(&path).expect("valid url");
        assert_eq!(url.path(), expected);
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    fn dot_and_empty_segments_are_refused(#[case] raw: &str) {
        assert!(matches!(segment(raw), Err(ClientError::InvalidSegment(s)) if s == raw));
    }

    #[rstest]
    fn plain_names_are_untouched() {
        assert_eq!(segment("Science").expect("usable"), "Science");
        assert_eq!(segment("..hidden").expect("usable"), "..hidden");
    }

    #[rstest]
    fn status_error_prefers_envelope_message() {
        let err = status_error(
            StatusCode::CONFLICT,
            r#"{"status":409,"message":"Username already exists","data":{}}"#,
        );
        assert!(matches!(
            err,
            ClientError::Status { status, message }
                if status == StatusCode::CONFLICT && message == "Username already exists"
        ));
    }

    #[rstest]
    fn status_error_falls_back_to_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ClientError::Status { message, .. } if message == "upstream down"));
    }
}
