use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::warn;

use super::errors::{RegistryError, Result};
use super::headers::PassthroughHeaders;
use super::{RegistryRequest, RegistryTransport};

/// Base URL and credentials of one registry identity
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub name: &'static str,
    pub url: String,
    pub user: String,
    pub password: String,
    pub context: String,
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("context", &self.context)
            .finish()
    }
}

/// reqwest-backed transport for one identity
pub struct HttpTransport {
    client: Client,
    identity: ClientIdentity,
}

impl HttpTransport {
    pub fn new(identity: ClientIdentity, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            identity,
        })
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.identity.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Identity context first, then the caller's registry headers on top
    fn outbound_headers(&self, passthrough: &PassthroughHeaders) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(&self.identity.context) {
            headers.insert(HeaderName::from_static("x-domainrobot-context"), value);
        }

        for (name, value) in passthrough.iter() {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = name, "Skipping unencodable passthrough header"),
            }
        }

        headers
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    #[tracing::instrument(
        skip(self, request, headers),
        fields(
            identity = self.identity.name,
            method = %request.method,
            path = %request.path
        )
    )]
    async fn send(&self, request: RegistryRequest, headers: &PassthroughHeaders) -> Result<Value> {
        let mut builder = self
            .client
            .request(request.method, self.url_for(&request.path))
            .basic_auth(&self.identity.user, Some(&self.identity.password))
            .headers(self.outbound_headers(headers));

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        // Keep the upstream body as-is; fall back to a string for non-JSON bodies
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        warn!(status = status.as_u16(), "Registry returned an error");

        Err(RegistryError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::encode_segment;

    fn identity(url: &str) -> ClientIdentity {
        ClientIdentity {
            name: "general",
            url: url.to_string(),
            user: "user".to_string(),
            password: "secret".to_string(),
            context: "4".to_string(),
        }
    }

    #[test]
    fn test_url_join() {
        let transport = HttpTransport::new(identity("https://api.autodns.com/v1/"), None).unwrap();
        assert_eq!(
            transport.url_for("/contact/_search"),
            "https://api.autodns.com/v1/contact/_search"
        );
    }

    #[test]
    fn test_encoded_segments_stay_under_resource() {
        let transport = HttpTransport::new(identity("https://api.autodns.com/v1"), None).unwrap();
        let path = format!(
            "/user/{}/{}/_lock",
            encode_segment("../../x"),
            encode_segment("4")
        );
        let url = reqwest::Url::parse(&transport.url_for(&path)).unwrap();
        assert_eq!(url.path(), "/v1/user/..%2F..%2Fx/4/_lock");
    }

    #[test]
    fn test_passthrough_context_overrides_identity_context() {
        let transport = HttpTransport::new(identity("https://api.autodns.com/v1"), None).unwrap();
        let passthrough = PassthroughHeaders::from_pairs([
            ("x-domainrobot-context", "9"),
            ("x-domainrobot-demo", "true"),
        ]);

        let headers = transport.outbound_headers(&passthrough);

        assert_eq!(headers.get_all("x-domainrobot-context").iter().count(), 1);
        assert_eq!(headers["x-domainrobot-context"], "9");
        assert_eq!(headers["x-domainrobot-demo"], "true");
    }

    #[test]
    fn test_identity_debug_redacts_password() {
        let debug = format!("{:?}", identity("https://api.autodns.com/v1"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
