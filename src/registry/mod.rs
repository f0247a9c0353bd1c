// Registry client - a thin REST client for the Domainrobot API.
// Each verb maps onto exactly one HTTP request and returns its answer as-is.

pub mod errors;
pub mod headers;
pub mod http;
pub mod resources;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

pub use errors::{RegistryError, Result};
pub use headers::PassthroughHeaders;
pub use http::{ClientIdentity, HttpTransport};
pub use resources::*;

/// One request against the registry API, relative to the identity's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RegistryRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Sends registry requests. The HTTP implementation lives in [`http`];
/// tests substitute their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    async fn send(&self, request: RegistryRequest, headers: &PassthroughHeaders) -> Result<Value>;
}

/// A registry client bound to one identity (general, SSL or pcdomains)
#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn RegistryTransport>,
}

impl RegistryClient {
    pub fn new(transport: Arc<dyn RegistryTransport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, request: RegistryRequest, headers: &PassthroughHeaders) -> Result<Value> {
        tracing::debug!(method = %request.method, path = %request.path, "Registry request");
        if has_dot_segment(&request.path) {
            return Err(RegistryError::InvalidPath { path: request.path });
        }
        self.transport.send(request, headers).await
    }

    pub fn contact<'a>(&'a self, headers: &'a PassthroughHeaders) -> ContactService<'a> {
        ContactService::new(self, headers)
    }

    pub fn domain<'a>(&'a self, headers: &'a PassthroughHeaders) -> DomainService<'a> {
        DomainService::new(self, headers)
    }

    pub fn ssl_contact<'a>(&'a self, headers: &'a PassthroughHeaders) -> SslContactService<'a> {
        SslContactService::new(self, headers)
    }

    pub fn certificate<'a>(&'a self, headers: &'a PassthroughHeaders) -> CertificateService<'a> {
        CertificateService::new(self, headers)
    }

    pub fn user<'a>(&'a self, headers: &'a PassthroughHeaders) -> UserService<'a> {
        UserService::new(self, headers)
    }

    pub fn user_2fa<'a>(&'a self, headers: &'a PassthroughHeaders) -> User2faService<'a> {
        User2faService::new(self, headers)
    }

    pub fn whois<'a>(&'a self, headers: &'a PassthroughHeaders) -> WhoisService<'a> {
        WhoisService::new(self, headers)
    }

    pub fn domain_bulk<'a>(&'a self, headers: &'a PassthroughHeaders) -> DomainBulkService<'a> {
        DomainBulkService::new(self, headers)
    }

    pub fn domain_studio<'a>(&'a self, headers: &'a PassthroughHeaders) -> DomainStudioService<'a> {
        DomainStudioService::new(self, headers)
    }

    pub fn pc_domains<'a>(&'a self, headers: &'a PassthroughHeaders) -> PcDomainsService<'a> {
        PcDomainsService::new(self, headers)
    }
}

/// Pull the record out of an `info` answer (`data[0]`)
pub fn first_record(result: Value, resource: &'static str, id: &str) -> Result<Value> {
    let record = match result {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(mut data)) if !data.is_empty() => data.swap_remove(0),
            _ => Value::Null,
        },
        _ => Value::Null,
    };

    match record {
        Value::Null => Err(RegistryError::MissingRecord {
            resource,
            id: id.to_string(),
        }),
        Value::Object(_) => Ok(record),
        _ => Err(RegistryError::MalformedRecord { resource }),
    }
}

/// `.` and `..` segments (raw or `%2e`-escaped) are collapsed by URL parsing
fn has_dot_segment(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or_default();
    path.split('/').any(|segment| {
        let segment = segment.to_ascii_lowercase().replace("%2e", ".");
        segment == "." || segment == ".."
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_record_extracts_data_zero() {
        let result = json!({
            "stid": "20240101-app1-1",
            "status": { "code": "S0304", "type": "SUCCESS" },
            "data": [ { "id": 23250350, "fname": "John" }, { "id": 1 } ]
        });
        let record = first_record(result, "contact", "23250350").unwrap();
        assert_eq!(record, json!({ "id": 23250350, "fname": "John" }));
    }

    #[test]
    fn test_first_record_missing_data() {
        let err = first_record(json!({ "data": [] }), "contact", "7").unwrap_err();
        match err {
            RegistryError::MissingRecord { resource, id } => {
                assert_eq!(resource, "contact");
                assert_eq!(id, "7");
            }
            other => panic!("Expected MissingRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_first_record_rejects_scalars() {
        let err = first_record(json!({ "data": ["nope"] }), "domain", "example.com").unwrap_err();
        assert!(matches!(err, RegistryError::MalformedRecord { resource: "domain" }));
    }

    #[test]
    fn test_dot_segments_detected() {
        assert!(has_dot_segment("/user/../../_lock"));
        assert!(has_dot_segment("/user/jane/./_lock"));
        assert!(has_dot_segment("/user/%2E%2e/4"));
        assert!(!has_dot_segment("/user/jane/4/_lock"));
        assert!(!has_dot_segment("/domain/example.com/_renew"));
        assert!(!has_dot_segment("/user/...x/4"));
    }
}
