use axum::http::HeaderMap;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

/// Registry headers a caller is allowed to pass through, in the casing the
/// registry documents them
pub const DOMAINROBOT_HEADERS: &[&str] = &[
    "X-Domainrobot-2FA-Token",
    "X-Domainrobot-Bulk-Limit",
    "X-Domainrobot-Context",
    "X-Domainrobot-Demo",
    "X-Domainrobot-Domain-Safe-Pin",
    "X-Domainrobot-Domain-Safe-TAN",
    "X-Domainrobot-Domain-Safe-Transaction-Id",
    "X-Domainrobot-Owner-Context",
    "X-Domainrobot-Owner-User",
    "X-Domainrobot-SessionId",
    "X-Domainrobot-WS",
];

pub const HEADER_2FA_TOKEN: &str = "X-Domainrobot-2FA-Token";
pub const HEADER_CONTEXT: &str = "X-Domainrobot-Context";

/// Never forwarded, even if a future whitelist entry would match them
const EXCLUDED_HEADERS: &[&str] = &["user-agent", "content-type"];

/// Lowercased header name -> canonical header name
pub static HEADER_WHITELIST: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    DOMAINROBOT_HEADERS
        .iter()
        .map(|canonical| (canonical.to_ascii_lowercase(), *canonical))
        .collect()
});

/// Look up the canonical casing of a recognised registry header
pub fn canonical_header_name(name: &str) -> Option<&'static str> {
    HEADER_WHITELIST.get(&name.to_ascii_lowercase()).copied()
}

/// The registry headers of one inbound request.
///
/// Built once per request and handed explicitly to every registry call made
/// while serving it. Nothing about it is shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassthroughHeaders {
    headers: BTreeMap<&'static str, String>,
}

impl PassthroughHeaders {
    /// A set that forwards nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Filter an inbound header map down to the whitelisted registry headers
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        Self::from_pairs(
            headers
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
        )
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut headers = BTreeMap::new();

        for (name, value) in pairs {
            if EXCLUDED_HEADERS
                .iter()
                .any(|excluded| name.eq_ignore_ascii_case(excluded))
            {
                continue;
            }

            if let Some(canonical) = canonical_header_name(name) {
                // Repeated headers: last one wins
                headers.insert(canonical, value.to_string());
            }
        }

        Self { headers }
    }

    pub fn get(&self, canonical_name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(canonical_name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.headers.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
