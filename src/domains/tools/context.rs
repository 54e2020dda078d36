//! Per-request invocation context.
//!
//! The transport packages whatever it knows about the inbound request
//! (headers, request id) into an [`InvocationContext`] and passes it into
//! [`ToolRegistry::invoke`](super::ToolRegistry::invoke). Handlers read it
//! from their arguments; nothing is stored in shared state between requests.

use std::collections::BTreeMap;
use std::fmt;

/// Header names whose values are never printed.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "proxy-authorization", "x-api-key"];

/// Which transport delivered the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// Direct in-process call (tests, embedding).
    #[default]
    Local,
    /// An rmcp session over STDIO or TCP.
    Session,
    /// JSON-RPC over HTTP.
    Http,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Session => f.write_str("session"),
            Self::Http => f.write_str("http"),
        }
    }
}

/// Request-scoped data handed to every tool handler.
#[derive(Clone, Default)]
pub struct InvocationContext {
    transport: TransportKind,
    headers: BTreeMap<String, String>,
    request_id: Option<String>,
}

impl InvocationContext {
    pub fn new(transport: TransportKind) -> Self {
        Self {
            transport,
            ..Self::default()
        }
    }

    /// Build a context from HTTP request headers.
    ///
    /// Headers with non-UTF-8 values are skipped.
    #[cfg(feature = "http")]
    pub fn from_headers(transport: TransportKind, headers: &http::HeaderMap) -> Self {
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .fold(Self::new(transport), |ctx, (name, value)| {
                ctx.with_header(name, value)
            })
    }

    /// Add a header. Names are stored lower-cased.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Look up a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.header("user-agent")
    }

    pub fn has_authorization(&self) -> bool {
        self.header("authorization").is_some()
    }
}

/// Redacts credential-bearing header values.
impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let shown = if SENSITIVE_HEADERS.contains(&k.as_str()) {
                    "[REDACTED]"
                } else {
                    v.as_str()
                };
                (k.as_str(), shown)
            })
            .collect();
        f.debug_struct("InvocationContext")
            .field("transport", &self.transport)
            .field("headers", &headers)
            .field("request_id", &self.request_id)
            .finish()
    }
}
