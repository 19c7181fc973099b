//! Builder output: the fully-determined outbound request

use serde_json::Value;

/// HTTP verb of a Graph API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Wire name of the verb
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-determined outbound Graph API call
///
/// Built fresh per input item; never cached or reused.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP verb
    pub method: HttpMethod,
    /// Absolute request URL
    pub url: String,
    /// JSON body, `None` for the management operations
    pub body: Option<Value>,
}
