//! Inbound request descriptor.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::request::Parts;
use url::Url;

/// Header name to values, in arrival order per name.
pub type HeaderMultimap = HashMap<String, Vec<String>>;

/// A fresh reader over the request body.
pub type BodyReader = Box<dyn Read + Send>;

/// Re-readable access to a request body.
///
/// Every call to [`BodySource::open`] yields a new reader positioned at the
/// start of the body.
#[derive(Clone)]
pub struct BodySource(Arc<dyn Fn() -> io::Result<BodyReader> + Send + Sync>);

impl BodySource {
    pub fn new<F>(open: F) -> Self
    where
        F: Fn() -> io::Result<BodyReader> + Send + Sync + 'static,
    {
        Self(Arc::new(open))
    }

    /// A source over an already buffered body.
    pub fn from_bytes(body: Bytes) -> Self {
        Self::new(move || Ok(Box::new(Cursor::new(body.clone())) as BodyReader))
    }

    pub fn open(&self) -> io::Result<BodyReader> {
        (self.0)()
    }
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BodySource(..)")
    }
}

/// What the logger needs to know about a request as it arrives.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub method: String,
    pub url: String,
    pub headers: HeaderMultimap,
    pub get_body: Option<BodySource>,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build from a parsed URL, keeping its full serialized form.
    pub fn from_url(method: impl Into<String>, url: &Url) -> Self {
        Self::new(method, url.as_str())
    }

    /// Build from the head of an `http` request and its buffered body.
    ///
    /// Header names are stored in canonical form (`content-type` becomes
    /// `Content-Type`). Repeated names are folded into one entry with the
    /// values kept in the order they were received.
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        let mut headers = HeaderMultimap::new();
        for (name, value) in &parts.headers {
            headers
                .entry(canonical_header_name(name.as_str()))
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        Self {
            method: parts.method.as_str().to_string(),
            url: parts.uri.to_string(),
            headers,
            get_body: Some(BodySource::from_bytes(body)),
        }
    }

    /// Append one value for `name`.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    #[must_use]
    pub fn with_body(self, body: impl Into<Bytes>) -> Self {
        self.with_body_source(BodySource::from_bytes(body.into()))
    }

    #[must_use]
    pub fn with_body_source(mut self, source: BodySource) -> Self {
        self.get_body = Some(source);
        self
    }
}

/// Upper-case the first letter and every letter after a hyphen, lower-case
/// the rest.
fn canonical_header_name(name: &str) -> String {
    let mut at_word_start = true;
    name.chars()
        .map(|c| {
            let out = if at_word_start {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            at_word_start = c == '-';
            out
        })
        .collect()
}
