//! Body codec
//!
//! Outgoing XML is passed through untouched; outgoing forms are URL-form
//! encoded in the order given. Incoming JSON is decoded with corruption
//! detection, incoming XML and text are returned as opaque strings.

use serde_json::Value;
use url::form_urlencoded;

use super::errors::{Error, Result};
use super::operation::Scope;

/// Content type of configuration bodies
pub const XML: &str = "text/xml";

/// Content type of form bodies
pub const FORM: &str = "application/x-www-form-urlencoded";

/// Submit label Jenkins expects on the offline cause form
const UPDATE_OFFLINE_REASON: &str = "Update reason";

/// Encoded request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// `Content-Type` header value
    pub content_type: &'static str,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl Body {
    /// XML configuration body, verbatim
    #[must_use]
    pub fn xml(xml: impl Into<String>) -> Self {
        Self {
            content_type: XML,
            bytes: xml.into().into_bytes(),
        }
    }

    /// Form body with fields in the given order
    #[must_use]
    pub fn form<K, V>(fields: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
            .finish();

        Self {
            content_type: FORM,
            bytes: encoded.into_bytes(),
        }
    }

    /// Body as text, for logging and tests
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Form rewriting the offline cause of an offline node
///
/// Keys are sent as `offlineMessage`, `json`, `Submit`.
#[must_use]
pub fn offline_cause_form(message: &str) -> Body {
    let json = serde_json::json!({ "offlineMessage": message }).to_string();

    Body::form(&[
        ("offlineMessage", message),
        ("json", json.as_str()),
        ("Submit", UPDATE_OFFLINE_REASON),
    ])
}

/// Decodes a JSON body, mapping any failure to a bad data error
pub fn decode_json(scope: Scope, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|err| {
        tracing::debug!(%scope, error = %err, "failed to decode response body");
        Error::bad_data(scope)
    })
}

/// Returns an XML or text body unchanged
#[must_use]
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
