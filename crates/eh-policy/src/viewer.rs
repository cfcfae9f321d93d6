//! Viewer-response hook in the CloudFront Functions event shape.
//!
//! The runtime hands the function an event envelope; the function mutates
//! `event.response.headers` and hands the response back for delivery. Every
//! envelope field other than the header map is opaque to the policy and
//! round-trips untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{EventError, SECURITY_HEADERS};

/// A single header descriptor: the value under its name in the header map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub value: String,
}

/// Case-insensitive header map in the viewer-response shape:
/// lowercase name to [`HeaderEntry`].
///
/// The runtime delivers names already lowercased; hand-written documents may
/// not, so names are normalized on insert and on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderBag(BTreeMap<String, HeaderEntry>);

impl HeaderBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `name`.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(
            name.to_ascii_lowercase(),
            HeaderEntry {
                value: value.into(),
            },
        );
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderEntry> {
        self.0.get(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

impl<'de> Deserialize<'de> for HeaderBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, HeaderEntry>::deserialize(deserializer)?;
        let mut normalized = BTreeMap::new();
        for (name, entry) in raw {
            normalized.insert(name.to_ascii_lowercase(), entry);
        }
        Ok(Self(normalized))
    }
}

/// The in-flight response carried by a viewer event.
///
/// `headers` is required; `statusCode`, `statusDescription`, `cookies` and
/// anything else the runtime attaches are preserved verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerResponse {
    pub headers: HeaderBag,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The event envelope handed to the hook by the edge runtime.
///
/// Only `response` is interpreted; `version`, `context`, `viewer`, `request`
/// and any future envelope fields are preserved verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerEvent {
    pub response: ViewerResponse,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ViewerEvent {
    /// Parse a viewer-response event document.
    ///
    /// # Errors
    /// Returns [`EventError::Malformed`] if the document is not valid JSON
    /// or lacks the `response` or `response.headers` fields.
    pub fn from_json(input: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Overwrite (or insert) the six fixed security headers on `response`,
/// leaving every other header untouched. Deterministic and idempotent.
pub fn inject(response: &mut ViewerResponse) {
    for header in &SECURITY_HEADERS {
        response.headers.insert(header.name, header.value);
    }
}

/// The viewer-response hook: take the envelope, inject the policy into the
/// response's header map in place, and hand that same response back.
#[must_use]
pub fn handler(mut event: ViewerEvent) -> ViewerResponse {
    inject(&mut event.response);
    event.response
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::collection::btree_map;
    use proptest::prelude::*;

    fn arbitrary_headers() -> impl Strategy<Value = std::collections::BTreeMap<String, String>> {
        btree_map("[a-zA-Z][a-zA-Z0-9-]{0,15}", "[ -~]{0,32}", 0..8)
    }

    proptest! {
        /// All six policy headers are present with their exact values after
        /// injection, whatever was there before.
        #[test]
        fn policy_headers_always_present(headers in arbitrary_headers()) {
            let mut event = ViewerEvent::default();
            for (name, value) in &headers {
                event.response.headers.insert(name, value.clone());
            }

            let response = handler(event);
            for header in &SECURITY_HEADERS {
                prop_assert_eq!(
                    response.headers.get(header.name).map(|e| e.value.as_str()),
                    Some(header.value)
                );
            }
        }

        /// Headers that do not collide with the policy survive unchanged,
        /// and the total count is the collision-free count plus six.
        #[test]
        fn unrelated_headers_survive(headers in arbitrary_headers()) {
            let mut event = ViewerEvent::default();
            for (name, value) in &headers {
                event.response.headers.insert(name, value.clone());
            }

            // Replay the same case-folding insert order to know which value
            // wins when generated names collide after lowercasing.
            let mut unrelated = std::collections::BTreeMap::new();
            for (name, value) in &headers {
                unrelated.insert(name.to_ascii_lowercase(), value.clone());
            }
            unrelated.retain(|name, _| !SECURITY_HEADERS.iter().any(|h| h.name == name));

            let response = handler(event);
            for (name, value) in &unrelated {
                prop_assert_eq!(
                    response.headers.get(name).map(|e| e.value.as_str()),
                    Some(value.as_str())
                );
            }
            prop_assert_eq!(response.headers.len(), unrelated.len() + 6);
        }

        /// Injecting twice is indistinguishable from injecting once.
        #[test]
        fn injection_idempotent(headers in arbitrary_headers()) {
            let mut event = ViewerEvent::default();
            for (name, value) in &headers {
                event.response.headers.insert(name, value.clone());
            }

            let mut response = handler(event);
            let once = response.clone();
            inject(&mut response);
            prop_assert_eq!(response, once);
        }
    }
}
