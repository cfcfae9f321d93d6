//! Origin-response hook in the Lambda@Edge event shape.
//!
//! Same policy, different envelope: the event carries a `Records` array and
//! header maps hold *lists* of `{key, value}` records, where `key` preserves
//! the canonical header casing. The hook operates on the first record's
//! `cf.response` and hands it back.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{EventError, SECURITY_HEADERS};

/// One `{key, value}` header record. `key` carries the canonical-case name
/// and is optional on input; the map key remains the lowercase wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

/// Case-insensitive multi-value header map in the origin-response shape:
/// lowercase name to a list of [`OriginHeader`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MultiHeaderBag(BTreeMap<String, Vec<OriginHeader>>);

impl MultiHeaderBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry list for `name` with a single canonical record.
    pub fn set(&mut self, name: &str, key: &str, value: &str) {
        self.0.insert(
            name.to_ascii_lowercase(),
            vec![OriginHeader {
                key: Some(key.to_string()),
                value: value.to_string(),
            }],
        );
    }

    /// Append a record to the entry list for `name`.
    pub fn append(&mut self, name: &str, header: OriginHeader) {
        self.0
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(header);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[OriginHeader]> {
        self.0.get(&name.to_ascii_lowercase()).map(Vec::as_slice)
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

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OriginHeader])> {
        self.0
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }
}

impl<'de> Deserialize<'de> for MultiHeaderBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Vec<OriginHeader>>::deserialize(deserializer)?;
        let mut normalized = BTreeMap::new();
        for (name, records) in raw {
            normalized.insert(name.to_ascii_lowercase(), records);
        }
        Ok(Self(normalized))
    }
}

/// The in-flight response carried by an origin event record. `status`,
/// `statusDescription` and anything else the runtime attaches are preserved
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginResponse {
    pub headers: MultiHeaderBag,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `cf` payload of an origin event record. Only `response` is
/// interpreted; `config`, `request` and the rest round-trip in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginCf {
    pub response: OriginResponse,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record of an origin event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginRecord {
    pub cf: OriginCf,
}

/// The Lambda@Edge event envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginEvent {
    #[serde(rename = "Records")]
    pub records: Vec<OriginRecord>,
}

impl OriginEvent {
    /// Parse an origin-response event document.
    ///
    /// # Errors
    /// Returns [`EventError::Malformed`] if the document is not valid JSON
    /// or a record lacks the `cf.response.headers` path.
    pub fn from_json(input: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Overwrite (or insert) the six fixed security headers on `response` as
/// single-record lists carrying canonical-case keys; every other header
/// list is untouched.
pub fn inject(response: &mut OriginResponse) {
    for header in &SECURITY_HEADERS {
        response.headers.set(header.name, header.key, header.value);
    }
}

/// The origin-response hook: take the first record's response, inject the
/// policy in place, and hand that same response back.
///
/// # Errors
/// Returns [`EventError::NoRecords`] if the `Records` array is empty.
pub fn handler(event: OriginEvent) -> Result<OriginResponse, EventError> {
    let record = event
        .records
        .into_iter()
        .next()
        .ok_or(EventError::NoRecords)?;
    let mut response = record.cf.response;
    inject(&mut response);
    Ok(response)
}
