//! Logical request canonicalization.
//!
//! A logical request is reduced to a canonical, order-independent form whose
//! JSON serialization is byte-identical for semantically equal requests, no
//! matter how the flags were supplied. That serialization is the sole input
//! to cache key derivation.

use crate::error::{Error, ErrorContext};
use crate::types::message::CanonicalMessage;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Flag-level request fields as the surrounding CLI collects them.
///
/// Numeric fields arrive unparsed; [`canonicalize`] validates them before
/// any store is touched. `stream` is carried for the transport's benefit and
/// never reaches the canonical form: a streamed and a non-streamed call of
/// the same logical request hash identically.
#[derive(Debug, Clone, Default)]
pub struct RawRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: Option<&'a str>,
    pub temperature: &'a str,
    /// Comma-separated stop sequences, e.g. `"###, END"`.
    pub stop: Option<&'a str>,
    pub max_tokens: Option<&'a str>,
    pub stream: bool,
}

/// Canonical representation of a logical request.
///
/// Field order is fixed by declaration order and optional fields are omitted
/// when absent, so equal requests always serialize to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRequest {
    pub model: String,
    /// System message first iff non-empty, then the user prompt.
    pub messages: Vec<CanonicalMessage>,
    pub temperature: f64,
    /// Trimmed, deduplicated, sorted stop sequences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CanonicalRequest {
    /// The canonical serialization: the byte sequence that gets hashed.
    pub fn canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// First user message, if any. Drives listing previews.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == crate::types::message::Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Normalize a flag-level request into its canonical form.
///
/// Fails fast with a [`Error::Validation`] on a non-numeric temperature or a
/// non-integer token limit; no store is consulted before validation passes.
pub fn canonicalize(raw: &RawRequest<'_>) -> Result<CanonicalRequest> {
    let temperature: f64 = raw.temperature.trim().parse().map_err(|_| {
        Error::validation_with_context(
            format!("temperature must be a decimal number, got {:?}", raw.temperature),
            ErrorContext::new()
                .with_field_path("request.temperature")
                .with_source("canonicalizer"),
        )
    })?;
    if !temperature.is_finite() {
        return Err(Error::validation_with_context(
            format!("temperature must be finite, got {:?}", raw.temperature),
            ErrorContext::new()
                .with_field_path("request.temperature")
                .with_source("canonicalizer"),
        ));
    }

    let max_tokens = match raw.max_tokens.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => Some(value.parse::<u32>().map_err(|_| {
            Error::validation_with_context(
                format!("max-tokens must be a non-negative integer, got {:?}", value),
                ErrorContext::new()
                    .with_field_path("request.max_tokens")
                    .with_source("canonicalizer"),
            )
        })?),
        None => None,
    };

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = raw.system.map(str::trim).filter(|s| !s.is_empty()) {
        messages.push(CanonicalMessage::system(system));
    }
    messages.push(CanonicalMessage::user(raw.prompt));

    Ok(CanonicalRequest {
        model: raw.model.trim().to_string(),
        messages,
        temperature,
        stop: parse_stop(raw.stop),
        max_tokens,
    })
}

/// Stop sequences are a set: order and incidental whitespace are not
/// identity, so elements are trimmed, deduplicated, and sorted.
fn parse_stop(raw: Option<&str>) -> Vec<String> {
    let mut stop: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    stop.sort();
    stop.dedup();
    stop
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<'a>() -> RawRequest<'a> {
        RawRequest {
            model: "test-model",
            prompt: "hello",
            temperature: "0.7",
            ..Default::default()
        }
    }

    #[test]
    fn test_non_numeric_temperature_is_rejected() {
        let err = canonicalize(&RawRequest {
            temperature: "warm",
            ..raw()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("request.temperature")
        );
    }

    #[test]
    fn test_non_integer_max_tokens_is_rejected() {
        let err = canonicalize(&RawRequest {
            max_tokens: Some("many"),
            ..raw()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_empty_system_message_is_omitted() {
        let request = canonicalize(&RawRequest {
            system: Some("   "),
            ..raw()
        })
        .unwrap();
        assert_eq!(request.messages.len(), 1);

        let request = canonicalize(&RawRequest {
            system: Some("be terse"),
            ..raw()
        })
        .unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content, "be terse");
    }

    #[test]
    fn test_stop_list_is_trimmed_and_sorted() {
        let request = canonicalize(&RawRequest {
            stop: Some(" b , a ,a,"),
            ..raw()
        })
        .unwrap();
        assert_eq!(request.stop, vec!["a", "b"]);

        let request = canonicalize(&RawRequest {
            stop: Some(""),
            ..raw()
        })
        .unwrap();
        assert!(request.stop.is_empty());
    }

    #[test]
    fn test_canonical_json_omits_absent_fields() {
        let json = canonicalize(&raw()).unwrap().canonical_json().unwrap();
        assert!(!json.contains("stop"));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("stream"));
    }
}
