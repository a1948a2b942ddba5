//! Consent audit payload for the create-with-consent contact endpoint.

use crate::models::data_field::to_xml_schema;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default consent text when the caller supplies none.
const DEFAULT_CONSENT_TEXT: &str = "send me more stuff";

/// The request context a consent snapshot is taken from: where the consent
/// was given and by which client.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub url: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// One `{key, value}` pair of the consent payload.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ConsentEntry {
    key: &'static str,
    value: String,
}

/// Wire envelope: the API expects `[{ "fields": [...] }]`.
#[derive(Debug, Serialize)]
pub struct ConsentFieldSet {
    fields: Vec<ConsentEntry>,
}

/// Immutable consent snapshot, captured at the moment consent is recorded.
#[derive(Debug, Clone)]
pub struct ConsentFields {
    text: String,
    consented_at: DateTime<Utc>,
    url: String,
    ip_address: String,
    user_agent: String,
}

impl ConsentFields {
    /// Capture a consent snapshot now. `text` falls back to a fixed default
    /// when not supplied.
    pub fn new(text: Option<&str>, request: &RequestContext) -> Self {
        Self {
            text: text.unwrap_or(DEFAULT_CONSENT_TEXT).to_string(),
            consented_at: Utc::now(),
            url: request.url.clone(),
            ip_address: request.ip_address.clone(),
            user_agent: request.user_agent.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn consented_at(&self) -> DateTime<Utc> {
        self.consented_at
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Serialize to the fixed five-entry wire shape. Field order is part of
    /// the wire contract.
    pub fn to_wire(&self) -> Vec<ConsentFieldSet> {
        vec![ConsentFieldSet {
            fields: vec![
                ConsentEntry {
                    key: "TEXT",
                    value: self.text.clone(),
                },
                ConsentEntry {
                    key: "DATETIMECONSENTED",
                    value: to_xml_schema(&self.consented_at),
                },
                ConsentEntry {
                    key: "URL",
                    value: self.url.clone(),
                },
                ConsentEntry {
                    key: "IPADDRESS",
                    value: self.ip_address.clone(),
                },
                ConsentEntry {
                    key: "USERAGENT",
                    value: self.user_agent.clone(),
                },
            ],
        }]
    }
}
