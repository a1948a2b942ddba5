//! Subscription-related enums and status constants.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The status value marking a subscribed contact.
pub const SUBSCRIBED_STATUS: &str = "Subscribed";

/// Consent level for a contact's subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OptInType {
    Single,
    Double,
    VerifiedDouble,
    /// Unrecognized values deserialize here rather than failing the record
    #[serde(other)]
    Unknown,
}

impl OptInType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptInType::Single => "Single",
            OptInType::Double => "Double",
            OptInType::VerifiedDouble => "VerifiedDouble",
            OptInType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OptInType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptInType {
    type Err = Error;

    /// Parse a service opt-in type value. Unlike deserialization, assignment
    /// through a contact must reject values the account does not recognize.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Single" => Ok(OptInType::Single),
            "Double" => Ok(OptInType::Double),
            "VerifiedDouble" => Ok(OptInType::VerifiedDouble),
            "Unknown" => Ok(OptInType::Unknown),
            other => Err(Error::UnknownOptInType(other.to_string())),
        }
    }
}

/// The email format a contact receives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmailType {
    Html,
    PlainText,
}

impl EmailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::Html => "Html",
            EmailType::PlainText => "PlainText",
        }
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_in_type_parse() {
        assert_eq!("Single".parse::<OptInType>().unwrap(), OptInType::Single);
        assert_eq!(
            "VerifiedDouble".parse::<OptInType>().unwrap(),
            OptInType::VerifiedDouble
        );
    }

    #[test]
    fn test_opt_in_type_parse_rejects_unrecognized_values() {
        let err = "Triple".parse::<OptInType>().unwrap_err();
        match err {
            Error::UnknownOptInType(value) => assert_eq!(value, "Triple"),
            other => panic!("Expected UnknownOptInType, got: {:?}", other),
        }
    }

    #[test]
    fn test_opt_in_type_wire_form() {
        let json = serde_json::to_string(&OptInType::VerifiedDouble).unwrap();
        assert_eq!(json, "\"VerifiedDouble\"");

        // Values the enum does not know fall back to Unknown on the way in
        let parsed: OptInType = serde_json::from_str("\"SomethingNew\"").unwrap();
        assert_eq!(parsed, OptInType::Unknown);
    }

    #[test]
    fn test_email_type_wire_form() {
        let json = serde_json::to_string(&EmailType::PlainText).unwrap();
        assert_eq!(json, "\"PlainText\"");

        let parsed: EmailType = serde_json::from_str("\"Html\"").unwrap();
        assert_eq!(parsed, EmailType::Html);
    }
}
