//! Account handle: a transport plus the custom data-field catalogue.
//!
//! Resource objects never talk to the transport directly; they go through an
//! [`Account`], which also owns the ordered list of data-field definitions
//! used to interpret and author contact data fields.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::data_field::DataFieldDefinition;
use serde::Deserialize;
use std::sync::Arc;

/// Wire form of a data-field definition from `GET /data-fields`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataFieldRecord {
    name: String,
    #[serde(rename = "type", default)]
    field_type: String,
}

impl From<DataFieldRecord> for DataFieldDefinition {
    fn from(record: DataFieldRecord) -> Self {
        DataFieldDefinition {
            is_date: record.field_type == "Date",
            name: record.name,
        }
    }
}

/// An authenticated account against the MailRoster API.
///
/// Cloning is cheap; the catalogue is shared behind an `Arc`. One account is
/// expected per API credential set, living for the session.
#[derive(Clone)]
pub struct Account {
    client: ApiClient,
    data_fields: Arc<Vec<DataFieldDefinition>>,
}

impl Account {
    /// Build an account with an explicitly supplied field catalogue.
    pub fn with_data_fields(client: ApiClient, data_fields: Vec<DataFieldDefinition>) -> Self {
        Self {
            client,
            data_fields: Arc::new(data_fields),
        }
    }

    /// Build an account by fetching the field catalogue from the service.
    pub fn load(client: ApiClient) -> Result<Self> {
        let response = client.get("/data-fields")?;
        let records: Vec<DataFieldRecord> =
            serde_json::from_value(response).map_err(crate::error::ApiError::Json)?;

        tracing::debug!("loaded {} data-field definitions", records.len());

        let data_fields = records.into_iter().map(DataFieldDefinition::from).collect();
        Ok(Self::with_data_fields(client, data_fields))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The ordered data-field catalogue for this account.
    pub fn data_fields(&self) -> &[DataFieldDefinition] {
        &self.data_fields
    }

    pub fn has_data_field(&self, name: &str) -> bool {
        self.data_fields.iter().any(|field| field.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_field_record_conversion() {
        let record: DataFieldRecord =
            serde_json::from_str(r#"{"name":"SIGNUPDATE","type":"Date"}"#).unwrap();
        let definition = DataFieldDefinition::from(record);
        assert_eq!(definition.name, "SIGNUPDATE");
        assert!(definition.is_date);

        let record: DataFieldRecord =
            serde_json::from_str(r#"{"name":"FIRSTNAME","type":"String"}"#).unwrap();
        assert!(!DataFieldDefinition::from(record).is_date);
    }

    #[test]
    fn test_has_data_field() {
        let client = ApiClient::with_base_url(
            "https://api.example.com".to_string(),
            "test-key".to_string(),
        );
        let account = Account::with_data_fields(
            client,
            vec![DataFieldDefinition::text("FIRSTNAME")],
        );

        assert!(account.has_data_field("FIRSTNAME"));
        assert!(!account.has_data_field("LASTNAME"));
    }
}
