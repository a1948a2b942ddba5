//! Address book resource: lookup, save, delete, and contact association.

use crate::account::Account;
use crate::error::{ApiError, Error, Result};
use crate::models::contact::Contact;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire attributes of an address book.
///
/// The service's `contacts` attribute is a count, not a collection; it is
/// surfaced here as `contact_count` to keep the name honest.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressBookRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(rename = "contacts")]
    pub contact_count: u64,
}

/// An address book in the MailRoster service.
#[derive(Clone)]
pub struct AddressBook {
    account: Account,
    record: AddressBookRecord,
}

impl AddressBook {
    /// Build an address book from already-deserialized wire attributes.
    pub fn from_record(account: Account, record: AddressBookRecord) -> Self {
        Self { account, record }
    }

    /// Look an address book up by id. A 404 yields `Ok(None)`.
    pub fn find_by_id(account: &Account, id: i64) -> Result<Option<AddressBook>> {
        match account.client().get(&format!("/address-books/{}", id)) {
            Ok(response) => {
                let record: AddressBookRecord =
                    serde_json::from_value(response).map_err(ApiError::Json)?;
                Ok(Some(Self::from_record(account.clone(), record)))
            }
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.name = name.into();
    }

    pub fn visibility(&self) -> Option<&str> {
        self.record.visibility.as_deref()
    }

    /// Number of contacts in this book (the service reports a count only).
    pub fn contact_count(&self) -> u64 {
        self.record.contact_count
    }

    /// Persist the address book via `PUT /address-books/{id}` with the full
    /// attribute set.
    pub fn save(&self) -> Result<()> {
        let id = self.record.id.ok_or(Error::MissingAttribute("id"))?;
        let body: Value = serde_json::to_value(&self.record).map_err(ApiError::Json)?;
        self.account
            .client()
            .put_json(&format!("/address-books/{}", id), &body)?;
        Ok(())
    }

    /// Remove the address book via `DELETE /address-books/{id}`.
    pub fn delete(&self) -> Result<()> {
        let id = self.record.id.ok_or(Error::MissingAttribute("id"))?;
        self.account
            .client()
            .delete(&format!("/address-books/{}", id))?;
        Ok(())
    }

    /// Associate a contact with this book via
    /// `POST /address-books/{id}/contacts`. The payload is the contact's
    /// minimal representation (email only); association is one-way.
    pub fn add_contact(&self, contact: &Contact) -> Result<()> {
        let id = self.record.id.ok_or(Error::MissingAttribute("id"))?;
        self.account.client().post_json(
            &format!("/address-books/{}/contacts", id),
            &contact.to_minimal_json(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;

    fn account() -> Account {
        let client = ApiClient::with_base_url(
            "https://api.example.com".to_string(),
            "test-key".to_string(),
        );
        Account::with_data_fields(client, Vec::new())
    }

    #[test]
    fn test_record_maps_contacts_to_contact_count() {
        let record: AddressBookRecord = serde_json::from_str(
            r#"{"id":123,"name":"Main list","visibility":"Private","contacts":42}"#,
        )
        .unwrap();

        let book = AddressBook::from_record(account(), record);
        assert_eq!(book.id(), Some(123));
        assert_eq!(book.name(), "Main list");
        assert_eq!(book.visibility(), Some("Private"));
        assert_eq!(book.contact_count(), 42);
    }

    #[test]
    fn test_record_serializes_count_under_wire_name() {
        let record = AddressBookRecord {
            id: Some(1),
            name: "Main list".to_string(),
            visibility: Some("Public".to_string()),
            contact_count: 7,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json.get("contacts").and_then(Value::as_u64), Some(7));
        assert!(json.get("contactCount").is_none());
    }

    #[test]
    fn test_save_without_id_fails_locally() {
        let book = AddressBook::from_record(account(), AddressBookRecord::default());
        match book.save() {
            Err(Error::MissingAttribute(key)) => assert_eq!(key, "id"),
            _ => panic!("Expected MissingAttribute(id)"),
        }
    }
}
