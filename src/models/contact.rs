//! Contact resource: identity, subscription state, data-field access, CRUD.

use crate::account::Account;
use crate::error::{ApiError, Error, Result};
use crate::models::data_field::{self, DataFieldEntry, DataFieldMap, DataFieldValue};
use crate::models::subscription::{EmailType, OptInType, SUBSCRIBED_STATUS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Wire attributes of a contact, as the API sends and receives them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_in_type: Option<OptInType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_type: Option<EmailType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_fields: Vec<DataFieldEntry>,
}

/// Attributes for creating a contact. All three are required; they are
/// optional here so that a missing one can be reported by name before any
/// network call is made.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub email: Option<String>,
    pub opt_in_type: Option<OptInType>,
    pub email_type: Option<EmailType>,
}

impl NewContact {
    pub fn new(email: impl Into<String>, opt_in_type: OptInType, email_type: EmailType) -> Self {
        Self {
            email: Some(email.into()),
            opt_in_type: Some(opt_in_type),
            email_type: Some(email_type),
        }
    }

    /// Fail fast with the name of the first missing required attribute.
    fn validate(&self) -> Result<(String, OptInType, EmailType)> {
        let email = self.email.clone().ok_or(Error::MissingAttribute("email"))?;
        let opt_in_type = self.opt_in_type.ok_or(Error::MissingAttribute("opt_in_type"))?;
        let email_type = self.email_type.ok_or(Error::MissingAttribute("email_type"))?;
        Ok((email, opt_in_type, email_type))
    }
}

/// Request payload for `POST /contacts`, also nested under `contact` by the
/// with-consent variant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateContactRequest {
    email: String,
    opt_in_type: OptInType,
    email_type: EmailType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    data_fields: Vec<DataFieldEntry>,
}

impl CreateContactRequest {
    fn build(attributes: &NewContact, data_fields: &DataFieldMap) -> Result<Self> {
        let (email, opt_in_type, email_type) = attributes.validate()?;
        Ok(Self {
            email,
            opt_in_type,
            email_type,
            data_fields: data_field::encode(data_fields),
        })
    }
}

/// A contact in the MailRoster service.
///
/// The flat data-field mapping is derived once, at construction, from the
/// wire `dataFields` list and the account's field catalogue; mutations go
/// through the flat mapping and are re-encoded to wire form on [`update`].
///
/// Nothing is auto-synced: after mutating a contact, call
/// [`update`](Contact::update) explicitly.
#[derive(Clone)]
pub struct Contact {
    account: Account,
    record: ContactRecord,
    data_fields: DataFieldMap,
}

impl Contact {
    /// Build a contact from already-deserialized wire attributes.
    pub fn from_record(account: Account, record: ContactRecord) -> Self {
        let data_fields = data_field::decode(&record.data_fields, account.data_fields());
        Self {
            account,
            record,
            data_fields,
        }
    }

    fn from_response(account: Account, response: Value) -> Result<Self> {
        let record: ContactRecord =
            serde_json::from_value(response).map_err(ApiError::Json)?;
        Ok(Self::from_record(account, record))
    }

    /// Create a contact via `POST /contacts`.
    ///
    /// `email`, `opt_in_type` and `email_type` are all required; a missing one
    /// fails with [`Error::MissingAttribute`] before anything is sent. Data
    /// fields are shipped in wire form, and only when non-empty.
    pub fn create(
        account: &Account,
        attributes: &NewContact,
        data_fields: &DataFieldMap,
    ) -> Result<Contact> {
        let request = CreateContactRequest::build(attributes, data_fields)?;
        let body = serde_json::to_value(&request).map_err(ApiError::Json)?;

        let response = account.client().post_json("/contacts", &body)?;
        Self::from_response(account.clone(), response)
    }

    /// Create a contact with recorded consent via `POST /contacts/with-consent`.
    ///
    /// The response envelope nests the contact under a `contact` key; the
    /// returned object is built from that nested value, not the envelope.
    pub fn create_with_consent(
        account: &Account,
        attributes: &NewContact,
        data_fields: &DataFieldMap,
        consent: &crate::models::consent::ConsentFields,
    ) -> Result<Contact> {
        let request = CreateContactRequest::build(attributes, data_fields)?;
        let body = json!({
            "contact": serde_json::to_value(&request).map_err(ApiError::Json)?,
            "consentFields": consent.to_wire(),
        });

        let response = account.client().post_json("/contacts/with-consent", &body)?;
        let contact = response
            .get("contact")
            .cloned()
            .ok_or_else(|| ApiError::Http("Missing contact in API response".to_string()))?;

        Self::from_response(account.clone(), contact)
    }

    /// Look a contact up by email. A 404 from the service means the contact
    /// does not exist and yields `Ok(None)`.
    pub fn find_by_email(account: &Account, email: &str) -> Result<Option<Contact>> {
        let path = format!("/contacts/{}", urlencoding::encode(email));

        match account.client().get(&path) {
            Ok(response) => Ok(Some(Self::from_response(account.clone(), response)?)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Look a contact up by id.
    ///
    /// The API makes no distinction between finding by email or id, so this
    /// delegates to [`find_by_email`](Contact::find_by_email) with the id as
    /// the lookup key.
    pub fn find_by_id(account: &Account, id: i64) -> Result<Option<Contact>> {
        Self::find_by_email(account, &id.to_string())
    }

    /// List every contact modified since the given time, in response order.
    pub fn modified_since(account: &Account, time: DateTime<Utc>) -> Result<Vec<Contact>> {
        let path = format!(
            "/contacts/modified-since/{}",
            data_field::to_xml_schema(&time)
        );
        let response = account.client().get(&path)?;

        let records: Vec<ContactRecord> =
            serde_json::from_value(response).map_err(ApiError::Json)?;

        Ok(records
            .into_iter()
            .map(|record| Self::from_record(account.clone(), record))
            .collect())
    }

    pub fn id(&self) -> Option<i64> {
        self.record.id
    }

    pub fn email(&self) -> &str {
        &self.record.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.record.email = email.into();
    }

    pub fn opt_in_type(&self) -> Option<OptInType> {
        self.record.opt_in_type
    }

    /// Assign the opt-in type from its wire string. Values the service does
    /// not recognize fail with [`Error::UnknownOptInType`].
    pub fn set_opt_in_type(&mut self, value: &str) -> Result<()> {
        self.record.opt_in_type = Some(value.parse()?);
        Ok(())
    }

    pub fn email_type(&self) -> Option<EmailType> {
        self.record.email_type
    }

    pub fn set_email_type(&mut self, email_type: EmailType) {
        self.record.email_type = Some(email_type);
    }

    pub fn status(&self) -> Option<&str> {
        self.record.status.as_deref()
    }

    /// The flat data-field mapping for this contact.
    pub fn data_fields(&self) -> &DataFieldMap {
        &self.data_fields
    }

    /// Read a data-field value by name, e.g. `contact.data_field("FIRSTNAME")`.
    pub fn data_field(&self, key: &str) -> Result<&DataFieldValue> {
        self.data_fields
            .get(key)
            .ok_or_else(|| Error::UnknownDataField(key.to_string()))
    }

    /// Assign a data-field value by name. The key must already exist in the
    /// mapping derived from the account's catalogue.
    pub fn set_data_field(&mut self, key: &str, value: DataFieldValue) -> Result<()> {
        if self.data_fields.set(key, value) {
            Ok(())
        } else {
            Err(Error::UnknownDataField(key.to_string()))
        }
    }

    /// Persist the contact via `PUT /contacts/{id}`, sending the full
    /// attribute set with `dataFields` re-encoded from the flat mapping at
    /// call time.
    pub fn update(&self) -> Result<()> {
        let id = self.record.id.ok_or(Error::MissingAttribute("id"))?;

        let mut record = self.record.clone();
        record.data_fields = data_field::encode(&self.data_fields);

        let body = serde_json::to_value(&record).map_err(ApiError::Json)?;
        self.account
            .client()
            .put_json(&format!("/contacts/{}", id), &body)?;
        Ok(())
    }

    /// Remove the contact via `DELETE /contacts/{id}`.
    pub fn delete(&self) -> Result<()> {
        let id = self.record.id.ok_or(Error::MissingAttribute("id"))?;
        self.account.client().delete(&format!("/contacts/{}", id))?;
        Ok(())
    }

    /// Whether this contact is currently subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.record.status.as_deref() == Some(SUBSCRIBED_STATUS)
    }

    /// Resubscribe an unsubscribed contact via `POST /contacts/resubscribe`.
    ///
    /// A no-op returning `Ok(false)` when the contact is already subscribed;
    /// `Ok(true)` once the service accepts the resubscription.
    pub fn resubscribe(&self, return_url: &str) -> Result<bool> {
        if self.is_subscribed() {
            return Ok(false);
        }

        let body = json!({
            "UnsubscribedContact": {
                "id": self.record.id,
                "Email": self.record.email,
            },
            "ReturnUrlToUseIfChallenged": return_url,
        });

        self.account
            .client()
            .post_json("/contacts/resubscribe", &body)?;
        Ok(true)
    }

    /// The minimal representation used when associating this contact with an
    /// address book: the email address only.
    pub(crate) fn to_minimal_json(&self) -> Value {
        json!({ "email": self.record.email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::models::data_field::DataFieldDefinition;

    fn account() -> Account {
        let client = ApiClient::with_base_url(
            "https://api.example.com".to_string(),
            "test-key".to_string(),
        );
        Account::with_data_fields(
            client,
            vec![
                DataFieldDefinition::text("FIRSTNAME"),
                DataFieldDefinition::date("SIGNUPDATE"),
            ],
        )
    }

    fn record_json() -> &'static str {
        r#"{
            "id": 123,
            "email": "john.doe@example.com",
            "optInType": "Double",
            "emailType": "Html",
            "status": "Subscribed",
            "dataFields": [
                { "key": "FIRSTNAME", "value": "John" },
                { "key": "SIGNUPDATE", "value": "2013-03-01T15:30:45Z" }
            ]
        }"#
    }

    #[test]
    fn test_record_wire_names() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        assert_eq!(record.id, Some(123));
        assert_eq!(record.opt_in_type, Some(OptInType::Double));
        assert_eq!(record.email_type, Some(EmailType::Html));
        assert_eq!(record.data_fields.len(), 2);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("optInType").is_some());
        assert!(json.get("emailType").is_some());
        assert!(json.get("dataFields").is_some());
    }

    #[test]
    fn test_from_record_decodes_data_fields() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        let contact = Contact::from_record(account(), record);

        assert_eq!(
            contact.data_field("FIRSTNAME").unwrap().as_text(),
            Some("John")
        );
        assert!(contact.data_field("SIGNUPDATE").unwrap().as_date().is_some());
    }

    #[test]
    fn test_data_field_access_rejects_unknown_keys() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        let mut contact = Contact::from_record(account(), record);

        match contact.data_field("UNKNOWN") {
            Err(Error::UnknownDataField(key)) => assert_eq!(key, "UNKNOWN"),
            _ => panic!("Expected UnknownDataField"),
        }

        match contact.set_data_field("UNKNOWN", "x".into()) {
            Err(Error::UnknownDataField(key)) => assert_eq!(key, "UNKNOWN"),
            _ => panic!("Expected UnknownDataField"),
        }
    }

    #[test]
    fn test_set_data_field_changes_value() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        let mut contact = Contact::from_record(account(), record);

        contact.set_data_field("FIRSTNAME", "Jane".into()).unwrap();
        assert_eq!(
            contact.data_field("FIRSTNAME").unwrap().as_text(),
            Some("Jane")
        );
    }

    #[test]
    fn test_set_opt_in_type_rejects_unrecognized_values() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        let mut contact = Contact::from_record(account(), record);

        match contact.set_opt_in_type("Triple") {
            Err(Error::UnknownOptInType(value)) => assert_eq!(value, "Triple"),
            _ => panic!("Expected UnknownOptInType"),
        }

        contact.set_opt_in_type("Single").unwrap();
        assert_eq!(contact.opt_in_type(), Some(OptInType::Single));
    }

    #[test]
    fn test_is_subscribed() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        let contact = Contact::from_record(account(), record.clone());
        assert!(contact.is_subscribed());

        let mut unsubscribed = record;
        unsubscribed.status = Some("Unsubscribed".to_string());
        let contact = Contact::from_record(account(), unsubscribed);
        assert!(!contact.is_subscribed());
    }

    #[test]
    fn test_new_contact_validation_names_missing_attribute() {
        let missing_email = NewContact {
            email: None,
            opt_in_type: Some(OptInType::Single),
            email_type: Some(EmailType::Html),
        };
        match missing_email.validate() {
            Err(Error::MissingAttribute(key)) => assert_eq!(key, "email"),
            _ => panic!("Expected MissingAttribute(email)"),
        }

        let missing_opt_in = NewContact {
            email: Some("a@b.com".to_string()),
            opt_in_type: None,
            email_type: Some(EmailType::Html),
        };
        match missing_opt_in.validate() {
            Err(Error::MissingAttribute(key)) => assert_eq!(key, "opt_in_type"),
            _ => panic!("Expected MissingAttribute(opt_in_type)"),
        }

        let missing_email_type = NewContact {
            email: Some("a@b.com".to_string()),
            opt_in_type: Some(OptInType::Single),
            email_type: None,
        };
        match missing_email_type.validate() {
            Err(Error::MissingAttribute(key)) => assert_eq!(key, "email_type"),
            _ => panic!("Expected MissingAttribute(email_type)"),
        }
    }

    #[test]
    fn test_create_request_omits_empty_data_fields() {
        let attributes = NewContact::new("a@b.com", OptInType::Single, EmailType::Html);
        let request = CreateContactRequest::build(&attributes, &DataFieldMap::new()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("dataFields").is_none());
    }

    #[test]
    fn test_minimal_json_is_email_only() {
        let record: ContactRecord = serde_json::from_str(record_json()).unwrap();
        let contact = Contact::from_record(account(), record);

        assert_eq!(
            contact.to_minimal_json(),
            json!({ "email": "john.doe@example.com" })
        );
    }
}
