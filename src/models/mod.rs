//! Resource objects and value types for the MailRoster API.
//!
//! This module contains the typed domain model: contacts, address books,
//! consent payloads, data-field coercion, and the bulk-import state machine.

pub mod address_book;
pub mod consent;
pub mod contact;
pub mod contact_import;
pub mod data_field;
pub mod subscription;

pub use address_book::{AddressBook, AddressBookRecord};
pub use consent::{ConsentFields, RequestContext};
pub use contact::{Contact, ContactRecord, NewContact};
pub use contact_import::{ContactImport, ImportRow, STATUS_NOT_FINISHED, STATUS_NOT_STARTED};
pub use data_field::{DataFieldDefinition, DataFieldEntry, DataFieldMap, DataFieldValue};
pub use subscription::{EmailType, OptInType, SUBSCRIBED_STATUS};
