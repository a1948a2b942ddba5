//! MailRoster client - a typed Rust client for the MailRoster contact-management REST API.
//!
//! This library maps the service's HTTP/JSON resources (contacts, address
//! books, bulk imports) onto typed objects, coerces custom data fields
//! between their wire and flat representations, and drives the asynchronous
//! bulk-import job through client-side polling.
//!
//! # Architecture
//!
//! - **models**: Resource objects and value types (contacts, address books,
//!   consent, data fields, imports)
//! - **client**: Synchronous HTTP transport for the API
//! - **account**: Credential handle plus the custom data-field catalogue
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//!
//! Everything is synchronous and single in-flight: each operation blocks
//! until the transport returns or fails, and nothing is retried or cached.

pub mod account;
pub mod client;
pub mod config;
mod csv;
pub mod error;
pub mod models;

pub use account::Account;
pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, ConfigError, Error};
pub use models::{
    AddressBook, ConsentFields, Contact, ContactImport, DataFieldDefinition, DataFieldMap,
    DataFieldValue, EmailType, ImportRow, NewContact, OptInType, RequestContext,
    SUBSCRIBED_STATUS,
};
