//! Asynchronous bulk contact import, driven to completion by client polling.
//!
//! An import starts out with no id, gains one when the service accepts the
//! CSV submission, and is finished once its reported status leaves the
//! `NotFinished` sentinel. The service does the actual work; callers choose
//! their own poll cadence and timeout policy.

use crate::account::Account;
use crate::csv;
use crate::error::{ApiError, Error, Result};
use serde::Deserialize;

/// Status reported for an import that has not been submitted yet.
pub const STATUS_NOT_STARTED: &str = "NotStarted";

/// Sentinel status for an import the service is still processing.
pub const STATUS_NOT_FINISHED: &str = "NotFinished";

/// Fixed email column of the import CSV.
const EMAIL_COLUMN: &str = "Email";

/// One contact row of an import payload: an email address plus data-field
/// values keyed by catalogue name.
#[derive(Debug, Clone)]
pub struct ImportRow {
    pub email: String,
    pub data_fields: Vec<(String, String)>,
}

impl ImportRow {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            data_fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data_fields.push((key.into(), value.into()));
        self
    }
}

/// Wire form of the import status resource.
#[derive(Debug, Deserialize)]
struct ImportStatusRecord {
    id: String,
    status: String,
}

/// A bulk contact import job.
pub struct ContactImport {
    account: Account,
    contacts: Vec<ImportRow>,
    id: Option<String>,
}

impl ContactImport {
    /// Build an import with pending contact rows, not yet submitted.
    pub fn new(account: Account, contacts: Vec<ImportRow>) -> Self {
        Self {
            account,
            contacts,
            id: None,
        }
    }

    /// Construct and immediately start an import. Start errors propagate.
    pub fn import(account: Account, contacts: Vec<ImportRow>) -> Result<ContactImport> {
        let mut import = Self::new(account, contacts);
        import.start()?;
        Ok(import)
    }

    /// The server-assigned id, set once [`start`](ContactImport::start)
    /// succeeds.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Submit the import via `POST /contacts/import`.
    ///
    /// Every data-field key across all rows must exist in the account's
    /// catalogue; the first unrecognized key fails the whole submission with
    /// [`Error::UnknownDataField`] and nothing is sent.
    pub fn start(&mut self) -> Result<()> {
        for row in &self.contacts {
            for (key, _) in &row.data_fields {
                if !self.account.has_data_field(key) {
                    return Err(Error::UnknownDataField(key.clone()));
                }
            }
        }

        let body = self.contacts_csv();
        let response = self.account.client().post_csv("/contacts/import", &body)?;

        let record: ImportStatusRecord =
            serde_json::from_value(response).map_err(ApiError::Json)?;

        tracing::info!(
            "import {} accepted with status {}",
            record.id,
            record.status
        );
        self.id = Some(record.id);
        Ok(())
    }

    /// Current status of the import.
    ///
    /// Returns the literal `NotStarted` without any network call while no id
    /// has been assigned; otherwise asks `GET /contacts/import/{id}`.
    pub fn status(&self) -> Result<String> {
        let id = match &self.id {
            None => return Ok(STATUS_NOT_STARTED.to_string()),
            Some(id) => id,
        };

        let response = self
            .account
            .client()
            .get(&format!("/contacts/import/{}", id))?;
        let record: ImportStatusRecord =
            serde_json::from_value(response).map_err(ApiError::Json)?;
        Ok(record.status)
    }

    /// Whether the import has reached a terminal status.
    ///
    /// Defined as the status differing from the `NotFinished` sentinel, so a
    /// never-started import (status `NotStarted`) also reports finished.
    pub fn is_finished(&self) -> Result<bool> {
        Ok(self.status()? != STATUS_NOT_FINISHED)
    }

    /// Fetch the fault report for a finished import, verbatim, via
    /// `GET /contacts/import/{id}/report-faults`.
    ///
    /// Fails with [`Error::ImportNotFinished`] while the service is still
    /// processing.
    pub fn errors(&self) -> Result<String> {
        if !self.is_finished()? {
            return Err(Error::ImportNotFinished);
        }

        let id = self.id.as_deref().ok_or(Error::MissingAttribute("id"))?;
        let report = self
            .account
            .client()
            .get_csv(&format!("/contacts/import/{}/report-faults", id))?;
        Ok(report)
    }

    /// Serialize the pending rows to CSV: the fixed `Email` column first,
    /// then data-field columns in first-seen order, blanks for absent values.
    fn contacts_csv(&self) -> String {
        let mut columns: Vec<String> = vec![EMAIL_COLUMN.to_string()];
        for row in &self.contacts {
            for (key, _) in &row.data_fields {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows: Vec<Vec<String>> = self
            .contacts
            .iter()
            .map(|row| {
                let mut cells = vec![row.email.clone()];
                for column in &columns[1..] {
                    let value = row
                        .data_fields
                        .iter()
                        .find(|(key, _)| key == column)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default();
                    cells.push(value);
                }
                cells
            })
            .collect();

        csv::document(&columns, &rows)
    }
}
