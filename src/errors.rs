//! Unified error types for the payment calculation engine.
//!
//! Nothing in this crate is fatal to the process: every failure is scoped to one
//! certificate and reported to the caller. Period validation failures carry
//! field-keyed messages so the operator sees exactly which date is wrong, and the
//! lock errors are distinguishable so bulk operations can skip a locked
//! certificate and continue with the rest of the batch.

use std::fmt;
use thiserror::Error;

/// Which part of a candidate certificate a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodField {
    /// The candidate period start date
    StartDate,
    /// The candidate period end date
    EndDate,
}

impl fmt::Display for PeriodField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
        };
        write!(f, "{name}")
    }
}

/// Accumulated field-level validation messages for a candidate certificate period.
///
/// Checks accumulate rather than short-circuit, so a single validation pass can
/// report problems on both dates at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Field-keyed messages in the order the checks ran
    pub errors: Vec<(PeriodField, String)>,
}

impl FieldErrors {
    /// Records one message against a field.
    pub fn push(&mut self, field: PeriodField, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// True when no check failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All messages recorded against one field.
    #[must_use]
    pub fn messages_for(&self, field: PeriodField) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Period validation failed with one or more field-keyed messages
    #[error("Validation failed: {errors}")]
    Validation {
        /// The accumulated field-level messages
        errors: FieldErrors,
    },

    /// The certificate is blocked for edits by an operator
    #[error("Certificate #{number} is locked for edits")]
    CertificateBlocked {
        /// Document number of the locked certificate
        number: i32,
    },

    /// The signed original of the certificate has been received
    #[error("Certificate #{number}: the original is already signed")]
    CertificateSigned {
        /// Document number of the signed certificate
        number: i32,
    },

    /// No contract with the given id exists
    #[error("Contract not found: {id}")]
    ContractNotFound {
        /// The missing contract id
        id: i64,
    },

    /// No salary certificate with the given id exists
    #[error("Salary certificate not found: {id}")]
    CertificateNotFound {
        /// The missing certificate id
        id: i64,
    },

    /// No line item with the given id exists
    #[error("Field not found: {id}")]
    FieldNotFound {
        /// The missing field id
        id: i64,
    },

    /// A manual line with this name already exists on the certificate
    #[error("A manual field named \"{name}\" already exists on this certificate")]
    DuplicateField {
        /// The conflicting line item name
        name: String,
    },

    /// The line item is system-derived and owned by recalculation
    #[error("Field {id} is maintained automatically and cannot be edited directly")]
    AutomaticFieldEdit {
        /// Id of the automatic line item
        id: i64,
    },

    /// Configuration loading or parsing error
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// True for the errors the lock gate raises. Bulk operations use this to
    /// skip a locked certificate and continue with the remaining batch.
    #[must_use]
    pub const fn is_lock_error(&self) -> bool {
        matches!(
            self,
            Self::CertificateBlocked { .. } | Self::CertificateSigned { .. }
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
