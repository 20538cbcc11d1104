//! Bulk certificate generation and recalculation for a reporting period.
//!
//! The rollover action creates one certificate per active contract for a
//! period such as "last calendar month". Contracts are processed sequentially
//! and a failure validating one candidate never prevents the others from being
//! created - the caller gets an aggregate report with per-contract outcomes.

use crate::{
    entities::{Contract, contract, salary_certificate},
    errors::{Error, FieldErrors, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{Condition, QueryOrder, prelude::*};

/// A closed reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// First day of the period
    pub start: NaiveDate,
    /// Last day of the period
    pub end: NaiveDate,
}

/// Outcome of one contract in a bulk generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The contract the candidate certificate was built for
    pub contract_id: i64,
    /// The contract's document number, for reporting
    pub contract_number: i32,
    /// The created certificate, or the validation errors that rejected it
    pub result: std::result::Result<salary_certificate::Model, FieldErrors>,
}

/// Aggregate report of a bulk generation run.
#[derive(Debug, Clone, Default)]
pub struct PeriodGenerationReport {
    /// Per-contract outcomes in processing order
    pub outcomes: Vec<GenerationOutcome>,
}

impl PeriodGenerationReport {
    /// Ids of the certificates that were created.
    #[must_use]
    pub fn created_ids(&self) -> Vec<i64> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().map(|c| c.id))
            .collect()
    }

    /// Number of certificates created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of contracts rejected by validation.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}

/// Result of a bulk recalculation run.
#[derive(Debug, Clone, Default)]
pub struct RecalculationReport {
    /// Document numbers of the certificates that were recalculated
    pub recalculated: Vec<i32>,
    /// Document numbers skipped by the lock gate, with the reason
    pub skipped: Vec<(i32, String)>,
}

/// Creates certificates for every contract active over `period`.
///
/// Candidate windows run from `max(contract.start_date, period.start)` to
/// `period.end` and go through the period validator before insertion. A
/// contract whose existing certificate already covers the period is reported
/// with validation errors, not silently duplicated.
pub async fn generate_for_period(
    db: &DatabaseConnection,
    period: Period,
) -> Result<PeriodGenerationReport> {
    let contracts = Contract::find()
        .filter(
            Condition::any()
                .add(contract::Column::EndDate.gte(period.start))
                .add(contract::Column::EndDate.is_null()),
        )
        .filter(contract::Column::StartDate.lte(period.start))
        .order_by_asc(contract::Column::Number)
        .all(db)
        .await?;

    let mut report = PeriodGenerationReport::default();
    for contract in contracts {
        let start = contract.start_date.max(period.start);
        let outcome =
            match crate::core::certificate::create_certificate(db, contract.id, start, period.end)
                .await
            {
                Ok(certificate) => Ok(certificate),
                Err(Error::Validation { errors }) => {
                    tracing::warn!(
                        contract = contract.number,
                        %errors,
                        "skipping contract: candidate period failed validation"
                    );
                    Err(errors)
                }
                Err(other) => return Err(other),
            };
        report.outcomes.push(GenerationOutcome {
            contract_id: contract.id,
            contract_number: contract.number,
            result: outcome,
        });
    }

    Ok(report)
}

/// Recalculates a batch of certificates, skipping locked ones.
///
/// A lock error is recorded per certificate and the batch continues; any other
/// error aborts the run.
pub async fn recalculate_all(
    db: &DatabaseConnection,
    certificate_ids: &[i64],
) -> Result<RecalculationReport> {
    let mut report = RecalculationReport::default();
    for &id in certificate_ids {
        let certificate = crate::core::certificate::get_certificate_by_id(db, id)
            .await?
            .ok_or(Error::CertificateNotFound { id })?;
        match crate::core::calculate::calculate(db, id).await {
            Ok(_) => report.recalculated.push(certificate.number),
            Err(error) if error.is_lock_error() => {
                tracing::warn!(certificate = certificate.number, %error, "skipping locked certificate");
                report.skipped.push((certificate.number, error.to_string()));
            }
            Err(error) => return Err(error),
        }
    }
    Ok(report)
}

/// The calendar month before the one containing `today`.
pub fn previous_month(today: NaiveDate) -> Period {
    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    // Both dates are always representable; the fallbacks never trigger
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(today);
    Period { start, end }
}
