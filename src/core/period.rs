//! Certificate period validation.
//!
//! A candidate `(contract, start_date, end_date)` is checked against the
//! contract's active window and against every other certificate of the same
//! contract. Windows are closed intervals and touching endpoints count as
//! overlap: a certificate ending on day D and another starting on day D
//! collide. This is deliberate - no gap allowed, no double-booking.
//!
//! The contract-existence check short-circuits; all other checks accumulate
//! into [`FieldErrors`] so the operator sees every problem at once. Validation
//! runs before any certificate is persisted and before calculation.

use crate::{
    entities::{Contract, SalaryCertificate, salary_certificate},
    errors::{Error, FieldErrors, PeriodField, Result},
};
use chrono::NaiveDate;
use sea_orm::prelude::*;

/// Validates a candidate certificate period for a contract.
///
/// `exclude_id` skips one certificate in the overlap scan; pass the
/// certificate's own id when re-validating an existing record.
///
/// Returns `Err(Error::Validation { .. })` with field-keyed messages when any
/// check fails, and `Err(Error::ContractNotFound { .. })` when the contract
/// does not exist.
pub async fn validate_period(
    db: &DatabaseConnection,
    contract_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude_id: Option<i64>,
) -> Result<()> {
    let contract = Contract::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or(Error::ContractNotFound { id: contract_id })?;

    let mut errors = FieldErrors::default();

    if start_date > end_date {
        errors.push(
            PeriodField::StartDate,
            "period start is after the period end",
        );
    }

    if start_date < contract.start_date {
        errors.push(
            PeriodField::StartDate,
            format!(
                "period start precedes the contract start ({})",
                contract.start_date
            ),
        );
    }

    if let Some(contract_end) = contract.end_date
        && end_date > contract_end
    {
        errors.push(
            PeriodField::EndDate,
            format!("period end exceeds the contract end ({contract_end})"),
        );
    }

    let mut siblings_query = SalaryCertificate::find()
        .filter(salary_certificate::Column::ContractId.eq(contract_id));
    if let Some(id) = exclude_id {
        siblings_query = siblings_query.filter(salary_certificate::Column::Id.ne(id));
    }
    let siblings = siblings_query.all(db).await?;

    // Touching-inclusive: `other.end == start` is an overlap.
    if let Some(other) = siblings
        .iter()
        .find(|other| other.end_date >= start_date && other.start_date <= start_date)
    {
        errors.push(
            PeriodField::StartDate,
            format!(
                "period start falls into certificate #{} ending {}",
                other.number, other.end_date
            ),
        );
    }

    if let Some(other) = siblings
        .iter()
        .find(|other| other.end_date >= end_date && other.start_date <= end_date)
    {
        errors.push(
            PeriodField::EndDate,
            format!(
                "period end falls into certificate #{} starting {}",
                other.number, other.start_date
            ),
        );
    }

    // Neither endpoint falls inside a strictly contained sibling, so it needs
    // its own check. A shared endpoint is already reported above.
    if let Some(other) = siblings
        .iter()
        .find(|other| other.start_date > start_date && other.end_date < end_date)
    {
        let message = format!(
            "period encloses certificate #{} ({} to {})",
            other.number, other.start_date, other.end_date
        );
        errors.push(PeriodField::StartDate, message.clone());
        errors.push(PeriodField::EndDate, message);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { errors })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn expect_validation_errors(result: Result<()>) -> FieldErrors {
        match result {
            Err(Error::Validation { errors }) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_contract_short_circuits() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            validate_period(&db, 999, date(2024, 1, 1), date(2024, 1, 31), None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ContractNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_period_passes() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;

        validate_period(&db, contract.id, date(2024, 1, 1), date(2024, 1, 31), None).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_period_rejected() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;

        let result =
            validate_period(&db, contract.id, date(2024, 2, 1), date(2024, 1, 1), None).await;
        let errors = expect_validation_errors(result);
        assert_eq!(errors.messages_for(PeriodField::StartDate).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_start_before_contract_start_rejected() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;

        // Contract starts 2024-01-01 (test_utils default)
        let result =
            validate_period(&db, contract.id, date(2023, 12, 15), date(2024, 1, 31), None).await;
        let errors = expect_validation_errors(result);
        let messages = errors.messages_for(PeriodField::StartDate);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("2024-01-01"));

        Ok(())
    }

    #[tokio::test]
    async fn test_end_beyond_contract_end_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Иванова").await?;
        let template = create_test_template(&db, "Тренер").await?;
        // Contract active 2024-01-01..2024-06-30
        let contract = create_test_contract(
            &db,
            employee.id,
            template.id,
            1,
            date(2024, 1, 1),
            Some(date(2024, 6, 30)),
        )
        .await?;

        let result =
            validate_period(&db, contract.id, date(2024, 6, 15), date(2024, 7, 15), None).await;
        let errors = expect_validation_errors(result);
        assert!(errors.messages_for(PeriodField::StartDate).is_empty());
        assert_eq!(errors.messages_for(PeriodField::EndDate).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_touching_boundary_is_overlap() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;
        create_test_certificate(&db, contract.id, date(2024, 1, 1), date(2024, 1, 31)).await?;

        // Starting on the existing certificate's last day collides
        let result =
            validate_period(&db, contract.id, date(2024, 1, 31), date(2024, 2, 28), None).await;
        let errors = expect_validation_errors(result);
        let messages = errors.messages_for(PeriodField::StartDate);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("2024-01-31"));

        // The next day is fine
        validate_period(&db, contract.id, date(2024, 2, 1), date(2024, 2, 28), None).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_end_falling_into_existing_window_rejected() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;
        create_test_certificate(&db, contract.id, date(2024, 2, 1), date(2024, 2, 29)).await?;

        let result =
            validate_period(&db, contract.id, date(2024, 1, 1), date(2024, 2, 1), None).await;
        let errors = expect_validation_errors(result);
        assert_eq!(errors.messages_for(PeriodField::EndDate).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_period_enclosing_existing_window_rejected() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;
        create_test_certificate(&db, contract.id, date(2024, 1, 10), date(2024, 1, 20)).await?;

        // Both endpoints sit outside the existing window, which now lies
        // wholly inside the candidate
        let result =
            validate_period(&db, contract.id, date(2024, 1, 1), date(2024, 1, 31), None).await;
        let errors = expect_validation_errors(result);
        let start_messages = errors.messages_for(PeriodField::StartDate);
        assert_eq!(start_messages.len(), 1);
        assert!(start_messages[0].contains("2024-01-10"));
        assert_eq!(errors.messages_for(PeriodField::EndDate).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_exclude_id_allows_revalidating_self() -> Result<()> {
        let (db, _, contract) = setup_with_contract().await?;
        let certificate =
            create_test_certificate(&db, contract.id, date(2024, 1, 1), date(2024, 1, 31)).await?;

        // Without the exclusion the certificate collides with itself
        let result =
            validate_period(&db, contract.id, date(2024, 1, 1), date(2024, 1, 31), None).await;
        assert!(result.is_err());

        validate_period(
            &db,
            contract.id,
            date(2024, 1, 1),
            date(2024, 1, 31),
            Some(certificate.id),
        )
        .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_errors_accumulate() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Иванова").await?;
        let template = create_test_template(&db, "Тренер").await?;
        let contract = create_test_contract(
            &db,
            employee.id,
            template.id,
            1,
            date(2024, 2, 1),
            Some(date(2024, 2, 29)),
        )
        .await?;

        // Start precedes the contract start and end exceeds the contract end
        let result =
            validate_period(&db, contract.id, date(2024, 1, 15), date(2024, 3, 15), None).await;
        let errors = expect_validation_errors(result);
        assert_eq!(errors.messages_for(PeriodField::StartDate).len(), 1);
        assert_eq!(errors.messages_for(PeriodField::EndDate).len(), 1);

        Ok(())
    }
}
