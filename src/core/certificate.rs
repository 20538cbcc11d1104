//! Salary certificate lifecycle - creation, numbering, lock flags, line items,
//! and totals.
//!
//! Creation always runs the period validator first, so no overlapping or
//! out-of-window certificate ever reaches the database. Document numbers are
//! assigned as `max(existing) + 1` and never reused, even when certificates are
//! deleted.

use crate::{
    core::calculate::ensure_unlocked,
    entities::{Field, SalaryCertificate, field, salary_certificate},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Creates a certificate for a contract period after validating it.
///
/// The candidate window must lie within the contract's active window and must
/// not overlap (touching included) any other certificate of the same contract.
pub async fn create_certificate(
    db: &DatabaseConnection,
    contract_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<salary_certificate::Model> {
    crate::core::period::validate_period(db, contract_id, start_date, end_date, None).await?;

    let txn = db.begin().await?;
    let number = next_certificate_number(&txn).await?;
    let certificate = salary_certificate::ActiveModel {
        number: Set(number),
        contract_id: Set(contract_id),
        start_date: Set(start_date),
        end_date: Set(end_date),
        date_of_creation: Set(Utc::now().date_naive()),
        original_signed: Set(false),
        is_blocked: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    Ok(certificate)
}

/// Next document number: one past the current maximum, starting at 1.
pub async fn next_certificate_number<C>(db: &C) -> Result<i32>
where
    C: ConnectionTrait,
{
    let last = SalaryCertificate::find()
        .order_by_desc(salary_certificate::Column::Number)
        .one(db)
        .await?;
    Ok(last.map_or(1, |certificate| certificate.number + 1))
}

/// Finds a certificate by its unique ID.
pub async fn get_certificate_by_id(
    db: &DatabaseConnection,
    certificate_id: i64,
) -> Result<Option<salary_certificate::Model>> {
    SalaryCertificate::find_by_id(certificate_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All certificates of one contract, earliest period first.
pub async fn get_certificates_for_contract(
    db: &DatabaseConnection,
    contract_id: i64,
) -> Result<Vec<salary_certificate::Model>> {
    SalaryCertificate::find()
        .filter(salary_certificate::Column::ContractId.eq(contract_id))
        .order_by_asc(salary_certificate::Column::StartDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Toggles the operator edit lock. Reversible.
pub async fn set_blocked(
    db: &DatabaseConnection,
    certificate_id: i64,
    blocked: bool,
) -> Result<salary_certificate::Model> {
    let certificate = SalaryCertificate::find_by_id(certificate_id)
        .one(db)
        .await?
        .ok_or(Error::CertificateNotFound { id: certificate_id })?;

    let mut active: salary_certificate::ActiveModel = certificate.into();
    active.is_blocked = Set(blocked);
    active.update(db).await.map_err(Into::into)
}

/// Marks whether the signed paper original has been received.
pub async fn set_signed(
    db: &DatabaseConnection,
    certificate_id: i64,
    signed: bool,
) -> Result<salary_certificate::Model> {
    let certificate = SalaryCertificate::find_by_id(certificate_id)
        .one(db)
        .await?
        .ok_or(Error::CertificateNotFound { id: certificate_id })?;

    let mut active: salary_certificate::ActiveModel = certificate.into();
    active.original_signed = Set(signed);
    active.update(db).await.map_err(Into::into)
}

/// All line items of a certificate in render order: automatic lines first,
/// then manual closing rows, id-ascending within each group.
pub async fn get_line_items(
    db: &DatabaseConnection,
    certificate_id: i64,
) -> Result<Vec<field::Model>> {
    Field::find()
        .filter(field::Column::SalaryCertificateId.eq(certificate_id))
        .order_by_desc(field::Column::IsAuto)
        .order_by_asc(field::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Certificate total: Σ price × count over all line items, automatic and
/// manual. Recomputed at read time, never cached.
pub async fn get_total(db: &DatabaseConnection, certificate_id: i64) -> Result<f64> {
    let items = get_line_items(db, certificate_id).await?;
    Ok(items.iter().map(field::Model::line_total).sum())
}

/// Lock-gate check used by manual field operations.
pub(crate) async fn ensure_certificate_unlocked(
    db: &DatabaseConnection,
    certificate_id: i64,
) -> Result<salary_certificate::Model> {
    let certificate = SalaryCertificate::find_by_id(certificate_id)
        .one(db)
        .await?
        .ok_or(Error::CertificateNotFound { id: certificate_id })?;
    ensure_unlocked(&certificate)?;
    Ok(certificate)
}
