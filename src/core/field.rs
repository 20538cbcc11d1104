//! Manual line item operations.
//!
//! The lock gate covers these as well as recalculation: a blocked or signed
//! certificate refuses any line change. Automatic lines belong to
//! [`crate::core::calculate::calculate`] and cannot be edited directly.

use crate::{
    entities::{Field, field},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Adds a manual line item to an unlocked certificate.
///
/// A manual line may share its name with an automatic one, but not with
/// another manual line on the same certificate.
pub async fn add_manual_field(
    db: &DatabaseConnection,
    certificate_id: i64,
    name: String,
    price: f64,
    count: f64,
    unit: String,
) -> Result<field::Model> {
    let certificate =
        crate::core::certificate::ensure_certificate_unlocked(db, certificate_id).await?;

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Field name cannot be empty".to_string(),
        });
    }

    let existing = Field::find()
        .filter(field::Column::SalaryCertificateId.eq(certificate.id))
        .filter(field::Column::Name.eq(name.as_str()))
        .filter(field::Column::IsAuto.eq(false))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateField { name });
    }

    field::ActiveModel {
        salary_certificate_id: Set(certificate.id),
        name: Set(name),
        price: Set(price),
        count: Set(count),
        unit: Set(unit),
        is_auto: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Deletes a manual line item from an unlocked certificate.
pub async fn delete_manual_field(db: &DatabaseConnection, field_id: i64) -> Result<()> {
    let field = Field::find_by_id(field_id)
        .one(db)
        .await?
        .ok_or(Error::FieldNotFound { id: field_id })?;

    if field.is_auto {
        return Err(Error::AutomaticFieldEdit { id: field_id });
    }

    crate::core::certificate::ensure_certificate_unlocked(db, field.salary_certificate_id).await?;

    field.delete(db).await?;
    Ok(())
}
