//! Field entity - one priced line item on a salary certificate.
//!
//! Automatic fields are system-derived and recreated on every recalculation;
//! manual fields are operator-added and survive recalculation. A manual and an
//! automatic line may share a name on the same certificate, but not two
//! automatic lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fields")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Certificate this line belongs to
    pub salary_certificate_id: i64,
    /// Service name shown on the document
    pub name: String,
    /// Per-unit price
    pub price: f64,
    /// Quantity; fractional for hours
    pub count: f64,
    /// Unit label (`"шт."` for pieces, `"ч."` for hours)
    pub unit: String,
    /// System-generated (true) vs. manually added (false)
    pub is_auto: bool,
}

impl Model {
    /// Line total, derived at read time.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * self.count
    }
}

/// Defines relationships between Field and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one certificate
    #[sea_orm(
        belongs_to = "super::salary_certificate::Entity",
        from = "Column::SalaryCertificateId",
        to = "super::salary_certificate::Column::Id"
    )]
    SalaryCertificate,
}

impl Related<super::salary_certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalaryCertificate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
