//! Salary certificate entity - one invoice document for one contract over one
//! non-overlapping period.
//!
//! `is_blocked` and `original_signed` are independent flags; either one closes
//! the certificate to recalculation and to manual line edits. Certificate
//! numbers are a simple monotonically increasing counter and are never reused.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Salary certificate database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salary_certificates")]
pub struct Model {
    /// Unique identifier for the certificate
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique sequential document number
    #[sea_orm(unique)]
    pub number: i32,
    /// Contract this certificate settles a period of
    pub contract_id: i64,
    /// First day of the reporting period
    pub start_date: Date,
    /// Last day of the reporting period
    pub end_date: Date,
    /// Day the document row was created
    pub date_of_creation: Date,
    /// The signed paper original has been received; the document is final
    pub original_signed: bool,
    /// Operator-toggled edit lock (reversible)
    pub is_blocked: bool,
}

/// Defines relationships between `SalaryCertificate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each certificate belongs to one contract
    #[sea_orm(
        belongs_to = "super::contract::Entity",
        from = "Column::ContractId",
        to = "super::contract::Column::Id"
    )]
    Contract,
    /// One certificate has many line items
    #[sea_orm(has_many = "super::field::Entity")]
    Fields,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fields.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
