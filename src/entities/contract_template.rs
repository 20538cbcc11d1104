//! Contract template entity - a reusable bundle of payment rules.
//!
//! A template owns zero-or-more rules of each kind and can be assigned to any
//! number of contracts. Templates are referenced, never deleted while contracts
//! point at them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable template name (e.g., "Тренер", "Администратор")
    #[sea_orm(unique)]
    pub name: String,
    /// Inactive templates are kept for existing contracts but not offered for new ones
    pub is_active: bool,
}

/// Defines relationships between `ContractTemplate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template is referenced by many contracts
    #[sea_orm(has_many = "super::contract::Entity")]
    Contracts,
    /// Fixed recurring charges
    #[sea_orm(has_many = "super::rate::Entity")]
    Rates,
    /// Named, priced expectations against the accrual stream
    #[sea_orm(has_many = "super::amount_of_accrual::Entity")]
    AmountOfAccruals,
    /// Percentage of the sale stream (at most one per template)
    #[sea_orm(has_many = "super::percentage_of_sales::Entity")]
    PercentageOfSales,
    /// Per-hour rate against the schedule stream (at most one per template)
    #[sea_orm(has_many = "super::hourly_payment::Entity")]
    HourlyPayments,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::rate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rates.def()
    }
}

impl Related<super::amount_of_accrual::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AmountOfAccruals.def()
    }
}

impl Related<super::percentage_of_sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PercentageOfSales.def()
    }
}

impl Related<super::hourly_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HourlyPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
