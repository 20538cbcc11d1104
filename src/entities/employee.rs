//! Employee entity - the contractor a contract binds to.
//!
//! Employees are created and validated outside the engine; the engine only needs
//! them as the key for contracts and the raw event streams.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Family name
    pub surname: Option<String>,
    /// Given name
    pub name: String,
    /// Patronymic, when present
    pub patronymic: Option<String>,
    /// Inactive employees are kept for history but get no new contracts
    pub is_active: bool,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many contracts
    #[sea_orm(has_many = "super::contract::Entity")]
    Contracts,
    /// One employee has many accrual rows
    #[sea_orm(has_many = "super::accrual::Entity")]
    Accruals,
    /// One employee has many sale rows
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
    /// One employee has many schedule rows
    #[sea_orm(has_many = "super::schedule::Entity")]
    Schedules,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::accrual::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accruals.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
