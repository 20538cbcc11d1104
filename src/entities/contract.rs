//! Contract entity - binds one employee to one template for an active date span.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    /// Unique identifier for the contract
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee this contract binds
    pub employee_id: i64,
    /// Template whose rules govern this contract's certificates
    pub template_id: i64,
    /// Unique sequential contract number
    #[sea_orm(unique)]
    pub number: i32,
    /// First day the contract is in force
    pub start_date: Date,
    /// Last day the contract is in force; `None` means open-ended
    pub end_date: Option<Date>,
}

impl Model {
    /// A contract is active on `today` when it is open-ended or has not yet ended.
    #[must_use]
    pub fn is_active(&self, today: Date) -> bool {
        self.end_date.is_none_or(|end| end >= today)
    }
}

/// Defines relationships between Contract and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contract belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// Each contract references one template
    #[sea_orm(
        belongs_to = "super::contract_template::Entity",
        from = "Column::TemplateId",
        to = "super::contract_template::Column::Id"
    )]
    Template,
    /// One contract has many salary certificates (never overlapping in time)
    #[sea_orm(has_many = "super::salary_certificate::Entity")]
    SalaryCertificates,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::contract_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::salary_certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalaryCertificates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
