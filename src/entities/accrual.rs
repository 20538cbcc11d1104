//! Accrual entity - one row of the piecework charge stream.
//!
//! Rows are imported from the booking system and are read-only to the engine.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Accrual database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accruals")]
pub struct Model {
    /// Unique identifier for the row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee the charge was accrued to
    pub employee_id: i64,
    /// Day the charge was accrued
    pub date: Date,
    /// Charge name, when present
    pub name: Option<String>,
    /// Charge base (e.g., the booked service), when present
    pub base: Option<String>,
    /// Per-row charge amount
    pub sum: f64,
}

impl Model {
    /// The named key rows are grouped by: `name` and `base` joined with a
    /// space, skipping whichever is absent.
    #[must_use]
    pub fn derived_name(&self) -> String {
        [self.name.as_deref(), self.base.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Defines relationships between Accrual and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each row belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
