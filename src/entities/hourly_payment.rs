//! Hourly-payment rule entity - at most one per template.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hourly-payment rule database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hourly_payments")]
pub struct Model {
    /// Unique identifier for the rule
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning contract template
    pub template_id: i64,
    /// Line item name this rule emits
    pub name: String,
    /// Rate per worked hour
    pub value: f64,
}

/// Defines relationships between `HourlyPayment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each rule belongs to one contract template
    #[sea_orm(
        belongs_to = "super::contract_template::Entity",
        from = "Column::TemplateId",
        to = "super::contract_template::Column::Id"
    )]
    Template,
}

impl Related<super::contract_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
