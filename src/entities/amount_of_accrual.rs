//! Amount-of-accrual rule entity - a named, priced expectation against the
//! accrual stream.
//!
//! `required_field` is matched against the derived name of observed accrual
//! groups. An expectation that stays unobserved over a period still produces a
//! zero-quantity line, so the certificate shows the complete template of
//! expected charge categories. Unique per (template, `required_field`) -
//! enforced by the management layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Amount-of-accrual rule database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "amount_of_accruals")]
pub struct Model {
    /// Unique identifier for the rule
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning contract template
    pub template_id: i64,
    /// Accrual group name this rule expects to observe
    pub required_field: String,
    /// Expected per-unit price for the group
    pub value: f64,
}

/// Defines relationships between `AmountOfAccrual` and other entities
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
