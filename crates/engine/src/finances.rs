//! Financial projection entries. Each entry is owned by exactly one bill.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One projected cost/savings figure for a bill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: i32,
    /// Duration of the projection, in years.
    pub timespan: i32,
    /// Signed amount in currency units; the sign distinguishes cost from
    /// savings.
    pub amount: f64,
}

impl From<Model> for FinancialEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            timespan: model.timespan,
            amount: model.amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "finances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bill_id: i32,
    pub timespan: i32,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bills::Entity",
        from = "Column::BillId",
        to = "super::bills::Column::Id"
    )]
    Bills,
}

impl Related<super::bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
