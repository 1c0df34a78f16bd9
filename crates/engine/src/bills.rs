//! Bill records and the typed ordering vocabulary used to list them.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{IntoSimpleExpr, Order, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, FinancialEntry, finances};

/// The field a listing is ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Date,
    Committee,
    Cost,
}

impl OrderField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Committee => "committee",
            Self::Cost => "cost",
        }
    }

    /// The ORDER BY expression backing this field.
    ///
    /// `Cost` is a correlated aggregate over a bill's finance entries, not a
    /// stored column; replacing it with a materialized value only touches
    /// this match arm.
    pub(crate) fn order_expr(self) -> SimpleExpr {
        match self {
            Self::Date => Column::Published.into_simple_expr(),
            Self::Committee => Column::Committee.into_simple_expr(),
            Self::Cost => Expr::cust(
                "(SELECT COALESCE(SUM(amount), 0) FROM finances \
                 WHERE finances.bill_id = bills.id)",
            ),
        }
    }
}

impl TryFrom<&str> for OrderField {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "date" => Ok(Self::Date),
            "committee" => Ok(Self::Committee),
            "cost" => Ok(Self::Cost),
            _ => Err(EngineError::InvalidParameter(
                "order must order by date, committee or cost".to_string(),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl TryFrom<&str> for OrderDirection {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(EngineError::InvalidParameter(
                "order must order as asc or desc".to_string(),
            )),
        }
    }
}

impl From<OrderDirection> for Order {
    fn from(direction: OrderDirection) -> Self {
        match direction {
            OrderDirection::Asc => Order::Asc,
            OrderDirection::Desc => Order::Desc,
        }
    }
}

/// A legislative bill together with its financial projections.
///
/// Bills are read-only here; rows are written by the external refresh job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub code: String,
    pub committee: String,
    pub published: DateTime<Utc>,
    pub cbo_url: String,
    pub pdf_url: String,
    /// Order among entries is not significant.
    pub finances: Vec<FinancialEntry>,
}

impl Bill {
    pub(crate) fn from_models(model: Model, finances: Vec<finances::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            summary: model.summary,
            code: model.code,
            committee: model.committee,
            published: model.published,
            cbo_url: model.cbo_url,
            pdf_url: model.pdf_url,
            finances: finances.into_iter().map(FinancialEntry::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub code: String,
    pub committee: String,
    pub published: DateTimeUtc,
    pub cbo_url: String,
    pub pdf_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::finances::Entity")]
    Finances,
}

impl Related<super::finances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Finances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
