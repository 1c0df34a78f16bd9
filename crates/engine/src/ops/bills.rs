//! Bill listing: filter composition, ordering and offset pagination.

use chrono::{DateTime, Utc};
use sea_orm::{
    ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
};

use crate::{Bill, OrderDirection, OrderField, ResultEngine, bills, finances};

use super::{Engine, with_tx};

/// A validated listing request.
///
/// `before` and `after` are inclusive bounds on the publication timestamp.
/// `start` is the row offset of the first bill on the page; successive pages
/// advance it by the number of bills actually returned, because ordering may
/// be by non-identifier fields where a last-id cursor would not hold a stable
/// position.
#[derive(Clone, Debug)]
pub struct BillQuery {
    pub field: OrderField,
    pub direction: OrderDirection,
    pub start: u64,
    pub before: Option<DateTime<Utc>>,
    pub after: Option<DateTime<Utc>>,
    pub committee: Option<String>,
}

trait ApplyBillFilters: QueryFilter + Sized {
    fn apply_bill_filters(self, query: &BillQuery) -> Self;
}

impl<T> ApplyBillFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_bill_filters(mut self, query: &BillQuery) -> Self {
        if let Some(before) = query.before {
            self = self.filter(bills::Column::Published.lte(before));
        }
        if let Some(after) = query.after {
            self = self.filter(bills::Column::Published.gte(after));
        }
        if let Some(committee) = &query.committee {
            self = self.filter(bills::Column::Committee.eq(committee.clone()));
        }
        self
    }
}

impl Engine {
    /// Returns one page of bills plus whether further pages exist.
    ///
    /// A single parameterized query fetches `page_size + 1` row ids in the
    /// requested order; the extra row is only a sentinel for the second tuple
    /// element and is never returned. No tie-break key is applied when the
    /// ordering field has duplicate values, so ties have no guaranteed
    /// relative order across repeated requests.
    pub async fn bills_page(
        &self,
        query: &BillQuery,
        page_size: u64,
    ) -> ResultEngine<(Vec<Bill>, bool)> {
        with_tx!(self, |db_tx| {
            let limit_plus_one = page_size.saturating_add(1);
            let ids: Vec<i32> = bills::Entity::find()
                .select_only()
                .column(bills::Column::Id)
                .apply_bill_filters(query)
                .order_by(query.field.order_expr(), query.direction.into())
                .offset(query.start)
                .limit(limit_plus_one)
                .into_tuple()
                .all(&db_tx)
                .await?;

            let has_more = ids.len() as u64 > page_size;

            let mut out: Vec<Bill> = Vec::with_capacity(ids.len().min(page_size as usize));
            for id in ids.into_iter().take(page_size as usize) {
                match bill_with_finances(&db_tx, id).await? {
                    Some(bill) => out.push(bill),
                    // Deleted between the id query and hydration; the page
                    // just omits it.
                    None => tracing::warn!("bill {id} disappeared during hydration"),
                }
            }

            Ok((out, has_more))
        })
    }
}

async fn bill_with_finances<C>(db: &C, id: i32) -> ResultEngine<Option<Bill>>
where
    C: ConnectionTrait,
{
    let mut rows = bills::Entity::find_by_id(id)
        .find_with_related(finances::Entity)
        .all(db)
        .await?;

    Ok(rows
        .pop()
        .map(|(model, finances)| Bill::from_models(model, finances)))
}
