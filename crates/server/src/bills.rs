//! GET /bills: parameter validation, listing and next-page URL assembly.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use api_types::bill::{BillListResponse, BillView, FinancialEntryView};
use engine::{Bill, BillQuery, OrderDirection, OrderField};

use crate::{ServerError, server::ServerState};

/// Raw query parameters, validated by hand so each rejection carries the
/// contract's reason string.
#[derive(Debug, Default, Deserialize)]
pub struct RawListParams {
    pub order: Option<String>,
    pub start: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub committee: Option<String>,
}

/// The order parameter packs field and direction into one value:
/// `<field> <dir>` (a `+` in the URL decodes to the space).
fn parse_order(raw: &str) -> Result<(OrderField, OrderDirection), ServerError> {
    let mut parts = raw.split(' ');
    let (Some(field), Some(direction), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ServerError::InvalidParameter(
            "order parameter is malformed".to_string(),
        ));
    };

    Ok((
        OrderField::try_from(field)?,
        OrderDirection::try_from(direction)?,
    ))
}

fn force_int(value: &str, reason: &str) -> Result<i64, ServerError> {
    value
        .parse()
        .map_err(|_| ServerError::InvalidParameter(reason.to_string()))
}

fn force_timestamp(value: &str, reason: &str) -> Result<DateTime<Utc>, ServerError> {
    let seconds = force_int(value, reason)?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| ServerError::InvalidParameter(reason.to_string()))
}

/// Validates every parameter before any query runs.
fn validate(params: &RawListParams) -> Result<BillQuery, ServerError> {
    let Some(order) = params.order.as_deref() else {
        return Err(ServerError::InvalidParameter(
            "order parameter is required".to_string(),
        ));
    };
    let (field, direction) = parse_order(order)?;

    let start = match params.start.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|_| ServerError::InvalidParameter("Starting row must be an integer".to_string()))?,
        None => 0,
    };

    let before = params
        .before
        .as_deref()
        .map(|raw| force_timestamp(raw, "Before must be a Unix timestamp"))
        .transpose()?;
    let after = params
        .after
        .as_deref()
        .map(|raw| force_timestamp(raw, "After must be a Unix timestamp"))
        .transpose()?;

    Ok(BillQuery {
        field,
        direction,
        start,
        before,
        after,
        committee: params.committee.clone(),
    })
}

/// The next-page URL carries every present filter forward unchanged and
/// advances `start` by the number of bills actually returned. Offset
/// accumulation, not last-id continuation: committee and cost orderings give
/// a last id no stable meaning across pages.
fn next_page_url(params: &RawListParams, query: &BillQuery, returned: usize) -> String {
    let order = format!("{} {}", query.field.as_str(), query.direction.as_str());
    let mut pairs = vec![format!("order={}", urlencoding::encode(&order))];

    if let Some(before) = params.before.as_deref() {
        pairs.push(format!("before={before}"));
    }
    if let Some(after) = params.after.as_deref() {
        pairs.push(format!("after={after}"));
    }
    if let Some(committee) = params.committee.as_deref() {
        pairs.push(format!("committee={}", urlencoding::encode(committee)));
    }
    pairs.push(format!("start={}", query.start + returned as u64));

    format!("/bills?{}", pairs.join("&"))
}

fn bill_view(bill: Bill) -> BillView {
    BillView {
        title: bill.title,
        code: bill.code,
        summary: bill.summary,
        committee: bill.committee,
        published: bill.published.timestamp(),
        cbo_url: bill.cbo_url,
        pdf_url: bill.pdf_url,
        financial: bill
            .finances
            .into_iter()
            .map(|entry| FinancialEntryView {
                timespan: entry.timespan,
                amount: entry.amount,
            })
            .collect(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<RawListParams>,
) -> Result<Json<BillListResponse>, ServerError> {
    let query = validate(&params)?;

    let (bills, has_more) = state.engine.bills_page(&query, state.page_size).await?;

    let next = has_more.then(|| next_page_url(&params, &query, bills.len()));
    let bills = bills.into_iter().map(bill_view).collect();

    Ok(Json(BillListResponse { bills, next }))
}
