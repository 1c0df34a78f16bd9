use serde::{Deserialize, Serialize};

pub mod bill {
    use super::*;

    /// One projected cost/savings figure for a bill.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct FinancialEntryView {
        /// Duration of the projection, in years.
        pub timespan: i32,
        /// Signed amount in currency units; the sign distinguishes cost from
        /// savings.
        pub amount: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BillView {
        pub title: String,
        pub code: String,
        pub summary: String,
        pub committee: String,
        /// Unix timestamp (seconds), matching the units of the `before` and
        /// `after` filters.
        pub published: i64,
        pub cbo_url: String,
        pub pdf_url: String,
        pub financial: Vec<FinancialEntryView>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BillListResponse {
        pub bills: Vec<BillView>,
        /// URL of the next page, carrying every filter forward with an
        /// advanced `start`; `null` on the last page.
        pub next: Option<String>,
    }
}
