//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use crate::format::format_currency;

use super::calculators::PriceBreakdown;

/// One line of an itemized estimate
#[derive(Debug, Clone, Serialize)]
pub struct LineItemResponse {
    pub label: String,
    /// Whole dollars
    pub amount: i64,
}

/// Itemized estimate for the quote form's live preview
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub line_items: Vec<LineItemResponse>,
    /// Whole dollars
    pub total: i64,
    /// Cents, as persisted on a submitted quote
    pub total_cents: i64,
    /// Display string, e.g. "$1,795.00"
    pub total_display: String,
}

impl From<PriceBreakdown> for EstimateResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            total: breakdown.total,
            total_cents: breakdown.total_cents(),
            total_display: format_currency(breakdown.total_cents()),
            line_items: breakdown
                .line_items
                .into_iter()
                .map(|item| LineItemResponse {
                    label: item.label,
                    amount: item.amount,
                })
                .collect(),
        }
    }
}
