/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs and query filters
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, ReportFormat, ReportType, SelfTradePrevention, Side, TimeInForce};

/// Order placement parameters.
///
/// Every field is optional so that incomplete requests still serialize and
/// are rejected by validation rather than by the type system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp: Option<SelfTradePrevention>,
}

impl OrderRequest {
    /// Limit order with price and size
    pub fn limit(product_id: impl Into<String>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            side: Some(side),
            product_id: Some(product_id.into()),
            order_type: Some(OrderType::Limit),
            price: Some(price),
            size: Some(size),
            ..Self::default()
        }
    }

    /// Market order spending `funds` of the quote currency
    pub fn market_funds(product_id: impl Into<String>, side: Side, funds: Decimal) -> Self {
        Self {
            side: Some(side),
            product_id: Some(product_id.into()),
            order_type: Some(OrderType::Market),
            funds: Some(funds),
            ..Self::default()
        }
    }

    /// Market order for a fixed `size` of the base currency
    pub fn market_size(product_id: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self {
            side: Some(side),
            product_id: Some(product_id.into()),
            order_type: Some(OrderType::Market),
            size: Some(size),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawCryptoRequest {
    pub amount: Decimal,
    pub currency: String,
    pub crypto_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Query filter for listing and bulk-cancelling orders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub status: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl OrderFilter {
    pub fn product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
