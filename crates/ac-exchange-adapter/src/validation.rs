/*
[INPUT]:  Request parameters serialized to a JSON object
[OUTPUT]: Ok or a local Validation error naming the offending field
[POS]:    Validation layer - required-field policies checked before any request
[UPDATE]: When an endpoint's required-field policy changes
*/

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::{ExchangeError, Result};

/// Request parameters as sent on the wire
pub type Params = Map<String, Value>;

/// Order types that do not need an explicit price and size
pub const SIZE_EXEMPT_ORDER_TYPES: &[&str] = &["market", "stop"];

const ORDER_FIELDS: &[&str] = &["side", "product_id"];
const SIZED_ORDER_FIELDS: &[&str] = &["price", "size"];
const WITHDRAW_CRYPTO_FIELDS: &[&str] = &["amount", "currency", "crypto_address"];
const REPORT_FIELDS: &[&str] = &["type", "start_date", "end_date"];

/// Extra report fields keyed by report type
const REPORT_TYPE_FIELDS: &[(&str, &str)] = &[("fills", "product_id"), ("account", "account_id")];

/// Serialize parameters into a JSON object
pub fn to_params<P: Serialize + ?Sized>(params: &P) -> Result<Params> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        other => Err(ExchangeError::validation(format!(
            "parameters must be an object, got {other}"
        ))),
    }
}

/// A field is present unless it is missing or null. Zero and `false` count.
pub fn is_present(params: &Params, field: &str) -> bool {
    params.get(field).is_some_and(|value| !value.is_null())
}

pub fn require_params(params: &Params, required: &[&str]) -> Result<()> {
    match required.iter().find(|field| !is_present(params, field)) {
        Some(field) => Err(ExchangeError::validation(format!(
            "`params` must include param `{field}`"
        ))),
        None => Ok(()),
    }
}

fn str_field<'a>(params: &'a Params, field: &str) -> Option<&'a str> {
    params.get(field).and_then(Value::as_str)
}

/// Whether an order of this shape needs `price` and `size`
pub fn order_needs_size(params: &Params) -> bool {
    !str_field(params, "type").is_some_and(|ty| SIZE_EXEMPT_ORDER_TYPES.contains(&ty))
}

pub fn validate_order(params: &Params) -> Result<()> {
    require_params(params, ORDER_FIELDS)?;

    let needs_size = order_needs_size(params);
    if needs_size {
        require_params(params, SIZED_ORDER_FIELDS)?;
    } else if !is_present(params, "size") && !is_present(params, "funds") {
        return Err(ExchangeError::validation(
            "`params` must include either `size` or `funds`",
        ));
    }

    match str_field(params, "side") {
        Some("buy") | Some("sell") => Ok(()),
        _ => Err(ExchangeError::validation("`side` must be `buy` or `sell`")),
    }
}

pub fn validate_withdraw_crypto(params: &Params) -> Result<()> {
    require_params(params, WITHDRAW_CRYPTO_FIELDS)
}

pub fn validate_report(params: &Params) -> Result<()> {
    require_params(params, REPORT_FIELDS)?;

    let report_type = str_field(params, "type");
    for (ty, field) in REPORT_TYPE_FIELDS {
        if report_type == Some(*ty) {
            require_params(params, &[*field])?;
        }
    }
    Ok(())
}
