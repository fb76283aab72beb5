/*
[INPUT]:  Order parameters, order ids and order/fill filters
[OUTPUT]: Placed orders, cancelled order ids, order and fill listings
[POS]:    HTTP layer - order endpoints, including the bulk cancel loop
[UPDATE]: When adding order endpoints or changing cancel semantics
*/

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::http::client::{AuthenticatedClient, RequestOptions};
use crate::http::transport::Transport;
use crate::http::{ExchangeError, Result};
use crate::types::{CancelledOrders, Fill, FillFilter, Order, OrderFilter, Side};
use crate::validation::{to_params, validate_order};

impl<T: Transport> AuthenticatedClient<T> {
    /// Place an order
    ///
    /// POST /orders
    /// Requires `side` and `product_id`, plus `price` and `size` unless the
    /// type is `market` or `stop`, in which case `size` or `funds`.
    pub async fn place_order<P: Serialize + ?Sized>(&self, params: &P) -> Result<Order> {
        let params = to_params(params)?;
        validate_order(&params)?;

        let options = RequestOptions::new().with_body(&params)?;
        self.post(&["orders"], options).await?.json()
    }

    /// Place a buy order, overriding any `side` in `params`
    pub async fn buy<P: Serialize + ?Sized>(&self, params: &P) -> Result<Order> {
        self.place_with_side(params, Side::Buy).await
    }

    /// Place a sell order, overriding any `side` in `params`
    pub async fn sell<P: Serialize + ?Sized>(&self, params: &P) -> Result<Order> {
        self.place_with_side(params, Side::Sell).await
    }

    async fn place_with_side<P: Serialize + ?Sized>(&self, params: &P, side: Side) -> Result<Order> {
        let mut params = to_params(params)?;
        params.insert("side".to_string(), side.as_str().into());
        self.place_order(&params).await
    }

    /// Cancel a single order
    ///
    /// DELETE /orders/{order_id}
    pub async fn cancel_order(&self, order_id: &str) -> Result<Vec<String>> {
        let order_id = require_order_id(order_id, "cancel_all_orders")?;
        let response = self.delete(&["orders", order_id], RequestOptions::new()).await?;
        Ok(response.json::<CancelledOrders>()?.into_ids())
    }

    /// Issue one unfiltered bulk delete and return that single page of ids
    ///
    /// DELETE /orders
    pub async fn cancel_orders(&self) -> Result<Vec<String>> {
        let response = self.delete(&["orders"], RequestOptions::new()).await?;
        cancelled_page(response.data)
    }

    /// Cancel every open order matching `filter`.
    ///
    /// Repeats DELETE /orders with the same filter until the exchange answers
    /// with an empty page, collecting ids in the order they were reported.
    /// Any failure aborts the loop and the ids gathered so far are dropped.
    /// Termination depends on the exchange eventually returning an empty page.
    pub async fn cancel_all_orders(&self, filter: &OrderFilter) -> Result<Vec<String>> {
        let options = RequestOptions::new().with_query(filter)?;
        let mut cancelled = Vec::new();
        let mut page = 0usize;

        loop {
            page += 1;
            let outcome = self
                .delete(&["orders"], options.clone())
                .await
                .and_then(|response| cancelled_page(response.data));
            let ids = match outcome {
                Ok(ids) => ids,
                Err(source) => {
                    warn!(page, cancelled = cancelled.len(), error = %source, "bulk cancel aborted");
                    return Err(ExchangeError::BulkCancelAborted {
                        page,
                        source: Box::new(source),
                    });
                }
            };
            debug!(page, count = ids.len(), "bulk cancel page");
            if ids.is_empty() {
                info!(pages = page, cancelled = cancelled.len(), "bulk cancel complete");
                return Ok(cancelled);
            }
            cancelled.extend(ids);
        }
    }

    /// List orders
    ///
    /// GET /orders?product_id=&status=&before=&after=&limit=
    pub async fn get_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let options = RequestOptions::new().with_query(filter)?;
        self.get(&["orders"], options).await?.json()
    }

    /// Get a single order
    ///
    /// GET /orders/{order_id}
    pub async fn get_order(&self, order_id: &str) -> Result<Order> {
        let order_id = require_order_id(order_id, "get_orders")?;
        self.get(&["orders", order_id], RequestOptions::new()).await?.json()
    }

    /// List fills
    ///
    /// GET /fills?order_id=&product_id=&before=&after=&limit=
    pub async fn get_fills(&self, filter: &FillFilter) -> Result<Vec<Fill>> {
        let options = RequestOptions::new().with_query(filter)?;
        self.get(&["fills"], options).await?.json()
    }
}

/// Blank ids are rejected; anything else is sent exactly as given
fn require_order_id<'a>(order_id: &'a str, alternative: &str) -> Result<&'a str> {
    if order_id.trim().is_empty() {
        return Err(ExchangeError::validation(format!(
            "must provide an orderID or consider {alternative}"
        )));
    }
    Ok(order_id)
}

/// An empty body counts as an empty page
fn cancelled_page(data: serde_json::Value) -> Result<Vec<String>> {
    let page: Option<CancelledOrders> = serde_json::from_value(data)?;
    Ok(page.map(CancelledOrders::into_ids).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_order_id() {
        assert_eq!(require_order_id(" o-1 ", "x").unwrap(), " o-1 ");
        assert!(require_order_id(" \t", "x").is_err());
        let err = require_order_id("", "cancel_all_orders").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("cancel_all_orders"));
    }

    #[test]
    fn test_cancelled_page_shapes() {
        assert!(cancelled_page(serde_json::Value::Null).unwrap().is_empty());
        assert!(cancelled_page(json!([])).unwrap().is_empty());
        assert_eq!(cancelled_page(json!(["a", "b"])).unwrap(), vec!["a", "b"]);
        assert!(cancelled_page(json!({ "unexpected": true })).is_err());
    }
}
