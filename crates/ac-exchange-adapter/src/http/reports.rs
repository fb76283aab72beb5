/*
[INPUT]:  Report parameters and report ids
[OUTPUT]: Report jobs and their status
[POS]:    HTTP layer - report endpoints
[UPDATE]: When report types or their required fields change
*/

use serde::Serialize;

use crate::http::client::{AuthenticatedClient, RequestOptions};
use crate::http::transport::Transport;
use crate::http::Result;
use crate::types::Report;
use crate::validation::{to_params, validate_report};

impl<T: Transport> AuthenticatedClient<T> {
    /// Request a report
    ///
    /// POST /reports
    /// `fills` reports need `product_id`, `account` reports need `account_id`.
    pub async fn create_report<P: Serialize + ?Sized>(&self, params: &P) -> Result<Report> {
        let params = to_params(params)?;
        validate_report(&params)?;

        let options = RequestOptions::new().with_body(&params)?;
        self.post(&["reports"], options).await?.json()
    }

    /// Poll a report
    ///
    /// GET /reports/{report_id}
    pub async fn get_report_status(&self, report_id: &str) -> Result<Report> {
        self.get(&["reports", report_id], RequestOptions::new())
            .await?
            .json()
    }
}
