/*
[INPUT]:  Withdrawal parameters (amount, currency, crypto_address)
[OUTPUT]: Withdrawal confirmation
[POS]:    HTTP layer - funds movement endpoints
[UPDATE]: When adding deposit/withdrawal endpoints
*/

use serde::Serialize;

use crate::http::client::{AuthenticatedClient, RequestOptions};
use crate::http::transport::Transport;
use crate::http::Result;
use crate::types::Withdrawal;
use crate::validation::{to_params, validate_withdraw_crypto};

impl<T: Transport> AuthenticatedClient<T> {
    /// Withdraw to a crypto address
    ///
    /// POST /withdrawals/crypto
    pub async fn withdraw_crypto<P: Serialize + ?Sized>(&self, params: &P) -> Result<Withdrawal> {
        let params = to_params(params)?;
        validate_withdraw_crypto(&params)?;

        let options = RequestOptions::new().with_body(&params)?;
        self.post(&["withdrawals", "crypto"], options).await?.json()
    }
}
