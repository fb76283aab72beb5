/*
[INPUT]:  Account ids
[OUTPUT]: Account balances
[POS]:    HTTP layer - account endpoints (read-only)
[UPDATE]: When adding account endpoints
*/

use crate::http::client::{AuthenticatedClient, RequestOptions};
use crate::http::transport::Transport;
use crate::http::Result;
use crate::types::Account;

impl<T: Transport> AuthenticatedClient<T> {
    /// List trading accounts
    ///
    /// GET /accounts
    pub async fn get_accounts(&self) -> Result<Vec<Account>> {
        self.get(&["accounts"], RequestOptions::new()).await?.json()
    }

    /// Get a single account
    ///
    /// GET /accounts/{account_id}
    pub async fn get_account(&self, account_id: &str) -> Result<Account> {
        self.get(&["accounts", account_id], RequestOptions::new())
            .await?
            .json()
    }
}
