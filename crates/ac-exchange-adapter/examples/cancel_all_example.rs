/*
[INPUT]:  AC_* environment variables (or a config file path as first argument)
[OUTPUT]: Accounts listing and the ids of every cancelled order
[POS]:    Examples - authenticated client usage
[UPDATE]: When the client surface or configuration keys change
*/

use std::path::PathBuf;

use ac_exchange_adapter::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Example: list accounts, then cancel every open order on one product.
///
/// Requires AC_API_URI, AC_KEY, AC_SECRET and AC_PASSPHRASE.
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ExchangeConfig::load(config_path.as_deref())?;
    info!(api_uri = %config.api_uri, "loaded configuration");

    let client = AuthenticatedClient::from_config(&config)?;

    for account in client.get_accounts().await? {
        info!(currency = %account.currency, available = %account.available, "account");
    }

    match client
        .cancel_all_orders(&OrderFilter::product("BTC-USD"))
        .await
    {
        Ok(ids) => info!(count = ids.len(), ?ids, "cancelled open orders"),
        Err(e) => {
            error!("bulk cancel failed: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}
