/*
[INPUT]:  Any client operation future and a completion handler
[OUTPUT]: Spawned task that hands the result to the handler exactly once
[POS]:    HTTP layer - completion-handler adapter over async operations
[UPDATE]: When changing how results are delivered to callback-style callers
*/

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::http::Result;

/// Drive `future` on the runtime and pass its result to `callback`.
///
/// Failures are consumed by the handler, so nothing is left unobserved.
/// Must be called from within a tokio runtime.
pub fn spawn_with_callback<T, Fut, F>(future: Fut, callback: F) -> JoinHandle<()>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    F: FnOnce(Result<T>) + Send + 'static,
{
    tokio::spawn(async move {
        let result = future.await;
        if let Err(err) = &result {
            debug!(error = %err, "operation failed, delivering error to callback");
        }
        callback(result);
    })
}
