//! Spawns the single outstanding ask request in a background thread.

use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;

use crate::core::client::AskClient;

use super::PendingSubmit;

/// Spawn the request for `query`. The result arrives once on `PendingSubmit::result_rx`.
pub fn spawn_submit(rt: &Arc<Runtime>, client: Arc<AskClient>, query: String) -> PendingSubmit {
    let (result_tx, result_rx) = mpsc::channel();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let result = rt_clone.block_on(client.ask(&query));
        let _ = result_tx.send(result);
    });

    PendingSubmit { result_rx }
}
