use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::message::QueuedRequest;
use crate::packager::Packager;

/// Delay applied before each request on serial links so slow devices are not
/// overrun by back-to-back transactions.
pub(crate) const PRE_SEND_DELAY: Duration = Duration::from_millis(15);

/// The single worker loop of a link. It owns the packager (and therefore the
/// transport) exclusively, executes queued requests one at a time, and
/// answers every record exactly once. Per-request failures are returned to
/// the submitter; only closure of the queue ends the loop.
pub(crate) async fn run(
    mut packager: Packager,
    mut queue: mpsc::Receiver<QueuedRequest>,
    pre_send_delay: Duration,
    endpoint: String,
) {
    tracing::debug!(endpoint = %endpoint, "link worker started");
    while let Some(record) = queue.recv().await {
        if !pre_send_delay.is_zero() {
            tokio::time::sleep(pre_send_delay).await;
        }
        let result = packager.send(&record.request).await;
        if let Err(err) = &result {
            tracing::warn!(endpoint = %endpoint, error = %err, "request failed");
        }
        record.complete(result);
    }
    // dropping the packager closes the transport
    tracing::debug!(endpoint = %endpoint, "link worker shutdown");
}
