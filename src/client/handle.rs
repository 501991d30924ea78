use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::client::link::LinkShared;
use crate::client::message::QueuedRequest;
use crate::error::RequestError;
use crate::request::Request;
use crate::types::ConnectionSettings;

/// A caller-facing grant of request-submission rights on a shared link.
///
/// Every handle owns exactly one "open" slot on its link; the link shuts down
/// once all of its handles have been closed. Handles on the same link submit
/// onto one queue and their requests execute one at a time in enqueue order.
/// Dropping an unclosed handle releases its slot as if [`Handle::close`] had
/// been called.
pub struct Handle {
    queue: Option<mpsc::Sender<QueuedRequest>>,
    shared: Arc<LinkShared>,
    settings: ConnectionSettings,
}

impl Handle {
    pub(crate) fn new(
        queue: mpsc::Sender<QueuedRequest>,
        shared: Arc<LinkShared>,
        settings: ConnectionSettings,
    ) -> Self {
        Handle {
            queue: Some(queue),
            shared,
            settings,
        }
    }

    /// Submit a request on the link and await its reply.
    ///
    /// Returns the response payload on success. Fails with
    /// [`RequestError::HandleClosed`] once the handle has been closed; all
    /// other errors are per-request and leave the handle usable.
    pub async fn send(&self, request: &Request) -> Result<Vec<u8>, RequestError> {
        let queue = self.queue.as_ref().ok_or(RequestError::HandleClosed)?;
        let (reply, response) = oneshot::channel();
        queue
            .send(QueuedRequest {
                request: request.clone(),
                reply,
            })
            .await
            .map_err(|_| RequestError::Shutdown)?;
        response.await.map_err(|_| RequestError::Shutdown)?
    }

    /// Release this handle's open slot on the link.
    ///
    /// The first call succeeds; every later call fails with
    /// [`RequestError::HandleAlreadyClosed`]. Closing the last handle shuts
    /// the link down and closes its transport.
    pub fn close(&mut self) -> Result<(), RequestError> {
        if self.queue.take().is_none() {
            return Err(RequestError::HandleAlreadyClosed);
        }
        self.shared.detach();
        Ok(())
    }

    /// The settings the underlying link was opened with.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.queue.take().is_some() {
            self.shared.detach();
        }
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("endpoint", &self.settings.endpoint)
            .field("closed", &self.queue.is_none())
            .finish()
    }
}
