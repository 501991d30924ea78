use tokio::sync::oneshot;

use crate::error::RequestError;
use crate::request::Request;

/// One queued request record: the request itself plus the private one-shot
/// reply channel of the handle that submitted it.
pub(crate) struct QueuedRequest {
    pub(crate) request: Request,
    pub(crate) reply: oneshot::Sender<Result<Vec<u8>, RequestError>>,
}

impl QueuedRequest {
    /// Deliver the outcome. The receiver may be gone if the submitting caller
    /// gave up; the reply is discarded in that case.
    pub(crate) fn complete(self, result: Result<Vec<u8>, RequestError>) {
        let _ = self.reply.send(result);
    }
}
