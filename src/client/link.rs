use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, Notify};

use crate::client::handle::Handle;
use crate::client::message::QueuedRequest;
use crate::client::registry::DeleteNotice;
use crate::client::task;
use crate::error::RequestError;
use crate::packager::Packager;
use crate::types::{ConnectionSettings, Mode};

/// Requests that may be queued on a link before handle senders block
const MAX_QUEUED_REQUESTS: usize = 16;

/// The single running instance behind one endpoint: the worker task owning
/// the transport, the shared inbound queue, and the open-handle accounting
/// that decides when the whole thing shuts down.
pub(crate) struct Link {
    settings: ConnectionSettings,
    shared: Arc<LinkShared>,
}

pub(crate) struct LinkShared {
    state: Mutex<LinkState>,
    /// signalled by the last detaching handle
    zero: Notify,
}

struct LinkState {
    /// false once final teardown has begun; no attach may succeed after that
    alive: bool,
    open_handles: usize,
    /// master sender; dropped on teardown so the queue closes once the last
    /// handle clone is gone
    queue: Option<mpsc::Sender<QueuedRequest>>,
}

impl Link {
    /// Connect the transport and start the worker and monitor tasks.
    /// Managed links carry a notice used to delete their registry entry on
    /// shutdown.
    pub(crate) async fn start(
        settings: ConnectionSettings,
        on_shutdown: Option<DeleteNotice>,
    ) -> Result<Link, RequestError> {
        let packager = Packager::connect(&settings).await?;
        Ok(Link::spawn(packager, settings, on_shutdown))
    }

    /// Start the tasks around an already-connected packager.
    pub(crate) fn spawn(
        packager: Packager,
        settings: ConnectionSettings,
        on_shutdown: Option<DeleteNotice>,
    ) -> Link {
        let (queue, inbound) = mpsc::channel(MAX_QUEUED_REQUESTS);
        let pre_send_delay = match settings.mode {
            Mode::Tcp => Duration::ZERO,
            Mode::Rtu | Mode::Ascii => task::PRE_SEND_DELAY,
        };
        tokio::spawn(task::run(
            packager,
            inbound,
            pre_send_delay,
            settings.endpoint.clone(),
        ));

        let shared = Arc::new(LinkShared {
            state: Mutex::new(LinkState {
                alive: true,
                open_handles: 0,
                queue: Some(queue),
            }),
            zero: Notify::new(),
        });
        tokio::spawn(monitor(Arc::clone(&shared), on_shutdown));

        Link { settings, shared }
    }

    pub(crate) fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.shared.lock_state().alive
    }

    pub(crate) fn shared(&self) -> &Arc<LinkShared> {
        &self.shared
    }

    /// Register one more open handle and hand out a sender onto the shared
    /// queue. Returns `None` if the link has already begun final teardown;
    /// the caller must then start a fresh link instead.
    pub(crate) fn attach(&self) -> Option<Handle> {
        let mut state = self.shared.lock_state();
        let queue = match (state.alive, state.queue.as_ref()) {
            (true, Some(queue)) => queue.clone(),
            _ => return None,
        };
        state.open_handles += 1;
        drop(state);
        Some(Handle::new(
            queue,
            Arc::clone(&self.shared),
            self.settings.clone(),
        ))
    }
}

impl LinkShared {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, LinkState> {
        // poisoning means a task panicked while updating handle accounting,
        // which is an implementation bug
        self.state.lock().expect("link state lock poisoned")
    }

    /// Release one open-handle slot. Called exactly once per attached handle.
    pub(crate) fn detach(&self) {
        let mut state = self.lock_state();
        state.open_handles -= 1;
        if state.open_handles == 0 {
            self.zero.notify_one();
        }
    }
}

/// Waits for the open-handle count to reach zero, then re-checks under the
/// lock that no new attach raced in before committing to teardown. Exactly
/// one worker exists per endpoint at all times because an attach observes
/// `alive == false` in the same critical section and starts a fresh link
/// instead.
async fn monitor(shared: Arc<LinkShared>, on_shutdown: Option<DeleteNotice>) {
    loop {
        shared.zero.notified().await;
        let mut state = shared.lock_state();
        if state.open_handles == 0 && state.alive {
            state.alive = false;
            state.queue = None;
            break;
        }
        // an attach slipped in between the count reaching zero and this
        // check; keep waiting
    }
    if let Some(notice) = on_shutdown {
        notice.run(&shared).await;
    }
}
