use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use tokio::sync::Mutex;

use crate::client::handle::Handle;
use crate::client::link::{Link, LinkShared};
use crate::error::RequestError;
use crate::types::ConnectionSettings;

/// Managed and unmanaged clients are mutually exclusive for the lifetime of
/// the process. The flag transitions `UNSET -> MANAGED | UNMANAGED` exactly
/// once and never reverses.
mod usage {
    pub(super) const UNSET: u8 = 0;
    pub(super) const MANAGED: u8 = 1;
    pub(super) const UNMANAGED: u8 = 2;
}

static USAGE_MODE: AtomicU8 = AtomicU8::new(usage::UNSET);

fn claim_usage(want: u8) -> Result<(), RequestError> {
    match USAGE_MODE.compare_exchange(usage::UNSET, want, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => Ok(()),
        Err(current) if current == want => Ok(()),
        Err(_) => Err(RequestError::ModeConflict),
    }
}

type LinkMap = Arc<Mutex<HashMap<String, Link>>>;

/// Process-wide registry of links, one per endpoint.
///
/// Acquiring a handle for an endpoint that already has a live link returns a
/// handle on that link, provided every connection setting matches. Links shut
/// down once their last handle closes and their entry is removed; a later
/// acquire starts a fresh link.
pub struct ClientRegistry {
    clients: LinkMap,
}

static REGISTRY: OnceLock<ClientRegistry> = OnceLock::new();

/// Access the process-wide [`ClientRegistry`], claiming managed-mode usage
/// for the process. Fails with [`RequestError::ModeConflict`] if unmanaged
/// [`Client`]s have already been created.
pub fn registry() -> Result<&'static ClientRegistry, RequestError> {
    claim_usage(usage::MANAGED)?;
    Ok(REGISTRY.get_or_init(ClientRegistry::new))
}

impl ClientRegistry {
    fn new() -> Self {
        ClientRegistry {
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return a fresh handle for the endpoint described by the settings,
    /// starting a link if none is running.
    ///
    /// Fails with [`RequestError::SettingsMismatch`] when a live link for the
    /// endpoint was opened with different settings. An endpoint whose link
    /// has begun shutting down is transparently given a fresh link.
    pub async fn acquire(&self, settings: ConnectionSettings) -> Result<Handle, RequestError> {
        settings.validate()?;
        // the map lock serializes acquisition with deletion
        let mut clients = self.clients.lock().await;
        if let Some(link) = clients.get(&settings.endpoint) {
            if link.is_alive() {
                if *link.settings() != settings {
                    return Err(RequestError::SettingsMismatch);
                }
                if let Some(handle) = link.attach() {
                    return Ok(handle);
                }
                // teardown began between the liveness check and the attach;
                // fall through and start a fresh link
            }
        }
        let notice = DeleteNotice {
            clients: Arc::downgrade(&self.clients),
            endpoint: settings.endpoint.clone(),
        };
        let link = Link::start(settings.clone(), Some(notice)).await?;
        let handle = link.attach().ok_or(RequestError::Shutdown)?;
        clients.insert(settings.endpoint.clone(), link);
        Ok(handle)
    }
}

/// Carried by a managed link's monitor: removes the link's registry entry
/// once the link has fully committed to teardown. The entry is only removed
/// if it still refers to the same link, so a replacement link that raced in
/// is left alone.
pub(crate) struct DeleteNotice {
    clients: Weak<Mutex<HashMap<String, Link>>>,
    endpoint: String,
}

impl DeleteNotice {
    pub(crate) async fn run(self, shared: &Arc<LinkShared>) {
        if let Some(clients) = self.clients.upgrade() {
            let mut clients = clients.lock().await;
            let same = clients
                .get(&self.endpoint)
                .is_some_and(|link| Arc::ptr_eq(link.shared(), shared));
            if same {
                clients.remove(&self.endpoint);
                tracing::debug!(endpoint = %self.endpoint, "link removed from registry");
            }
        }
    }
}

/// An unmanaged client: its own single-endpoint registry.
///
/// For callers that want full control over a link's identity instead of the
/// process-wide registry. Creating one commits the process to unmanaged
/// usage; [`registry`] will fail from then on. The client's link starts on
/// the first [`Client::handle`] call and shuts down when every handle is
/// closed; a later call revives it.
pub struct Client {
    settings: ConnectionSettings,
    link: Mutex<Option<Link>>,
}

impl Client {
    /// Validate the settings and register unmanaged usage for the process.
    /// No connection is attempted until the first [`Client::handle`] call.
    pub fn new(settings: ConnectionSettings) -> Result<Client, RequestError> {
        claim_usage(usage::UNMANAGED)?;
        settings.validate()?;
        Ok(Client {
            settings,
            link: Mutex::new(None),
        })
    }

    /// Return a fresh handle on this client's link, starting or restarting
    /// the link if it is not running.
    pub async fn handle(&self) -> Result<Handle, RequestError> {
        let mut slot = self.link.lock().await;
        if let Some(link) = slot.as_ref() {
            if let Some(handle) = link.attach() {
                return Ok(handle);
            }
        }
        let link = Link::start(self.settings.clone(), None).await?;
        let handle = link.attach().ok_or(RequestError::Shutdown)?;
        *slot = Some(link);
        Ok(handle)
    }

    /// The settings this client was created with.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.settings.endpoint)
            .finish()
    }
}
