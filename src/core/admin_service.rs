use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{watch, Mutex};

use crate::connections::connection::AdminConnection;
use crate::connections::errors::ConnectionError;
use crate::core::alerts::AlertService;
use crate::core::business_network::{BusinessNetworkDefinition, DEFAULT_NETWORK_NAME};
use crate::identity::IdentityService;
use crate::storage::store::ProfileStore;

/// Busy-status message emitted while a connection attempt is in flight.
pub const CONNECTING_STATUS: &str = "Establishing admin connection ...";
/// Busy-status message emitted while the default network is being deployed.
pub const DEPLOYING_STATUS: &str = "Deploying business network ...";

/// The admin connection shared between the service and its callers.
pub type SharedAdminConnection = Arc<Mutex<Box<dyn AdminConnection + Send>>>;

/// Outcome of a connection attempt, broadcast to every caller that joined it.
type ConnectOutcome = Option<Result<(), String>>;

enum ConnectState {
    Disconnected,
    /// A connect attempt is in flight; join it instead of starting another.
    Connecting(watch::Receiver<ConnectOutcome>),
    Connected,
}

/// Credentials cached by the most recent connect attempt, so the
/// no-identity fallback can reconnect without asking the identity
/// service again.
#[derive(Default)]
struct SessionState {
    connection_profile: Option<String>,
    user_id: Option<String>,
    user_secret: Option<String>,
    /// True once an attempt got as far as the underlying connect call.
    /// Earlier failures (profile or identity resolution) must not trigger
    /// the no-identity fallback.
    made_it_to_connect: bool,
}

struct Inner {
    connection: SharedAdminConnection,
    identity: Box<dyn IdentityService>,
    profiles: ProfileStore,
    alerts: AlertService,
    connect_state: Mutex<ConnectState>,
    session: Mutex<SessionState>,
    initial_deploy: AtomicBool,
}

/// Mediates the admin-connection lifecycle for a business-network runtime.
///
/// The service establishes (or reuses) a connection on demand, auto-deploys
/// the default network the first time a fresh runtime is seen, and proxies
/// deploy/update calls once connected.
///
/// Cloning is cheap: clones share the same connection and state, which is how
/// a single in-flight connect attempt is guaranteed no matter how many tasks
/// call [`AdminService::ensure_connected`] at once.
#[derive(Clone)]
pub struct AdminService {
    inner: Arc<Inner>,
}

impl AdminService {
    pub fn new(
        connection: Box<dyn AdminConnection + Send>,
        identity: Box<dyn IdentityService>,
        profiles: ProfileStore,
        alerts: AlertService,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                connection: Arc::new(Mutex::new(connection)),
                identity,
                profiles,
                alerts,
                connect_state: Mutex::new(ConnectState::Disconnected),
                session: Mutex::new(SessionState::default()),
                initial_deploy: AtomicBool::new(false),
            }),
        }
    }

    /// The underlying admin connection, for callers that need direct access.
    pub fn admin_connection(&self) -> SharedAdminConnection {
        Arc::clone(&self.inner.connection)
    }

    /// The alert channel this service publishes busy-status messages on.
    pub fn alerts(&self) -> &AlertService {
        &self.inner.alerts
    }

    /// Make sure the service is connected, connecting if necessary.
    ///
    /// Exactly one underlying connect attempt runs at a time: if one is
    /// already in flight, this call waits for it and returns its outcome
    /// instead of starting another. Only the caller that actually starts an
    /// attempt emits the busy status.
    ///
    /// When the connect fails after reaching the underlying connect call,
    /// one fallback runs: reconnect without a business-network id and deploy
    /// the default network if the runtime has none. Errors from the fallback
    /// (or from failures before the connect call) propagate to the caller.
    pub async fn ensure_connected(&self) -> Result<(), ConnectionError> {
        enum Role {
            Leader(watch::Sender<ConnectOutcome>),
            Waiter(watch::Receiver<ConnectOutcome>),
        }

        let role = {
            let mut state = self.inner.connect_state.lock().await;
            match &*state {
                ConnectState::Connected => return Ok(()),
                ConnectState::Connecting(rx) => Role::Waiter(rx.clone()),
                ConnectState::Disconnected => {
                    let (tx, rx) = watch::channel(None);
                    *state = ConnectState::Connecting(rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Waiter(rx) => self.await_outcome(rx).await,
            Role::Leader(outcome_tx) => {
                self.inner.alerts.busy(CONNECTING_STATUS);

                let result = match self.connect().await {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        let made_it = self.inner.session.lock().await.made_it_to_connect;
                        if made_it {
                            debug!(
                                "Admin connect failed ({}); retrying without a network id",
                                err
                            );
                            self.connect_without_identity().await
                        } else {
                            Err(err)
                        }
                    }
                };

                {
                    let mut state = self.inner.connect_state.lock().await;
                    *state = if result.is_ok() {
                        ConnectState::Connected
                    } else {
                        ConnectState::Disconnected
                    };
                }
                let shared = result.as_ref().map(|_| ()).map_err(|e| e.to_string());
                let _ = outcome_tx.send(Some(shared));
                result
            }
        }
    }

    /// Wait for the in-flight attempt started by another caller.
    async fn await_outcome(
        &self,
        mut rx: watch::Receiver<ConnectOutcome>,
    ) -> Result<(), ConnectionError> {
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome.map_err(ConnectionError::Other);
            }
            if rx.changed().await.is_err() {
                // The leading task was dropped before it reported back.
                warn!("Connection attempt was abandoned before completing");
                let mut state = self.inner.connect_state.lock().await;
                if let ConnectState::Connecting(_) = &*state {
                    *state = ConnectState::Disconnected;
                }
                return Err(ConnectionError::Other(
                    "connection attempt was abandoned".into(),
                ));
            }
        }
    }

    /// One full connect attempt: resolve the current profile and identity,
    /// cache them, and connect to the default business network.
    pub async fn connect(&self) -> Result<(), ConnectionError> {
        // A fresh attempt has not reached the underlying connect yet; a
        // stale flag from an earlier attempt must not arm the fallback.
        self.inner.session.lock().await.made_it_to_connect = false;

        let profile = self.inner.profiles.current()?.ok_or_else(|| {
            ConnectionError::ProfileError("no current connection profile is set".into())
        })?;
        let user_id = self.inner.identity.user_id().await?;
        let user_secret = self.inner.identity.user_secret().await?;

        {
            let mut session = self.inner.session.lock().await;
            session.connection_profile = Some(profile.clone());
            session.user_id = Some(user_id.clone());
            session.user_secret = Some(user_secret.clone());
            session.made_it_to_connect = true;
        }

        info!(
            "Connecting to '{}' via profile '{}' as '{}'",
            DEFAULT_NETWORK_NAME, profile, user_id
        );
        let mut connection = self.inner.connection.lock().await;
        connection
            .connect(&profile, &user_id, &user_secret, Some(DEFAULT_NETWORK_NAME))
            .await
    }

    /// Fallback used when connecting to the default network failed: attach to
    /// the runtime without a network id, deploy the default network if it is
    /// missing, then reconnect to it with the cached credentials.
    pub async fn connect_without_identity(&self) -> Result<(), ConnectionError> {
        let (profile, user_id, user_secret) = {
            let session = self.inner.session.lock().await;
            match (
                &session.connection_profile,
                &session.user_id,
                &session.user_secret,
            ) {
                (Some(p), Some(u), Some(s)) => (p.clone(), u.clone(), s.clone()),
                _ => {
                    return Err(ConnectionError::Other(
                        "no cached credentials to reconnect with".into(),
                    ))
                }
            }
        };

        let mut connection = self.inner.connection.lock().await;
        connection
            .connect(&profile, &user_id, &user_secret, None)
            .await?;

        let networks = connection.list().await?;
        if !networks.iter().any(|n| n == DEFAULT_NETWORK_NAME) {
            self.inner.alerts.busy(DEPLOYING_STATUS);
            let definition = Self::generate_default_business_network();
            info!(
                "Runtime has no '{}'; deploying '{}'",
                DEFAULT_NETWORK_NAME,
                definition.identifier()
            );
            connection.deploy(&definition).await?;
            self.inner.initial_deploy.store(true, Ordering::SeqCst);
        }

        connection.disconnect().await?;
        connection
            .connect(&profile, &user_id, &user_secret, Some(DEFAULT_NETWORK_NAME))
            .await
    }

    /// Deploy a business network, connecting first if necessary.
    pub async fn deploy(
        &self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError> {
        self.ensure_connected().await?;
        let mut connection = self.inner.connection.lock().await;
        connection.deploy(definition).await
    }

    /// Update a deployed business network, connecting first if necessary.
    pub async fn update(
        &self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError> {
        self.ensure_connected().await?;
        let mut connection = self.inner.connection.lock().await;
        connection.update(definition).await
    }

    /// Whether the last connect auto-deployed the default network.
    ///
    /// Reading the flag resets it, so the answer is observable exactly once
    /// per auto-deploy.
    pub fn is_initial_deploy(&self) -> bool {
        self.inner.initial_deploy.swap(false, Ordering::SeqCst)
    }

    /// Tear down the connection and forget the cached session credentials.
    pub async fn disconnect(&self) -> Result<(), ConnectionError> {
        {
            let mut state = self.inner.connect_state.lock().await;
            *state = ConnectState::Disconnected;
        }
        {
            let mut session = self.inner.session.lock().await;
            *session = SessionState::default();
        }
        let mut connection = self.inner.connection.lock().await;
        connection.disconnect().await
    }

    /// The definition deployed automatically to an empty runtime.
    pub fn generate_default_business_network() -> BusinessNetworkDefinition {
        BusinessNetworkDefinition::default_network()
    }
}
