//! One-shot backend reachability check.
//!
//! The probe runs at most once per session. Callers arriving while it is in
//! flight wait for its verdict. There is no retry and no periodic re-probe:
//! a backend that comes up later is only noticed by a new session.

use std::sync::{PoisonError, RwLock};

use tokio::sync::OnceCell;

use crate::gateway::ProductGateway;
use crate::normalize::{Operation, normalize};
use crate::session::{CONNECTIVITY_ERROR, ConnectionState, Session};

pub struct ConnectionProbe<'a, G: ?Sized> {
    gateway: &'a G,
    session: &'a RwLock<Session>,
    verdict: &'a OnceCell<ConnectionState>,
}

impl<'a, G> ConnectionProbe<'a, G>
where
    G: ProductGateway + ?Sized,
{
    pub fn new(
        gateway: &'a G,
        session: &'a RwLock<Session>,
        verdict: &'a OnceCell<ConnectionState>,
    ) -> Self {
        Self {
            gateway,
            session,
            verdict,
        }
    }

    /// The decided state, running the check first if nobody has.
    pub async fn probe(&self) -> ConnectionState {
        self.run().await.0
    }

    /// Like [`probe`](Self::probe), also reporting whether this call is the
    /// one that performed the check.
    pub async fn run(&self) -> (ConnectionState, bool) {
        let mut performed = false;
        let state = *self
            .verdict
            .get_or_init(|| {
                performed = true;
                self.check()
            })
            .await;
        (state, performed)
    }

    async fn check(&self) -> ConnectionState {
        self.set_connection(ConnectionState::Testing);
        tracing::info!("testing backend connection");

        match self.gateway.health().await {
            Ok(body) => {
                tracing::info!(%body, "backend connection successful");
                self.set_connection(ConnectionState::Connected);
                ConnectionState::Connected
            }
            Err(err) => {
                tracing::error!(
                    error = %normalize(&err, Operation::Health),
                    "backend connection test failed"
                );
                let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
                session.connection = ConnectionState::Failed;
                session.connectivity_error = Some(CONNECTIVITY_ERROR.to_string());
                ConnectionState::Failed
            }
        }
    }

    fn set_connection(&self, state: ConnectionState) {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .connection = state;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::{GatewayError, TransportKind};
    use crate::testing::FakeGateway;

    #[tokio::test]
    async fn waiting_callers_share_one_check() {
        let gateway = FakeGateway::default();
        gateway.delay("health", Duration::from_millis(40));
        let session = RwLock::new(Session::default());
        let verdict = OnceCell::new();
        let probe = ConnectionProbe::new(&gateway, &session, &verdict);

        let (first, second) = tokio::join!(probe.run(), probe.run());

        assert_eq!(first, (ConnectionState::Connected, true));
        assert_eq!(second, (ConnectionState::Connected, false));
        assert_eq!(gateway.count("health"), 1);
        assert_eq!(probe.probe().await, ConnectionState::Connected);
    }

    #[tokio::test]
    async fn failure_is_recorded_in_the_session() {
        let gateway = FakeGateway::default();
        gateway.fail(
            "health",
            GatewayError::transport(TransportKind::Connect, "could not connect"),
        );
        let session = RwLock::new(Session::default());
        let verdict = OnceCell::new();

        let state = ConnectionProbe::new(&gateway, &session, &verdict).probe().await;

        assert_eq!(state, ConnectionState::Failed);
        let session = session.read().unwrap();
        assert_eq!(session.connection(), ConnectionState::Failed);
        assert_eq!(session.connectivity_error(), Some(CONNECTIVITY_ERROR));
    }
}
