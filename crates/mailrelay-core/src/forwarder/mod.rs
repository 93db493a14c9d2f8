/// Forwarding engine seam
///
/// Forwarders follow a completion-callback contract: `forward` returns
/// immediately and the outcome is reported later through a [`Completion`].
/// [`forward_and_wait`] adapts that contract into a single awaited result.
pub mod recipients;
pub mod ses;

pub use recipients::{Routing, route_recipients};
pub use ses::{ForwarderOptions, SesForwarder};

use crate::error::RelayError;
use crate::models::ForwardRequest;
use lambda_runtime::Context;
use serde_json::Value;
use tokio::sync::oneshot;

/// One-shot completion signal handed to a forwarder
///
/// Every method consumes the signal, so a forwarder reports at most once.
/// Dropping it without reporting is observed as a failure.
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<Result<(), RelayError>>,
}

impl Completion {
    pub fn channel() -> (Self, oneshot::Receiver<Result<(), RelayError>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn complete(self, result: Result<(), RelayError>) {
        // receiver gone means nobody awaits the outcome any more
        let _ = self.tx.send(result);
    }

    pub fn succeed(self) {
        self.complete(Ok(()))
    }

    pub fn fail(self, error: RelayError) {
        self.complete(Err(error))
    }
}

/// Delegated forwarding engine
pub trait Forwarder: Send + Sync {
    /// Starts forwarding the email described by `event`; must eventually
    /// resolve `done`
    fn forward(&self, event: Value, context: Context, done: Completion, request: ForwardRequest);
}

/// Invokes a forwarder and waits for its single completion signal
pub async fn forward_and_wait(
    forwarder: &dyn Forwarder,
    event: Value,
    context: Context,
    request: ForwardRequest,
) -> Result<(), RelayError> {
    let (done, outcome) = Completion::channel();
    forwarder.forward(event, context, done, request);

    match outcome.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(RelayError::Forward(e.to_string())),
        Err(_) => Err(RelayError::Forward(
            "forwarder dropped its completion without reporting".to_string(),
        )),
    }
}
