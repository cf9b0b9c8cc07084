//! Long-running site components and their shared lifecycle.
//!
//! A [`Component`] captures its state at construction and runs until the
//! shared [`CancellationToken`] fires or its own work ends. The web server is
//! the only component today; [`spawn_components`] takes a list so a second
//! listener (or a background refresher) slots in without touching `main`.
//!
//! Any component failure cancels the token, so siblings stop too.

use std::future::Future;
use std::pin::Pin;

use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::AppError;

pub type ComponentFuture = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'static>>;

pub trait Component: Send + 'static {
    /// Name used in log fields.
    fn id(&self) -> &str;

    /// Consume the component and return its run loop.
    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture;
}

/// Resolves once every spawned component has exited.
pub struct SubsystemHandle {
    inner: JoinHandle<Result<(), AppError>>,
}

impl SubsystemHandle {
    /// First component error, if any.
    pub async fn join(self) -> Result<(), AppError> {
        match self.inner.await {
            Ok(r) => r,
            Err(e) => Err(AppError::Web(format!("component supervisor panicked: {e}"))),
        }
    }
}

pub fn spawn_components(
    components: Vec<Box<dyn Component>>,
    shutdown: CancellationToken,
) -> SubsystemHandle {
    let inner = tokio::spawn(async move {
        let mut set: JoinSet<(String, Result<(), AppError>)> = JoinSet::new();
        for component in components {
            let id = component.id().to_string();
            debug!(component = %id, "spawning component");
            let fut = component.run(shutdown.clone());
            set.spawn(async move { (id, fut.await) });
        }

        let mut first_err: Option<AppError> = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Err(e) => {
                    error!(error = %e, "component panicked");
                    shutdown.cancel();
                    first_err
                        .get_or_insert_with(|| AppError::Web(format!("component panicked: {e}")));
                }
                Ok((id, Err(e))) => {
                    error!(component = %id, error = %e, "component failed");
                    shutdown.cancel();
                    first_err.get_or_insert(e);
                }
                Ok((id, Ok(()))) => debug!(component = %id, "component exited"),
            }
        }

        first_err.map_or(Ok(()), Err)
    });

    SubsystemHandle { inner }
}
