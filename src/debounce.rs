use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Runs a task after a quiet period, cancelling any task it supersedes.
///
/// Each call to [`Debouncer::schedule`] aborts the pending task (if any) and
/// starts a new one that waits `delay` before running. Outside a tokio
/// runtime nothing is spawned and the caller is told so.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` to run after the delay, replacing any pending one.
    ///
    /// Returns `false` when there is no runtime to run it on.
    pub fn schedule<F>(&mut self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let Ok(runtime) = Handle::try_current() else {
            log::debug!("No tokio runtime, debounced task not scheduled");
            return false;
        };
        let delay = self.delay;
        self.pending = Some(runtime.spawn(async move {
            sleep(delay).await;
            task.await;
        }));
        true
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
