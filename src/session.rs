// Startup fetch session
// The provider runs once on a helper thread; its outcome is handed to the UI thread
// through a channel and only applied while the session generation is still live.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
        mpsc::{self, Receiver, TryRecvError},
    },
    thread,
};

use log::{debug, error};

use crate::VelocityError;
use crate::provider::{DataProvider, FetchOutcome, PROVIDER_FAILURE_MESSAGE, load_dashboard};
use crate::state::{Action, DashboardState};

struct Delivery {
    generation: u64,
    outcome: FetchOutcome,
}

/// Handle on the single startup fetch.
///
/// Dropping the handle or calling [`FetchSession::teardown`] advances the
/// live generation, after which a late result is discarded instead of being
/// applied to the state.
pub struct FetchSession {
    receiver: Receiver<Delivery>,
    generation: u64,
    live_generation: Arc<AtomicU64>,
    finished: bool,
}

impl FetchSession {
    /// Spawns the fetch. The provider is consumed so it can only be invoked once.
    pub fn start<P>(provider: P) -> Self
    where
        P: DataProvider + Send + 'static,
    {
        let (delivery_tx, delivery_rx) = mpsc::channel::<Delivery>();
        let generation = 1;
        let live_generation = Arc::new(AtomicU64::new(generation));
        let worker_generation = Arc::clone(&live_generation);

        thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(load_dashboard(&provider)),
                Err(e) => {
                    error!("{}", VelocityError::RuntimeError { source: e });
                    FetchOutcome::Failed(PROVIDER_FAILURE_MESSAGE.to_string())
                }
            };

            if worker_generation.load(Ordering::SeqCst) != generation {
                debug!("Fetch finished after teardown, dropping result");
                return;
            }
            if delivery_tx
                .send(Delivery {
                    generation,
                    outcome,
                })
                .is_err()
            {
                debug!("Fetch session receiver is gone, dropping result");
            }
        });

        Self {
            receiver: delivery_rx,
            generation,
            live_generation,
            finished: false,
        }
    }

    /// Non-blocking check for the fetch outcome. Returns the action to apply
    /// at most once.
    pub fn poll(&mut self) -> Option<Action> {
        if self.finished || self.is_torn_down() {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(delivery) => self.accept(delivery),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.worker_lost(),
        }
    }

    /// Blocks until the fetch completes. Used by the headless command.
    pub fn wait(&mut self) -> Option<Action> {
        if self.finished || self.is_torn_down() {
            return None;
        }
        match self.receiver.recv() {
            Ok(delivery) => self.accept(delivery),
            Err(_) => self.worker_lost(),
        }
    }

    /// Polls and applies the outcome to `state`. Returns true when the state changed.
    pub fn pump(&mut self, state: &mut DashboardState) -> bool {
        match self.poll() {
            Some(action) => {
                state.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn teardown(&mut self) {
        self.live_generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.live_generation.load(Ordering::SeqCst) != self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn accept(&mut self, delivery: Delivery) -> Option<Action> {
        if delivery.generation != self.generation || self.is_torn_down() {
            debug!("Dropping fetch result from generation {}", delivery.generation);
            return None;
        }
        self.finished = true;
        Some(delivery.outcome.into())
    }

    fn worker_lost(&mut self) -> Option<Action> {
        // the worker only hangs up without sending when the provider panicked
        error!("Fetch worker stopped without a result");
        self.finished = true;
        Some(Action::Failed(PROVIDER_FAILURE_MESSAGE.to_string()))
    }
}

impl Drop for FetchSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
