pub mod actions;
pub mod model;
pub mod scheduler;
pub mod state;

pub use actions::{ActionDispatcher, ActionOutcome, ControlAction, Decision};
pub use model::{MatchBoard, MatchSnapshot};
pub use scheduler::PollScheduler;
pub use state::MonitorState;

use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::api::MatchBackend;

/// Cheaply cloneable handle to the monitor: the backend plus the shared
/// state machine. Scheduled ticks, forced resyncs, and the dashboard all
/// operate through clones of this.
#[derive(Clone)]
pub struct Monitor {
    backend: Arc<dyn MatchBackend>,
    state: Arc<Mutex<MonitorState>>,
}

impl Monitor {
    pub fn new(backend: Arc<dyn MatchBackend>) -> Self {
        Monitor {
            backend,
            state: Arc::new(Mutex::new(MonitorState::new())),
        }
    }

    pub fn backend(&self) -> Arc<dyn MatchBackend> {
        Arc::clone(&self.backend)
    }

    /// Run one poll cycle: fetch the full snapshot set and apply the
    /// outcome under the state machine's sequencing rules. Used by both
    /// scheduled ticks and out-of-band resyncs.
    pub async fn refresh(&self) {
        let seq = match self.state.lock().unwrap().begin_cycle() {
            Some(seq) => seq,
            // Stopped; nothing to do
            None => return,
        };

        match self.backend.fetch_all().await {
            Ok(snapshots) => {
                let applied = self
                    .state
                    .lock()
                    .unwrap()
                    .apply_success(seq, snapshots);
                if applied {
                    debug!("Poll cycle {} applied", seq);
                } else {
                    debug!("Poll cycle {} discarded (stale or stopped)", seq);
                }
            }
            Err(e) => {
                warn!("Poll cycle {} failed: {}", seq, e);
                self.state.lock().unwrap().apply_error(seq, e.to_string());
            }
        }
    }

    /// Current render model.
    pub fn board(&self) -> MatchBoard {
        self.state.lock().unwrap().board()
    }

    /// Mark the monitor stopped; in-flight cycle results are discarded.
    pub fn stop(&self) {
        self.state.lock().unwrap().stop();
    }
}
