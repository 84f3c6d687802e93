use tracing::{info, warn};

use super::Monitor;
use crate::api::ApiError;

/// Operator-initiated control command targeting a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ForceFinish { match_id: i64 },
    Reset { match_id: i64 },
}

impl ControlAction {
    /// Prompt text for the confirmation step.
    pub fn describe(&self) -> String {
        match self {
            ControlAction::ForceFinish { match_id } => format!(
                "Force-finish match {}? The simulation ends immediately and cannot be resumed.",
                match_id
            ),
            ControlAction::Reset { match_id } => format!(
                "Reset match {}? The simulation restarts from kickoff and current progress is lost.",
                match_id
            ),
        }
    }
}

/// Outcome of the confirmation step, produced by whatever surface the
/// caller uses (a browser prompt, a test literal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Request sent and resync completed
    Completed,
    /// Confirmation rejected; nothing was sent
    Cancelled,
}

/// Executes confirmation-gated control actions. Each accepted action sends
/// exactly one state-changing request and, on success, exactly one
/// out-of-band resync fetch bypassing the poll timer. There is no optimistic
/// local mutation: the view changes only once the resync brings back the
/// backend-confirmed snapshot.
#[derive(Clone)]
pub struct ActionDispatcher {
    monitor: Monitor,
}

impl ActionDispatcher {
    pub fn new(monitor: Monitor) -> Self {
        ActionDispatcher { monitor }
    }

    /// Concurrent dispatches are not serialized; overlapping resyncs follow
    /// the state machine's last-completed-wins rule.
    pub async fn dispatch(
        &self,
        action: ControlAction,
        decision: Decision,
    ) -> Result<ActionOutcome, ApiError> {
        if decision == Decision::Rejected {
            info!("Operator declined: {}", action.describe());
            return Ok(ActionOutcome::Cancelled);
        }

        let backend = self.monitor.backend();
        let result = match action {
            ControlAction::ForceFinish { match_id } => backend.force_finish(match_id).await,
            ControlAction::Reset { match_id } => backend.reset_match(match_id).await,
        };

        if let Err(e) = result {
            // Displayed state stays untouched; next scheduled poll retries
            warn!("Action {:?} failed: {}", action, e);
            return Err(e);
        }

        info!("Action {:?} confirmed by backend, resyncing", action);
        self.monitor.refresh().await;
        Ok(ActionOutcome::Completed)
    }
}
