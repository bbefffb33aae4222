//! Messages sent from background tasks to the UI thread

use crate::pipeline::{PipelineOutcome, PipelineState};
use crate::shared::RunId;
use crate::storage::StoredSettings;

/// Results coming back from work running on the tokio runtime
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// The pixel read finished; hidden windows must be restored
    Captured { run: RunId, succeeded: bool },
    /// The pipeline entered a new stage
    Stage { run: RunId, state: PipelineState },
    /// The pipeline finished
    Finished { run: RunId, outcome: PipelineOutcome },
    /// The connectivity check for freshly saved settings completed
    CredentialChecked {
        settings: StoredSettings,
        result: Result<(), String>,
    },
}
