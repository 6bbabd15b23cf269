//! Trial flow controller: the "upload -> analyze -> generate -> ready"
//! journey behind the DataBoard free-trial page.
//!
//! The controller owns a single linear state machine and publishes every
//! intermediate progress checkpoint over a broadcast channel so presentation
//! code can re-render as each percentage lands. No file bytes are ever read;
//! analysis results are deliberate placeholder values (see [`placeholder`]).

use std::sync::Arc;
use std::time::Duration;

use shared::{
    domain::{FileMetadata, TrialSnapshot, TrialStage},
    error::TrialError,
};
use tokio::sync::{broadcast, RwLock};
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub mod placeholder;

const EVENT_CHANNEL_CAPACITY: usize = 1024;
const UPLOAD_CHECKPOINT_DELAY: Duration = Duration::from_millis(100);
const GENERATION_STEP_DELAY: Duration = Duration::from_secs(1);

/// Named generation checkpoints, published in order with a fixed delay
/// between each.
pub const GENERATION_STEPS: [(&str, u8); 5] = [
    ("Analyzing data structure...", 20),
    ("Creating visualizations...", 40),
    ("Generating insights...", 60),
    ("Building interactive charts...", 80),
    ("Finalizing dashboard...", 100),
];

/// Events published by the controller as the session advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialEvent {
    StageChanged(TrialStage),
    UploadProgress(u8),
    GenerationProgress { percent: u8, step: &'static str },
    FileAccepted(FileMetadata),
    SessionReset,
}

#[derive(Debug)]
struct TrialSessionState {
    stage: TrialStage,
    upload_progress: u8,
    generation_progress: u8,
    uploaded_file: Option<String>,
    metadata: Option<FileMetadata>,
    /// Bumped by `reset`. A staged pass captures the epoch at entry and
    /// abandons itself at the next checkpoint once the value moves on.
    epoch: u64,
}

impl TrialSessionState {
    fn idle() -> Self {
        Self {
            stage: TrialStage::Idle,
            upload_progress: 0,
            generation_progress: 0,
            uploaded_file: None,
            metadata: None,
            epoch: 0,
        }
    }
}

/// Single-session controller for the trial flow state machine.
///
/// At most one staged operation is in flight at a time; the stage itself is
/// the guard, flipped under the write lock before the first await. `reset`
/// acts as unconditional cancellation and is callable from any stage.
pub struct TrialFlowController {
    state: RwLock<TrialSessionState>,
    events: broadcast::Sender<TrialEvent>,
}

impl TrialFlowController {
    pub fn new() -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            state: RwLock::new(TrialSessionState::idle()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TrialEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> TrialSnapshot {
        let state = self.state.read().await;
        TrialSnapshot {
            stage: state.stage,
            upload_progress: state.upload_progress,
            generation_progress: state.generation_progress,
            uploaded_file: state.uploaded_file.clone(),
            metadata: state.metadata.clone(),
        }
    }

    /// Accepts an upload request and walks the session from `Idle` through
    /// `Uploading` to `Analyzed`.
    ///
    /// Progress is published at checkpoints 1, 11, ..., 91 and then pinned
    /// at 100 before the stage flips, each checkpoint separated by a short
    /// timed delay. Only the first file identifier is recorded; the rest of
    /// the list is accepted but ignored, matching the single-file trial.
    pub async fn begin_upload(&self, files: Vec<String>) -> Result<(), TrialError> {
        let file = files
            .first()
            .cloned()
            .ok_or_else(|| TrialError::invalid_input("at least one file is required"))?;
        if file.trim().is_empty() {
            return Err(TrialError::invalid_input("file identifier is blank"));
        }

        let epoch = {
            let mut state = self.state.write().await;
            if state.stage != TrialStage::Idle {
                warn!(stage = state.stage.label(), "begin_upload rejected");
                return Err(TrialError::invalid_state("begin_upload", state.stage));
            }
            state.stage = TrialStage::Uploading;
            state.upload_progress = 0;
            state.epoch
        };
        self.publish(TrialEvent::StageChanged(TrialStage::Uploading));
        info!(file = %file, file_count = files.len(), "trial upload started");

        for percent in (1..100).step_by(10) {
            if !self.advance_upload(epoch, percent as u8).await {
                return Ok(());
            }
            sleep(UPLOAD_CHECKPOINT_DELAY).await;
        }
        // 100 must be observable before the stage becomes Analyzed.
        if !self.advance_upload(epoch, 100).await {
            return Ok(());
        }

        let metadata = placeholder::analysis_for(placeholder::display_name(&file));
        {
            let mut state = self.state.write().await;
            if state.epoch != epoch {
                debug!("upload pass cancelled before completion");
                return Ok(());
            }
            state.uploaded_file = Some(file);
            state.metadata = Some(metadata.clone());
            state.stage = TrialStage::Analyzed;
        }
        self.publish(TrialEvent::FileAccepted(metadata));
        self.publish(TrialEvent::StageChanged(TrialStage::Analyzed));
        info!("trial upload analyzed");
        Ok(())
    }

    /// Walks the session from `Analyzed` through `Generating` to `Ready`,
    /// publishing the five named checkpoints with a fixed delay after each.
    pub async fn generate_dashboard(&self) -> Result<(), TrialError> {
        let epoch = {
            let mut state = self.state.write().await;
            if state.stage != TrialStage::Analyzed {
                warn!(stage = state.stage.label(), "generate_dashboard rejected");
                return Err(TrialError::invalid_state("generate_dashboard", state.stage));
            }
            state.stage = TrialStage::Generating;
            state.generation_progress = 0;
            state.epoch
        };
        self.publish(TrialEvent::StageChanged(TrialStage::Generating));
        info!("dashboard generation started");

        for (step, percent) in GENERATION_STEPS {
            if !self.advance_generation(epoch, percent, step).await {
                return Ok(());
            }
            sleep(GENERATION_STEP_DELAY).await;
        }

        {
            let mut state = self.state.write().await;
            if state.epoch != epoch {
                debug!("generation pass cancelled before completion");
                return Ok(());
            }
            state.stage = TrialStage::Ready;
        }
        self.publish(TrialEvent::StageChanged(TrialStage::Ready));
        info!("dashboard ready");
        Ok(())
    }

    /// Returns the session to `Idle`, discarding the uploaded file reference,
    /// metadata, and both progress counters. Always succeeds; an in-flight
    /// staged pass notices the epoch bump at its next checkpoint and stops
    /// publishing.
    pub async fn reset(&self) {
        let previous = {
            let mut state = self.state.write().await;
            let previous = state.stage;
            state.epoch += 1;
            state.stage = TrialStage::Idle;
            state.upload_progress = 0;
            state.generation_progress = 0;
            state.uploaded_file = None;
            state.metadata = None;
            previous
        };
        info!(from = previous.label(), "trial session reset");
        self.publish(TrialEvent::SessionReset);
        self.publish(TrialEvent::StageChanged(TrialStage::Idle));
    }

    async fn advance_upload(&self, epoch: u64, percent: u8) -> bool {
        {
            let mut state = self.state.write().await;
            if state.epoch != epoch || state.stage != TrialStage::Uploading {
                debug!(percent, "upload checkpoint dropped after cancellation");
                return false;
            }
            state.upload_progress = percent;
        }
        self.publish(TrialEvent::UploadProgress(percent));
        true
    }

    async fn advance_generation(&self, epoch: u64, percent: u8, step: &'static str) -> bool {
        {
            let mut state = self.state.write().await;
            if state.epoch != epoch || state.stage != TrialStage::Generating {
                debug!(percent, "generation checkpoint dropped after cancellation");
                return false;
            }
            state.generation_progress = percent;
        }
        self.publish(TrialEvent::GenerationProgress { percent, step });
        true
    }

    fn publish(&self, event: TrialEvent) {
        // Send fails only when no subscriber is attached, which is fine for
        // a headless caller driving the controller directly.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
