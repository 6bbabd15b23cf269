use serde::{Deserialize, Serialize};

/// Discrete phase of the trial flow. Exactly one stage is active at a time
/// and transitions are strictly linear: Idle -> Uploading -> Analyzed ->
/// Generating -> Ready, with reset returning to Idle from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStage {
    Idle,
    Uploading,
    Analyzed,
    Generating,
    Ready,
}

impl TrialStage {
    pub fn label(self) -> &'static str {
        match self {
            TrialStage::Idle => "idle",
            TrialStage::Uploading => "uploading",
            TrialStage::Analyzed => "analyzed",
            TrialStage::Generating => "generating",
            TrialStage::Ready => "ready",
        }
    }
}

/// Placeholder analysis record attached to an accepted upload. Values are
/// deterministic mock data; file content is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_name: String,
    pub size_label: String,
    pub row_count: u64,
    pub column_count: u32,
    pub column_names: Vec<String>,
}

/// Read-only view of the trial session handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSnapshot {
    pub stage: TrialStage,
    pub upload_progress: u8,
    pub generation_progress: u8,
    pub uploaded_file: Option<String>,
    pub metadata: Option<FileMetadata>,
}

impl TrialSnapshot {
    pub fn idle() -> Self {
        Self {
            stage: TrialStage::Idle,
            upload_progress: 0,
            generation_progress: 0,
            uploaded_file: None,
            metadata: None,
        }
    }
}

/// One showcase entry in the marketing gallery carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Submitted contact form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
