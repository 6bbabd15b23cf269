//! Backend commands queued from UI to backend worker.

use shared::domain::ContactRequest;

pub enum BackendCommand {
    BeginUpload { files: Vec<String> },
    GenerateDashboard,
    ResetTrial,
    SubmitContact(ContactRequest),
}
