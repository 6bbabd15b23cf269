//! Runtime bridge between UI command queue and backend event intake.
//!
//! The backend worker owns the trial flow controller on a dedicated thread
//! with its own tokio runtime. Staged controller operations are spawned so
//! the command loop stays responsive; a ResetTrial arriving mid-upload
//! cancels the in-flight pass instead of queueing behind it.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use shared::domain::ContactRequest;
use trial_core::TrialFlowController;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const CONTACT_SUBMIT_DELAY: Duration = Duration::from_secs(2);

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let controller = TrialFlowController::new();

            let mut events = controller.subscribe_events();
            let ui_tx_clone = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let _ = ui_tx_clone.try_send(UiEvent::Trial(event));
                }
            });

            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::BeginUpload { files } => {
                        tracing::info!(file_count = files.len(), "backend: begin_upload");
                        let controller = controller.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            if let Err(err) = controller.begin_upload(files).await {
                                tracing::warn!("backend: begin_upload rejected: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_trial_error(
                                    UiErrorContext::Upload,
                                    &err,
                                )));
                            }
                        });
                    }
                    BackendCommand::GenerateDashboard => {
                        tracing::info!("backend: generate_dashboard");
                        let controller = controller.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            if let Err(err) = controller.generate_dashboard().await {
                                tracing::warn!("backend: generate_dashboard rejected: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_trial_error(
                                    UiErrorContext::Generate,
                                    &err,
                                )));
                            }
                        });
                    }
                    BackendCommand::ResetTrial => {
                        tracing::info!("backend: reset_trial");
                        controller.reset().await;
                    }
                    BackendCommand::SubmitContact(request) => {
                        tracing::info!(email = %request.email, "backend: submit_contact");
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match process_contact_request(request).await {
                                Ok(()) => {
                                    let _ = ui_tx.try_send(UiEvent::ContactAccepted);
                                }
                                Err(reason) => {
                                    let _ = ui_tx.try_send(UiEvent::ContactRejected(reason));
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}

/// Simulated submission: the trial build has no mail backend, so requests
/// are validated, delayed as a real round-trip would be, and logged.
async fn process_contact_request(request: ContactRequest) -> Result<(), String> {
    if request.name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err("a valid email address is required".to_string());
    }
    if request.message.trim().is_empty() {
        return Err("message is required".to_string());
    }

    tokio::time::sleep(CONTACT_SUBMIT_DELAY).await;
    tracing::info!(
        name = %request.name,
        subject = %request.subject,
        received_at = %chrono::Utc::now().to_rfc3339(),
        "contact request recorded"
    );
    Ok(())
}
