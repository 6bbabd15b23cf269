use super::*;
use shared::error::TrialError;
use tokio::sync::broadcast::Receiver;

fn drain(rx: &mut Receiver<TrialEvent>) -> Vec<TrialEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn upload_percents(events: &[TrialEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match event {
            TrialEvent::UploadProgress(percent) => Some(*percent),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn begin_upload_ends_analyzed_with_full_progress() {
    let controller = TrialFlowController::new();
    let mut rx = controller.subscribe_events();

    controller
        .begin_upload(vec!["sales.csv".to_string()])
        .await
        .expect("upload should succeed");

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.stage, TrialStage::Analyzed);
    assert_eq!(snapshot.upload_progress, 100);
    assert_eq!(snapshot.uploaded_file.as_deref(), Some("sales.csv"));

    let metadata = snapshot.metadata.expect("metadata present once analyzed");
    assert_eq!(metadata.file_name, "sales.csv");
    assert_eq!(metadata.column_names.len(), 10);
    assert_eq!(metadata.row_count, placeholder::SAMPLE_ROW_COUNT);
    assert_eq!(metadata.column_count, placeholder::SAMPLE_COLUMN_COUNT);

    let events = drain(&mut rx);
    assert_eq!(
        upload_percents(&events),
        vec![1, 11, 21, 31, 41, 51, 61, 71, 81, 91, 100]
    );

    // 100 must land before the stage flips.
    let full = events
        .iter()
        .position(|event| *event == TrialEvent::UploadProgress(100))
        .expect("upload reaches 100");
    let analyzed = events
        .iter()
        .position(|event| *event == TrialEvent::StageChanged(TrialStage::Analyzed))
        .expect("stage becomes analyzed");
    assert!(full < analyzed);
}

#[tokio::test(start_paused = true)]
async fn upload_strips_path_prefix_from_display_name() {
    let controller = TrialFlowController::new();
    controller
        .begin_upload(vec!["/tmp/uploads/q3-report.xlsx".to_string()])
        .await
        .expect("upload should succeed");

    let snapshot = controller.snapshot().await;
    assert_eq!(
        snapshot.metadata.expect("metadata").file_name,
        "q3-report.xlsx"
    );
    // The raw identifier is kept as the uploaded file reference.
    assert_eq!(
        snapshot.uploaded_file.as_deref(),
        Some("/tmp/uploads/q3-report.xlsx")
    );
}

#[tokio::test(start_paused = true)]
async fn empty_upload_request_is_rejected() {
    let controller = TrialFlowController::new();
    let err = controller
        .begin_upload(Vec::new())
        .await
        .expect_err("empty list must be rejected");
    assert!(matches!(err, TrialError::InvalidInput(_)));
    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());
}

#[tokio::test(start_paused = true)]
async fn blank_file_identifier_is_rejected() {
    let controller = TrialFlowController::new();
    let err = controller
        .begin_upload(vec!["   ".to_string()])
        .await
        .expect_err("blank identifier must be rejected");
    assert!(matches!(err, TrialError::InvalidInput(_)));
    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());
}

#[tokio::test(start_paused = true)]
async fn concurrent_upload_is_rejected_while_uploading() {
    let controller = TrialFlowController::new();
    let mut rx = controller.subscribe_events();

    let background = controller.clone();
    let task = tokio::spawn(async move {
        background
            .begin_upload(vec!["first.csv".to_string()])
            .await
    });

    // Wait until the first pass has actually entered Uploading.
    loop {
        if rx.recv().await.expect("event stream open")
            == TrialEvent::StageChanged(TrialStage::Uploading)
        {
            break;
        }
    }

    let err = controller
        .begin_upload(vec!["second.csv".to_string()])
        .await
        .expect_err("second upload must be rejected");
    assert_eq!(
        err,
        TrialError::invalid_state("begin_upload", TrialStage::Uploading)
    );

    task.await
        .expect("first upload task")
        .expect("first upload succeeds");
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.uploaded_file.as_deref(), Some("first.csv"));
}

#[tokio::test(start_paused = true)]
async fn upload_after_analysis_requires_reset() {
    let controller = TrialFlowController::new();
    controller
        .begin_upload(vec!["sales.csv".to_string()])
        .await
        .expect("upload");

    let err = controller
        .begin_upload(vec!["other.csv".to_string()])
        .await
        .expect_err("re-upload without reset must be rejected");
    assert_eq!(
        err,
        TrialError::invalid_state("begin_upload", TrialStage::Analyzed)
    );

    controller.reset().await;
    controller
        .begin_upload(vec!["other.csv".to_string()])
        .await
        .expect("upload succeeds again after reset");
}

#[tokio::test(start_paused = true)]
async fn generate_outside_analyzed_is_rejected_without_side_effects() {
    let controller = TrialFlowController::new();
    let err = controller
        .generate_dashboard()
        .await
        .expect_err("generation requires an analyzed upload");
    assert_eq!(
        err,
        TrialError::invalid_state("generate_dashboard", TrialStage::Idle)
    );
    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());
}

#[tokio::test(start_paused = true)]
async fn generation_walks_the_named_checkpoints() {
    let controller = TrialFlowController::new();
    controller
        .begin_upload(vec!["sales.csv".to_string()])
        .await
        .expect("upload");

    let mut rx = controller.subscribe_events();
    controller
        .generate_dashboard()
        .await
        .expect("generation should succeed");

    let observed: Vec<(u8, &str)> = drain(&mut rx)
        .into_iter()
        .filter_map(|event| match event {
            TrialEvent::GenerationProgress { percent, step } => Some((percent, step)),
            _ => None,
        })
        .collect();
    assert_eq!(
        observed,
        GENERATION_STEPS
            .iter()
            .map(|(step, percent)| (*percent, *step))
            .collect::<Vec<_>>()
    );

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.stage, TrialStage::Ready);
    assert_eq!(snapshot.generation_progress, 100);
    assert!(snapshot.metadata.is_some());
}

#[tokio::test(start_paused = true)]
async fn reset_is_unconditional_and_idempotent() {
    let controller = TrialFlowController::new();
    controller
        .begin_upload(vec!["sales.csv".to_string()])
        .await
        .expect("upload");
    controller.generate_dashboard().await.expect("generation");

    controller.reset().await;
    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());

    controller.reset().await;
    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_an_inflight_upload() {
    let controller = TrialFlowController::new();
    let mut rx = controller.subscribe_events();

    let background = controller.clone();
    let task = tokio::spawn(async move {
        background
            .begin_upload(vec!["sales.csv".to_string()])
            .await
    });

    // Let a few checkpoints land, then cancel mid-pass.
    loop {
        if rx.recv().await.expect("event stream open") == TrialEvent::UploadProgress(21) {
            break;
        }
    }
    controller.reset().await;

    task.await
        .expect("upload task")
        .expect("cancelled pass still returns Ok");

    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());
    let later = drain(&mut rx);
    assert!(later
        .iter()
        .all(|event| !matches!(event, TrialEvent::FileAccepted(_))));
    assert!(!later.contains(&TrialEvent::StageChanged(TrialStage::Analyzed)));
}

#[tokio::test(start_paused = true)]
async fn end_to_end_trial_journey() {
    let controller = TrialFlowController::new();
    let mut rx = controller.subscribe_events();

    controller
        .begin_upload(vec!["sales.csv".to_string()])
        .await
        .expect("upload");
    let analyzed = controller.snapshot().await;
    assert_eq!(analyzed.stage, TrialStage::Analyzed);
    assert_eq!(
        analyzed.metadata.as_ref().expect("metadata").file_name,
        "sales.csv"
    );
    assert_eq!(
        analyzed.metadata.expect("metadata").column_names.len(),
        10
    );

    controller.generate_dashboard().await.expect("generation");
    assert_eq!(controller.snapshot().await.stage, TrialStage::Ready);

    controller.reset().await;
    assert_eq!(controller.snapshot().await, TrialSnapshot::idle());

    let events = drain(&mut rx);
    assert_eq!(
        upload_percents(&events),
        vec![1, 11, 21, 31, 41, 51, 61, 71, 81, 91, 100]
    );
    let generation: Vec<u8> = events
        .iter()
        .filter_map(|event| match event {
            TrialEvent::GenerationProgress { percent, .. } => Some(*percent),
            _ => None,
        })
        .collect();
    assert_eq!(generation, vec![20, 40, 60, 80, 100]);
}
