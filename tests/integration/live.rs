//! Live runs: success, endpoint failure, stop, and superseding submits

use crate::integration::mock_server::MockServerFixture;
use json_render_playground::session::script::{demo_tree, DEMO_LINES};
use json_render_playground::session::{Mode, Phase, PlaygroundSnapshot};
use json_render_playground::{PlaygroundHandle, Renderer};
use mockito::Matcher;
use std::sync::Arc;
use std::time::Duration;

const SECOND_TREE: [&str; 2] = [
    r#"{"op":"set","path":"/root","value":"done"}"#,
    r#"{"op":"add","path":"/elements/done","value":{"key":"done","type":"Alert","props":{"title":"Second run","variant":"success"}}}"#,
];

async fn wait_for<F>(handle: &mut PlaygroundHandle, pred: F) -> Arc<PlaygroundSnapshot>
where
    F: Fn(&PlaygroundSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), handle.wait_for(pred))
        .await
        .expect("playground did not reach the expected state")
}

#[tokio::test]
async fn test_live_stream_builds_tree() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_patch_stream(&DEMO_LINES).await;
    let mut handle = fixture.spawn_playground();

    handle.submit("a contact form");
    let snap = wait_for(&mut handle, |s| s.generation == 1 && s.is_finished()).await;

    assert_eq!(snap.mode, Mode::Live);
    assert!(!snap.loading);
    assert!(snap.error.is_none());
    assert_eq!(snap.patches_applied, DEMO_LINES.len());
    assert_eq!(*snap.tree, demo_tree());
    assert!(Renderer::new().render_tree(&snap.tree).contains("Send Message"));
    mock.assert_async().await;
    handle.shutdown();
}

#[tokio::test]
async fn test_prompt_is_truncated_before_sending() {
    let fixture = MockServerFixture::new().await;
    let long = "x".repeat(300);
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/api/generate")
            .match_header("x-request-id", Matcher::Any)
            .match_body(Matcher::Json(serde_json::json!({ "prompt": "x".repeat(140) })))
            .with_status(200)
            .with_body("")
            .expect(1)
            .create_async()
            .await
    };
    let mut handle = fixture.spawn_playground();

    handle.submit(long);
    let snap = wait_for(&mut handle, |s| s.generation == 1 && s.is_finished()).await;
    assert_eq!(snap.prompt.chars().count(), 140);
    assert!(snap.error.is_none());
    assert!(snap.tree.is_empty());
    mock.assert_async().await;
    handle.shutdown();
}

#[tokio::test]
async fn test_endpoint_failure_sets_error_and_clears_loading() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_error_response(500, "model unavailable").await;
    let mut handle = fixture.spawn_playground();

    handle.submit("anything");
    let snap = wait_for(&mut handle, |s| s.generation == 1 && s.is_finished()).await;

    assert!(!snap.loading);
    assert_eq!(snap.phase, Phase::Done);
    let error = snap.error.as_deref().unwrap_or_default();
    assert!(error.contains("500"), "unexpected error: {}", error);
    assert!(error.contains("model unavailable"));
    handle.shutdown();
}

#[tokio::test]
async fn test_stream_failure_after_patches_keeps_partial_tree() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_broken_stream(&DEMO_LINES[..2]).await;
    let mut handle = fixture.spawn_playground();

    handle.submit("contact form");
    let snap = wait_for(&mut handle, |s| s.generation == 1 && s.is_finished()).await;

    assert!(!snap.loading);
    assert_eq!(snap.phase, Phase::Done);
    assert!(snap.error.is_some(), "broken body must surface as an error");
    assert_eq!(snap.patches_applied, 2);
    assert_eq!(snap.tree.root(), Some("card"));
    assert!(snap.tree.get("card").is_some());
    assert!(snap.tree.get("name").is_none());
    handle.shutdown();
}

#[tokio::test]
async fn test_stop_cancels_in_flight_request_without_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_slow_stream("slow", Duration::from_millis(800), &DEMO_LINES)
        .await;
    let mut handle = fixture.spawn_playground();

    handle.submit("slow");
    wait_for(&mut handle, |s| s.generation == 1 && s.loading).await;
    handle.stop();

    let snap = wait_for(&mut handle, |s| s.is_finished()).await;
    assert!(!snap.loading);
    assert!(snap.error.is_none());

    // The response would have arrived by now; none of it may be applied.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    let later = handle.snapshot();
    assert_eq!(later.patches_applied, 0);
    assert!(later.tree.is_empty());
    assert!(later.error.is_none());
    handle.shutdown();
}

#[tokio::test]
async fn test_second_submit_discards_first_run() {
    let fixture = MockServerFixture::new().await;
    let _slow = fixture
        .mock_slow_stream("first", Duration::from_millis(800), &DEMO_LINES)
        .await;
    let _fast = fixture.mock_stream_for("second", &SECOND_TREE).await;
    let mut handle = fixture.spawn_playground();

    handle.submit("first");
    handle.submit("second");
    let snap = wait_for(&mut handle, |s| s.generation == 2 && s.is_finished()).await;
    assert_eq!(snap.prompt, "second");
    assert_eq!(snap.tree.root(), Some("done"));

    tokio::time::sleep(Duration::from_millis(1200)).await;
    let later = handle.snapshot();
    assert_eq!(later.generation, 2);
    assert_eq!(later.tree.len(), 1);
    assert!(later.tree.get("card").is_none());
    handle.shutdown();
}

#[tokio::test]
async fn test_demo_after_live_run_resets_tree() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_patch_stream(&SECOND_TREE).await;
    let mut handle = fixture.spawn_playground();

    handle.submit("alert please");
    wait_for(&mut handle, |s| s.generation == 1 && s.is_finished()).await;

    handle.start_demo();
    let snap = wait_for(&mut handle, |s| s.generation == 2 && s.is_finished()).await;
    assert_eq!(snap.mode, Mode::Scripted);
    assert_eq!(*snap.tree, demo_tree());
    assert!(snap.tree.get("done").is_none());
    handle.shutdown();
}
