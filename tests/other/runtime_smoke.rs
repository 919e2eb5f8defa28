//! End-to-end runtime smoke test (headless)
//!
//! Tests cover:
//! - Application initialization without panicking
//! - Headless mode operation with `PACVIZ_TEST_HEADLESS=1`
//! - Task cancellation handling
//! - A source that failed to open leaving the loop alive on the error screen

use std::sync::Arc;
use std::time::Duration;

use pacviz::app::{RunOptions, run};
use pacviz::sources::{AurClient, HttpTransport, MemorySource, PackageSource};
use pacviz::theme::{ThemeColors, default_theme};

/// Options around an in-memory source with AUR disabled.
fn options(source: Result<Arc<dyn PackageSource>, String>) -> RunOptions<HttpTransport> {
    RunOptions {
        source,
        aur: None::<Arc<AurClient<HttpTransport>>>,
        theme: default_theme(),
        theme_overrides: ThemeColors::default(),
        helper: None,
        privileged: false,
        dry_run: true,
    }
}

/// What: Spawn `run`, wait briefly, and require a clean exit or a clean cancellation.
async fn run_briefly(options: RunOptions<HttpTransport>) {
    let handle = tokio::spawn(async move { run(options).await.map_err(|e| e.to_string()) });

    tokio::time::sleep(Duration::from_millis(50)).await;

    if handle.is_finished() {
        match handle.await {
            Ok(run_result) => {
                if let Err(e) = run_result {
                    panic!("app::run returned error early: {e}");
                }
                return;
            }
            Err(join_err) => panic!("app::run task panicked: {join_err}"),
        }
    }

    handle.abort();
    match handle.await {
        Ok(run_result) => {
            if let Err(e) = run_result {
                panic!("app::run completed with error on abort race: {e}");
            }
        }
        Err(join_err) => {
            assert!(
                join_err.is_cancelled(),
                "app::run join error should be cancellation, got: {join_err}"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
/// What: Test end-to-end runtime initialization and execution in headless mode.
///
/// Inputs:
/// - `PACVIZ_TEST_HEADLESS=1` environment variable to bypass raw TTY setup/restore.
/// - An in-memory source and no AUR client.
///
/// Output:
/// - Application initializes without panicking and can be cancelled.
async fn runtime_smoke_headless_initializes_and_runs_without_panic() {
    unsafe {
        std::env::set_var("PACVIZ_TEST_HEADLESS", "1");
    }
    let source: Arc<dyn PackageSource> = Arc::new(MemorySource::default());
    run_briefly(options(Ok(source))).await;
}

#[tokio::test(flavor = "multi_thread")]
/// What: A source that could not be opened does not crash the runtime.
///
/// Output:
/// - The loop stays up on the error screen until cancelled.
async fn runtime_smoke_with_unavailable_source() {
    unsafe {
        std::env::set_var("PACVIZ_TEST_HEADLESS", "1");
    }
    run_briefly(options(Err("pacman not found in PATH".into()))).await;
}
