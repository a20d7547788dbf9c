// SPDX-License-Identifier: MIT OR Apache-2.0
//! Spawning descriptors and honoring cancellation.
#![cfg(unix)]

use std::process::Stdio;
use std::time::Duration;

use xfer_ssh::{CancellationToken, ExitOutcome, ProcessDescriptor};

fn sh(script: &str, cancel: Option<CancellationToken>) -> ProcessDescriptor {
    ProcessDescriptor::new("/bin/sh", vec!["-c".into(), script.into()], cancel)
}

#[tokio::test]
async fn uncancellable_process_reports_exit_code() {
    let mut child = sh("exit 3", None).spawn().expect("spawn sh");
    let outcome = child.wait().await.unwrap();
    assert_eq!(outcome.code(), Some(3));
    assert!(!outcome.is_cancelled());
}

#[tokio::test]
async fn process_finishing_first_is_not_cancelled() {
    let token = CancellationToken::new();
    let mut child = sh("exit 0", Some(token.clone())).spawn().expect("spawn sh");
    let outcome = child.wait().await.unwrap();
    assert!(matches!(outcome, ExitOutcome::Exited(status) if status.success()));
}

#[tokio::test]
async fn cancellation_kills_running_process() {
    let token = CancellationToken::new();
    let mut child = sh("sleep 30", Some(token.clone()))
        .spawn_with(|cmd| {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        })
        .expect("spawn sh");

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        })
    };

    let outcome = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("wait should return after cancellation")
        .unwrap();
    canceller.await.unwrap();

    assert_eq!(outcome, ExitOutcome::Cancelled);
    assert_eq!(outcome.code(), None);
}

#[tokio::test]
async fn pre_cancelled_token_kills_immediately() {
    let token = CancellationToken::new();
    token.cancel();
    let mut child = sh("sleep 30", Some(token)).spawn().expect("spawn sh");

    let outcome = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("wait should return")
        .unwrap();
    assert!(outcome.is_cancelled());
}

#[tokio::test]
async fn cancelling_parent_token_kills_child_bound_process() {
    let session = CancellationToken::new();
    let mut child = sh("sleep 30", Some(session.child_token()))
        .spawn()
        .expect("spawn sh");

    session.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("wait should return after parent cancellation")
        .unwrap();
    assert_eq!(outcome, ExitOutcome::Cancelled);
}

#[tokio::test]
async fn cancelling_child_token_leaves_parent_running() {
    let session = CancellationToken::new();
    let transfer = session.child_token();
    let mut child = sh("sleep 30", Some(transfer.clone()))
        .spawn()
        .expect("spawn sh");

    transfer.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("wait should return")
        .unwrap();
    assert!(outcome.is_cancelled());
    assert!(!session.is_cancelled());
}

#[tokio::test]
async fn command_carries_program_and_args() {
    let descriptor = ProcessDescriptor::new(
        "/bin/sh",
        vec![
            "-c".into(),
            "printf '%s|%s' \"$1\" \"$2\"".into(),
            "xfer".into(),
            "-p".into(),
            "2222".into(),
        ],
        None,
    );
    let output = descriptor
        .command()
        .stdout(Stdio::piped())
        .output()
        .await
        .expect("run sh");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "-p|2222");
}
