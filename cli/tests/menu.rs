//! # dockmgr Interactive Menu Integration Tests
//!
//! File: cli/tests/menu.rs
//!
//! Drives the menu through stdin against the fake engine from `common`.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_menu_lists_images_and_exits() {
    let fake = FakeEngine::new();
    // images, list, Enter, back, exit
    fake.cmd()
        .write_stdin("1\n1\n\n5\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Container engine detected: Docker version 27.0.0, build fake",
        ))
        .stdout(predicate::str::contains("nginx        latest"))
        .stdout(predicate::str::contains("Thanks for using dockmgr!"));

    let calls = fake.calls();
    assert_eq!(calls[0], "--version");
    assert!(calls[1].starts_with("images --format table {{.Repository}}"));
    assert_eq!(calls.len(), 2);
}

#[test]
fn test_menu_run_container() {
    let fake = FakeEngine::new();
    // containers, run, image, name, ports, Enter, back, exit
    fake.cmd()
        .write_stdin("2\n3\nnginx:latest\nweb\n8080:80\n\n10\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✅ Container started with ID: 0123456789ab",
        ));

    assert!(fake
        .calls()
        .contains(&"run -d --name web -p 8080:80 nginx:latest".to_string()));
}

#[test]
fn test_menu_reports_engine_error_and_continues() {
    let fake = FakeEngine::new();
    // images, remove, id, confirm, Enter, back, exit
    fake.cmd()
        .write_stdin("1\n4\nghost\ny\n\n5\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Failed to remove image ghost"))
        .stdout(predicate::str::contains("No such image: ghost"))
        .stdout(predicate::str::contains("Thanks for using dockmgr!"));
}

#[test]
fn test_menu_rejects_empty_input_without_calling_engine() {
    let fake = FakeEngine::new();
    // containers, stop, empty id, Enter, back, exit
    fake.cmd()
        .write_stdin("2\n5\n\n\n10\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Container ID cannot be empty"));

    assert!(!fake.calls().iter().any(|c| c.starts_with("stop")));
}

#[test]
fn test_menu_exits_cleanly_when_stdin_closes() {
    let fake = FakeEngine::new();
    fake.cmd()
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input closed, exiting."));
}

#[test]
fn test_menu_honours_pause_setting() {
    let fake = FakeEngine::new().with_config("[ui]\npause_after_action = false\n");
    // system, disk usage, back, exit (no Enter needed)
    fake.cmd()
        .write_stdin("3\n2\n4\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Press Enter").not());

    assert!(fake.calls().contains(&"system df".to_string()));
}

#[test]
fn test_ctrl_c_at_prompt_says_goodbye() {
    use std::io::Read;
    use std::process::Stdio;
    use std::time::{Duration, Instant};

    let fake = FakeEngine::new();
    let mut child = fake
        .std_cmd()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn dockmgr");
    let mut stdout = child.stdout.take().unwrap();

    // Wait for the main menu prompt; stdin stays open so the read blocks.
    let deadline = Instant::now() + Duration::from_secs(20);
    let mut seen = Vec::new();
    let mut buf = [0u8; 256];
    while !String::from_utf8_lossy(&seen).contains("Select an option: ") {
        assert!(Instant::now() < deadline, "menu prompt never appeared");
        let n = stdout.read(&mut buf).unwrap();
        assert!(n > 0, "dockmgr closed stdout before prompting");
        seen.extend_from_slice(&buf[..n]);
    }
    std::thread::sleep(Duration::from_millis(300));

    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    stdout.read_to_end(&mut seen).unwrap();
    let exit = child.wait().unwrap();
    assert_eq!(exit.code(), Some(130));
    assert!(String::from_utf8_lossy(&seen).contains("👋 Interrupted, exiting."));
}
