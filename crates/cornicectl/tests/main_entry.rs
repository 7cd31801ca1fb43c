//! Integration tests for the `cornicectl` binary entry point.
//!
//! Exercises the compiled binary end to end: summary renders, usage
//! rejection before any transport I/O, connection failure reporting, and a
//! full delivery against a live socket.

use std::io::Read;
use std::thread;

use assert_cmd::Command;
use predicates::str::contains;

fn cornicectl() -> Command {
    Command::cargo_bin("cornicectl").expect("binary should build")
}

#[test]
fn volume_group_prints_summary_and_subcommands() {
    cornicectl()
        .arg("volume")
        .assert()
        .success()
        .stdout(contains("volume"))
        .stdout(contains("up"))
        .stdout(contains("down"))
        .stdout(contains("set"));
}

#[test]
fn unknown_command_prints_usage_line() {
    cornicectl()
        .arg("bogus")
        .assert()
        .failure()
        .stdout(contains("Usage: unknown command 'bogus'"));
}

#[test]
fn out_of_range_volume_is_rejected_without_sending() {
    let dir = tempfile::tempdir().expect("temp dir");
    let socket = dir.path().join("absent.sock");
    cornicectl()
        .arg("--socket")
        .arg(&socket)
        .args(["volume", "set", "1.5"])
        .assert()
        .failure()
        .stdout(contains("Volume must be a float between 0.0 and 1.0"))
        .stderr(predicates::str::is_empty());
}

#[cfg(unix)]
#[test]
fn unreachable_daemon_reports_connection_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let socket = dir.path().join("absent.sock");
    cornicectl()
        .arg("--socket")
        .arg(&socket)
        .args(["volume", "up"])
        .assert()
        .failure()
        .stderr(contains("failed to connect to daemon"));
}

#[cfg(unix)]
#[test]
fn volume_set_delivers_one_frame_to_the_daemon_socket() {
    use std::os::unix::net::UnixListener;

    use cornice_ipc::{VolumeSet, WireMessage};

    let dir = tempfile::tempdir().expect("temp dir");
    let socket = dir.path().join("cornice.sock");
    let listener = UnixListener::bind(&socket).expect("bind listener");

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("read frame");
        received
    });

    cornicectl()
        .arg("--socket")
        .arg(&socket)
        .args(["volume", "set", "0.5"])
        .assert()
        .success();

    let received = server.join().expect("join server");
    assert_eq!(received, VolumeSet { level: 0.5 }.encode());
}
