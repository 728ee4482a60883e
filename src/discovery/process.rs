use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{DashboardError, Result};

const POLL: Duration = Duration::from_millis(25);
/// How long pipe readers get to finish once a timed-out child is killed.
const READER_GRACE: Duration = Duration::from_millis(500);

#[cfg(windows)]
fn hide_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_cmd: &mut Command) {}

/// Run `program args...` and return its stdout. Non-zero exit, spawn failure
/// and exceeding `timeout` (the child is killed) are errors.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Result<Vec<u8>> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    hide_window(&mut cmd);

    let mut child = cmd
        .spawn()
        .map_err(|e| DashboardError::command(program, e.to_string()))?;

    // Drain pipes on threads so a chatty child cannot block on a full pipe.
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let out_reader = thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(s) = stdout.as_mut() {
            let _ = s.read_to_end(&mut buf);
        }
        buf
    });
    let err_reader = thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(s) = stderr.as_mut() {
            let _ = s.read_to_end(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                join_within(out_reader, READER_GRACE);
                join_within(err_reader, READER_GRACE);
                return Err(DashboardError::command(
                    program,
                    format!("timed out after {}s", timeout.as_secs()),
                ));
            }
            None => thread::sleep(POLL),
        }
    };

    let out = out_reader.join().unwrap_or_default();
    let err = err_reader.join().unwrap_or_default();
    if !status.success() {
        let reason = String::from_utf8_lossy(&err).trim().to_string();
        let reason = if reason.is_empty() { status.to_string() } else { reason };
        return Err(DashboardError::command(program, reason));
    }
    Ok(out)
}

/// Join a pipe reader if it finishes within `grace`. A grandchild that still
/// holds the pipe keeps the reader blocked; it is then left detached and ends
/// when that pipe closes.
fn join_within<T>(reader: JoinHandle<T>, grace: Duration) {
    let deadline = Instant::now() + grace;
    while !reader.is_finished() {
        if Instant::now() >= deadline {
            debug!("pipe reader still blocked after kill, detaching it");
            return;
        }
        thread::sleep(POLL);
    }
    let _ = reader.join();
}

/// Whether `program` can be spawned at all (used by `doctor`).
pub fn is_available(program: &str) -> bool {
    run_with_timeout(program, &["--version"], Duration::from_secs(3)).is_ok()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let out = run_with_timeout("sh", &["-c", "printf 'a|b|c|d'"], Duration::from_secs(5)).unwrap();
        assert_eq!(out, b"a|b|c|d");
    }

    #[test]
    fn non_zero_exit_reports_stderr() {
        let err = run_with_timeout("sh", &["-c", "echo boom >&2; exit 3"], Duration::from_secs(5)).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn slow_child_is_killed() {
        let err = run_with_timeout("sh", &["-c", "sleep 5"], Duration::from_millis(200)).unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn timeout_returns_even_if_a_grandchild_holds_the_pipe() {
        let start = Instant::now();
        let err = run_with_timeout("sh", &["-c", "sleep 3 & sleep 3"], Duration::from_millis(200)).unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn missing_program_is_an_error() {
        assert!(run_with_timeout("definitely-not-a-real-binary-xyz", &[], Duration::from_secs(1)).is_err());
        assert!(!is_available("definitely-not-a-real-binary-xyz"));
    }
}
