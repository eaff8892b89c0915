//! Asynchronous checker runs against a buffer snapshot.
//!
//! A [`CheckerSession`] owns at most one live checker process. Starting a new
//! check kills the previous process and bumps the session generation; a run
//! only reports back if its generation is still current when it finishes,
//! so output from superseded runs is dropped instead of being attached to a
//! buffer it no longer describes.
//!
//! Each run uses two helper threads: one writes the snapshot to the
//! checker's stdin and closes it, the other collects stdout and stderr,
//! reaps the process and delivers the [`CheckReport`].

use std::io::{self, Read, Write};
use std::mem;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::command::CheckerCommand;
use crate::diagnostic::{Diagnostic, diagnostics_for};
use crate::error::CheckerError;
use crate::launcher::{CheckerLauncher, SystemLauncher};

/// Tracing target for session lifecycle events.
const SESSION_TARGET: &str = "terrain_checker::session";

/// Interval between exit polls once the checker has closed its output.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of a completed, still-current check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Generation of the run that produced this report.
    pub generation: u64,
    /// Problems mapped onto the snapshot that was checked.
    pub diagnostics: Vec<Diagnostic>,
    /// Exit code of the checker, `None` when it was killed by a signal.
    pub exit_code: Option<i32>,
}

/// Identifies a started check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckHandle {
    /// Session generation assigned to the run.
    pub generation: u64,
    /// Process id of the checker.
    pub pid: u32,
}

#[derive(Debug, Default)]
enum CheckState {
    #[default]
    Idle,
    Running {
        generation: u64,
        child: Arc<Mutex<Child>>,
    },
}

#[derive(Debug, Default)]
struct Shared {
    generation: u64,
    state: CheckState,
}

/// Runs a configured checker over buffer snapshots, one at a time.
///
/// Dropping the session kills any check still in flight.
pub struct CheckerSession {
    command: CheckerCommand,
    launcher: Arc<dyn CheckerLauncher>,
    shared: Arc<Mutex<Shared>>,
}

impl std::fmt::Debug for CheckerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerSession")
            .field("command", &self.command)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

impl CheckerSession {
    /// Creates a session that spawns checkers as child processes.
    #[must_use]
    pub fn new(command: CheckerCommand) -> Self {
        Self::with_launcher(command, Arc::new(SystemLauncher))
    }

    /// Creates a session with a custom process launcher.
    #[must_use]
    pub fn with_launcher(command: CheckerCommand, launcher: Arc<dyn CheckerLauncher>) -> Self {
        Self {
            command,
            launcher,
            shared: Arc::default(),
        }
    }

    /// Returns the configured command.
    #[must_use]
    pub const fn command(&self) -> &CheckerCommand {
        &self.command
    }

    /// Returns the generation of the most recently started check.
    ///
    /// Zero until the first check starts.
    #[must_use]
    pub fn generation(&self) -> u64 {
        lock(&self.shared).generation
    }

    /// Reports whether a check is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(lock(&self.shared).state, CheckState::Running { .. })
    }

    /// Starts checking `buffer` and returns immediately.
    ///
    /// Any check already in flight is killed and its output discarded.
    /// `on_complete` runs on a helper thread once the checker exits, and
    /// only if no later check or [`cancel`](Self::cancel) has superseded
    /// this one. A non-zero exit is not an error: whatever the checker
    /// printed is parsed and reported.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::ExecutableNotFound`] when the program cannot
    /// be located, in which case nothing is launched and a running check is
    /// left alone. Returns [`CheckerError::SpawnFailed`] when the process
    /// cannot be started.
    pub fn run_check<F>(&self, buffer: &str, on_complete: F) -> Result<CheckHandle, CheckerError>
    where
        F: FnOnce(CheckReport) + Send + 'static,
    {
        let resolved = self.command.resolve()?;

        let mut shared = lock(&self.shared);
        stop(&mut shared.state);
        shared.generation = shared.generation.wrapping_add(1);
        let generation = shared.generation;

        let mut child = self.launcher.launch(&resolved)?;
        let pid = child.id();
        let pipes = (child.stdin.take(), child.stdout.take(), child.stderr.take());
        let (Some(stdin), Some(stdout), Some(stderr)) = pipes else {
            kill(&mut child, generation);
            return Err(CheckerError::spawn_failed(
                resolved.executable(),
                "checker process was started without piped stdio",
            ));
        };

        let child = Arc::new(Mutex::new(child));
        shared.state = CheckState::Running {
            generation,
            child: Arc::clone(&child),
        };
        drop(shared);

        debug!(
            target: SESSION_TARGET,
            generation,
            pid,
            bytes = buffer.len(),
            "started check"
        );

        let snapshot: Arc<str> = Arc::from(buffer);
        let input = Arc::clone(&snapshot);
        thread::spawn(move || feed_stdin(stdin, &input, generation));

        let watcher = Watcher {
            shared: Arc::clone(&self.shared),
            generation,
            child,
            snapshot,
            stdout,
            stderr,
        };
        thread::spawn(move || watcher.finish(on_complete));

        Ok(CheckHandle { generation, pid })
    }

    /// Checks `buffer` and waits for the result.
    ///
    /// Returns `None` when the run was superseded or cancelled from another
    /// thread before it finished.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`run_check`](Self::run_check).
    pub fn check(&self, buffer: &str) -> Result<Option<CheckReport>, CheckerError> {
        let (sender, receiver) = mpsc::channel();
        self.run_check(buffer, move |report| {
            if sender.send(report).is_err() {
                debug!(target: SESSION_TARGET, "check result receiver went away");
            }
        })?;
        Ok(receiver.recv().ok())
    }

    /// Kills the check in flight, if any, without reporting its output.
    pub fn cancel(&self) {
        stop(&mut lock(&self.shared).state);
    }
}

impl Drop for CheckerSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Carries a run's bookkeeping onto its watcher thread.
struct Watcher {
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    child: Arc<Mutex<Child>>,
    snapshot: Arc<str>,
    stdout: ChildStdout,
    stderr: ChildStderr,
}

impl Watcher {
    fn finish<F>(mut self, on_complete: F)
    where
        F: FnOnce(CheckReport),
    {
        let generation = self.generation;
        let mut stderr = self.stderr;
        let stderr_reader = thread::spawn(move || drain(&mut stderr));
        let mut output = drain(&mut self.stdout);
        match stderr_reader.join() {
            Ok(errors) => output.push_str(&errors),
            Err(_) => warn!(target: SESSION_TARGET, generation, "stderr reader panicked"),
        }
        let exit_code = wait(&self.child, generation);

        let mut shared = lock(&self.shared);
        let current = matches!(
            shared.state,
            CheckState::Running { generation: running, .. } if running == generation
        );
        if !current {
            drop(shared);
            debug!(
                target: SESSION_TARGET,
                generation, "discarding output of superseded check"
            );
            return;
        }
        shared.state = CheckState::Idle;
        drop(shared);

        let diagnostics = diagnostics_for(&output, &self.snapshot);
        debug!(
            target: SESSION_TARGET,
            generation,
            exit_code = ?exit_code,
            diagnostics = diagnostics.len(),
            "check finished"
        );
        on_complete(CheckReport {
            generation,
            diagnostics,
            exit_code,
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Kills the running check, leaving the state idle.
fn stop(state: &mut CheckState) {
    if let CheckState::Running { generation, child } = mem::take(state) {
        debug!(target: SESSION_TARGET, generation, "cancelling check");
        kill(&mut lock(&child), generation);
    }
}

fn kill(child: &mut Child, generation: u64) {
    if let Err(err) = child.kill() {
        debug!(
            target: SESSION_TARGET,
            generation,
            error = %err,
            "checker already exited"
        );
    }
}

fn feed_stdin(mut stdin: ChildStdin, snapshot: &str, generation: u64) {
    let written = stdin
        .write_all(snapshot.as_bytes())
        .and_then(|()| stdin.flush());
    match written {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!(
                target: SESSION_TARGET,
                generation, "checker closed stdin early"
            );
        }
        Err(err) => warn!(
            target: SESSION_TARGET,
            generation,
            error = %err,
            "failed to write buffer to checker"
        ),
    }
    drop(stdin);
}

/// Polls for exit so a concurrent kill never waits on this thread.
fn wait(child: &Mutex<Child>, generation: u64) -> Option<i32> {
    loop {
        let polled = lock(child).try_wait();
        match polled {
            Ok(Some(status)) => return status.code(),
            Ok(None) => thread::sleep(EXIT_POLL_INTERVAL),
            Err(err) => {
                warn!(
                    target: SESSION_TARGET,
                    generation,
                    error = %err,
                    "failed to wait for checker"
                );
                return None;
            }
        }
    }
}

fn drain(stream: &mut impl Read) -> String {
    let mut bytes = Vec::new();
    if let Err(err) = stream.read_to_end(&mut bytes) {
        warn!(target: SESSION_TARGET, error = %err, "failed to read checker output");
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
