use crate::executor::{FrequencyApplier, FrequencyRequest, RunResult, ValidationError};
use fs4::fs_std::FileExt;
use std::any::Any;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use thiserror::Error;

pub const LOCK_FILE_NAME: &str = "freqset.lock";

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A frequency change is already in progress")]
    AlreadyRunning,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// Allows at most one run against the power scheme at a time, across
/// processes: the permit is an exclusive lock on a shared lock file.
#[derive(Debug, Clone)]
pub struct RunGuard {
    lock_path: PathBuf,
}

impl RunGuard {
    pub fn new(lock_path: impl Into<PathBuf>) -> Self {
        Self {
            lock_path: lock_path.into(),
        }
    }

    /// Guard shared by every freqset process on this machine
    pub fn system() -> Self {
        Self::new(std::env::temp_dir().join(LOCK_FILE_NAME))
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    pub fn try_acquire(&self) -> Result<RunPermit, RunError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| {
                RunError::Unexpected(format!(
                    "failed to open lock file {}: {}",
                    self.lock_path.display(),
                    e
                ))
            })?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(true) => {
                log::debug!("Acquired run lock {}", self.lock_path.display());
                Ok(RunPermit { file })
            }
            Ok(false) => Err(RunError::AlreadyRunning),
            Err(e) => Err(RunError::Unexpected(format!(
                "failed to lock {}: {}",
                self.lock_path.display(),
                e
            ))),
        }
    }
}

/// Held for the lifetime of a run; released on drop, panics included
#[derive(Debug)]
pub struct RunPermit {
    file: File,
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        // Closing the file releases the lock too; unlock eagerly anyway
        let _ = FileExt::unlock(&self.file);
    }
}

/// A run executing on its own worker thread
pub struct RunHandle {
    progress: Receiver<String>,
    handle: JoinHandle<RunResult>,
}

impl RunHandle {
    /// Progress lines in emission order. Iteration blocks until the next line
    /// arrives and ends once the worker is done.
    pub fn progress(&self) -> impl Iterator<Item = String> + '_ {
        self.progress.iter()
    }

    pub fn join(self) -> Result<RunResult, RunError> {
        self.handle
            .join()
            .map_err(|payload| RunError::Unexpected(panic_message(payload.as_ref())))
    }
}

/// Validate `input` and start a run in the background. Fails without running
/// anything when the input is rejected or another run holds the guard.
pub fn spawn_run(
    applier: FrequencyApplier,
    input: &str,
    guard: &RunGuard,
) -> Result<RunHandle, RunError> {
    let request = FrequencyRequest::parse(input)?;
    let permit = guard.try_acquire()?;
    let (tx, rx) = mpsc::channel();

    let handle = thread::Builder::new()
        .name("freqset-worker".to_string())
        .spawn(move || {
            let _permit = permit;
            applier.run(request, &mut |line: &str| {
                // Receiver gone means nobody is rendering; keep running anyway
                let _ = tx.send(line.to_string());
            })
        })
        .map_err(|e| RunError::Unexpected(format!("failed to start worker thread: {}", e)))?;

    Ok(RunHandle {
        progress: rx,
        handle,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker thread panicked".to_string()
    }
}
