// SPDX-License-Identifier: MIT OR Apache-2.0
//! Starting descriptors and honoring their cancellation binding.

use std::io;
use std::process::ExitStatus;

use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::command::ProcessDescriptor;

/// How a [`CancellableChild`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The process exited on its own.
    Exited(ExitStatus),
    /// The cancellation token fired and the process was killed.
    Cancelled,
}

impl ExitOutcome {
    /// Exit code, when the process exited normally.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Exited(status) => status.code(),
            Self::Cancelled => None,
        }
    }

    /// Returns `true` if the process was killed by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl ProcessDescriptor {
    /// Build a [`Command`] for this descriptor.
    ///
    /// Commands carrying a cancellation binding are also killed on drop.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if self.cancellation.is_some() {
            cmd.kill_on_drop(true);
        }
        cmd
    }

    /// Start the process with inherited stdio.
    pub fn spawn(self) -> io::Result<CancellableChild> {
        self.spawn_with(|_| {})
    }

    /// Start the process after letting `configure` adjust the command
    /// (stdio, environment, working directory).
    pub fn spawn_with(self, configure: impl FnOnce(&mut Command)) -> io::Result<CancellableChild> {
        let mut cmd = self.command();
        configure(&mut cmd);
        let child = cmd.spawn()?;
        debug!(
            target: "xfer_ssh.spawn",
            program = %self.program.display(),
            pid = ?child.id(),
            cancellable = self.cancellation.is_some(),
            "spawned"
        );
        Ok(CancellableChild {
            child,
            cancellation: self.cancellation,
        })
    }
}

/// A started process paired with its optional cancellation token.
#[derive(Debug)]
pub struct CancellableChild {
    child: Child,
    cancellation: Option<CancellationToken>,
}

impl CancellableChild {
    /// OS process id, while the process is running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// The underlying child, for taking stdio handles.
    pub fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    /// Wait for the process to exit, killing it if the token fires first.
    pub async fn wait(&mut self) -> io::Result<ExitOutcome> {
        let Some(token) = self.cancellation.clone() else {
            return self.child.wait().await.map(ExitOutcome::Exited);
        };

        tokio::select! {
            status = self.child.wait() => return status.map(ExitOutcome::Exited),
            () = token.cancelled() => {}
        }

        debug!(target: "xfer_ssh.spawn", pid = ?self.child.id(), "cancelled; killing");
        if let Err(err) = self.child.kill().await {
            warn!(target: "xfer_ssh.spawn", "failed to kill cancelled process: {err}");
        }
        Ok(ExitOutcome::Cancelled)
    }

    /// Consume the wrapper and return the raw child.
    pub fn into_inner(self) -> Child {
        self.child
    }
}
