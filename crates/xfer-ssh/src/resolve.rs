// SPDX-License-Identifier: MIT OR Apache-2.0
//! Executable resolution with override-then-discovery precedence.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use xfer_which::find_command;

use crate::command::ProcessDescriptor;
use crate::discovery::{Discovery, PlatformDiscovery};
use crate::error::{CommandError, ResolveError};
use crate::overrides::{EnvOverride, OverrideSource};
use crate::tool::Tool;

/// Determines which executable to run for a [`Tool`].
///
/// Holds no state besides its two collaborators; every call re-reads the
/// override and checks the filesystem again.
#[derive(Debug, Clone, Default)]
pub struct Resolver<O = EnvOverride, D = PlatformDiscovery> {
    overrides: O,
    discovery: D,
}

impl Resolver {
    /// Resolver reading `MUTAGEN_SSH_PATH` with the platform's discovery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: OverrideSource, D: Discovery> Resolver<O, D> {
    /// Resolver with explicit collaborators.
    pub fn with_parts(overrides: O, discovery: D) -> Self {
        Self {
            overrides,
            discovery,
        }
    }

    /// Resolve the executable for `tool`.
    ///
    /// A set override is authoritative: if its directory lacks the tool the
    /// call fails without consulting discovery.
    pub fn resolve(&self, tool: Tool) -> Result<PathBuf, ResolveError> {
        let name = tool.command_name();

        if let Some(search_path) = self.overrides.search_path() {
            return match find_command(name, [&search_path]) {
                Ok(path) => {
                    debug!(
                        target: "xfer_ssh.resolve",
                        %tool,
                        path = %path.display(),
                        "resolved from override search path"
                    );
                    Ok(path)
                }
                Err(source) => Err(ResolveError::Override {
                    tool,
                    search_path,
                    source,
                }),
            };
        }

        let path = self
            .discovery
            .find(name)
            .map_err(|source| ResolveError::Discovery { tool, source })?;
        debug!(
            target: "xfer_ssh.resolve",
            %tool,
            path = %path.display(),
            "resolved by platform discovery"
        );
        Ok(path)
    }

    /// Prepare, but do not start, an invocation of `tool`.
    ///
    /// `args` are kept verbatim and in order. When `cancel` is given, the
    /// spawned process is killed once the token fires.
    pub fn command<I, S>(
        &self,
        tool: Tool,
        cancel: Option<CancellationToken>,
        args: I,
    ) -> Result<ProcessDescriptor, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = self
            .resolve(tool)
            .map_err(|source| CommandError::Identify { tool, source })?;
        let args = args.into_iter().map(Into::into).collect();
        Ok(ProcessDescriptor::new(program, args, cancel))
    }
}
