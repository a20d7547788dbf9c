// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command implementations for the `xfer` CLI.
//!
//! Kept free of argument parsing so they can be tested without spawning the
//! binary.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus};
use tracing::debug;
use xfer_config::XferConfig;
use xfer_ssh::{
    CancellationToken, CommandError, Discovery, EnvOverride, ExitOutcome, FixedOverride,
    OverrideSource, PlatformDiscovery, ProcessDescriptor, ResolveError, Resolver, Tool,
};

/// Exit code reported when Ctrl-C cancels the child.
pub const CANCELLED_EXIT_CODE: u8 = 130;

/// Resolver used by the CLI.
pub type CliResolver = Resolver<Box<dyn OverrideSource>, PlatformDiscovery>;

/// Build the resolver, honoring `--search-path` over `MUTAGEN_SSH_PATH`.
pub fn resolver(search_path: Option<PathBuf>) -> CliResolver {
    let overrides: Box<dyn OverrideSource> = match search_path {
        Some(dir) => Box::new(FixedOverride::new(dir)),
        None => Box::new(EnvOverride),
    };
    Resolver::with_parts(overrides, PlatformDiscovery::default())
}

/// Resolve and return the executable for `tool`.
pub fn locate<O: OverrideSource, D: Discovery>(
    resolver: &Resolver<O, D>,
    tool: Tool,
) -> Result<PathBuf> {
    resolver
        .resolve(tool)
        .with_context(|| format!("unable to identify '{tool}' command"))
}

/// Prepare an invocation with the config's transport flags ahead of `extra`.
pub fn prepare<O: OverrideSource, D: Discovery>(
    resolver: &Resolver<O, D>,
    tool: Tool,
    config: &XferConfig,
    extra: Vec<String>,
    cancel: Option<CancellationToken>,
) -> Result<ProcessDescriptor, CommandError> {
    let mut args = config.transport_args();
    args.extend(extra);
    resolver.command(tool, cancel, args)
}

/// Render a descriptor for `--dry-run`.
pub fn render_dry_run(tool: Tool, descriptor: &ProcessDescriptor, json: bool) -> Result<String> {
    if json {
        let value = serde_json::json!({
            "tool": tool,
            "program": descriptor.program().display().to_string(),
            "args": descriptor.args(),
        });
        return serde_json::to_string_pretty(&value).context("serialize dry run");
    }

    let mut line = descriptor.program().display().to_string();
    for arg in descriptor.args() {
        line.push(' ');
        line.push_str(arg);
    }
    Ok(line)
}

/// Start the descriptor, cancel it on Ctrl-C, and map the outcome to an
/// exit code.
pub async fn run(descriptor: ProcessDescriptor) -> Result<ExitCode> {
    let program = descriptor.program().display().to_string();
    let token = descriptor.cancellation().cloned().unwrap_or_default();
    let mut child = descriptor
        .spawn()
        .with_context(|| format!("failed to start '{program}'"))?;

    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!(target: "xfer", "interrupt received");
            token.cancel();
        }
    });

    let outcome = child
        .wait()
        .await
        .with_context(|| format!("failed to wait for '{program}'"));
    ctrl_c.abort();

    Ok(match outcome? {
        ExitOutcome::Cancelled => ExitCode::from(CANCELLED_EXIT_CODE),
        ExitOutcome::Exited(status) => ExitCode::from(exit_code(status)),
    })
}

/// Exit code to report for a child that exited on its own.
///
/// On Unix a child killed by signal N reports 128+N, as a shell would.
/// Anything that does not fit in a `u8` becomes 1.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(1);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(1);
        }
    }
    1
}

/// Remediation hint for a resolution failure anywhere in `err`'s chain.
pub fn hint(err: &anyhow::Error) -> Option<String> {
    err.chain()
        .find_map(|e| e.downcast_ref::<ResolveError>())
        .map(ResolveError::remediation)
}
