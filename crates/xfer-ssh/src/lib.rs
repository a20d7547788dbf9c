// SPDX-License-Identifier: MIT OR Apache-2.0
//! xfer-ssh
//!
//! Locates the `ssh` and `scp` clients and prepares (but does not start)
//! cancellable invocations of them.
//!
//! Resolution honors the `MUTAGEN_SSH_PATH` search-path override first and
//! falls back to a platform [`Discovery`] strategy otherwise. An override that
//! does not contain the tool is a hard failure; discovery is not attempted.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod args;
mod command;
mod discovery;
mod error;
mod overrides;
mod resolve;
mod spawn;
mod tool;

pub use args::{compression_argument, timeout_argument};
pub use command::{ProcessDescriptor, scp_command, ssh_command};
pub use discovery::{Discovery, PlatformDiscovery, StandardDiscovery, default_locations};
pub use error::{CommandError, ResolveError, UnknownTool};
pub use overrides::{EnvOverride, FixedOverride, OverrideSource, SSH_PATH_ENV};
pub use resolve::Resolver;
pub use spawn::{CancellableChild, ExitOutcome};
pub use tool::Tool;

pub use tokio_util::sync::CancellationToken;
pub use xfer_which::NotFound;
