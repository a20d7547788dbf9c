// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for client resolution and command construction.

use std::path::PathBuf;

use thiserror::Error;
use xfer_which::NotFound;

use crate::overrides::SSH_PATH_ENV;
use crate::tool::Tool;

/// The executable for a tool could not be determined.
///
/// Not retryable: the installation or the override must change first.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The override directory does not contain the tool.
    #[error("'{tool}' not found in {} directory {}", SSH_PATH_ENV, .search_path.display())]
    Override {
        /// Tool being resolved.
        tool: Tool,
        /// Directory named by the override.
        search_path: PathBuf,
        /// Underlying lookup failure.
        #[source]
        source: NotFound,
    },

    /// Platform discovery did not find the tool in any standard location.
    #[error("'{tool}' not found in standard locations")]
    Discovery {
        /// Tool being resolved.
        tool: Tool,
        /// Underlying lookup failure.
        #[source]
        source: NotFound,
    },
}

impl ResolveError {
    /// Tool that failed to resolve.
    pub fn tool(&self) -> Tool {
        match self {
            Self::Override { tool, .. } | Self::Discovery { tool, .. } => *tool,
        }
    }

    /// The lookup failure underneath.
    pub fn not_found(&self) -> &NotFound {
        match self {
            Self::Override { source, .. } | Self::Discovery { source, .. } => source,
        }
    }

    /// What the user has to change before retrying.
    pub fn remediation(&self) -> String {
        match self {
            Self::Override {
                tool, search_path, ..
            } => format!(
                "place {tool} in {} or unset {SSH_PATH_ENV}",
                search_path.display()
            ),
            Self::Discovery { tool, .. } => {
                format!("install {tool} or set {SSH_PATH_ENV} to the directory containing it")
            }
        }
    }
}

/// A command could not be prepared.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The tool's executable could not be resolved.
    #[error("unable to identify '{tool}' command")]
    Identify {
        /// Tool being prepared.
        tool: Tool,
        /// Resolution failure.
        #[source]
        source: ResolveError,
    },
}

impl CommandError {
    /// Tool whose command failed to build.
    pub fn tool(&self) -> Tool {
        match self {
            Self::Identify { tool, .. } => *tool,
        }
    }

    /// The resolution failure underneath.
    pub fn resolve_error(&self) -> &ResolveError {
        match self {
            Self::Identify { source, .. } => source,
        }
    }

    /// See [`ResolveError::remediation`].
    pub fn remediation(&self) -> String {
        self.resolve_error().remediation()
    }
}

/// A tool name that is neither `ssh` nor `scp`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool '{0}' (expected 'ssh' or 'scp')")]
pub struct UnknownTool(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn not_found(name: &str) -> NotFound {
        NotFound {
            name: name.into(),
            searched: vec![PathBuf::from("/nowhere")],
        }
    }

    #[test]
    fn override_error_names_variable_and_dir() {
        let err = ResolveError::Override {
            tool: Tool::Ssh,
            search_path: PathBuf::from("/opt/ssh"),
            source: not_found("ssh"),
        };
        let msg = err.to_string();
        assert!(msg.contains("MUTAGEN_SSH_PATH"), "{msg}");
        assert!(msg.contains("/opt/ssh"), "{msg}");
        assert!(err.remediation().contains("unset MUTAGEN_SSH_PATH"));
    }

    #[test]
    fn discovery_error_suggests_install() {
        let err = ResolveError::Discovery {
            tool: Tool::Scp,
            source: not_found("scp"),
        };
        assert_eq!(err.tool(), Tool::Scp);
        assert_eq!(err.not_found().name, "scp");
        assert!(err.remediation().starts_with("install scp"));
    }

    #[test]
    fn command_error_wraps_with_tool_context() {
        let err = CommandError::Identify {
            tool: Tool::Ssh,
            source: ResolveError::Discovery {
                tool: Tool::Ssh,
                source: not_found("ssh"),
            },
        };
        assert_eq!(err.to_string(), "unable to identify 'ssh' command");
        let source = err.source().expect("resolve error source");
        assert!(source.to_string().contains("standard locations"));
        assert!(source.source().is_some(), "NotFound should be chained");
    }
}
