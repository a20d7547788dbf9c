// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identity of the external transfer clients.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownTool;

/// One of the two external clients this crate knows how to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// The secure-shell client.
    Ssh,
    /// The secure-copy client.
    Scp,
}

impl Tool {
    /// Every supported tool.
    pub const ALL: [Tool; 2] = [Tool::Ssh, Tool::Scp];

    /// Canonical executable name, without any platform extension.
    #[must_use]
    pub const fn command_name(self) -> &'static str {
        match self {
            Tool::Ssh => "ssh",
            Tool::Scp => "scp",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.command_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_canonical() {
        assert_eq!(Tool::Ssh.command_name(), "ssh");
        assert_eq!(Tool::Scp.command_name(), "scp");
    }

    #[test]
    fn display_matches_command_name() {
        for tool in Tool::ALL {
            assert_eq!(tool.to_string(), tool.command_name());
        }
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!("ssh".parse::<Tool>().unwrap(), Tool::Ssh);
        assert_eq!("SCP".parse::<Tool>().unwrap(), Tool::Scp);
        assert_eq!(" ssh ".parse::<Tool>().unwrap(), Tool::Ssh);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "rsync".parse::<Tool>().unwrap_err();
        assert_eq!(err, UnknownTool("rsync".into()));
        assert!(err.to_string().contains("rsync"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Tool::Scp).unwrap(), "\"scp\"");
        let back: Tool = serde_json::from_str("\"ssh\"").unwrap();
        assert_eq!(back, Tool::Ssh);
    }
}
