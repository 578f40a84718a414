// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transport selection and credentials for clones.

use clap::ValueEnum;
use std::fmt;

use super::GitRepository;

/// Technical user presented with HTTPS tokens.
pub const HTTPS_USERNAME: &str = "git";

/// Transport chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CloneProtocolKind {
    /// Clone over SSH with public key authentication
    #[default]
    Ssh,
    /// Clone over HTTPS, authenticating with the API token when one is set
    Https,
}

impl fmt::Display for CloneProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => f.write_str("ssh"),
            Self::Https => f.write_str("https"),
        }
    }
}

/// Transport plus credentials, fixed for a whole run.
#[derive(Clone, PartialEq, Eq)]
pub enum CloneProtocol {
    Ssh,
    Https {
        username: String,
        password: Option<String>,
    },
}

impl CloneProtocol {
    /// Builds the protocol for `kind`; `token` is only used for HTTPS and
    /// ignored when blank.
    #[must_use]
    pub fn new(kind: CloneProtocolKind, token: Option<&str>) -> Self {
        match kind {
            CloneProtocolKind::Ssh => Self::Ssh,
            CloneProtocolKind::Https => Self::Https {
                username: HTTPS_USERNAME.to_string(),
                password: token
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CloneProtocolKind {
        match self {
            Self::Ssh => CloneProtocolKind::Ssh,
            Self::Https { .. } => CloneProtocolKind::Https,
        }
    }

    /// The endpoint of `repository` matching this transport.
    #[must_use]
    pub fn url_for<'r>(&self, repository: &'r GitRepository) -> &'r str {
        match self {
            Self::Ssh => &repository.clone_url_ssh,
            Self::Https { .. } => &repository.clone_url_https,
        }
    }
}

impl fmt::Debug for CloneProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => f.write_str("Ssh"),
            Self::Https { username, password } => f
                .debug_struct("Https")
                .field("username", username)
                .field("password", &password.as_ref().map(|_| "[hidden]"))
                .finish(),
        }
    }
}
