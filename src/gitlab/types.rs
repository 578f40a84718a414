// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab REST payloads and group search modes.

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use crate::git::GitRepository;

/// GitLab sends numeric ids; tests and older fixtures sometimes send strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(id) => id.to_string(),
        RawId::Text(id) => id,
    })
}

/// A GitLab group (or sub-group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabGroup {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Slash-joined chain of ancestor paths, e.g. `acme/platform/tools`.
    pub full_path: String,
}

/// A GitLab project as listed under a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabProject {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub name_with_namespace: String,
    pub path_with_namespace: String,
    pub ssh_url_to_repo: String,
    pub http_url_to_repo: String,
}

impl From<GitlabProject> for GitRepository {
    fn from(project: GitlabProject) -> Self {
        Self {
            name: project.name_with_namespace,
            path: project.path_with_namespace,
            clone_url_ssh: project.ssh_url_to_repo,
            clone_url_https: project.http_url_to_repo,
        }
    }
}

/// How the root group argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupSearchMode {
    /// Match the group name, ignoring case
    #[default]
    Name,
    /// Match the whole slash-delimited path, ignoring case
    FullPath,
    /// Fetch the group by its numeric id
    Id,
}

impl GroupSearchMode {
    /// Phrase used in log messages, e.g. "Looking for group named 'x'".
    #[must_use]
    pub const fn textual_qualifier(self) -> &'static str {
        match self {
            Self::Name => "named",
            Self::FullPath => "with full path",
            Self::Id => "identified by",
        }
    }

    /// Whether `group` is the one `search` designates in this mode.
    #[must_use]
    pub fn matches(self, group: &GitlabGroup, search: &str) -> bool {
        let field = match self {
            Self::Name => &group.name,
            Self::FullPath => &group.full_path,
            Self::Id => &group.id,
        };
        field.eq_ignore_ascii_case(search)
    }
}
