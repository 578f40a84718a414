// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab server version, as reported by `/version`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Server version and build revision, e.g. `13.5.2-ee` at `a1b2c3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabVersion {
    pub version: String,
    #[serde(default)]
    pub revision: String,
}

impl GitlabVersion {
    #[must_use]
    pub fn new(version: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            revision: revision.into(),
        }
    }

    /// True iff this version is strictly lower than `bound`.
    ///
    /// Suffixes after the first `-` are ignored, missing components count as
    /// zero and non-numeric components parse as zero.
    #[must_use]
    pub fn is_before(&self, bound: &str) -> bool {
        compare_versions(&self.version, bound) == Ordering::Less
    }
}

impl fmt::Display for GitlabVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{} at rev {}", self.version, self.revision)
    }
}

fn components(text: &str) -> Vec<u64> {
    let main = text.split('-').next().unwrap_or_default();
    main.split('.')
        .map(|part| part.trim().parse::<u64>().unwrap_or(0))
        .collect()
}

fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = components(left);
    let right = components(right);
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
