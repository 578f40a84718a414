// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! This is the single gateway through which `git` and `terraform` are run.
//!
//! ```text
//! ProcessBuilder::which("git")
//!   .args() .cwd() .env() .capture_stdout()
//!   .run()
//!       --> tokio::process::Command (kill_on_drop)
//!           stream stdout/stderr line by line
//!       --> ProcessOutput { exit_code, stdout, stderr }
//!       --> ProcessError  { SpawnFailed | NonZeroExit | Timeout | .. }
//! ```

pub mod builder;
mod io;
mod runner;

pub use builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
