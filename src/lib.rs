// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        gitlab / github / terraform
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, overrides    |
//!              '--+--------+---------+-----'
//!                 |        |         |
//!                 v        v         v
//!              gitlab   github   terraform
//!                 |        |         |
//!                 +---+----+         |
//!                     v              |
//!                    api             |
//!             paginate / retry       |
//!                     |              |
//!                     v              |
//!                    git             |
//!            replication engine      |
//!                     |              |
//!   +-----------------+--------------+----------+
//!   |  core   process (spawn, capture, timeout) |
//!   +-------------------------------------------+
//!   |  foundation   error, logging              |
//!   +-------------------------------------------+
//! ```

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod github;
pub mod gitlab;
pub mod logging;
pub mod terraform;
