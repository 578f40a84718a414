// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for devex-rs.

use crate::config::Config;

/// Display the loaded configuration files followed by the effective options.
pub fn run_config_command(config_files: &[String], config: &Config) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
    println!();
    for line in config.format_options() {
        println!("{line}");
    }
}
