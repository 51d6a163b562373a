// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! The argument schema lives here; each subcommand's execution lives in its
//! own submodule. `From<&CommandLine> for Config` keeps the library unaware
//! of clap.

pub mod gateways;
pub mod interfaces;
pub mod routes;

use clap::{ArgAction, Parser, Subcommand};
use netinfo_common::config::{Config, UnresolvedPolicy};

#[derive(Parser)]
#[command(name = "netinfo")]
#[command(about = "Report host network interfaces and routing tables.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print JSON instead of the tree view
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Keep routes whose source no interface owns instead of failing
    #[arg(long = "lenient", global = true)]
    pub lenient: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Increase logging detail (-v: decisions, -vv: netlink traffic)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List non-loopback interfaces with their addresses
    #[command(alias = "i")]
    Interfaces,

    /// List routes of the main routing table
    #[command(alias = "r")]
    Routes,

    /// List gateways (not implemented, always empty)
    #[command(alias = "g")]
    Gateways,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            json: cmd.json,
            no_color: cmd.no_color,
            unresolved: if cmd.lenient {
                UnresolvedPolicy::Unknown
            } else {
                UnresolvedPolicy::Fail
            },
            verbosity: cmd.verbosity,
        }
    }
}
