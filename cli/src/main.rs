// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # netinfo CLI Entry Point
//!
//! Parses the command line, installs the logging subscriber, dispatches to
//! the subcommand and turns any error into a non-zero exit code.

mod commands;
mod terminal;

use std::process::ExitCode;

use netinfo_common::{config::Config, error};
use netinfo_core::info::NetworkInfoService;

use crate::commands::{CommandLine, Commands, gateways, interfaces, routes};
use crate::terminal::logging;

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = Config::from(&commands);

    logging::init_logging(&cfg);

    let service = NetworkInfoService::system(&cfg);

    let result = match &commands.command {
        Commands::Interfaces => interfaces::interfaces(&service, &cfg),
        Commands::Routes => routes::routes(&service, &cfg),
        Commands::Gateways => gateways::gateways(&service, &cfg),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    }
}
