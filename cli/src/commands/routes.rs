// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use netinfo_common::config::Config;
use netinfo_core::info::NetworkInfoService;

use crate::nprint;
use crate::terminal::{network_fmt, print};

pub fn routes(service: &NetworkInfoService, cfg: &Config) -> anyhow::Result<()> {
    let report = service.list_routes().context("reading the routing table")?;

    if cfg.json {
        return print::json(&report);
    }

    print::header("main routing table");
    if report.routes.is_empty() {
        print::print_status("No routes in the main table");
    }
    for (idx, route) in report.routes.iter().enumerate() {
        network_fmt::print_route(route, idx);
        if idx + 1 != report.routes.len() {
            nprint!();
        }
    }
    print::divider();
    Ok(())
}
