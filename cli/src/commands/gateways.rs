// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use netinfo_common::config::Config;
use netinfo_core::info::NetworkInfoService;

use crate::terminal::print;

pub fn gateways(service: &NetworkInfoService, cfg: &Config) -> anyhow::Result<()> {
    let gateways = service.list_gateways();

    if cfg.json {
        return print::json(&gateways);
    }

    print::header("gateways");
    if gateways.is_empty() {
        print::print_status("Gateway detection is not available");
    }
    for gateway in &gateways {
        print::print_status(gateway);
    }
    print::divider();
    Ok(())
}
