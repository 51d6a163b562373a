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

pub fn interfaces(service: &NetworkInfoService, cfg: &Config) -> anyhow::Result<()> {
    let interfaces = service
        .list_interfaces()
        .context("reading network interfaces")?;

    if cfg.json {
        return print::json(&interfaces);
    }

    print::header("network interfaces");
    if interfaces.is_empty() {
        print::print_status("No interfaces besides loopback");
    }
    for (idx, intf) in interfaces.values().enumerate() {
        network_fmt::print_interface(intf, idx);
        if idx + 1 != interfaces.len() {
            nprint!();
        }
    }
    print::divider();
    Ok(())
}
