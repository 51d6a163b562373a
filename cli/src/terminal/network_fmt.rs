// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::IpAddr;

use colored::*;
use netinfo_common::models::{AddressFamily, Interface, InterfaceAddress, LinkStatus, Route};

use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

/// Short label for an IPv6 address: global, unique-local or link-local.
fn ipv6_label(addr: &InterfaceAddress) -> &'static str {
    match addr.ip() {
        Some(IpAddr::V6(v6)) if (0x20..=0x3F).contains(&v6.octets()[0]) => "GUA",
        Some(IpAddr::V6(v6)) if v6.is_unique_local() => "ULA",
        Some(IpAddr::V6(v6)) if v6.is_unicast_link_local() => "LLA",
        _ => "IPv6",
    }
}

fn address_detail(addr: &InterfaceAddress, family: AddressFamily) -> Detail {
    let (addr_color, prefix_color, key) = match family {
        AddressFamily::Ip4 => (colors::IPV4_ADDR, colors::IPV4_PREFIX, "IPv4"),
        AddressFamily::Ip6 => (colors::IPV6_ADDR, colors::IPV6_PREFIX, ipv6_label(addr)),
    };
    let value: ColoredString = format!(
        "{}/{} {}",
        addr.address_short.color(addr_color),
        addr.prefix_length.to_string().color(prefix_color),
        format!("(net {})", addr.network).color(colors::SEPARATOR)
    )
    .normal();
    (key.to_string(), value)
}

pub fn print_interface(interface: &Interface, idx: usize) {
    let status: ColoredString = match interface.status {
        LinkStatus::Up => "UP".color(colors::STATUS_UP).bold(),
        LinkStatus::Down => "DOWN".color(colors::STATUS_DOWN).bold(),
    };
    print::tree_head(idx, interface.name.color(colors::PRIMARY), status);

    let mut details: Vec<Detail> = Vec::new();
    details.extend(interface.ip4.iter().map(|a| address_detail(a, AddressFamily::Ip4)));
    details.extend(interface.ip6.iter().map(|a| address_detail(a, AddressFamily::Ip6)));
    if details.is_empty() {
        details.push(("Address".to_string(), "none".color(colors::SEPARATOR)));
    }
    print::as_tree(details);
}

pub fn print_route(route: &Route, idx: usize) {
    let dest_color = match route.family {
        AddressFamily::Ip4 => colors::IPV4_ADDR,
        AddressFamily::Ip6 => colors::IPV6_ADDR,
    };
    let suffix: ColoredString = if route.reachable {
        format!("({})", route.family).color(colors::SEPARATOR)
    } else {
        "unreachable".color(colors::UNREACHABLE).bold()
    };
    print::tree_head(idx, route.destination.color(dest_color), suffix);

    if !route.reachable {
        return;
    }

    let unknown = || "unknown".color(colors::SEPARATOR);
    let details: Vec<Detail> = vec![
        (
            "Interface".to_string(),
            route
                .interface
                .as_deref()
                .map_or_else(unknown, |name| name.color(colors::SECONDARY)),
        ),
        (
            "Source".to_string(),
            route
                .src
                .as_deref()
                .map_or_else(unknown, |src| src.color(colors::TEXT_DEFAULT)),
        ),
        (
            "Metric".to_string(),
            route
                .metric
                .map_or_else(unknown, |m| m.to_string().color(colors::TEXT_DEFAULT)),
        ),
    ];
    print::as_tree(details);
}
