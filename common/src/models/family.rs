// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

/// The two address families reported on. Serialized as `ip4` / `ip6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    #[serde(rename = "ip4")]
    Ip4,
    #[serde(rename = "ip6")]
    Ip6,
}

impl AddressFamily {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::Ip4,
            IpAddr::V6(_) => Self::Ip6,
        }
    }

    /// The catch-all route of this family.
    pub fn default_route(&self) -> &'static str {
        match self {
            Self::Ip4 => "0.0.0.0/0",
            Self::Ip6 => "::/0",
        }
    }

    pub fn unspecified(&self) -> IpAddr {
        match self {
            Self::Ip4 => IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
            Self::Ip6 => IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip4 => write!(f, "ip4"),
            Self::Ip6 => write!(f, "ip6"),
        }
    }
}
