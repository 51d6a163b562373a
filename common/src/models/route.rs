// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Route Model
//!
//! [`KernelRoute`] is a decoded routing-table entry. [`Route`] is the
//! classified view handed to callers.

use std::net::IpAddr;

use serde::Serialize;

use crate::models::AddressFamily;

/// Kernel routing table ids (`RT_TABLE_*`).
pub const RT_TABLE_UNSPEC: u32 = 0;
pub const RT_TABLE_DEFAULT: u32 = 253;
pub const RT_TABLE_MAIN: u32 = 254;
pub const RT_TABLE_LOCAL: u32 = 255;

/// The kernel's `rtm_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Unicast,
    Local,
    Broadcast,
    Multicast,
    Blackhole,
    Unreachable,
    Prohibit,
    Other(u8),
}

impl From<u8> for RouteKind {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Unicast,
            2 => Self::Local,
            3 => Self::Broadcast,
            5 => Self::Multicast,
            6 => Self::Blackhole,
            7 => Self::Unreachable,
            8 => Self::Prohibit,
            other => Self::Other(other),
        }
    }
}

impl RouteKind {
    /// Types the kernel answers with an error instead of forwarding.
    ///
    /// IPv6 attaches these to `lo`, so an egress interface alone does not
    /// make a route usable.
    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Blackhole | Self::Unreachable | Self::Prohibit)
    }
}

/// One entry of a kernel route dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelRoute {
    pub family: AddressFamily,
    pub table: u32,
    pub kind: RouteKind,
    pub dst_len: u8,
    pub dst: Option<IpAddr>,
    pub gateway: Option<IpAddr>,
    /// Egress interface index.
    pub oif: Option<u32>,
    pub prefsrc: Option<IpAddr>,
    pub priority: Option<u32>,
}

impl KernelRoute {
    pub fn new(family: AddressFamily) -> Self {
        Self {
            family,
            table: RT_TABLE_MAIN,
            kind: RouteKind::Unicast,
            dst_len: 0,
            dst: None,
            gateway: None,
            oif: None,
            prefsrc: None,
            priority: None,
        }
    }

    /// `dst/len`, or the family's catch-all route when no destination is set.
    pub fn destination(&self) -> String {
        match self.dst {
            Some(dst) => format!("{}/{}", dst, self.dst_len),
            None => self.family.default_route().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub family: AddressFamily,
    pub destination: String,
    pub interface: Option<String>,
    pub src: Option<String>,
    pub metric: Option<u32>,
    pub reachable: bool,
}

impl Route {
    pub fn reachable(
        family: AddressFamily,
        destination: String,
        interface: Option<String>,
        src: Option<IpAddr>,
        metric: Option<u32>,
    ) -> Self {
        Self {
            family,
            destination,
            interface,
            src: src.map(|ip| ip.to_string()),
            metric,
            reachable: true,
        }
    }

    /// Blackhole, unreachable and prohibit routes carry nothing but a destination.
    pub fn unreachable(family: AddressFamily, destination: String) -> Self {
        Self {
            family,
            destination,
            interface: None,
            src: None,
            metric: None,
            reachable: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    pub routes: Vec<Route>,
}
