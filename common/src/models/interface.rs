// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Model
//!
//! [`RawInterface`] is what the OS hands us, with addresses and netmasks still
//! in text form. [`Interface`] is the normalized report built from it.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::{Ipv4Network, Ipv6Network};
use serde::Serialize;

use crate::error::{NetError, Result};
use crate::models::AddressFamily;
use crate::netmask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkStatus {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl LinkStatus {
    pub fn from_flag(is_up: bool) -> Self {
        if is_up { Self::Up } else { Self::Down }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}

/// An address exactly as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAddress {
    pub family: AddressFamily,
    /// May carry a `%zone` suffix for link-local IPv6.
    pub address: String,
    /// Dotted quad for IPv4, colon-separated hextets for IPv6.
    pub netmask: String,
}

/// An interface exactly as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInterface {
    pub name: String,
    pub is_up: bool,
    pub is_loopback: bool,
    pub addresses: Vec<RawAddress>,
}

impl RawInterface {
    pub fn is_loopback(&self) -> bool {
        self.is_loopback || self.name == "lo"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceAddress {
    /// `ip/prefix`
    pub address: String,
    /// The bare ip, zone index removed.
    pub address_short: String,
    /// Dotted quad for IPv4, the prefix length for IPv6.
    pub netmask: String,
    /// The full IPv6 netmask as reported by the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask_expanded: Option<String>,
    /// The network the address lives in, in CIDR notation.
    pub network: String,
    pub prefix_length: u8,
}

impl InterfaceAddress {
    /// Normalizes an OS-reported `(address, netmask)` pair.
    pub fn from_raw(raw: &RawAddress) -> Result<Self> {
        let address: &str = netmask::strip_zone(raw.address.trim());

        match raw.family {
            AddressFamily::Ip4 => {
                let ip: Ipv4Addr = address
                    .parse()
                    .map_err(|_| NetError::InvalidAddress(raw.address.clone()))?;
                let prefix: u8 = netmask::ipv4_prefix_len(&raw.netmask)?;
                let network = Ipv4Network::new(ip, prefix)
                    .map_err(|_| NetError::unsupported_netmask(&raw.netmask, "prefix out of range"))?;

                Ok(Self {
                    address: format!("{ip}/{prefix}"),
                    address_short: ip.to_string(),
                    netmask: raw.netmask.trim().to_string(),
                    netmask_expanded: None,
                    network: format!("{}/{}", network.network(), prefix),
                    prefix_length: prefix,
                })
            }
            AddressFamily::Ip6 => {
                let ip: Ipv6Addr = address
                    .parse()
                    .map_err(|_| NetError::InvalidAddress(raw.address.clone()))?;
                let prefix: u8 = netmask::ipv6_prefix_len(&raw.netmask)?;
                let network = Ipv6Network::new(ip, prefix)
                    .map_err(|_| NetError::unsupported_netmask(&raw.netmask, "prefix out of range"))?;

                Ok(Self {
                    address: format!("{ip}/{prefix}"),
                    address_short: ip.to_string(),
                    netmask: prefix.to_string(),
                    netmask_expanded: Some(raw.netmask.trim().to_string()),
                    network: format!("{}/{}", network.network(), prefix),
                    prefix_length: prefix,
                })
            }
        }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.address_short.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Already the key of the surrounding map when serialized.
    #[serde(skip)]
    pub name: String,
    pub status: LinkStatus,
    pub ip4: Vec<InterfaceAddress>,
    pub ip6: Vec<InterfaceAddress>,
}

impl Interface {
    /// Builds the normalized interface, keeping the OS order within each family.
    pub fn from_raw(raw: &RawInterface) -> Result<Self> {
        let normalize = |family: AddressFamily| -> Result<Vec<InterfaceAddress>> {
            raw.addresses
                .iter()
                .filter(|addr| addr.family == family)
                .map(InterfaceAddress::from_raw)
                .collect()
        };

        Ok(Self {
            name: raw.name.clone(),
            status: LinkStatus::from_flag(raw.is_up),
            ip4: normalize(AddressFamily::Ip4)?,
            ip6: normalize(AddressFamily::Ip6)?,
        })
    }

    pub fn addresses(&self) -> impl Iterator<Item = &InterfaceAddress> {
        self.ip4.iter().chain(self.ip6.iter())
    }
}
