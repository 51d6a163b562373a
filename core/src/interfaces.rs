// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Enumeration
//!
//! Reads the host interfaces through `pnet::datalink`, drops loopback and
//! normalizes every address into an [`InterfaceAddress`].

use std::collections::{BTreeMap, HashMap};

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use netinfo_common::error::Result;
use netinfo_common::models::{AddressFamily, Interface, RawAddress, RawInterface};
use netinfo_common::system::InterfaceSource;
use netinfo_common::{debug, info};

/// [`InterfaceSource`] reading the live OS state through `pnet`.
pub struct PnetInterfaces;

impl InterfaceSource for PnetInterfaces {
    fn interfaces(&self) -> Result<Vec<RawInterface>> {
        Ok(datalink::interfaces().iter().map(to_raw).collect())
    }
}

/// Converts a `pnet` interface into the OS-neutral raw form.
///
/// `pnet` already splits address and prefix; the mask is turned back into
/// text so that every source goes through the same normalization.
pub fn to_raw(intf: &NetworkInterface) -> RawInterface {
    let addresses = intf
        .ips
        .iter()
        .map(|net| RawAddress {
            family: match net {
                IpNetwork::V4(_) => AddressFamily::Ip4,
                IpNetwork::V6(_) => AddressFamily::Ip6,
            },
            address: net.ip().to_string(),
            netmask: net.mask().to_string(),
        })
        .collect();

    RawInterface {
        name: intf.name.clone(),
        is_up: intf.is_up(),
        is_loopback: intf.is_loopback(),
        addresses,
    }
}

/// Every non-loopback interface, keyed by name.
pub fn list_interfaces(source: &dyn InterfaceSource) -> Result<BTreeMap<String, Interface>> {
    let raw: Vec<RawInterface> = source.interfaces()?;

    let interfaces_str: &str = match raw.len() {
        1 => "interface",
        _ => "interfaces",
    };
    info!(verbosity = 1, "Identified {} network {}", raw.len(), interfaces_str);

    let mut interfaces = BTreeMap::new();
    for intf in raw.iter().filter(|intf| !intf.is_loopback()) {
        let normalized = Interface::from_raw(intf)?;
        debug!(
            verbosity = 1,
            "{} is {} with {} IPv4 and {} IPv6 addresses",
            normalized.name,
            normalized.status,
            normalized.ip4.len(),
            normalized.ip6.len()
        );
        interfaces.insert(normalized.name.clone(), normalized);
    }

    Ok(interfaces)
}

/// Maps every `address_short` to the interface that owns it.
///
/// If two interfaces share an address, the one visited last wins.
pub fn ip_to_interface(interfaces: &BTreeMap<String, Interface>) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for (name, intf) in interfaces {
        for addr in intf.addresses() {
            if let Some(previous) = map.insert(addr.address_short.clone(), name.clone()) {
                debug!(
                    "Address {} is shared by {} and {}, keeping {}",
                    addr.address_short, previous, name, name
                );
            }
        }
    }

    map
}
