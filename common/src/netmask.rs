// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Netmask Arithmetic
//!
//! Converts the netmask text reported by the OS into a CIDR prefix length.
//!
//! Only contiguous masks (a run of one-bits followed by zero-bits) have a
//! prefix length. Anything else is rejected with
//! [`NetError::UnsupportedNetmask`] instead of being silently undercounted.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{NetError, Result};

/// The 17 hextet values a contiguous IPv6 mask can contain.
/// The index of a pattern is its number of leading one-bits.
const HEXTET_PATTERNS: [u16; 17] = [
    0x0000, 0x8000, 0xc000, 0xe000, 0xf000, 0xf800, 0xfc00, 0xfe00, 0xff00, 0xff80, 0xffc0,
    0xffe0, 0xfff0, 0xfff8, 0xfffc, 0xfffe, 0xffff,
];

/// Returns the prefix length of a dotted-quad netmask, e.g. `255.255.255.0` -> 24.
pub fn ipv4_prefix_len(netmask: &str) -> Result<u8> {
    let mask: Ipv4Addr = netmask
        .trim()
        .parse()
        .map_err(|_| NetError::unsupported_netmask(netmask, "not a dotted-quad netmask"))?;

    let bits: u32 = mask.into();
    let ones: u32 = bits.leading_ones();
    if bits.count_ones() != ones {
        return Err(NetError::unsupported_netmask(netmask, "one-bits are not contiguous"));
    }

    Ok(ones as u8)
}

/// Returns the prefix length of an IPv6 netmask, e.g. `ffff:ffff:ffff:ffff::` -> 64.
///
/// Counting walks hextet by hextet and stops at the first one that is not
/// fully set. Every hextet after that point must be zero.
pub fn ipv6_prefix_len(netmask: &str) -> Result<u8> {
    let mask: Ipv6Addr = netmask
        .trim()
        .parse()
        .map_err(|_| NetError::unsupported_netmask(netmask, "not an IPv6 netmask"))?;

    let segments: [u16; 8] = mask.segments();
    let mut hextets = segments.iter();
    let mut count: usize = 0;

    for &hextet in hextets.by_ref() {
        if hextet == 0 {
            break;
        }
        let ones: usize = HEXTET_PATTERNS
            .iter()
            .position(|&pattern| pattern == hextet)
            .ok_or_else(|| {
                NetError::unsupported_netmask(
                    netmask,
                    format!("hextet {hextet:04x} is not a contiguous mask"),
                )
            })?;
        count += ones;
        if ones < 16 {
            break;
        }
    }

    if hextets.any(|&hextet| hextet != 0) {
        return Err(NetError::unsupported_netmask(
            netmask,
            "one-bits follow a zero-bit",
        ));
    }

    Ok(count as u8)
}

/// Removes an IPv6 zone index, e.g. `fe80::1%eth0` -> `fe80::1`.
pub fn strip_zone(address: &str) -> &str {
    address.split('%').next().unwrap_or(address)
}
