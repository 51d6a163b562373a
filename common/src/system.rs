// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::IpAddr;

use crate::error::Result;
use crate::models::{KernelRoute, RawInterface};

/// Access to the interface list of the operating system.
pub trait InterfaceSource {
    /// Every interface the OS knows about, loopback included.
    fn interfaces(&self) -> Result<Vec<RawInterface>>;
}

/// Access to the kernel routing tables.
///
/// Implementations hold a kernel handle for their own lifetime only; callers
/// create one per listing and drop it afterwards.
pub trait RouteSource {
    /// Every route of every table, in kernel order.
    fn dump_routes(&mut self) -> Result<Vec<KernelRoute>>;

    /// Asks the kernel which source address it would use to reach `dst`,
    /// optionally pinned to the egress interface `oif`.
    fn lookup_source(&mut self, dst: IpAddr, oif: Option<u32>) -> Result<Option<IpAddr>>;
}
