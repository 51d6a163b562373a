// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

/// What to do when a route's source address cannot be tied to an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Abort the listing with [`NetError::InconsistentState`](crate::error::NetError).
    #[default]
    Fail,
    /// Keep the route and leave its interface unset.
    Unknown,
}

/// Runtime options for a single invocation.
///
/// Built from the command line; library callers can use `Config::default()`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Emit JSON on stdout instead of the colored tree.
    pub json: bool,

    /// Disable ANSI colors, even on a terminal.
    pub no_color: bool,

    /// How the route classifier treats sources no interface owns.
    pub unresolved: UnresolvedPolicy,

    /// Logging detail, mapped from `-v`.
    ///
    /// # Levels
    /// * **0** (Default): info and above.
    /// * **1**: per-interface and per-route decisions.
    /// * **2**: raw netlink traffic summaries.
    pub verbosity: u8,
}
