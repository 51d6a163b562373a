// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Error Taxonomy
//!
//! Every fallible operation in the library returns [`NetError`]. Nothing is
//! retried; the first failure is surfaced to the caller as-is.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Debug, Error)]
pub enum NetError {
    /// An OS or kernel query could not be completed.
    #[error("network query failed: {0}")]
    Io(#[from] io::Error),

    /// The kernel answered a netlink request with an error code.
    #[error("kernel rejected netlink request: {}", os_error(.errno))]
    Netlink { errno: i32 },

    /// A netlink reply could not be decoded.
    #[error("malformed netlink message: {0}")]
    MalformedMessage(String),

    /// A route source address does not belong to any known interface.
    #[error(
        "inconsistent network state: route to {destination} uses source {src} which no interface owns"
    )]
    InconsistentState { destination: String, src: String },

    /// The netmask cannot be expressed as a prefix length.
    #[error("unsupported netmask '{netmask}': {reason}")]
    UnsupportedNetmask { netmask: String, reason: String },

    /// The address text could not be parsed.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}

fn os_error(errno: &i32) -> io::Error {
    io::Error::from_raw_os_error(*errno)
}

impl NetError {
    pub fn unsupported_netmask(netmask: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedNetmask {
            netmask: netmask.to_string(),
            reason: reason.into(),
        }
    }
}
