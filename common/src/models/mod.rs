// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Data Models
//!
//! Plain records produced by the enumerator and the route classifier.
//! They are built fresh on every call and never mutated after being returned.

pub mod family;
pub mod interface;
pub mod route;

pub use family::AddressFamily;
pub use interface::{Interface, InterfaceAddress, LinkStatus, RawAddress, RawInterface};
pub use route::{KernelRoute, Route, RouteKind, RouteReport};
