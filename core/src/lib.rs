// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Host network state collection: interfaces via `pnet`, routes via netlink.

pub mod info;
pub mod interfaces;
pub mod netlink;
pub mod routes;
