// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Network Information Service
//!
//! Facade over the interface enumerator and the route classifier.
//!
//! The service owns an [`InterfaceSource`] for the whole of its life but opens
//! a fresh [`RouteSource`] for every route listing, so no kernel handle
//! outlives the call that needed it.

use std::collections::BTreeMap;

use netinfo_common::config::{Config, UnresolvedPolicy};
use netinfo_common::error::Result;
use netinfo_common::models::{Interface, RouteReport};
use netinfo_common::system::{InterfaceSource, RouteSource};
use netinfo_common::success;

use crate::interfaces::{self, PnetInterfaces};
use crate::netlink::NetlinkRoutes;
use crate::routes;

type RouteOpener = Box<dyn Fn() -> Result<Box<dyn RouteSource>>>;

pub struct NetworkInfoService {
    interface_source: Box<dyn InterfaceSource>,
    open_routes: RouteOpener,
    unresolved: UnresolvedPolicy,
}

impl NetworkInfoService {
    pub fn new(
        interface_source: Box<dyn InterfaceSource>,
        open_routes: RouteOpener,
        unresolved: UnresolvedPolicy,
    ) -> Self {
        Self {
            interface_source,
            open_routes,
            unresolved,
        }
    }

    /// A service reading the live host: `pnet` for interfaces, netlink for routes.
    pub fn system(cfg: &Config) -> Self {
        Self::new(
            Box::new(PnetInterfaces),
            Box::new(|| -> Result<Box<dyn RouteSource>> { Ok(Box::new(NetlinkRoutes::open()?)) }),
            cfg.unresolved,
        )
    }

    pub fn list_interfaces(&self) -> Result<BTreeMap<String, Interface>> {
        let interfaces = interfaces::list_interfaces(self.interface_source.as_ref())?;
        success!(verbosity = 1, "Collected {} interfaces", interfaces.len());
        Ok(interfaces)
    }

    pub fn list_routes(&self) -> Result<RouteReport> {
        let interfaces = self.list_interfaces()?;
        let mut source = (self.open_routes)()?;
        let routes = routes::list_routes(&interfaces, source.as_mut(), self.unresolved)?;
        success!(verbosity = 1, "Classified {} routes", routes.len());
        Ok(RouteReport { routes })
    }

    pub fn list_gateways(&self) -> Vec<String> {
        routes::list_gateways()
    }
}
