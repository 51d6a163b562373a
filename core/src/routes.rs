// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Route Classification
//!
//! Turns a kernel route dump into [`Route`] records.
//!
//! Only the main table is reported. Reject types (blackhole, unreachable,
//! prohibit) and entries without an egress interface are reported with their
//! destination only. Everything else is reachable and gets a source address
//! and an owning interface.

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

use netinfo_common::config::UnresolvedPolicy;
use netinfo_common::error::{NetError, Result};
use netinfo_common::models::route::RT_TABLE_MAIN;
use netinfo_common::models::{Interface, KernelRoute, Route};
use netinfo_common::system::RouteSource;
use netinfo_common::{debug, warn};

use crate::interfaces::ip_to_interface;

/// Classifies every main-table route, in kernel order.
pub fn list_routes(
    interfaces: &BTreeMap<String, Interface>,
    source: &mut dyn RouteSource,
    policy: UnresolvedPolicy,
) -> Result<Vec<Route>> {
    let ip_map: HashMap<String, String> = ip_to_interface(interfaces);
    let mut routes: Vec<Route> = Vec::new();

    for entry in source.dump_routes()? {
        if entry.table != RT_TABLE_MAIN {
            continue;
        }
        if entry.dst.is_none() && entry.gateway.is_none() {
            debug!(verbosity = 1, "Skipping {:?} route without destination or gateway", entry.kind);
            continue;
        }
        if is_loopback(entry.dst) || is_loopback(entry.prefsrc) {
            debug!(verbosity = 1, "Skipping loopback route to {}", entry.destination());
            continue;
        }

        let destination: String = entry.destination();

        if entry.kind.is_reject() {
            debug!(verbosity = 1, "{} is a {:?} route", destination, entry.kind);
            routes.push(Route::unreachable(entry.family, destination));
            continue;
        }

        let Some(oif) = entry.oif else {
            debug!(verbosity = 1, "{} is a {:?} route", destination, entry.kind);
            routes.push(Route::unreachable(entry.family, destination));
            continue;
        };

        let src: Option<IpAddr> = match entry.prefsrc {
            Some(prefsrc) => Some(prefsrc),
            None => source.lookup_source(lookup_target(&entry), Some(oif))?,
        };
        if is_loopback(src) {
            debug!(verbosity = 1, "Skipping {} which resolves to a loopback source", destination);
            continue;
        }

        let interface: Option<String> = resolve_interface(&ip_map, &destination, src, policy)?;
        routes.push(Route::reachable(
            entry.family,
            destination,
            interface,
            src,
            entry.priority,
        ));
    }

    Ok(routes)
}

/// Gateway lookup is not implemented; always empty.
pub fn list_gateways() -> Vec<String> {
    Vec::new()
}

fn is_loopback(ip: Option<IpAddr>) -> bool {
    ip.is_some_and(|ip| ip.is_loopback())
}

/// The address handed to the kernel to learn a route's source.
///
/// The destination itself when there is one. Default routes have none, so
/// the next hop is used instead, which the kernel reaches through the same
/// egress interface.
fn lookup_target(entry: &KernelRoute) -> IpAddr {
    entry
        .dst
        .or(entry.gateway)
        .unwrap_or_else(|| entry.family.unspecified())
}

fn resolve_interface(
    ip_map: &HashMap<String, String>,
    destination: &str,
    src: Option<IpAddr>,
    policy: UnresolvedPolicy,
) -> Result<Option<String>> {
    let src_text: String = match src {
        Some(ip) => ip.to_string(),
        None => "<none>".to_string(),
    };

    if let Some(name) = ip_map.get(&src_text) {
        return Ok(Some(name.clone()));
    }

    match policy {
        UnresolvedPolicy::Fail => Err(NetError::InconsistentState {
            destination: destination.to_string(),
            src: src_text,
        }),
        UnresolvedPolicy::Unknown => {
            warn!("No interface owns source {} of route {}", src_text, destination);
            Ok(None)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::interfaces::list_interfaces;
    use crate::interfaces::tests::{StaticInterfaces, raw};
    use crate::netlink::parse_route;
    use crate::netlink::tests::encode_multipath_route;
    use netinfo_common::models::route::{RT_TABLE_DEFAULT, RT_TABLE_LOCAL, RT_TABLE_UNSPEC};
    use netinfo_common::models::{AddressFamily, RouteKind};

    /// A [`RouteSource`] replaying a fixed dump and answering lookups from a table.
    ///
    /// A lookup for a destination missing from `sources` fails the way the
    /// kernel does for reject routes.
    #[derive(Default)]
    pub(crate) struct StaticRoutes {
        pub routes: Vec<KernelRoute>,
        pub sources: HashMap<IpAddr, Option<IpAddr>>,
        pub lookups: Vec<(IpAddr, Option<u32>)>,
    }

    impl RouteSource for StaticRoutes {
        fn dump_routes(&mut self) -> Result<Vec<KernelRoute>> {
            Ok(self.routes.clone())
        }

        fn lookup_source(&mut self, dst: IpAddr, oif: Option<u32>) -> Result<Option<IpAddr>> {
            self.lookups.push((dst, oif));
            self.sources
                .get(&dst)
                .copied()
                .ok_or(NetError::Netlink { errno: libc::EINVAL })
        }
    }

    fn ip(text: &str) -> IpAddr {
        text.parse().unwrap()
    }

    fn route(dst: Option<(&str, u8)>, gateway: Option<&str>, oif: Option<u32>) -> KernelRoute {
        let family = match dst.map(|(d, _)| d).or(gateway) {
            Some(text) if text.contains(':') => AddressFamily::Ip6,
            _ => AddressFamily::Ip4,
        };
        let mut entry = KernelRoute::new(family);
        if let Some((d, len)) = dst {
            entry.dst = Some(ip(d));
            entry.dst_len = len;
        }
        entry.gateway = gateway.map(ip);
        entry.oif = oif;
        entry
    }

    fn host() -> BTreeMap<String, Interface> {
        let source = StaticInterfaces(vec![
            raw(
                "eth0",
                true,
                &[("192.168.1.10", "255.255.255.0"), ("2001:db8::10", "ffff:ffff:ffff:ffff::")],
            ),
            raw("wg0", true, &[("10.8.0.2", "255.255.255.0")]),
        ]);
        list_interfaces(&source).unwrap()
    }

    #[test]
    fn default_route_uses_prefsrc() {
        let mut entry = route(None, Some("192.168.1.1"), Some(2));
        entry.prefsrc = Some(ip("192.168.1.10"));
        entry.priority = Some(100);
        let mut source = StaticRoutes {
            routes: vec![entry],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].destination, "0.0.0.0/0");
        assert_eq!(routes[0].interface.as_deref(), Some("eth0"));
        assert_eq!(routes[0].src.as_deref(), Some("192.168.1.10"));
        assert_eq!(routes[0].metric, Some(100));
        assert!(routes[0].reachable);
        assert!(source.lookups.is_empty());
    }

    #[test]
    fn missing_prefsrc_triggers_kernel_lookup() {
        let mut source = StaticRoutes {
            routes: vec![route(Some(("10.0.0.0", 24)), Some("10.8.0.1"), Some(5))],
            sources: HashMap::from([(ip("10.0.0.0"), Some(ip("10.8.0.2")))]),
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert_eq!(source.lookups, vec![(ip("10.0.0.0"), Some(5))]);
        assert_eq!(routes[0].destination, "10.0.0.0/24");
        assert_eq!(routes[0].src.as_deref(), Some("10.8.0.2"));
        assert_eq!(routes[0].interface.as_deref(), Some("wg0"));
        assert!(routes[0].reachable);
    }

    #[test]
    fn default_route_lookup_goes_through_gateway() {
        let mut source = StaticRoutes {
            routes: vec![route(None, Some("2001:db8::1"), Some(2))],
            sources: HashMap::from([(ip("2001:db8::1"), Some(ip("2001:db8::10")))]),
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert_eq!(routes[0].family, AddressFamily::Ip6);
        assert_eq!(routes[0].destination, "::/0");
        assert_eq!(routes[0].interface.as_deref(), Some("eth0"));
    }

    #[test]
    fn route_without_oif_is_unreachable() {
        let mut entry = route(Some(("10.99.0.0", 16)), None, None);
        entry.priority = Some(5);
        let mut source = StaticRoutes {
            routes: vec![entry],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert_eq!(
            routes,
            vec![Route::unreachable(AddressFamily::Ip4, "10.99.0.0/16".to_string())]
        );
        assert!(routes[0].interface.is_none());
        assert!(routes[0].src.is_none());
        assert!(routes[0].metric.is_none());
        assert!(source.lookups.is_empty());
    }

    #[test]
    fn ipv6_reject_routes_on_lo_are_unreachable() {
        let mut blackhole = route(Some(("2001:db8:dead::", 48)), None, Some(1));
        blackhole.kind = RouteKind::Blackhole;
        blackhole.priority = Some(1024);
        let mut prohibit = route(Some(("2001:db8:beef::", 48)), None, Some(1));
        prohibit.kind = RouteKind::Prohibit;
        let mut unreachable = route(Some(("10.70.0.0", 16)), None, Some(1));
        unreachable.kind = RouteKind::Unreachable;
        let mut source = StaticRoutes {
            routes: vec![blackhole, prohibit, unreachable],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert_eq!(
            routes,
            vec![
                Route::unreachable(AddressFamily::Ip6, "2001:db8:dead::/48".to_string()),
                Route::unreachable(AddressFamily::Ip6, "2001:db8:beef::/48".to_string()),
                Route::unreachable(AddressFamily::Ip4, "10.70.0.0/16".to_string()),
            ]
        );
        assert!(source.lookups.is_empty());
    }

    #[test]
    fn multipath_routes_are_reachable() {
        let dst = parse_route(&encode_multipath_route(
            Some((ip("10.60.0.0"), 24)),
            &[(5, Some(ip("10.8.0.1"))), (2, Some(ip("192.168.1.1")))],
        ))
        .unwrap()
        .unwrap();
        let default = parse_route(&encode_multipath_route(
            None,
            &[(2, Some(ip("192.168.1.1"))), (5, Some(ip("10.8.0.1")))],
        ))
        .unwrap()
        .unwrap();
        let mut source = StaticRoutes {
            routes: vec![dst, default],
            sources: HashMap::from([
                (ip("10.60.0.0"), Some(ip("10.8.0.2"))),
                (ip("192.168.1.1"), Some(ip("192.168.1.10"))),
            ]),
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].destination, "10.60.0.0/24");
        assert_eq!(routes[0].interface.as_deref(), Some("wg0"));
        assert!(routes[0].reachable);
        assert_eq!(routes[1].destination, "0.0.0.0/0");
        assert_eq!(routes[1].interface.as_deref(), Some("eth0"));
        assert!(routes[1].reachable);
        assert_eq!(
            source.lookups,
            vec![(ip("10.60.0.0"), Some(5)), (ip("192.168.1.1"), Some(2))]
        );
    }

    #[test]
    fn only_main_table_is_reported() {
        let mut local = route(Some(("192.168.1.10", 32)), None, Some(2));
        local.table = RT_TABLE_LOCAL;
        let mut unspec = route(Some(("192.168.5.0", 24)), None, Some(2));
        unspec.table = RT_TABLE_UNSPEC;
        let mut default = route(Some(("192.168.6.0", 24)), None, Some(2));
        default.table = RT_TABLE_DEFAULT;
        let mut custom = route(Some(("172.16.0.0", 12)), None, Some(2));
        custom.table = 100;
        let mut source = StaticRoutes {
            routes: vec![local, unspec, default, custom],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn entries_without_destination_or_gateway_are_dropped() {
        let mut source = StaticRoutes {
            routes: vec![route(None, None, Some(2)), route(None, None, None)],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn loopback_routes_are_dropped() {
        let to_loopback = route(Some(("127.0.0.1", 32)), None, Some(1));
        let mut from_loopback = route(Some(("10.1.0.0", 16)), None, Some(1));
        from_loopback.prefsrc = Some(ip("127.0.0.1"));
        let resolves_to_loopback = route(Some(("10.2.0.0", 16)), None, Some(1));
        let mut source = StaticRoutes {
            routes: vec![to_loopback, from_loopback, resolves_to_loopback],
            sources: HashMap::from([(ip("10.2.0.0"), Some(ip("127.0.0.1")))]),
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn ipv6_loopback_routes_are_dropped() {
        let to_loopback = route(Some(("::1", 128)), None, Some(1));
        let mut from_loopback = route(Some(("2001:db8:1::", 64)), None, Some(1));
        from_loopback.prefsrc = Some(ip("::1"));
        let mut source = StaticRoutes {
            routes: vec![to_loopback, from_loopback],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        assert!(routes.is_empty());
        assert!(source.lookups.is_empty());
    }

    #[test]
    fn missing_lookup_source_fails_by_default() {
        let mut source = StaticRoutes {
            routes: vec![route(Some(("10.0.0.0", 24)), None, Some(2))],
            sources: HashMap::from([(ip("10.0.0.0"), None)]),
            ..Default::default()
        };

        let err = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap_err();
        match err {
            NetError::InconsistentState { destination, src } => {
                assert_eq!(destination, "10.0.0.0/24");
                assert_eq!(src, "<none>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_source_fails_by_default() {
        let mut entry = route(Some(("10.0.0.0", 24)), None, Some(2));
        entry.prefsrc = Some(ip("10.0.0.99"));
        let mut source = StaticRoutes {
            routes: vec![entry],
            ..Default::default()
        };

        let err = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap_err();
        match err {
            NetError::InconsistentState { destination, src } => {
                assert_eq!(destination, "10.0.0.0/24");
                assert_eq!(src, "10.0.0.99");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_source_is_tolerated_when_lenient() {
        let mut source = StaticRoutes {
            routes: vec![route(Some(("10.0.0.0", 24)), None, Some(2))],
            sources: HashMap::from([(ip("10.0.0.0"), None)]),
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Unknown).unwrap();
        assert_eq!(routes.len(), 1);
        assert!(routes[0].reachable);
        assert!(routes[0].interface.is_none());
        assert!(routes[0].src.is_none());
    }

    #[test]
    fn kernel_order_is_preserved() {
        let mut first = route(Some(("192.168.1.0", 24)), None, Some(2));
        first.prefsrc = Some(ip("192.168.1.10"));
        let second = route(Some(("10.50.0.0", 16)), None, None);
        let mut third = route(Some(("10.8.0.0", 24)), None, Some(5));
        third.prefsrc = Some(ip("10.8.0.2"));
        let mut source = StaticRoutes {
            routes: vec![first, second, third],
            ..Default::default()
        };

        let routes = list_routes(&host(), &mut source, UnresolvedPolicy::Fail).unwrap();
        let destinations: Vec<&str> = routes.iter().map(|r| r.destination.as_str()).collect();
        assert_eq!(destinations, vec!["192.168.1.0/24", "10.50.0.0/16", "10.8.0.0/24"]);
    }

    #[test]
    fn gateways_are_always_empty() {
        assert!(list_gateways().is_empty());
    }
}
