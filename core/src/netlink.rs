// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Netlink Route Socket
//!
//! A minimal `NETLINK_ROUTE` client covering exactly two requests:
//!
//! * **Dump**: `RTM_GETROUTE` with `NLM_F_DUMP`, i.e. `ip route show table all`.
//! * **Lookup**: `RTM_GETROUTE` for one destination, i.e. `ip route get <dst>`.
//!
//! Message encoding and decoding are plain functions over byte slices so they
//! can be tested without a kernel. [`NetlinkSocket`] owns the file descriptor
//! and closes it on drop, whichever way the caller leaves.

use std::io;
use std::mem::{size_of, zeroed};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use netinfo_common::debug;
use netinfo_common::error::{NetError, Result};
use netinfo_common::models::{AddressFamily, KernelRoute, RouteKind};
use netinfo_common::system::RouteSource;

const RTM_NEWROUTE: u16 = 24;
const RTM_GETROUTE: u16 = 26;

const NLM_F_REQUEST: u16 = 0x0001;
const NLM_F_MULTI: u16 = 0x0002;
const NLM_F_DUMP: u16 = 0x0300;

const NLMSG_NOOP: u16 = 1;
const NLMSG_ERROR: u16 = 2;
const NLMSG_DONE: u16 = 3;

const NLMSG_HDR_LEN: usize = 16;
const RTMSG_LEN: usize = 12;
const RTA_HDR_LEN: usize = 4;
const NLA_TYPE_MASK: u16 = 0x3fff;

const RTA_DST: u16 = 1;
const RTA_OIF: u16 = 4;
const RTA_GATEWAY: u16 = 5;
const RTA_PRIORITY: u16 = 6;
const RTA_PREFSRC: u16 = 7;
const RTA_MULTIPATH: u16 = 9;
const RTA_TABLE: u16 = 15;

/// `struct rtnexthop`: len, flags, hops, ifindex.
const RTNH_LEN: usize = 8;

const AF_INET: u8 = libc::AF_INET as u8;
const AF_INET6: u8 = libc::AF_INET6 as u8;
const AF_UNSPEC: u8 = libc::AF_UNSPEC as u8;

const RECV_BUF_LEN: usize = 65536;
const RECV_TIMEOUT_SECS: libc::time_t = 5;

fn align(len: usize) -> usize {
    (len + 3) & !3
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_ne_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
}

fn get_u16(buf: &[u8], offset: usize) -> Result<u16> {
    buf.get(offset..offset + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_ne_bytes)
        .ok_or_else(|| NetError::MalformedMessage(format!("truncated u16 at offset {offset}")))
}

fn get_u32(buf: &[u8], offset: usize) -> Result<u32> {
    buf.get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_ne_bytes)
        .ok_or_else(|| NetError::MalformedMessage(format!("truncated u32 at offset {offset}")))
}

fn family_to_af(family: AddressFamily) -> u8 {
    match family {
        AddressFamily::Ip4 => AF_INET,
        AddressFamily::Ip6 => AF_INET6,
    }
}

fn af_to_family(af: u8) -> Option<AddressFamily> {
    match af {
        AF_INET => Some(AddressFamily::Ip4),
        AF_INET6 => Some(AddressFamily::Ip6),
        _ => None,
    }
}

fn ip_bytes(ip: &IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

fn decode_ip(family: AddressFamily, payload: &[u8]) -> Result<IpAddr> {
    match family {
        AddressFamily::Ip4 => <[u8; 4]>::try_from(payload)
            .map(|o| IpAddr::V4(Ipv4Addr::from(o)))
            .map_err(|_| NetError::MalformedMessage(format!("IPv4 attribute of {} bytes", payload.len()))),
        AddressFamily::Ip6 => <[u8; 16]>::try_from(payload)
            .map(|o| IpAddr::V6(Ipv6Addr::from(o)))
            .map_err(|_| NetError::MalformedMessage(format!("IPv6 attribute of {} bytes", payload.len()))),
    }
}

fn decode_u32(payload: &[u8]) -> Result<u32> {
    get_u32(payload, 0)
}

/// Writes the `nlmsghdr` + `rtmsg` prefix shared by both requests.
fn route_header(len: usize, flags: u16, seq: u32, pid: u32, family: u8, dst_len: u8) -> Vec<u8> {
    let mut msg = vec![0u8; align(len)];
    put_u32(&mut msg, 0, len as u32);
    put_u16(&mut msg, 4, RTM_GETROUTE);
    put_u16(&mut msg, 6, flags);
    put_u32(&mut msg, 8, seq);
    put_u32(&mut msg, 12, pid);
    msg[NLMSG_HDR_LEN] = family;
    msg[NLMSG_HDR_LEN + 1] = dst_len;
    msg
}

fn push_attr(msg: &mut Vec<u8>, kind: u16, payload: &[u8]) {
    let start = msg.len();
    let len = RTA_HDR_LEN + payload.len();
    msg.resize(start + align(len), 0);
    put_u16(msg, start, len as u16);
    put_u16(msg, start + 2, kind);
    msg[start + RTA_HDR_LEN..start + len].copy_from_slice(payload);
    let total = msg.len() as u32;
    put_u32(msg, 0, total);
}

/// `RTM_GETROUTE` dump of every table, both families.
pub fn build_dump_request(seq: u32, pid: u32) -> Vec<u8> {
    route_header(
        NLMSG_HDR_LEN + RTMSG_LEN,
        NLM_F_REQUEST | NLM_F_DUMP,
        seq,
        pid,
        AF_UNSPEC,
        0,
    )
}

/// `RTM_GETROUTE` for a single destination, optionally pinned to an egress interface.
pub fn build_lookup_request(seq: u32, pid: u32, dst: IpAddr, oif: Option<u32>) -> Vec<u8> {
    let family = AddressFamily::of(&dst);
    let dst_len: u8 = match family {
        AddressFamily::Ip4 => 32,
        AddressFamily::Ip6 => 128,
    };
    let mut msg = route_header(
        NLMSG_HDR_LEN + RTMSG_LEN,
        NLM_F_REQUEST,
        seq,
        pid,
        family_to_af(family),
        dst_len,
    );
    push_attr(&mut msg, RTA_DST, &ip_bytes(&dst));
    if let Some(oif) = oif {
        push_attr(&mut msg, RTA_OIF, &oif.to_ne_bytes());
    }
    msg
}

/// Decodes one `RTM_NEWROUTE` message.
///
/// Returns `Ok(None)` for other message types and for families other than
/// IPv4/IPv6 (e.g. `RTNL_FAMILY_IPMR`).
pub fn parse_route(msg: &[u8]) -> Result<Option<KernelRoute>> {
    let msg_type = get_u16(msg, 4)?;
    if msg_type != RTM_NEWROUTE {
        return Ok(None);
    }

    let body = NLMSG_HDR_LEN;
    if msg.len() < body + RTMSG_LEN {
        return Err(NetError::MalformedMessage(format!(
            "route message of {} bytes",
            msg.len()
        )));
    }

    let Some(family) = af_to_family(msg[body]) else {
        return Ok(None);
    };

    let mut route = KernelRoute::new(family);
    route.dst_len = msg[body + 1];
    route.table = msg[body + 4] as u32;
    route.kind = RouteKind::from(msg[body + 7]);

    let mut multipath: Option<&[u8]> = None;
    for (rta_type, payload) in attributes(msg, body + RTMSG_LEN)? {
        match rta_type {
            RTA_DST => route.dst = Some(decode_ip(family, payload)?),
            RTA_GATEWAY => route.gateway = Some(decode_ip(family, payload)?),
            RTA_PREFSRC => route.prefsrc = Some(decode_ip(family, payload)?),
            RTA_OIF => route.oif = Some(decode_u32(payload)?),
            RTA_PRIORITY => route.priority = Some(decode_u32(payload)?),
            RTA_TABLE => route.table = decode_u32(payload)?,
            RTA_MULTIPATH => multipath = Some(payload),
            _ => {}
        }
    }
    if let Some(payload) = multipath {
        apply_first_nexthop(&mut route, payload)?;
    }

    Ok(Some(route))
}

/// Walks the `rtattr` list starting at `offset`, yielding (type, payload).
fn attributes(buf: &[u8], mut offset: usize) -> Result<Vec<(u16, &[u8])>> {
    let mut attrs = Vec::new();
    while offset + RTA_HDR_LEN <= buf.len() {
        let rta_len = get_u16(buf, offset)? as usize;
        let rta_type = get_u16(buf, offset + 2)? & NLA_TYPE_MASK;
        if rta_len < RTA_HDR_LEN || offset + rta_len > buf.len() {
            return Err(NetError::MalformedMessage(format!(
                "attribute {rta_type} claims {rta_len} bytes at offset {offset}"
            )));
        }
        attrs.push((rta_type, &buf[offset + RTA_HDR_LEN..offset + rta_len]));
        offset += align(rta_len);
    }
    Ok(attrs)
}

/// Fills the egress interface and gateway of an ECMP route from its first
/// `rtnexthop`. Top-level attributes, when present, win.
fn apply_first_nexthop(route: &mut KernelRoute, payload: &[u8]) -> Result<()> {
    let rtnh_len = get_u16(payload, 0)? as usize;
    if rtnh_len < RTNH_LEN || rtnh_len > payload.len() {
        return Err(NetError::MalformedMessage(format!(
            "nexthop claims {rtnh_len} of {} bytes",
            payload.len()
        )));
    }

    let ifindex = get_u32(payload, 4)?;
    if route.oif.is_none() && ifindex != 0 {
        route.oif = Some(ifindex);
    }

    for (rta_type, nested) in attributes(&payload[..rtnh_len], RTNH_LEN)? {
        if rta_type == RTA_GATEWAY && route.gateway.is_none() {
            route.gateway = Some(decode_ip(route.family, nested)?);
        }
    }
    Ok(())
}

/// Splits a receive buffer into messages.
///
/// Returns the messages belonging to `seq` and whether the reply is complete.
fn split_messages(buf: &[u8], seq: u32) -> Result<(Vec<Vec<u8>>, bool)> {
    let mut messages = Vec::new();
    let mut offset = 0;

    while offset + NLMSG_HDR_LEN <= buf.len() {
        let len = get_u32(buf, offset)? as usize;
        let msg_type = get_u16(buf, offset + 4)?;
        let flags = get_u16(buf, offset + 6)?;
        let msg_seq = get_u32(buf, offset + 8)?;

        if len < NLMSG_HDR_LEN || offset + len > buf.len() {
            return Err(NetError::MalformedMessage(format!(
                "message claims {len} bytes at offset {offset}"
            )));
        }

        if msg_seq != seq {
            offset += align(len);
            continue;
        }

        match msg_type {
            NLMSG_DONE => return Ok((messages, true)),
            NLMSG_ERROR => {
                let errno = get_u32(buf, offset + NLMSG_HDR_LEN)? as i32;
                if errno < 0 {
                    return Err(NetError::Netlink { errno: -errno });
                }
                return Ok((messages, true));
            }
            NLMSG_NOOP => {}
            _ => {
                messages.push(buf[offset..offset + len].to_vec());
                if flags & NLM_F_MULTI == 0 {
                    return Ok((messages, true));
                }
            }
        }

        offset += align(len);
    }

    Ok((messages, false))
}

/// An open `NETLINK_ROUTE` socket.
pub struct NetlinkSocket {
    fd: libc::c_int,
    seq: u32,
    pid: u32,
}

impl NetlinkSocket {
    pub fn open() -> Result<Self> {
        let fd = unsafe {
            libc::socket(
                libc::AF_NETLINK,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                libc::NETLINK_ROUTE,
            )
        };
        if fd < 0 {
            return Err(io::Error::last_os_error().into());
        }

        // From here on, `Drop` closes the descriptor on every error path.
        let mut socket = Self { fd, seq: 0, pid: 0 };

        let mut addr: libc::sockaddr_nl = unsafe { zeroed() };
        addr.nl_family = libc::AF_NETLINK as libc::sa_family_t;
        let ret = unsafe {
            libc::bind(
                fd,
                &addr as *const libc::sockaddr_nl as *const libc::sockaddr,
                size_of::<libc::sockaddr_nl>() as libc::socklen_t,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error().into());
        }

        let mut bound: libc::sockaddr_nl = unsafe { zeroed() };
        let mut addrlen = size_of::<libc::sockaddr_nl>() as libc::socklen_t;
        let ret = unsafe {
            libc::getsockname(
                fd,
                &mut bound as *mut libc::sockaddr_nl as *mut libc::sockaddr,
                &mut addrlen,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error().into());
        }
        socket.pid = bound.nl_pid;

        let timeout = libc::timeval {
            tv_sec: RECV_TIMEOUT_SECS,
            tv_usec: 0,
        };
        let ret = unsafe {
            libc::setsockopt(
                fd,
                libc::SOL_SOCKET,
                libc::SO_RCVTIMEO,
                &timeout as *const libc::timeval as *const libc::c_void,
                size_of::<libc::timeval>() as libc::socklen_t,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error().into());
        }

        debug!(verbosity = 2, "Opened netlink route socket (pid {})", socket.pid);
        Ok(socket)
    }

    fn next_seq(&mut self) -> u32 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    fn send(&self, msg: &[u8]) -> Result<()> {
        let sent = unsafe { libc::send(self.fd, msg.as_ptr() as *const libc::c_void, msg.len(), 0) };
        if sent < 0 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        let n = unsafe { libc::recv(self.fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len(), 0) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "netlink reply timed out").into());
            }
            return Err(err.into());
        }
        Ok(n as usize)
    }

    /// Sends `msg` (whose sequence number is `seq`) and collects the reply messages.
    fn request(&mut self, msg: &[u8], seq: u32) -> Result<Vec<Vec<u8>>> {
        self.send(msg)?;

        let mut replies = Vec::new();
        let mut buf = vec![0u8; RECV_BUF_LEN];
        loop {
            let n = self.recv(&mut buf)?;
            if n == 0 {
                return Err(NetError::MalformedMessage("netlink socket closed mid-reply".to_string()));
            }
            let (mut messages, done) = split_messages(&buf[..n], seq)?;
            replies.append(&mut messages);
            if done {
                break;
            }
        }

        debug!(verbosity = 2, "Netlink request {} returned {} messages", seq, replies.len());
        Ok(replies)
    }

    pub fn dump_routes(&mut self) -> Result<Vec<KernelRoute>> {
        let seq = self.next_seq();
        let request = build_dump_request(seq, self.pid);
        let mut routes = Vec::new();
        for msg in self.request(&request, seq)? {
            if let Some(route) = parse_route(&msg)? {
                routes.push(route);
            }
        }
        Ok(routes)
    }

    pub fn route_get(&mut self, dst: IpAddr, oif: Option<u32>) -> Result<Option<KernelRoute>> {
        let seq = self.next_seq();
        let request = build_lookup_request(seq, self.pid, dst, oif);
        for msg in self.request(&request, seq)? {
            if let Some(route) = parse_route(&msg)? {
                return Ok(Some(route));
            }
        }
        Ok(None)
    }
}

impl Drop for NetlinkSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

/// [`RouteSource`] backed by a live netlink socket.
pub struct NetlinkRoutes {
    socket: NetlinkSocket,
}

impl NetlinkRoutes {
    pub fn open() -> Result<Self> {
        Ok(Self {
            socket: NetlinkSocket::open()?,
        })
    }
}

impl RouteSource for NetlinkRoutes {
    fn dump_routes(&mut self) -> Result<Vec<KernelRoute>> {
        self.socket.dump_routes()
    }

    fn lookup_source(&mut self, dst: IpAddr, oif: Option<u32>) -> Result<Option<IpAddr>> {
        Ok(self.socket.route_get(dst, oif)?.and_then(|route| route.prefsrc))
    }
}
