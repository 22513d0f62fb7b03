use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket},
};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::{ConfigError, OriginIdProvider};

/// Documentation range addresses (RFC 5737, RFC 3849), tried in order;
/// nothing is ever sent to them.
const PROBE_ADDRS: [SocketAddr; 2] = [
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9),
    SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)), 9),
];

/// Derives the origin id from the host's primary network address.
///
/// The address is found by connecting an unbound UDP socket toward a
/// non-routable probe address and reading back the local address the OS
/// picked. `connect` on a UDP socket only selects a route, no packet leaves
/// the host. IPv4 is tried first, then IPv6.
///
/// The origin id is the address masked to the layout's origin field: the low
/// bits of an IPv4 address, or of the interface identifier of an IPv6
/// address. Hosts in the same subnet with fewer hosts than origin ids get
/// distinct values; anything else needs [`ConstantOriginId`].
///
/// Loopback and unspecified addresses are rejected, since every host has
/// them.
///
/// [`ConstantOriginId`]: crate::ConstantOriginId
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NetworkOriginId {
    addr: Option<IpAddr>,
}

impl NetworkOriginId {
    /// Resolves the address from the routing table at factory construction.
    pub const fn new() -> Self {
        Self { addr: None }
    }

    /// Uses `addr` instead of asking the OS.
    pub const fn from_addr(addr: IpAddr) -> Self {
        Self { addr: Some(addr) }
    }

    fn local_addr(&self) -> Result<IpAddr, ConfigError> {
        if let Some(addr) = self.addr {
            return Ok(addr);
        }
        let addr = first_route(&PROBE_ADDRS, route_to)
            .map_err(|e| ConfigError::NetworkUnavailable(e.to_string()))?;

        #[cfg(feature = "tracing")]
        debug!(%addr, "resolved local network address");

        Ok(addr)
    }
}

/// Local address the OS would send from to reach `target`.
fn route_to(target: SocketAddr) -> io::Result<IpAddr> {
    let unspecified = match target {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    let socket = UdpSocket::bind((unspecified, 0))?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}

/// First target `route` succeeds for, or the last error.
fn first_route<F>(targets: &[SocketAddr], route: F) -> io::Result<IpAddr>
where
    F: Fn(SocketAddr) -> io::Result<IpAddr>,
{
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no probe address");
    for &target in targets {
        match route(target) {
            Ok(addr) => return Ok(addr),
            Err(e) => {
                #[cfg(feature = "tracing")]
                debug!(%target, error = %e, "no route to probe address");

                last_err = e;
            }
        }
    }
    Err(last_err)
}

impl OriginIdProvider for NetworkOriginId {
    fn origin_id(&self, max_origin_id: u64) -> Result<u64, ConfigError> {
        let addr = self.local_addr()?;
        if addr.is_loopback() || addr.is_unspecified() {
            return Err(ConfigError::NoNetworkAddress);
        }
        let bits = match addr {
            IpAddr::V4(v4) => u64::from(v4.to_bits()),
            // interface identifier
            IpAddr::V6(v6) => v6.to_bits() as u64,
        };
        let origin_id = bits & max_origin_id;

        #[cfg(feature = "tracing")]
        info!(%addr, origin_id, "derived origin id from network address");

        Ok(origin_id)
    }
}
