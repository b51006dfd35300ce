//! Local network helpers.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Address used to pick the outbound interface. It does not have to be reachable:
/// connecting a UDP socket sends nothing, it only selects a route.
const PROBE_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::new(10, 255, 255, 255), 1);

/// Best-guess IPv4 address of the interface this host uses for outbound traffic.
///
/// Falls back to the loopback address when no route exists (e.g. no network).
pub fn local_ipv4() -> Ipv4Addr {
    match probe_outbound_ip() {
        Ok(IpAddr::V4(ip)) if !ip.is_unspecified() => ip,
        Ok(IpAddr::V4(_)) => Ipv4Addr::LOCALHOST,
        Ok(IpAddr::V6(ip)) => {
            tracing::debug!("Outbound probe returned IPv6 address {}, using loopback", ip);
            Ipv4Addr::LOCALHOST
        }
        Err(e) => {
            tracing::debug!("Outbound IPv4 probe failed: {}, using loopback", e);
            Ipv4Addr::LOCALHOST
        }
    }
}

fn probe_outbound_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(PROBE_ADDR)?;
    Ok(socket.local_addr()?.ip())
}
