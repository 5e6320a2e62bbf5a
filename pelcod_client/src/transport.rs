/*!
Datagram transport used to reach a device.

The transceiver only needs "send these bytes to the device" and "block until
a datagram arrives". [`UdpTransport`] provides both over a UDP socket whose
endpoint is resolved once when the transport is opened.
*/

use crate::error::{DeviceError, Result};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;
use tracing::{info, trace};

/// Minimal send/receive contract consumed by the transceiver
pub trait Transport {
    /// Send one datagram to the device
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Block until one datagram arrives and return its length
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).send(bytes)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }
}

/// UDP socket bound to an ephemeral local port and aimed at one device
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    endpoint: SocketAddr,
}

impl UdpTransport {
    /// Resolve the device address and open a socket for it.
    ///
    /// `read_timeout` of `None` (or zero) blocks forever on receive.
    pub fn open(host: &str, port: u16, read_timeout: Option<Duration>) -> Result<Self> {
        let endpoint = resolve(host, port)?;
        info!("Resolved device {}:{} to {}", host, port, endpoint);

        let socket = Socket::new(Domain::for_address(endpoint), Type::DGRAM, Some(Protocol::UDP))?;
        let local: SocketAddr = if endpoint.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        socket.bind(&local.into())?;
        socket.set_read_timeout(read_timeout.filter(|t| !t.is_zero()))?;

        let socket: UdpSocket = socket.into();
        info!("UDP socket bound to {}", socket.local_addr()?);

        Ok(Self { socket, endpoint })
    }

    /// Device endpoint every frame is sent to
    pub fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }

    /// Local address of the socket
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.socket.send_to(bytes, self.endpoint)?;
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, source) = self.socket.recv_from(buf)?;
        trace!("Received {} bytes from {}", len, source);
        Ok(len)
    }
}

/// Resolve a host name, preferring an IPv4 address
fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| DeviceError::Resolve {
            host: host.to_string(),
            port,
        })
}
