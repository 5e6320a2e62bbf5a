/*!
Synchronous request/reply exchange.

One exchange sends exactly one request frame and blocks for exactly one reply
frame. The protocol has no transaction identifier, so only one exchange may be
outstanding at a time; taking `&mut self` enforces that.
*/

use crate::error::Result;
use crate::transport::Transport;
use pelcod_protocol::{Command, Frame, ReplyValidation};
use tracing::{debug, warn};

/// Large enough to notice a datagram longer than one frame
const RECV_BUFFER_LEN: usize = 64;

/// Owns the transport and runs encode, send, receive, decode
#[derive(Debug)]
pub struct Transceiver<T: Transport> {
    transport: T,
    validation: ReplyValidation,
}

impl<T: Transport> Transceiver<T> {
    /// Create a transceiver that accepts any seven-byte reply
    pub fn new(transport: T) -> Self {
        Self::with_validation(transport, ReplyValidation::Lenient)
    }

    /// Create a transceiver with an explicit reply validation policy
    pub fn with_validation(transport: T, validation: ReplyValidation) -> Self {
        Self {
            transport,
            validation,
        }
    }

    /// Reply validation policy in effect
    pub fn validation(&self) -> ReplyValidation {
        self.validation
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the transceiver and return its transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send `command` with `value` and return the value field of the reply
    pub fn exchange(&mut self, command: Command, value: u16) -> Result<u16> {
        let request = Frame::request(command, value);
        let bytes = request.to_bytes();
        debug!("{} -> {}", command, hex::encode(bytes));

        self.transport.send(&bytes)?;

        let mut buf = [0u8; RECV_BUFFER_LEN];
        let len = self.transport.recv(&mut buf)?;
        debug!("{} <- {}", command, hex::encode(&buf[..len]));

        let reply = Frame::from_bytes(&buf[..len])?;
        if let Err(e) = self.validation.check(&reply, &request, command) {
            warn!("Rejected reply to {}: {}", command, e);
            return Err(e.into());
        }

        Ok(reply.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeviceError;
    use crate::transport::testing::ScriptedTransport;
    use pelcod_protocol::ProtocolError;
    use std::io;

    #[test]
    fn test_exchange_sends_one_frame() {
        let transport = ScriptedTransport::new().reply(0x61, 0x0102);
        let mut transceiver = Transceiver::new(transport);

        assert_eq!(transceiver.exchange(Command::GetPanSteps, 0).unwrap(), 0x0102);

        let sent = &transceiver.transport().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], vec![0xFF, 0x01, 0x00, 0x51, 0x00, 0x00, 0x52]);
    }

    #[test]
    fn test_exchange_carries_value() {
        let transport = ScriptedTransport::new().reply(0x7C, 0);
        let mut transceiver = Transceiver::new(transport);

        transceiver.exchange(Command::SetTiltSteps, 0x0100).unwrap();
        assert_eq!(
            transceiver.into_inner().sent[0],
            vec![0xFF, 0x01, 0x00, 0x73, 0x01, 0x00, 0x75]
        );
    }

    #[test]
    fn test_short_reply_is_malformed() {
        let transport = ScriptedTransport::new().reply_bytes(&[0xFF, 0x01, 0x00]);
        let mut transceiver = Transceiver::new(transport);

        let err = transceiver.exchange(Command::GetVoltage, 0).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Protocol(ProtocolError::MalformedFrame { expected: 7, actual: 3 })
        ));
    }

    #[test]
    fn test_long_reply_is_malformed() {
        let transport = ScriptedTransport::new().reply_bytes(&[0u8; 12]);
        let mut transceiver = Transceiver::new(transport);

        let err = transceiver.exchange(Command::GetVoltage, 0).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Protocol(ProtocolError::MalformedFrame { actual: 12, .. })
        ));
    }

    #[test]
    fn test_receive_failure_is_transport_error() {
        let transport = ScriptedTransport::new().fail(io::ErrorKind::ConnectionRefused);
        let mut transceiver = Transceiver::new(transport);

        match transceiver.exchange(Command::GetTemperature, 0) {
            Err(DeviceError::Transport(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_send_failure_skips_receive() {
        let transport = ScriptedTransport::new()
            .reply(0x61, 1)
            .fail_send(io::ErrorKind::ConnectionRefused);
        let mut transceiver = Transceiver::new(transport);

        match transceiver.exchange(Command::GetPanSteps, 0) {
            Err(DeviceError::Transport(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(transceiver.transport().sent.is_empty());
        assert_eq!(transceiver.transport().recv_calls, 0);
    }

    #[test]
    fn test_lenient_accepts_bad_checksum() {
        let transport = ScriptedTransport::new().reply_bytes(&[0xFF, 0x01, 0x00, 0x61, 0x00, 0x2A, 0x00]);
        let mut transceiver = Transceiver::new(transport);

        assert_eq!(transceiver.exchange(Command::GetPanSteps, 0).unwrap(), 42);
    }

    #[test]
    fn test_strict_rejects_bad_checksum() {
        let transport = ScriptedTransport::new().reply_bytes(&[0xFF, 0x01, 0x00, 0x61, 0x00, 0x2A, 0x00]);
        let mut transceiver = Transceiver::with_validation(transport, ReplyValidation::Strict);

        let err = transceiver.exchange(Command::GetPanSteps, 0).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Protocol(ProtocolError::ChecksumMismatch { expected: 0x8C, actual: 0x00 })
        ));
    }

    #[test]
    fn test_strict_accepts_matching_reply() {
        let transport = ScriptedTransport::new().reply(0xAB, 1230);
        let mut transceiver = Transceiver::with_validation(transport, ReplyValidation::Strict);

        assert_eq!(transceiver.exchange(Command::GetVoltage, 0).unwrap(), 1230);
        assert_eq!(transceiver.validation(), ReplyValidation::Strict);
    }

    #[test]
    fn test_boxed_transport() {
        let transport: Box<dyn Transport> = Box::new(ScriptedTransport::new().reply(0x63, 77));
        let mut transceiver = Transceiver::new(transport);

        assert_eq!(transceiver.exchange(Command::GetTiltSteps, 0).unwrap(), 77);
    }
}
