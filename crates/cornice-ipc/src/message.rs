//! Typed wire messages and their fixed-layout codecs.
//!
//! Every message is `[discriminator][payload]` with a payload whose width is
//! a pure function of the discriminator. Multi-byte payload fields are
//! little-endian. Each message type implements [`WireMessage`], which is the
//! registration surface the client's generic send and the daemon's decode
//! table are both built on.

use std::ops::RangeInclusive;

use crate::error::ProtocolError;

/// Width of the discriminator header in bytes.
pub const HEADER_SIZE: usize = 1;

/// A message type registered with the wire protocol.
///
/// Implementations provide the discriminator, the exact payload width, and
/// the payload codec pair. [`WireMessage::encode`] assembles the full frame;
/// semantic ranges (volume level, colour temperature) are the sender's
/// responsibility and are deliberately not enforced here.
pub trait WireMessage: Sized {
    /// Unique wire discriminator for this message type.
    const DISCRIMINATOR: u8;
    /// Exact payload width in bytes.
    const PAYLOAD_SIZE: usize;
    /// Human-readable name used in logs and diagnostics.
    const NAME: &'static str;

    /// Appends the payload fields to `buffer` in wire order.
    fn encode_payload(&self, buffer: &mut Vec<u8>);

    /// Decodes the payload fields from exactly [`Self::PAYLOAD_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Truncated`] when `payload` is shorter than
    /// the registered width and [`ProtocolError::TrailingBytes`] when it is
    /// longer.
    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError>;

    /// Encodes the complete wire frame: discriminator followed by payload.
    #[must_use]
    fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(HEADER_SIZE + Self::PAYLOAD_SIZE);
        buffer.push(Self::DISCRIMINATOR);
        self.encode_payload(&mut buffer);
        buffer
    }
}

const fn size_mismatch(discriminator: u8, expected: usize, actual: usize) -> ProtocolError {
    if actual < expected {
        ProtocolError::Truncated {
            discriminator,
            expected,
            actual,
        }
    } else {
        ProtocolError::TrailingBytes {
            discriminator,
            extra: actual - expected,
        }
    }
}

fn decode_f32(discriminator: u8, payload: &[u8]) -> Result<f32, ProtocolError> {
    let bytes: [u8; 4] = payload
        .try_into()
        .map_err(|_| size_mismatch(discriminator, 4, payload.len()))?;
    Ok(f32::from_le_bytes(bytes))
}

fn decode_u16(discriminator: u8, payload: &[u8]) -> Result<u16, ProtocolError> {
    let bytes: [u8; 2] = payload
        .try_into()
        .map_err(|_| size_mismatch(discriminator, 2, payload.len()))?;
    Ok(u16::from_le_bytes(bytes))
}

fn decode_empty<M: WireMessage>(message: M, payload: &[u8]) -> Result<M, ProtocolError> {
    if payload.is_empty() {
        Ok(message)
    } else {
        Err(ProtocolError::TrailingBytes {
            discriminator: M::DISCRIMINATOR,
            extra: payload.len(),
        })
    }
}

/// Raises the default sink volume by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeUp;

impl WireMessage for VolumeUp {
    const DISCRIMINATOR: u8 = 0x01;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "volume-up";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Lowers the default sink volume by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDown;

impl WireMessage for VolumeDown {
    const DISCRIMINATOR: u8 = 0x02;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "volume-down";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Sets the default sink volume to an absolute level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSet {
    /// Normalised volume level. Senders bound this to [`VolumeSet::RANGE`].
    pub level: f32,
}

impl VolumeSet {
    /// Valid range for [`VolumeSet::level`], enforced by the sender and
    /// re-checked defensively by the daemon before applying the effect.
    pub const RANGE: RangeInclusive<f32> = 0.0..=1.0;
}

impl WireMessage for VolumeSet {
    const DISCRIMINATOR: u8 = 0x03;
    const PAYLOAD_SIZE: usize = 4;
    const NAME: &'static str = "volume-set";

    fn encode_payload(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.level.to_le_bytes());
    }

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            level: decode_f32(Self::DISCRIMINATOR, payload)?,
        })
    }
}

/// Enables the night-light gamma filter at a colour temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightLightOn {
    /// Colour temperature in kelvin. Senders bound this to
    /// [`NightLightOn::TEMPERATURE_RANGE`].
    pub temperature: u16,
}

impl NightLightOn {
    /// Valid range for [`NightLightOn::temperature`].
    pub const TEMPERATURE_RANGE: RangeInclusive<u16> = 1000..=10000;
    /// Temperature applied when the sender does not specify one.
    pub const DEFAULT_TEMPERATURE: u16 = 3000;
}

impl WireMessage for NightLightOn {
    const DISCRIMINATOR: u8 = 0x10;
    const PAYLOAD_SIZE: usize = 2;
    const NAME: &'static str = "night-light-on";

    fn encode_payload(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.temperature.to_le_bytes());
    }

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            temperature: decode_u16(Self::DISCRIMINATOR, payload)?,
        })
    }
}

/// Disables the night-light gamma filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightLightOff;

impl WireMessage for NightLightOff {
    const DISCRIMINATOR: u8 = 0x11;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "night-light-off";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Reveals the quick-settings tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSettingsOpen;

impl WireMessage for QuickSettingsOpen {
    const DISCRIMINATOR: u8 = 0x20;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "quick-settings-open";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Hides the quick-settings tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSettingsClose;

impl WireMessage for QuickSettingsClose {
    const DISCRIMINATOR: u8 = 0x21;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "quick-settings-close";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Toggles the quick-settings tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSettingsToggle;

impl WireMessage for QuickSettingsToggle {
    const DISCRIMINATOR: u8 = 0x22;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "quick-settings-toggle";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Reveals the message tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTrayOpen;

impl WireMessage for MessageTrayOpen {
    const DISCRIMINATOR: u8 = 0x30;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "message-tray-open";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Hides the message tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTrayClose;

impl WireMessage for MessageTrayClose {
    const DISCRIMINATOR: u8 = 0x31;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "message-tray-close";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// Toggles the message tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTrayToggle;

impl WireMessage for MessageTrayToggle {
    const DISCRIMINATOR: u8 = 0x32;
    const PAYLOAD_SIZE: usize = 0;
    const NAME: &'static str = "message-tray-toggle";

    fn encode_payload(&self, _buffer: &mut Vec<u8>) {}

    fn decode_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        decode_empty(Self, payload)
    }
}

/// A decoded wire message, as seen by the daemon's dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Raise the volume by one step.
    VolumeUp(VolumeUp),
    /// Lower the volume by one step.
    VolumeDown(VolumeDown),
    /// Set the volume to an absolute level.
    VolumeSet(VolumeSet),
    /// Enable the night-light filter.
    NightLightOn(NightLightOn),
    /// Disable the night-light filter.
    NightLightOff(NightLightOff),
    /// Reveal the quick-settings tray.
    QuickSettingsOpen(QuickSettingsOpen),
    /// Hide the quick-settings tray.
    QuickSettingsClose(QuickSettingsClose),
    /// Toggle the quick-settings tray.
    QuickSettingsToggle(QuickSettingsToggle),
    /// Reveal the message tray.
    MessageTrayOpen(MessageTrayOpen),
    /// Hide the message tray.
    MessageTrayClose(MessageTrayClose),
    /// Toggle the message tray.
    MessageTrayToggle(MessageTrayToggle),
}

impl Message {
    /// The wire discriminator of the contained message.
    #[must_use]
    pub const fn discriminator(&self) -> u8 {
        match self {
            Self::VolumeUp(_) => VolumeUp::DISCRIMINATOR,
            Self::VolumeDown(_) => VolumeDown::DISCRIMINATOR,
            Self::VolumeSet(_) => VolumeSet::DISCRIMINATOR,
            Self::NightLightOn(_) => NightLightOn::DISCRIMINATOR,
            Self::NightLightOff(_) => NightLightOff::DISCRIMINATOR,
            Self::QuickSettingsOpen(_) => QuickSettingsOpen::DISCRIMINATOR,
            Self::QuickSettingsClose(_) => QuickSettingsClose::DISCRIMINATOR,
            Self::QuickSettingsToggle(_) => QuickSettingsToggle::DISCRIMINATOR,
            Self::MessageTrayOpen(_) => MessageTrayOpen::DISCRIMINATOR,
            Self::MessageTrayClose(_) => MessageTrayClose::DISCRIMINATOR,
            Self::MessageTrayToggle(_) => MessageTrayToggle::DISCRIMINATOR,
        }
    }

    /// The registered name of the contained message.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VolumeUp(_) => VolumeUp::NAME,
            Self::VolumeDown(_) => VolumeDown::NAME,
            Self::VolumeSet(_) => VolumeSet::NAME,
            Self::NightLightOn(_) => NightLightOn::NAME,
            Self::NightLightOff(_) => NightLightOff::NAME,
            Self::QuickSettingsOpen(_) => QuickSettingsOpen::NAME,
            Self::QuickSettingsClose(_) => QuickSettingsClose::NAME,
            Self::QuickSettingsToggle(_) => QuickSettingsToggle::NAME,
            Self::MessageTrayOpen(_) => MessageTrayOpen::NAME,
            Self::MessageTrayClose(_) => MessageTrayClose::NAME,
            Self::MessageTrayToggle(_) => MessageTrayToggle::NAME,
        }
    }

    /// Encodes the contained message as a complete wire frame.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::VolumeUp(message) => message.encode(),
            Self::VolumeDown(message) => message.encode(),
            Self::VolumeSet(message) => message.encode(),
            Self::NightLightOn(message) => message.encode(),
            Self::NightLightOff(message) => message.encode(),
            Self::QuickSettingsOpen(message) => message.encode(),
            Self::QuickSettingsClose(message) => message.encode(),
            Self::QuickSettingsToggle(message) => message.encode(),
            Self::MessageTrayOpen(message) => message.encode(),
            Self::MessageTrayClose(message) => message.encode(),
            Self::MessageTrayToggle(message) => message.encode(),
        }
    }
}

impl From<VolumeUp> for Message {
    fn from(message: VolumeUp) -> Self {
        Self::VolumeUp(message)
    }
}

impl From<VolumeDown> for Message {
    fn from(message: VolumeDown) -> Self {
        Self::VolumeDown(message)
    }
}

impl From<VolumeSet> for Message {
    fn from(message: VolumeSet) -> Self {
        Self::VolumeSet(message)
    }
}

impl From<NightLightOn> for Message {
    fn from(message: NightLightOn) -> Self {
        Self::NightLightOn(message)
    }
}

impl From<NightLightOff> for Message {
    fn from(message: NightLightOff) -> Self {
        Self::NightLightOff(message)
    }
}

impl From<QuickSettingsOpen> for Message {
    fn from(message: QuickSettingsOpen) -> Self {
        Self::QuickSettingsOpen(message)
    }
}

impl From<QuickSettingsClose> for Message {
    fn from(message: QuickSettingsClose) -> Self {
        Self::QuickSettingsClose(message)
    }
}

impl From<QuickSettingsToggle> for Message {
    fn from(message: QuickSettingsToggle) -> Self {
        Self::QuickSettingsToggle(message)
    }
}

impl From<MessageTrayOpen> for Message {
    fn from(message: MessageTrayOpen) -> Self {
        Self::MessageTrayOpen(message)
    }
}

impl From<MessageTrayClose> for Message {
    fn from(message: MessageTrayClose) -> Self {
        Self::MessageTrayClose(message)
    }
}

impl From<MessageTrayToggle> for Message {
    fn from(message: MessageTrayToggle) -> Self {
        Self::MessageTrayToggle(message)
    }
}
