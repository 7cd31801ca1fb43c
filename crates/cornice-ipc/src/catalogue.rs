//! The registered message catalogue and discriminator-driven decoding.
//!
//! The catalogue is the receiver-side counterpart of [`WireMessage`]: a
//! static table mapping each discriminator to its payload width and decode
//! function. Registering a new message type means adding one table row (plus
//! the typed struct and its [`Message`] variant); no decode path is edited.

use crate::error::ProtocolError;
use crate::message::{
    Message, MessageTrayClose, MessageTrayOpen, MessageTrayToggle, NightLightOff, NightLightOn,
    QuickSettingsClose, QuickSettingsOpen, QuickSettingsToggle, VolumeDown, VolumeSet, VolumeUp,
    WireMessage,
};

/// Largest payload width of any registered message type.
///
/// Receivers can size a single reusable buffer from this; the invariant is
/// checked against the catalogue in tests.
pub const MAX_PAYLOAD_SIZE: usize = 4;

/// Registration record for one wire message type.
pub struct MessageDescriptor {
    /// Wire discriminator identifying the message type.
    pub discriminator: u8,
    /// Exact payload width in bytes.
    pub payload_size: usize,
    /// Registered name, used in logs and diagnostics.
    pub name: &'static str,
    decode: fn(&[u8]) -> Result<Message, ProtocolError>,
}

impl MessageDescriptor {
    const fn register<M>() -> Self
    where
        M: WireMessage,
        Message: From<M>,
    {
        Self {
            discriminator: M::DISCRIMINATOR,
            payload_size: M::PAYLOAD_SIZE,
            name: M::NAME,
            decode: decode_into::<M>,
        }
    }

    /// Decodes a payload of exactly [`MessageDescriptor::payload_size`] bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] when the payload does not match the
    /// registered width.
    pub fn decode_payload(&self, payload: &[u8]) -> Result<Message, ProtocolError> {
        (self.decode)(payload)
    }
}

fn decode_into<M>(payload: &[u8]) -> Result<Message, ProtocolError>
where
    M: WireMessage,
    Message: From<M>,
{
    M::decode_payload(payload).map(Message::from)
}

/// Every message type registered with the protocol, one row per type.
pub static MESSAGE_TABLE: &[MessageDescriptor] = &[
    MessageDescriptor::register::<VolumeUp>(),
    MessageDescriptor::register::<VolumeDown>(),
    MessageDescriptor::register::<VolumeSet>(),
    MessageDescriptor::register::<NightLightOn>(),
    MessageDescriptor::register::<NightLightOff>(),
    MessageDescriptor::register::<QuickSettingsOpen>(),
    MessageDescriptor::register::<QuickSettingsClose>(),
    MessageDescriptor::register::<QuickSettingsToggle>(),
    MessageDescriptor::register::<MessageTrayOpen>(),
    MessageDescriptor::register::<MessageTrayClose>(),
    MessageDescriptor::register::<MessageTrayToggle>(),
];

/// Looks up the registration record for a discriminator.
#[must_use]
pub fn descriptor_for(discriminator: u8) -> Option<&'static MessageDescriptor> {
    MESSAGE_TABLE
        .iter()
        .find(|descriptor| descriptor.discriminator == discriminator)
}

/// Decodes a complete wire frame.
///
/// Reads the discriminator header, then exactly the payload width it implies.
/// The input must contain the whole frame and nothing else; receivers reading
/// from a stream size their payload read from [`descriptor_for`] and pass the
/// exact slice here.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingHeader`] for empty input,
/// [`ProtocolError::UnknownMessage`] for an unregistered discriminator,
/// [`ProtocolError::Truncated`] when fewer payload bytes are present than the
/// discriminator implies, and [`ProtocolError::TrailingBytes`] when more are.
pub fn decode(bytes: &[u8]) -> Result<Message, ProtocolError> {
    let (&discriminator, payload) = bytes.split_first().ok_or(ProtocolError::MissingHeader)?;
    let descriptor = descriptor_for(discriminator)
        .ok_or(ProtocolError::UnknownMessage { discriminator })?;
    if payload.len() < descriptor.payload_size {
        return Err(ProtocolError::Truncated {
            discriminator,
            expected: descriptor.payload_size,
            actual: payload.len(),
        });
    }
    if payload.len() > descriptor.payload_size {
        return Err(ProtocolError::TrailingBytes {
            discriminator,
            extra: payload.len() - descriptor.payload_size,
        });
    }
    descriptor.decode_payload(payload)
}

#[cfg(test)]
mod tests {
    use crate::message::HEADER_SIZE;

    use super::*;

    fn catalogue_messages() -> Vec<Message> {
        vec![
            Message::VolumeUp(VolumeUp),
            Message::VolumeDown(VolumeDown),
            Message::VolumeSet(VolumeSet { level: 0.5 }),
            Message::NightLightOn(NightLightOn { temperature: 3000 }),
            Message::NightLightOff(NightLightOff),
            Message::QuickSettingsOpen(QuickSettingsOpen),
            Message::QuickSettingsClose(QuickSettingsClose),
            Message::QuickSettingsToggle(QuickSettingsToggle),
            Message::MessageTrayOpen(MessageTrayOpen),
            Message::MessageTrayClose(MessageTrayClose),
            Message::MessageTrayToggle(MessageTrayToggle),
        ]
    }

    #[test]
    fn every_registered_message_round_trips() -> Result<(), ProtocolError> {
        for message in catalogue_messages() {
            let decoded = decode(&message.encode())?;
            assert_eq!(decoded, message, "round trip failed for {}", message.name());
        }
        Ok(())
    }

    #[test]
    fn volume_set_round_trips_domain_boundaries() -> Result<(), ProtocolError> {
        for level in [0.0_f32, 0.25, 1.0] {
            let decoded = decode(&VolumeSet { level }.encode())?;
            assert_eq!(decoded, Message::VolumeSet(VolumeSet { level }));
        }
        Ok(())
    }

    #[test]
    fn night_light_round_trips_domain_boundaries() -> Result<(), ProtocolError> {
        for temperature in [1000_u16, 3000, 10000] {
            let decoded = decode(&NightLightOn { temperature }.encode())?;
            assert_eq!(decoded, Message::NightLightOn(NightLightOn { temperature }));
        }
        Ok(())
    }

    #[test]
    fn discriminators_are_unique() {
        for (index, descriptor) in MESSAGE_TABLE.iter().enumerate() {
            let duplicate = MESSAGE_TABLE
                .iter()
                .skip(index + 1)
                .find(|other| other.discriminator == descriptor.discriminator);
            assert!(
                duplicate.is_none(),
                "duplicate discriminator 0x{:02x}",
                descriptor.discriminator
            );
        }
    }

    #[test]
    fn registered_sizes_match_encoded_frames() {
        for message in catalogue_messages() {
            let descriptor = match descriptor_for(message.discriminator()) {
                Some(descriptor) => descriptor,
                None => panic!("missing descriptor for {}", message.name()),
            };
            assert_eq!(
                message.encode().len(),
                HEADER_SIZE + descriptor.payload_size,
                "size mismatch for {}",
                message.name()
            );
        }
    }

    #[test]
    fn max_payload_size_covers_the_catalogue() {
        let widest = MESSAGE_TABLE
            .iter()
            .map(|descriptor| descriptor.payload_size)
            .max();
        assert_eq!(widest, Some(MAX_PAYLOAD_SIZE));
    }

    #[test]
    fn empty_input_is_missing_header() {
        assert_eq!(decode(&[]), Err(ProtocolError::MissingHeader));
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        assert_eq!(
            decode(&[0x7f]),
            Err(ProtocolError::UnknownMessage {
                discriminator: 0x7f
            })
        );
    }

    #[test]
    fn truncated_frame_is_rejected_for_every_sized_message() {
        for descriptor in MESSAGE_TABLE
            .iter()
            .filter(|descriptor| descriptor.payload_size > 0)
        {
            let mut frame = vec![descriptor.discriminator];
            frame.resize(descriptor.payload_size, 0x00);
            assert_eq!(
                decode(&frame),
                Err(ProtocolError::Truncated {
                    discriminator: descriptor.discriminator,
                    expected: descriptor.payload_size,
                    actual: descriptor.payload_size - 1,
                }),
                "truncation not detected for {}",
                descriptor.name
            );
        }
    }

    #[test]
    fn surplus_input_is_rejected() {
        let mut frame = VolumeUp.encode();
        frame.push(0xff);
        assert_eq!(
            decode(&frame),
            Err(ProtocolError::TrailingBytes {
                discriminator: VolumeUp::DISCRIMINATOR,
                extra: 1,
            })
        );
    }
}
