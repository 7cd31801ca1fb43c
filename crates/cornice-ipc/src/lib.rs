//! Fixed-layout wire protocol shared by `cornicectl` and the panel daemon.
//!
//! Every message on the control socket is a discriminator byte followed by a
//! payload whose width is a pure function of that discriminator; multi-byte
//! fields are little-endian. There are no lengths on the wire and no
//! self-describing fields, so a receiver can always size its reads exactly
//! and concurrent connections never share parse state.
//!
//! The sending side works through typed structs implementing [`WireMessage`];
//! the receiving side works through the registered [`MESSAGE_TABLE`], which
//! maps each discriminator to its payload width and decode function and
//! yields a [`Message`]. Adding a message type adds one struct, one enum
//! variant, and one table row.

mod catalogue;
mod error;
mod message;

pub use catalogue::{MAX_PAYLOAD_SIZE, MESSAGE_TABLE, MessageDescriptor, decode, descriptor_for};
pub use error::ProtocolError;
pub use message::{
    HEADER_SIZE, Message, MessageTrayClose, MessageTrayOpen, MessageTrayToggle, NightLightOff,
    NightLightOn, QuickSettingsClose, QuickSettingsOpen, QuickSettingsToggle, VolumeDown,
    VolumeSet, VolumeUp, WireMessage,
};
