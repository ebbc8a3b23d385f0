//! Encoding of command bytes and payloads.
use bit_field::BitField;

use crate::common::ChannelMask;
use crate::constants::{LDAC_MASK_COMMAND, POWER_STATE_COMMAND, RESET_COMMAND};
use crate::error::InvalidArgument;
use crate::power::PowerStates;
use crate::Readback;

/// What a channel command does to the input and DAC registers of the selected
/// channels.
///
/// For a read-back, the same code selects which register contents are returned.
///
/// ## Datasheet
///
/// See the command definitions table (C3..C0) in the AD5696 datasheet. Only the
/// codes with the top two command bits clear are channel operations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Do nothing.
    #[default]
    NoOperation,
    /// Write to the input register of each selected channel.
    ///
    /// The output only changes once the channel is updated, either by LDAC or by
    /// [`Operation::UpdateFromInput`].
    WriteInputRegister,
    /// Copy each selected channel's input register into its DAC register.
    UpdateFromInput,
    /// Write to the input register and DAC register of each selected channel,
    /// changing the output immediately.
    WriteAndUpdate,
}

impl TryFrom<u8> for Operation {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoOperation),
            1 => Ok(Self::WriteInputRegister),
            2 => Ok(Self::UpdateFromInput),
            3 => Ok(Self::WriteAndUpdate),
            _ => Err(InvalidArgument::Operation(value)),
        }
    }
}

impl From<Operation> for u8 {
    fn from(value: Operation) -> Self {
        match value {
            Operation::NoOperation => 0,
            Operation::WriteInputRegister => 1,
            Operation::UpdateFromInput => 2,
            Operation::WriteAndUpdate => 3,
        }
    }
}

/// Command byte for a channel operation.
///
/// Bits 7..=6 are zero, bits 5..=4 hold the operation and bits 3..=0 the
/// channel mask.
pub(crate) fn channel_command(operation: Operation, channels: ChannelMask) -> u8 {
    let mut command = 0u8;
    command.set_bits(4..=5, operation.into());
    command.set_bits(0..=3, channels.into());
    command
}

/// A command byte followed by its two payload bytes.
///
/// Every write to the device is three bytes long, even when the command ignores
/// the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeviceCommand {
    pub(crate) command: u8,
    pub(crate) payload: [u8; 2],
}

impl DeviceCommand {
    /// Write a 16-bit code to the selected channels, most-significant byte first.
    pub(crate) fn write_channels(operation: Operation, channels: ChannelMask, value: u16) -> Self {
        Self {
            command: channel_command(operation, channels),
            payload: value.to_be_bytes(),
        }
    }

    /// Configure the power-down mode of all four channels.
    ///
    /// The first payload byte is unused by the device.
    pub(crate) fn power_state(states: PowerStates) -> Self {
        Self {
            command: POWER_STATE_COMMAND,
            payload: [0x00, states.packed()],
        }
    }

    /// Select which channels ignore the LDAC pin.
    pub(crate) fn ldac_mask(channels: ChannelMask) -> Self {
        Self {
            command: LDAC_MASK_COMMAND,
            payload: [0x00, channels.into()],
        }
    }

    /// Return the device to its power-on state.
    pub(crate) fn reset() -> Self {
        Self {
            command: RESET_COMMAND,
            payload: [0x00, 0x00],
        }
    }

    /// Bytes as written on the bus.
    pub(crate) fn bytes(&self) -> [u8; 3] {
        let [high, low] = self.payload;
        [self.command, high, low]
    }
}

/// Decode read-back data into one code per channel.
///
/// Each channel is transmitted as a big-endian 16-bit value. The buffer length is
/// always twice the number of selected channels, at most eight bytes.
pub(crate) fn decode_readback(bytes: &[u8]) -> Readback {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}
