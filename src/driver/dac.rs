//! Writing and reading the channel registers.
use embedded_hal::i2c::I2c;

use super::Ad569x;
use crate::Readback;
use crate::commands::{DeviceCommand, Operation, channel_command};
use crate::common::{Channel, ChannelMask, DeviceAddress};
use crate::error::Error;

impl<I2C: I2c> Ad569x<I2C> {
    /// Write a 16-bit code to one or more channels.
    ///
    /// The same code is written to every channel in `channels`. What happens to the
    /// input and DAC registers depends on `operation`:
    ///
    /// - [`Operation::WriteInputRegister`] stores the code without changing the
    ///   output (unless the channel ignores LDAC, see [`Ad569x::set_ldac_mask`]).
    /// - [`Operation::UpdateFromInput`] ignores the code and copies each input
    ///   register into its DAC register.
    /// - [`Operation::WriteAndUpdate`] stores the code and changes the output.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument::EmptyChannelMask`] if `channels` selects nothing. The
    ///   bus is not touched.
    /// - [`Error::Transport`] if the write fails.
    ///
    /// [`InvalidArgument::EmptyChannelMask`]: crate::InvalidArgument::EmptyChannelMask
    ///
    /// # Datasheet
    ///
    /// See the I2C write operation section: the command byte is followed by the
    /// code, most-significant byte first.
    pub fn write_channels(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
        operation: Operation,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        let channels = channels.into().non_empty()?;
        self.send(
            address,
            DeviceCommand::write_channels(operation, channels, value),
        )
    }

    /// Write a code to the selected channels and update their outputs at once.
    pub fn write_and_update(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_channels(address, channels, Operation::WriteAndUpdate, value)
    }

    /// Move previously written input register contents to the outputs.
    ///
    /// This is the software equivalent of pulsing LDAC for the selected channels.
    pub fn update_from_input(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_channels(address, channels, Operation::UpdateFromInput, 0)
    }

    /// Read the register contents of one or more channels.
    ///
    /// `operation` is encoded into the command byte exactly as for a write and
    /// selects which register is read back. One code is returned per selected
    /// channel, in ascending channel order (A first) regardless of how the mask
    /// was built.
    ///
    /// The command byte and the two bytes per channel are exchanged in a single
    /// write-read transaction.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument::EmptyChannelMask`] if `channels` selects nothing. The
    ///   bus is not touched.
    /// - [`Error::Transport`] if the transaction fails. No values are returned
    ///   in that case, even if some bytes were received.
    ///
    /// [`InvalidArgument::EmptyChannelMask`]: crate::InvalidArgument::EmptyChannelMask
    pub fn read_channels(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
        operation: Operation,
    ) -> Result<Readback, Error<I2C::Error>> {
        let channels = channels.into().non_empty()?;
        self.read_back(
            address,
            channel_command(operation, channels),
            channels.count(),
        )
    }

    /// Read the register contents of a single channel.
    ///
    /// See [`Ad569x::read_channels`].
    pub fn read_channel(
        &mut self,
        address: DeviceAddress,
        channel: Channel,
        operation: Operation,
    ) -> Result<u16, Error<I2C::Error>> {
        let values = self.read_channels(address, channel, operation)?;
        // A one-channel mask always reads back exactly one value.
        Ok(values[0])
    }
}
