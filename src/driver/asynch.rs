//! Async driver built on `embedded_hal_async`.
//!
//! The command encoding is shared with the blocking [`Ad569x`]; only the bus
//! calls differ.
//!
//! [`Ad569x`]: crate::Ad569x
use embedded_hal_async::i2c::I2c;

use super::transport_error;
use crate::Readback;
use crate::commands::{DeviceCommand, Operation, channel_command, decode_readback};
use crate::common::{Channel, ChannelMask, DeviceAddress, check_base_address};
use crate::constants::{BASE_ADDRESS, CHANNEL_COUNT};
use crate::error::{Error, InvalidArgument};
use crate::power::{PowerState, PowerStates};

/// Async driver for up to four AD569x DACs sharing one I2C bus.
///
/// Every method matches the method of the same name on the blocking
/// [`Ad569x`](crate::Ad569x), including its errors.
#[derive(Debug)]
pub struct Ad569xAsync<I2C> {
    i2c: I2C,
    base_address: u8,
}

impl<I2C> Ad569xAsync<I2C> {
    /// Create a driver using the default base address (0x08).
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            base_address: BASE_ADDRESS,
        }
    }

    /// Create a driver for a device block at a different base address.
    pub fn with_base_address(i2c: I2C, base: u8) -> Result<Self, InvalidArgument> {
        Ok(Self {
            i2c,
            base_address: check_base_address(base)?,
        })
    }

    /// The 7-bit address of the device with both address pins tied low.
    pub fn base_address(&self) -> u8 {
        self.base_address
    }

    /// The 7-bit I2C address used for the given device.
    pub fn physical_address(&self, address: DeviceAddress) -> u8 {
        address.in_block(self.base_address)
    }

    /// Destroy the driver and return the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Ad569xAsync<I2C> {
    /// Write a command and its payload in one transfer.
    async fn send(
        &mut self,
        address: DeviceAddress,
        command: DeviceCommand,
    ) -> Result<(), Error<I2C::Error>> {
        let address = self.physical_address(address);
        let bytes = command.bytes();
        #[cfg(feature = "defmt")]
        defmt::trace!("AD569x write to {=u8:#x}: {=[u8]:#x}", address, &bytes[..]);
        self.i2c
            .write(address, &bytes)
            .await
            .map_err(|source| transport_error(address, command.command, source))
    }

    /// Send a channel command byte and read back two bytes per selected channel
    /// in one write-read transaction.
    async fn read_back(
        &mut self,
        address: DeviceAddress,
        command: u8,
        n_channels: usize,
    ) -> Result<Readback, Error<I2C::Error>> {
        let address = self.physical_address(address);
        let mut buffer = [0u8; 2 * CHANNEL_COUNT];
        let response = &mut buffer[..2 * n_channels];
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "AD569x read from {=u8:#x}: command {=u8:#x}, {=usize} bytes",
            address,
            command,
            response.len()
        );
        self.i2c
            .write_read(address, &[command], response)
            .await
            .map_err(|source| transport_error(address, command, source))?;
        Ok(decode_readback(response))
    }

    /// Write a 16-bit code to one or more channels.
    pub async fn write_channels(
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
        .await
    }

    /// Write a code to the selected channels and update their outputs at once.
    pub async fn write_and_update(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_channels(address, channels, Operation::WriteAndUpdate, value)
            .await
    }

    /// Move previously written input register contents to the outputs.
    pub async fn update_from_input(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_channels(address, channels, Operation::UpdateFromInput, 0)
            .await
    }

    /// Read the register contents of one or more channels, A first.
    pub async fn read_channels(
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
        .await
    }

    /// Read the register contents of a single channel.
    pub async fn read_channel(
        &mut self,
        address: DeviceAddress,
        channel: Channel,
        operation: Operation,
    ) -> Result<u16, Error<I2C::Error>> {
        let values = self.read_channels(address, channel, operation).await?;
        Ok(values[0])
    }

    /// Set the output mode of all four channels.
    pub async fn set_power_state(
        &mut self,
        address: DeviceAddress,
        states: PowerStates,
    ) -> Result<(), Error<I2C::Error>> {
        self.send(address, DeviceCommand::power_state(states)).await
    }

    /// Put every channel into the same power-down mode.
    pub async fn power_down(
        &mut self,
        address: DeviceAddress,
        state: PowerState,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_power_state(address, PowerStates::uniform(state))
            .await
    }

    /// Return every channel to normal operation.
    pub async fn power_up(&mut self, address: DeviceAddress) -> Result<(), Error<I2C::Error>> {
        self.power_down(address, PowerState::NormalOperation).await
    }

    /// Choose which channels ignore the hardware LDAC pin.
    pub async fn set_ldac_mask(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
    ) -> Result<(), Error<I2C::Error>> {
        self.send(address, DeviceCommand::ldac_mask(channels.into()))
            .await
    }

    /// Reset the device to its power-on state.
    pub async fn reset(&mut self, address: DeviceAddress) -> Result<(), Error<I2C::Error>> {
        self.send(address, DeviceCommand::reset()).await
    }
}
