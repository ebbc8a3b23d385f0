//! Power-down, LDAC mask and reset commands.
use embedded_hal::i2c::I2c;

use super::Ad569x;
use crate::commands::DeviceCommand;
use crate::common::{ChannelMask, DeviceAddress};
use crate::error::Error;
use crate::power::{PowerState, PowerStates};

impl<I2C: I2c> Ad569x<I2C> {
    /// Set the output mode of all four channels.
    ///
    /// Channels in a power-down mode keep their register contents; setting them
    /// back to [`PowerState::NormalOperation`] restores the previous output.
    ///
    /// ```rust
    /// # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
    /// use ad569x_hal::Ad569x;
    /// use ad569x_hal::common::DeviceAddress;
    /// use ad569x_hal::power::{PowerState, PowerStates};
    ///
    /// # let i2c = Mock::new(&[Transaction::write(0x09, vec![0x40, 0x00, 0xE4])]);
    /// let mut dac = Ad569x::new(i2c);
    /// let states = PowerStates {
    ///     a: PowerState::NormalOperation,
    ///     b: PowerState::OneKOhmToGround,
    ///     c: PowerState::HundredKOhmToGround,
    ///     d: PowerState::ThreeState,
    /// };
    /// dac.set_power_state(DeviceAddress::A1_LOW_A0_HIGH, states)?;
    /// # dac.release().done();
    /// # Ok::<(), ad569x_hal::Error<embedded_hal::i2c::ErrorKind>>(())
    /// ```
    ///
    /// # Datasheet
    ///
    /// See the power-down operation section and the power-down/power-up command.
    pub fn set_power_state(
        &mut self,
        address: DeviceAddress,
        states: PowerStates,
    ) -> Result<(), Error<I2C::Error>> {
        self.send(address, DeviceCommand::power_state(states))
    }

    /// Put every channel into the same power-down mode.
    pub fn power_down(
        &mut self,
        address: DeviceAddress,
        state: PowerState,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_power_state(address, PowerStates::uniform(state))
    }

    /// Return every channel to normal operation.
    pub fn power_up(&mut self, address: DeviceAddress) -> Result<(), Error<I2C::Error>> {
        self.power_down(address, PowerState::NormalOperation)
    }

    /// Choose which channels ignore the hardware LDAC pin.
    ///
    /// Channels in `channels` see LDAC as permanently asserted, so writes to their
    /// input registers reach the output immediately. Channels outside the mask wait
    /// for the LDAC pin. [`ChannelMask::NONE`] (the power-on default) hands every
    /// channel back to the pin.
    ///
    /// # Datasheet
    ///
    /// See the LDAC mask register section.
    pub fn set_ldac_mask(
        &mut self,
        address: DeviceAddress,
        channels: impl Into<ChannelMask>,
    ) -> Result<(), Error<I2C::Error>> {
        self.send(address, DeviceCommand::ldac_mask(channels.into()))
    }

    /// Reset the device to its power-on state.
    ///
    /// All registers return to their power-on values. The driver keeps no device
    /// state of its own, so there is nothing to reset on this side.
    pub fn reset(&mut self, address: DeviceAddress) -> Result<(), Error<I2C::Error>> {
        self.send(address, DeviceCommand::reset())
    }
}
