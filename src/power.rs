//! Power-down modes of the DAC outputs.
use bit_field::BitField;

use crate::common::Channel;
use crate::error::InvalidArgument;

/// Output mode of a single channel.
///
/// In any of the power-down modes the channel's output amplifier is shut off and
/// the output pin is left in the given state. The input and DAC registers keep
/// their contents, so returning to [`PowerState::NormalOperation`] restores the
/// previous output.
///
/// ## Datasheet
///
/// See the power-down operation section of the AD5696 datasheet (PD1/PD0 bits).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Output driven normally (power-on default).
    #[default]
    NormalOperation,
    /// Powered down, output connected to ground through 1 kΩ.
    OneKOhmToGround,
    /// Powered down, output connected to ground through 100 kΩ.
    HundredKOhmToGround,
    /// Powered down, output left floating.
    ThreeState,
}

impl TryFrom<u8> for PowerState {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 => Ok(Self::NormalOperation),
            0b01 => Ok(Self::OneKOhmToGround),
            0b10 => Ok(Self::HundredKOhmToGround),
            0b11 => Ok(Self::ThreeState),
            _ => Err(InvalidArgument::PowerState(value)),
        }
    }
}

impl From<PowerState> for u8 {
    fn from(value: PowerState) -> Self {
        match value {
            PowerState::NormalOperation => 0b00,
            PowerState::OneKOhmToGround => 0b01,
            PowerState::HundredKOhmToGround => 0b10,
            PowerState::ThreeState => 0b11,
        }
    }
}

/// Output mode of all four channels, written together in one command.
///
/// ```rust
/// # use ad569x_hal::power::{PowerState, PowerStates};
/// let states = PowerStates {
///     d: PowerState::ThreeState,
///     ..PowerStates::uniform(PowerState::NormalOperation)
/// };
/// assert_eq!(states.packed(), 0b1100_0000);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerStates {
    /// Channel A mode.
    pub a: PowerState,
    /// Channel B mode.
    pub b: PowerState,
    /// Channel C mode.
    pub c: PowerState,
    /// Channel D mode.
    pub d: PowerState,
}

impl PowerStates {
    /// Every channel in the same mode.
    pub fn uniform(state: PowerState) -> Self {
        Self {
            a: state,
            b: state,
            c: state,
            d: state,
        }
    }

    /// Mode of one channel.
    pub fn get(&self, channel: Channel) -> PowerState {
        match channel {
            Channel::A => self.a,
            Channel::B => self.b,
            Channel::C => self.c,
            Channel::D => self.d,
        }
    }

    /// Change the mode of one channel.
    pub fn with(mut self, channel: Channel, state: PowerState) -> Self {
        match channel {
            Channel::A => self.a = state,
            Channel::B => self.b = state,
            Channel::C => self.c = state,
            Channel::D => self.d = state,
        }
        self
    }

    /// Build from raw 2-bit codes, channel A first.
    ///
    /// Each code is checked separately, and the first one above 3 is reported.
    pub fn from_codes([a, b, c, d]: [u8; 4]) -> Result<Self, InvalidArgument> {
        Ok(Self {
            a: a.try_into()?,
            b: b.try_into()?,
            c: c.try_into()?,
            d: d.try_into()?,
        })
    }

    /// Pack the four modes into the power-down register byte.
    ///
    /// Channel A occupies bits 1..=0, B bits 3..=2, C bits 5..=4 and D bits 7..=6.
    pub fn packed(&self) -> u8 {
        let mut byte = 0u8;
        for channel in Channel::ALL {
            let start = 2 * channel.bit_index();
            byte.set_bits(start..start + 2, self.get(channel).into());
        }
        byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_of_each_packs_to_e4() {
        let states = PowerStates::from_codes([0, 1, 2, 3]).unwrap();
        assert_eq!(states.d, PowerState::ThreeState);
        assert_eq!(states.packed(), 0b1110_0100);
    }

    #[test]
    fn uniform_three_state_fills_the_byte() {
        assert_eq!(PowerStates::uniform(PowerState::ThreeState).packed(), 0xFF);
        assert_eq!(PowerStates::default().packed(), 0x00);
    }

    #[test]
    fn each_field_lands_in_its_own_bits() {
        let b_only = PowerStates::default().with(Channel::B, PowerState::HundredKOhmToGround);
        assert_eq!(b_only.packed(), 0b0000_1000);
        let c_only = PowerStates::default().with(Channel::C, PowerState::OneKOhmToGround);
        assert_eq!(c_only.packed(), 0b0001_0000);
    }

    #[test]
    fn out_of_range_state_is_rejected() {
        assert_eq!(
            PowerState::try_from(4u8),
            Err(InvalidArgument::PowerState(4))
        );
        assert_eq!(
            PowerStates::from_codes([0, 0, 4, 0]),
            Err(InvalidArgument::PowerState(4))
        );
    }
}
