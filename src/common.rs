//! Device addressing and channel selection.

use core::ops::{BitOr, BitOrAssign};

use bit_field::BitField;

use crate::constants::{BASE_ADDRESS, MAX_BASE_ADDRESS};
use crate::error::InvalidArgument;

/// Pin-selected address of one device in the address block.
///
/// Up to four devices share one block of I2C addresses, told apart by the logic
/// levels strapped on their A1 and A0 pins:
///
/// | A1   | A0   | `DeviceAddress` | 7-bit address (default base) |
/// |------|------|-----------------|------------------------------|
/// | GND  | GND  | 0               | 0x08                         |
/// | GND  | VDD  | 1               | 0x09                         |
/// | VDD  | GND  | 2               | 0x0A                         |
/// | VDD  | VDD  | 3               | 0x0B                         |
///
/// ```rust
/// # use ad569x_hal::common::DeviceAddress;
/// let address = DeviceAddress::try_from(2u8).unwrap();
/// assert_eq!(address, DeviceAddress::A1_HIGH_A0_LOW);
/// assert_eq!(address.physical(0x08), Ok(0x0A));
/// assert!(address.physical(0x7E).is_err());
/// assert!(DeviceAddress::try_from(4u8).is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// A1 and A0 both tied low.
    pub const A1_LOW_A0_LOW: Self = Self(0);
    /// A1 tied low, A0 tied high.
    pub const A1_LOW_A0_HIGH: Self = Self(1);
    /// A1 tied high, A0 tied low.
    pub const A1_HIGH_A0_LOW: Self = Self(2);
    /// A1 and A0 both tied high.
    pub const A1_HIGH_A0_HIGH: Self = Self(3);

    /// The two address-select bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// 7-bit I2C address of this device in the block starting at `base`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::BaseAddress`] if either of the two low bits of `base` is
    /// set, or if `base + 3` is not a 7-bit address.
    pub fn physical(self, base: u8) -> Result<u8, InvalidArgument> {
        check_base_address(base).map(|base| self.in_block(base))
    }

    /// 7-bit I2C address of this device with the default [`BASE_ADDRESS`].
    ///
    /// [`BASE_ADDRESS`]: crate::BASE_ADDRESS
    pub fn default_physical(self) -> u8 {
        self.in_block(BASE_ADDRESS)
    }

    /// Address in a block whose base has already passed [`check_base_address`].
    pub(crate) fn in_block(self, base: u8) -> u8 {
        base + self.0
    }
}

/// Check a base address leaves room for four devices in the 7-bit space.
pub(crate) fn check_base_address(base: u8) -> Result<u8, InvalidArgument> {
    if base & 0b11 != 0 || base > MAX_BASE_ADDRESS {
        return Err(InvalidArgument::BaseAddress(base));
    }
    Ok(base)
}

impl TryFrom<u8> for DeviceAddress {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=3 => Ok(Self(value)),
            _ => Err(InvalidArgument::DeviceAddress(value)),
        }
    }
}

impl From<DeviceAddress> for u8 {
    fn from(value: DeviceAddress) -> Self {
        value.0
    }
}

/// One of the four DAC output channels.
///
/// The discriminant order matches the bit position of each channel in a
/// [`ChannelMask`], which is fixed by the device and does not follow the order in
/// which channels are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel A (mask bit 0).
    A,
    /// Channel B (mask bit 1).
    B,
    /// Channel C (mask bit 2).
    C,
    /// Channel D (mask bit 3).
    D,
}

impl Channel {
    /// All channels in ascending bit order.
    pub const ALL: [Channel; 4] = [Channel::A, Channel::B, Channel::C, Channel::D];

    /// Bit position of the channel in a channel mask.
    pub fn bit_index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
            Channel::C => 2,
            Channel::D => 3,
        }
    }
}

/// A set of DAC channels.
///
/// Build a mask by combining channels with `|`:
///
/// ```rust
/// # use ad569x_hal::common::{Channel, ChannelMask};
/// let mask = Channel::A | Channel::C;
/// assert_eq!(mask.bits(), 0b0101);
/// assert_eq!(mask.count(), 2);
/// assert!(mask.contains(Channel::C));
/// assert!(!mask.contains(Channel::B));
/// assert_eq!(ChannelMask::try_from(0b0101u8), Ok(mask));
/// ```
///
/// The empty mask can be represented, since the LDAC mask register uses it to
/// hand every channel back to the LDAC pin, but channel reads and writes reject it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMask(u8);

impl ChannelMask {
    /// No channels selected.
    pub const NONE: Self = Self(0);
    /// All four channels selected.
    pub const ALL: Self = Self(0b1111);

    /// Raw 4-bit mask, channel A in bit 0.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// True if no channel is selected.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected channels.
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if `channel` is part of the mask.
    pub fn contains(self, channel: Channel) -> bool {
        self.0.get_bit(channel.bit_index())
    }

    /// Selected channels in ascending order (A first).
    ///
    /// This is the order in which the device returns read-back values.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |&c| self.contains(c))
    }

    /// Reject the empty mask.
    pub(crate) fn non_empty(self) -> Result<Self, InvalidArgument> {
        if self.is_empty() {
            Err(InvalidArgument::EmptyChannelMask)
        } else {
            Ok(self)
        }
    }
}

impl TryFrom<u8> for ChannelMask {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=0b1111 => Ok(Self(value)),
            _ => Err(InvalidArgument::ChannelMask(value)),
        }
    }
}

impl From<Channel> for ChannelMask {
    fn from(value: Channel) -> Self {
        let mut bits = 0u8;
        bits.set_bit(value.bit_index(), true);
        Self(bits)
    }
}

impl From<ChannelMask> for u8 {
    fn from(value: ChannelMask) -> Self {
        value.0
    }
}

impl FromIterator<Channel> for ChannelMask {
    fn from_iter<T: IntoIterator<Item = Channel>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, |mask, c| mask | c)
    }
}

impl BitOr for Channel {
    type Output = ChannelMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        ChannelMask::from(self) | rhs
    }
}

impl BitOr<Channel> for ChannelMask {
    type Output = ChannelMask;

    fn bitor(self, rhs: Channel) -> Self::Output {
        self | ChannelMask::from(rhs)
    }
}

impl BitOr for ChannelMask {
    type Output = ChannelMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign<Channel> for ChannelMask {
    fn bitor_assign(&mut self, rhs: Channel) {
        *self = *self | rhs;
    }
}

/// Convert a wider integer into a 16-bit DAC code.
///
/// The driver takes DAC codes as `u16`, so this is only needed when the code comes
/// from arithmetic in a wider signed type. Values are never truncated.
///
/// ```rust
/// # use ad569x_hal::common::dac_value;
/// assert_eq!(dac_value(32_768), Ok(0x8000));
/// assert!(dac_value(65_536).is_err());
/// assert!(dac_value(-1).is_err());
/// ```
pub fn dac_value(value: i32) -> Result<u16, InvalidArgument> {
    u16::try_from(value).map_err(|_| InvalidArgument::DacValue(value))
}
