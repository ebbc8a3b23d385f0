/// Default 7-bit I2C address of the first device in the address block.
///
/// The A1 and A0 pins select one of four consecutive addresses starting here.
pub const BASE_ADDRESS: u8 = 0x08;

/// Highest base address that still leaves room for all four pin-selected devices
/// within the 7-bit address space.
pub(crate) const MAX_BASE_ADDRESS: u8 = 0x7C;

/// Command code (upper nibble) for the power-down/power-up register.
pub(crate) const POWER_STATE_COMMAND: u8 = 0b0100_0000;

/// Command code (upper nibble) for the LDAC mask register.
pub(crate) const LDAC_MASK_COMMAND: u8 = 0b0101_0000;

/// Command code (upper nibble) for a software (power-on) reset.
pub(crate) const RESET_COMMAND: u8 = 0b0110_0000;

/// Number of DAC channels on each device.
pub(crate) const CHANNEL_COUNT: usize = 4;
