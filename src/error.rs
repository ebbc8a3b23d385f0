use core::fmt;

use embedded_hal::i2c;

/// An argument that cannot be encoded for the device.
///
/// These are detected before anything is written to the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Device address outside the two address-select bits (`0..=3`).
    DeviceAddress(u8),
    /// Channel mask with bits set above the four channel bits.
    ChannelMask(u8),
    /// A read or write was requested with no channels selected.
    EmptyChannelMask,
    /// Operation code outside `0..=3`.
    Operation(u8),
    /// Power state code outside `0..=3`.
    PowerState(u8),
    /// DAC code outside the 16-bit range `0..=65535`.
    DacValue(i32),
    /// Base address that would leave the pin-selected addresses outside the 7-bit
    /// address space, or that has either of the two address-select bits set.
    BaseAddress(u8),
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceAddress(a) => write!(f, "device address {a} is not in 0..=3"),
            Self::ChannelMask(m) => write!(f, "channel mask {m:#06b} has bits above channel D"),
            Self::EmptyChannelMask => f.write_str("no channels selected"),
            Self::Operation(op) => write!(f, "operation code {op} is not in 0..=3"),
            Self::PowerState(s) => write!(f, "power state code {s} is not in 0..=3"),
            Self::DacValue(v) => write!(f, "DAC value {v} is not in 0..=65535"),
            Self::BaseAddress(a) => write!(f, "base address {a:#04x} cannot hold four devices"),
        }
    }
}

impl core::error::Error for InvalidArgument {}

/// Problems when communicating with an AD569x.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// An argument was rejected before any bus traffic took place.
    InvalidArgument(InvalidArgument),
    /// The I2C bus reported a failure.
    ///
    /// Nothing is retried. When this comes from a read-back, no values were
    /// decoded.
    Transport {
        /// 7-bit address of the device the transfer was addressed to.
        address: u8,
        /// Command byte that was being sent.
        command: u8,
        /// Error returned by the I2C bus.
        source: E,
    },
}

impl<E> Error<E> {
    /// The bus error, if this is a transport failure.
    pub fn transport_error(&self) -> Option<&E> {
        match self {
            Error::Transport { source, .. } => Some(source),
            Error::InvalidArgument(_) => None,
        }
    }
}

#[doc(hidden)]
impl<E> From<InvalidArgument> for Error<E> {
    fn from(value: InvalidArgument) -> Self {
        Self::InvalidArgument(value)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(invalid) => write!(f, "invalid argument: {invalid}"),
            Error::Transport {
                address,
                command,
                source,
            } => write!(
                f,
                "I2C transfer to {address:#04x} (command {command:#04x}) failed: {source:?}"
            ),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

impl<E: i2c::Error> i2c::Error for Error<E> {
    fn kind(&self) -> i2c::ErrorKind {
        // Only transport failures carry a bus-level kind.
        match self {
            Error::Transport { source, .. } => source.kind(),
            Error::InvalidArgument(_) => i2c::ErrorKind::Other,
        }
    }
}
