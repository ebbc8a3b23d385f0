use embedded_hal::i2c::I2c;

use crate::commands::{DeviceCommand, decode_readback};
use crate::common::{DeviceAddress, check_base_address};
use crate::constants::{BASE_ADDRESS, CHANNEL_COUNT};
use crate::error::{Error, InvalidArgument};
use crate::Readback;

#[cfg(feature = "async")]
pub(crate) mod asynch;
mod control;
mod dac;

/// Driver for up to four AD569x DACs sharing one I2C bus.
///
/// # Quick start
///
/// Create the driver with [`Ad569x::new`], passing anything that implements the
/// blocking [`I2c`] trait from [`embedded_hal`]. No bus traffic happens until one
/// of the command methods is called.
///
/// Each method takes the [`DeviceAddress`] of the target device, so one driver can
/// talk to every device in the address block.
///
/// ```rust
/// # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
/// use ad569x_hal::{Ad569x, Operation};
/// use ad569x_hal::common::{Channel, DeviceAddress};
///
/// # let i2c = Mock::new(&[Transaction::write(0x08, vec![0x33, 0x80, 0x00])]);
/// let mut dac = Ad569x::new(i2c);
/// dac.write_channels(
///     DeviceAddress::A1_LOW_A0_LOW,
///     Channel::A | Channel::B,
///     Operation::WriteAndUpdate,
///     0x8000,
/// )?;
/// # dac.release().done();
/// # Ok::<(), ad569x_hal::Error<embedded_hal::i2c::ErrorKind>>(())
/// ```
///
/// # Sharing the bus
///
/// Every method takes `&mut self`, and a read-back is a single write-read
/// transaction, so command and response cannot be interleaved with other traffic
/// through this driver. The driver is not internally locked: to use one driver
/// from several execution contexts, put it behind your own mutex. To share the
/// bus with other drivers, hand this driver a shared-bus device such as those
/// from `embedded-hal-bus`.
///
/// Nothing is retried. A failed transfer is reported straight away as
/// [`Error::Transport`].
#[derive(Debug)]
pub struct Ad569x<I2C> {
    /// Underlying I2C bus.
    i2c: I2C,
    /// 7-bit address of the device with both address pins tied low.
    base_address: u8,
}

impl<I2C> Ad569x<I2C> {
    /// Create a driver using the default [`BASE_ADDRESS`] (0x08).
    ///
    /// [`BASE_ADDRESS`]: crate::BASE_ADDRESS
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            base_address: BASE_ADDRESS,
        }
    }

    /// Create a driver for a device block at a different base address.
    ///
    /// Some AD569x variants and board revisions place the four pin-selected devices
    /// at 0x0C..=0x0F rather than 0x08..=0x0B.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::BaseAddress`] if either of the two low bits of `base` is
    /// set, or if `base + 3` is not a 7-bit address.
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

impl<I2C: I2c> Ad569x<I2C> {
    /// Write a command and its payload in one transfer.
    fn send(
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
            .map_err(|source| transport_error(address, command.command, source))
    }

    /// Send a channel command byte and read back two bytes per selected channel.
    ///
    /// The command byte and the read are one write-read transaction (repeated
    /// START, no STOP in between).
    fn read_back(
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
            .map_err(|source| transport_error(address, command, source))?;
        Ok(decode_readback(response))
    }
}

/// Wrap a bus error with the address and command it happened on.
pub(crate) fn transport_error<E: core::fmt::Debug>(
    address: u8,
    command: u8,
    source: E,
) -> Error<E> {
    #[cfg(feature = "defmt")]
    defmt::debug!(
        "AD569x transfer to {=u8:#x} (command {=u8:#x}) failed: {}",
        address,
        command,
        defmt::Debug2Format(&source)
    );
    Error::Transport {
        address,
        command,
        source,
    }
}
