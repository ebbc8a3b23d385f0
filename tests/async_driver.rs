//! Async driver against a mocked I2C bus.
//!
//! The mock implements the async I2C trait as well as the blocking one, so the
//! same expectations drive both drivers.
#![cfg(feature = "async")]

use ad569x_hal::common::{Channel, ChannelMask, DeviceAddress};
use ad569x_hal::power::PowerState;
use ad569x_hal::{Ad569xAsync, Error, InvalidArgument, Operation};

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

fn driver(expectations: &[Transaction]) -> Ad569xAsync<Mock> {
    Ad569xAsync::new(Mock::new(expectations))
}

#[tokio::test]
async fn write_then_read_back() -> Result<(), Error<ErrorKind>> {
    let mut dac = driver(&[
        Transaction::write(0x08, vec![0x31, 0x80, 0x00]),
        Transaction::write_read(0x08, vec![0x35], vec![0x80, 0x00, 0x00, 0x00]),
    ]);
    let device = DeviceAddress::A1_LOW_A0_LOW;
    dac.write_channels(device, Channel::A, Operation::WriteAndUpdate, 0x8000)
        .await?;
    let values = dac
        .read_channels(device, Channel::C | Channel::A, Operation::WriteAndUpdate)
        .await?;
    assert_eq!(values.as_slice(), &[0x8000, 0x0000]);
    dac.release().done();
    Ok(())
}

#[tokio::test]
async fn control_commands() -> Result<(), Error<ErrorKind>> {
    let mut dac = driver(&[
        Transaction::write(0x0B, vec![0x40, 0x00, 0xAA]),
        Transaction::write(0x0B, vec![0x50, 0x00, 0x0F]),
        Transaction::write(0x0B, vec![0x60, 0x00, 0x00]),
    ]);
    let device = DeviceAddress::A1_HIGH_A0_HIGH;
    dac.power_down(device, PowerState::HundredKOhmToGround)
        .await?;
    dac.set_ldac_mask(device, ChannelMask::ALL).await?;
    dac.reset(device).await?;
    dac.release().done();
    Ok(())
}

#[tokio::test]
async fn empty_mask_is_rejected() {
    let mut dac = driver(&[]);
    let result = dac
        .read_channels(DeviceAddress::default(), ChannelMask::NONE, Operation::NoOperation)
        .await;
    assert!(matches!(
        result,
        Err(Error::InvalidArgument(InvalidArgument::EmptyChannelMask))
    ));
    dac.release().done();
}

#[tokio::test]
async fn nak_during_read_back_is_reported() {
    let nak = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
    let mut dac = driver(&[
        Transaction::write_read(0x0A, vec![0x2C], vec![0x00, 0x00, 0x00, 0x00]).with_error(nak),
    ]);
    let result = dac
        .read_channels(
            DeviceAddress::A1_HIGH_A0_LOW,
            Channel::C | Channel::D,
            Operation::UpdateFromInput,
        )
        .await;
    assert!(matches!(
        result,
        Err(Error::Transport {
            address: 0x0A,
            command: 0x2C,
            ..
        })
    ));
    dac.release().done();
}

#[tokio::test]
async fn read_single_channel() -> Result<(), Error<ErrorKind>> {
    let mut dac = driver(&[Transaction::write_read(0x09, vec![0x12], vec![0x12, 0x34])]);
    let value = dac
        .read_channel(DeviceAddress::A1_LOW_A0_HIGH, Channel::B, Operation::WriteInputRegister)
        .await?;
    assert_eq!(value, 0x1234);
    dac.release().done();
    Ok(())
}

#[tokio::test]
async fn nak_is_wrapped_with_address() {
    let nak = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
    let mut dac = driver(&[Transaction::write(0x09, vec![0x60, 0x00, 0x00]).with_error(nak)]);
    let result = dac.reset(DeviceAddress::A1_LOW_A0_HIGH).await;
    assert!(matches!(
        result,
        Err(Error::Transport {
            address: 0x09,
            command: 0x60,
            ..
        })
    ));
    dac.release().done();
}
