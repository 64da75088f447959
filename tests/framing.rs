//! Exact bus, pin and delay sequencing checked with embedded-hal-mock

use cc1101::{ChipState, Device, EnableRx, ModemConfig2, ModulationType, SyncMode};
use embedded_hal_mock::eh1::delay::{CheckedDelay, Transaction as DelayTransaction};
use embedded_hal_mock::eh1::digital::{Mock as DigitalMock, State, Transaction as GpioTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

type MockDevice = Device<SpiMock<u8>, DigitalMock, DigitalMock, CheckedDelay>;

fn setup_device(
    spi: &[SpiTransaction<u8>],
    cs: &[GpioTransaction],
    ready: &[GpioTransaction],
    delay: &[DelayTransaction],
) -> MockDevice {
    Device::new(
        SpiMock::new(spi),
        DigitalMock::new(cs),
        DigitalMock::new(ready),
        CheckedDelay::new(delay),
    )
}

fn check_expectations(device: MockDevice) {
    let (mut spi, mut cs, mut ready, mut delay) = device.release();
    spi.done();
    cs.done();
    ready.done();
    delay.done();
}

fn one_window() -> [GpioTransaction; 2] {
    [
        GpioTransaction::set(State::Low),
        GpioTransaction::set(State::High),
    ]
}

#[test]
fn test_reset() {
    let spi = [
        SpiTransaction::transfer_in_place(vec![0x30], vec![0x0F]),
        SpiTransaction::flush(),
    ];
    let cs = [
        GpioTransaction::set(State::High),
        GpioTransaction::set(State::Low),
        GpioTransaction::set(State::High),
    ];
    let ready = [
        GpioTransaction::get(State::Low),
        GpioTransaction::get(State::Low),
    ];
    let delay = [
        DelayTransaction::delay_us(40),
        DelayTransaction::delay_us(10),
        DelayTransaction::delay_us(1_000),
    ];
    let mut device = setup_device(&spi, &cs, &ready, &delay);

    device.reset().unwrap();

    check_expectations(device);
}

#[test]
fn test_read_modem_config() {
    let spi = [
        SpiTransaction::transfer_in_place(vec![0x92], vec![0x0F]),
        SpiTransaction::read(0x32),
        SpiTransaction::flush(),
    ];
    let ready = [GpioTransaction::get(State::Low)];
    let mut device = setup_device(&spi, &one_window(), &ready, &[]);

    let modem: ModemConfig2 = device.read_register().unwrap();

    assert_eq!(modem.modulation, ModulationType::Ook);
    assert_eq!(modem.sync_mode, SyncMode::Bits16Of16);
    assert!(!modem.manchester);
    assert!(!modem.dc_filter_off);

    check_expectations(device);
}

#[test]
fn test_set_frequency() {
    let spi = [
        SpiTransaction::transfer_in_place(vec![0x4D], vec![0x0F]),
        SpiTransaction::write_vec(vec![0x10, 0xB0, 0x71]),
        SpiTransaction::flush(),
    ];
    let ready = [GpioTransaction::get(State::Low)];
    let mut device = setup_device(&spi, &one_window(), &ready, &[]);

    device.set_frequency(433.92).unwrap();

    check_expectations(device);
}

#[test]
fn test_write_waits_for_ready() {
    let spi = [
        SpiTransaction::transfer_in_place(vec![0x22], vec![0x8F]),
        SpiTransaction::write(0x11),
        SpiTransaction::flush(),
    ];
    let ready = [
        GpioTransaction::get(State::High),
        GpioTransaction::get(State::High),
        GpioTransaction::get(State::Low),
    ];
    let delay = [
        DelayTransaction::delay_us(1),
        DelayTransaction::delay_us(1),
    ];
    let mut device = setup_device(&spi, &one_window(), &ready, &delay);

    device.write_single(0x22, 0x11).unwrap();

    check_expectations(device);
}

#[test]
fn test_strobe_status() {
    let spi = [
        SpiTransaction::transfer_in_place(vec![0x34], vec![0x1F]),
        SpiTransaction::flush(),
    ];
    let ready = [GpioTransaction::get(State::Low)];
    let mut device = setup_device(&spi, &one_window(), &ready, &[]);

    let status = device.strobe(EnableRx).unwrap();

    assert!(status.is_ready());
    assert_eq!(status.state(), ChipState::Rx);
    assert_eq!(status.fifo_bytes_available(), 15);

    check_expectations(device);
}

#[test]
fn test_invalid_modulation_is_rejected_without_bus_traffic() {
    let mut device = setup_device(&[], &[], &[], &[]);

    assert!(device.set_modulation("LoRa").is_err());
    assert!(device.set_tx_power_dbm(12).is_err());
    assert!(device.send_packet(&[0u8; 64]).is_err());

    check_expectations(device);
}
