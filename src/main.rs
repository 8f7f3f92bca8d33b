//! hidterm firmware entry point (nRF52840).
//!
//! Tasks:
//! - `softdevice_task`: runs the SoftDevice event loop.
//! - `ble_task`: finds a HID peripheral and forwards its reports.
//! - `input_task`: decodes reports, writes terminal bytes to the UART and
//!   mirrors the lock latches on the board LEDs.
//! - `heartbeat_task`: blinks LED1.

#![no_std]
#![no_main]

mod ble;

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use heapless::Vec;
use hidterm::config::{HEARTBEAT_PERIOD_MS, REPORT_CHANNEL_DEPTH, TERMINAL_TX_BUFFER};
use hidterm::hid::HidReport;
use hidterm::{DecoderState, Dispatcher, LockLeds};
use nrf_softdevice::{raw, Softdevice};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

/// Reports from the BLE task to the input task.
static REPORTS: Channel<CriticalSectionRawMutex, HidReport, REPORT_CHANNEL_DEPTH> = Channel::new();

/// Raised by the BLE task each time a keyboard link is ready.
pub static KEYBOARD_MOUNTED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Num / Caps / Scroll LEDs (active-low).
struct LockIndicators {
    num: Output<'static>,
    caps: Output<'static>,
    scroll: Output<'static>,
}

impl LockIndicators {
    fn show(&mut self, leds: LockLeds) {
        set_led(&mut self.num, leds.num());
        set_led(&mut self.caps, leds.caps());
        set_led(&mut self.scroll, leds.scroll());
    }
}

fn set_led(led: &mut Output<'_>, on: bool) {
    if on {
        led.set_low();
    } else {
        led.set_high();
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice) -> ! {
    ble::link::run(sd, &REPORTS.sender()).await
}

#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_PERIOD_MS));
    loop {
        led.toggle();
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn input_task(mut uart: UarteTx<'static, peripherals::UARTE0>, mut indicators: LockIndicators) -> ! {
    let mut dispatcher = Dispatcher::new(DecoderState::default());
    let mut out: Vec<u8, TERMINAL_TX_BUFFER> = Vec::new();
    let reports = REPORTS.receiver();

    loop {
        match select(reports.receive(), KEYBOARD_MOUNTED.wait()).await {
            Either::First(report) => {
                if let Some(leds) = dispatcher.handle(&report) {
                    indicators.show(leds);
                }
            }
            Either::Second(()) => indicators.show(dispatcher.mount_keyboard()),
        }

        loop {
            out.clear();
            if dispatcher.drain_terminal(&mut out) == 0 {
                break;
            }
            if let Err(e) = uart.write(&out).await {
                warn!("UART write failed: {}", e);
            }
        }

        if let Some(pos) = dispatcher.drain_pointer() {
            let (left, right, middle) = dispatcher.pointer().buttons();
            info!(
                "position: {} {}, wheel = {}, buttons = {}{}{}",
                pos.x,
                pos.y,
                pos.wheel,
                if left { "L" } else { "-" },
                if middle { "M" } else { "-" },
                if right { "R" } else { "-" }
            );
        }
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 0,
            periph_role_count: 0,
            central_role_count: 1,
            central_sec_count: 1,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("hidterm starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::UARTE0_UART0.set_priority(Priority::P3);

    let mut uart_config = uarte::Config::default();
    uart_config.parity = uarte::Parity::EXCLUDED;
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = UarteTx::new(p.UARTE0, Irqs, p.P0_06, uart_config);

    let heartbeat = Output::new(p.P0_13, Level::High, OutputDrive::Standard);
    let indicators = LockIndicators {
        num: Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        caps: Output::new(p.P0_15, Level::High, OutputDrive::Standard),
        scroll: Output::new(p.P0_16, Level::High, OutputDrive::Standard),
    };

    let sd: &'static Softdevice = Softdevice::enable(&softdevice_config());
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd)));
    unwrap!(spawner.spawn(heartbeat_task(heartbeat)));
    unwrap!(spawner.spawn(input_task(uart, indicators)));

    info!("hidterm running (TVI950, English)");
}
