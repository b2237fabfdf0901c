//! switchback-hw-interface
//!
//! Footswitch → PresetManager → crosspoint matrix integration firmware for
//! the Raspberry Pi Pico 2. Wires the three library crates into the live
//! pedal loop:
//!
//! 1. A footswitch is pressed.
//! 2. The poll loop detects the falling edge and dispatches the switch
//!    through the shared `PresetManager`.
//! 3. The manager applies the bound behavior (loop toggle, bank or preset
//!    navigation) and reports what the hardware still has to do.
//! 4. The firmware reconnects the MT8816 signal chain, transmits MIDI, or
//!    mutes, depending on the reported event.
//!
//! No display or editing menu is implemented in this stage.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{self, UartTx};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use eeprom_driver::Eeprom25lc256;
use matrix_driver::{ControlPins, Mt8816};
use switchback::manager::{FootSwitchEvent, PresetManager};
use switchback::routing::{assign_loop_io, RouterConfig, SignalRouter, DEFAULT_LOOP_IO};
use switchback::storage::{PresetStorage, FOOT_SWITCH_COUNT};

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete EEPROM type: blocking SPI0 with a GPIO chip select.
type Eeprom = Eeprom25lc256<Spi<'static, SPI0, spi::Blocking>, Output<'static>>;

/// Concrete matrix type: plain GPIO outputs and the Embassy delay.
type Matrix = Mt8816<Output<'static>, Delay>;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Footswitch poll interval. Fast enough that a press never feels laggy,
/// slow enough to debounce mechanical contacts across two samples.
const POLL_INTERVAL_MS: u64 = 5;

/// Extra settle time after a handled press so contact bounce cannot
/// retrigger the same switch.
const DEBOUNCE_MS: u64 = 20;

/// Loops wired on this board revision, matching `DEFAULT_LOOP_IO`.
const WIRED_LOOPS: u8 = DEFAULT_LOOP_IO.len() as u8;

/// MIDI runs at a fixed 31250 baud.
const MIDI_BAUD: u32 = 31250;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("switchback-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // MIDI_TX    → GP0   (p.PIN_0)   UART0, 31250 baud
    // SPI_CLK    → GP2   (p.PIN_2)   SPI0 to the 25LC256
    // SPI_MOSI   → GP3   (p.PIN_3)
    // SPI_MISO   → GP4   (p.PIN_4)
    // EEPROM_CS  → GP5   (p.PIN_5)   active-low chip select
    // MT_AX0..3  → GP6–GP9           matrix X address
    // MT_AY0..2  → GP10–GP12         matrix Y address
    // MT_DATA    → GP13
    // MT_STROBE  → GP14
    // MT_RESET   → GP15
    // FSW_0..5   → GP16–GP21         active-low, pull-up enabled
    // ———————————————————————————————————————————————————————————————————————

    // EEPROM on SPI0. The 25LC256 is comfortable at a few MHz; preset
    // slots are 128 bytes so bus speed is not the bottleneck anyway.
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 2_000_000;
    let eeprom_spi = Spi::new_blocking(p.SPI0, p.PIN_2, p.PIN_3, p.PIN_4, spi_config);
    let eeprom_cs = Output::new(p.PIN_5, Level::High);
    let eeprom = Eeprom25lc256::new(eeprom_spi, eeprom_cs);

    // MT8816 control interface.
    let pins = ControlPins {
        ax: [
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
            Output::new(p.PIN_8, Level::Low),
            Output::new(p.PIN_9, Level::Low),
        ],
        ay: [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
        ],
        data: Output::new(p.PIN_13, Level::Low),
        strobe: Output::new(p.PIN_14, Level::Low),
        reset: Output::new(p.PIN_15, Level::Low),
    };
    let mut matrix = Mt8816::new(pins, Delay);

    // MIDI output, transmit only.
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = MIDI_BAUD;
    let mut midi_tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // Footswitches, index order matches the persisted configuration table.
    let foot_switches = [
        Input::new(p.PIN_16, Pull::Up),
        Input::new(p.PIN_17, Pull::Up),
        Input::new(p.PIN_18, Pull::Up),
        Input::new(p.PIN_19, Pull::Up),
        Input::new(p.PIN_20, Pull::Up),
        Input::new(p.PIN_21, Pull::Up),
    ];

    // —— Preset engine bring-up —————————————————————————————————————————————

    let mut manager = PresetManager::new(PresetStorage::new(eeprom));

    // A factory-fresh chip reads 0xFF everywhere and fails deserialization.
    // Format it once and initialize again; any later failure is fatal.
    if manager.initialize().is_err() {
        warn!("EEPROM contents invalid, formatting");
        manager.format_blank_device(WIRED_LOOPS).unwrap();
        manager.initialize().unwrap();
    }
    info!(
        "restored bank {}, preset {}",
        manager.current_bank(),
        manager.current_preset_index()
    );

    let router = SignalRouter::new(RouterConfig::default());

    // Route the restored preset before audio passes through anything.
    reconnect(&mut manager, &router, &mut matrix);

    // —— Footswitch poll loop ———————————————————————————————————————————————

    let mut was_pressed = [false; FOOT_SWITCH_COUNT as usize];

    loop {
        Timer::after_millis(POLL_INTERVAL_MS).await;

        for switch_id in 0..FOOT_SWITCH_COUNT {
            let pressed = foot_switches[switch_id as usize].is_low();
            let edge = pressed && !was_pressed[switch_id as usize];
            was_pressed[switch_id as usize] = pressed;
            if !edge {
                continue;
            }

            debug!("footswitch {} pressed", switch_id);

            let event = match manager.dispatch_foot_switch(switch_id) {
                Ok(event) => event,
                Err(e) => {
                    error!("footswitch {} dispatch failed: {}", switch_id, e);
                    continue;
                }
            };

            match event {
                Some(FootSwitchEvent::RoutingChanged) => {
                    reconnect(&mut manager, &router, &mut matrix);
                }
                Some(FootSwitchEvent::SendMidi(messages)) => {
                    for message in messages.iter() {
                        let (bytes, len) = message.to_bytes();
                        if let Err(e) = midi_tx.blocking_write(&bytes[..len]) {
                            error!("MIDI transmit failed: {}", e);
                        }
                    }
                }
                Some(FootSwitchEvent::Muted) => {
                    if let Err(e) = matrix.clear_all() {
                        error!("matrix mute failed: {}", e);
                    }
                }
                None => {}
            }

            Timer::after_millis(DEBOUNCE_MS).await;
        }
    }
}

/// Rebuild the signal chain for the active preset.
///
/// Loop send/return jacks are a property of the board, not the stored
/// preset, so the wiring table is reapplied before every connect.
fn reconnect(manager: &mut PresetManager<Eeprom>, router: &SignalRouter, matrix: &mut Matrix) {
    assign_loop_io(manager.current_preset_mut(), &DEFAULT_LOOP_IO);
    if let Err(e) = router.connect(manager.current_preset(), matrix) {
        error!("matrix connect failed: {}", e);
    }
}
