//! Spinwash - Toy Washing Machine Firmware
//!
//! Main firmware binary for RP2040-based boards. A single DC motor behind
//! an H-bridge, a TM1637 countdown display, and four panel inputs.
//!
//! Two executors run side by side:
//! - thread mode: the front panel controller and the blocking engine
//! - SWI_IRQ_1: the stop/door abort watcher, which preempts the engine

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Level, Output, OutputOpenDrain, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use spinwash_core::config::MachineConfig;
use spinwash_core::traits::ButtonId;
use spinwash_core::Engine;
use spinwash_drivers::display::Tm1637;
use spinwash_drivers::input::ButtonPanel;
use spinwash_drivers::motor::{HBridgeConfig, HBridgeMotor};

use crate::buttons::AbortInputs;
use crate::channels::ABORT;
use crate::clock::EmbassyClock;

mod buttons;
mod channels;
mod clock;
mod controller;
mod tasks;

/// PWM top for ~20 kHz at 125 MHz, above the audible range
const MOTOR_PWM_TOP: u16 = 6249;

static EXECUTOR_ABORT: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_ABORT.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Spinwash firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = MachineConfig::default();
    if let Err(e) = config.validate() {
        // Factory recipes are fixed at build time
        defmt::panic!("Invalid machine configuration: {}", e);
    }

    // Abort watcher on the high priority executor
    // Pin assignments: STOP=GPIO14, DOOR=GPIO15
    let stop = Input::new(p.PIN_14, Pull::Up);
    let door = Input::new(p.PIN_15, Pull::Up);

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let abort_spawner = EXECUTOR_ABORT.start(interrupt::SWI_IRQ_1);
    abort_spawner
        .spawn(tasks::abort_watch_task(AbortInputs::new(stop, door)))
        .unwrap();

    // Motor: PWM on GPIO16 (slice 0 A), direction on GPIO17
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = MOTOR_PWM_TOP;
    pwm_config.compare_a = 0;
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config);
    let pwm_a = unwrap!(pwm.split().0);
    let dir_pin = Output::new(p.PIN_17, Level::Low);
    let motor = unwrap!(HBridgeMotor::new(pwm_a, dir_pin, HBridgeConfig::default()));
    info!("Motor initialized");

    // Display: CLK=GPIO2, DIO=GPIO3 (open drain for the ACK bit)
    let clk = Output::new(p.PIN_2, Level::High);
    let dio = OutputOpenDrain::new(p.PIN_3, Level::High);
    let display = unwrap!(Tm1637::new(clk, dio, Delay));
    info!("Display initialized");

    // Panel: PROGRAM=GPIO12, START=GPIO13
    let panel = ButtonPanel::new()
        .with_button(ButtonId::Program, Input::new(p.PIN_12, Pull::Up))
        .with_button(ButtonId::Start, Input::new(p.PIN_13, Pull::Up));

    let mut engine = Engine::new(motor, display, EmbassyClock, &ABORT);
    engine.configure(&config);

    info!("Firmware running");
    controller::run(engine, panel, config).await
}
