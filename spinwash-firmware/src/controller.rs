//! Front panel controller
//!
//! Polls the program and start buttons in thread mode. The program button
//! steps through the wash cycles and shows the selected cycle number; the
//! start button runs the selected cycle to the end. A run blocks this
//! executor until the motor has stopped.

use defmt::*;
use embassy_rp::gpio::{Input, Output, OutputOpenDrain};
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Delay, Timer};

use spinwash_core::config::MachineConfig;
use spinwash_core::program::CycleSelector;
use spinwash_core::traits::{ButtonId, ButtonPoll, CountdownDisplay};
use spinwash_core::{Engine, WashCycle};
use spinwash_drivers::display::Tm1637;
use spinwash_drivers::input::ButtonPanel;
use spinwash_drivers::motor::HBridgeMotor;

use crate::clock::EmbassyClock;

/// Panel poll interval (ms)
pub const PANEL_POLL_MS: u64 = 20;

pub type Motor = HBridgeMotor<PwmOutput<'static>, Output<'static>>;
pub type Display = Tm1637<Output<'static>, OutputOpenDrain<'static>, Delay>;
pub type Panel = ButtonPanel<Input<'static>>;
pub type SpinEngine = Engine<'static, Motor, Display, EmbassyClock>;

/// Run the front panel forever
pub async fn run(mut engine: SpinEngine, mut panel: Panel, config: MachineConfig) -> ! {
    let mut selector = CycleSelector::new();
    let mut start_was_pressed = false;

    show_cycle(&mut engine, selector.selected());

    loop {
        if let Some(cycle) = selector.poll(&mut panel) {
            info!("Selected cycle {} ({})", cycle.number(), cycle.label());
            show_cycle(&mut engine, cycle);
        }

        let start_pressed = panel.read(ButtonId::Start);
        if start_pressed && !start_was_pressed {
            run_cycle(&mut engine, &config, selector.selected());
            show_cycle(&mut engine, selector.selected());
        }
        start_was_pressed = start_pressed;

        Timer::after_millis(PANEL_POLL_MS).await;
    }
}

fn run_cycle(engine: &mut SpinEngine, config: &MachineConfig, cycle: WashCycle) {
    info!("Starting {}", cycle.label());

    match engine.execute_recipe(config.recipe(cycle)) {
        Ok(report) => info!(
            "{} finished: {} phases run ({})",
            cycle.label(),
            report.phases_run(),
            report
        ),
        Err(e) => {
            error!("{} failed: {}", cycle.label(), e);
            engine.halt_motor();
        }
    }
}

fn show_cycle(engine: &mut SpinEngine, cycle: WashCycle) {
    if let Err(e) = engine.display_mut().show_number(cycle.number()) {
        warn!("Display update failed: {}", e);
    }
}
