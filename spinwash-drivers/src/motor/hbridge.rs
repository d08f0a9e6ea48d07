//! DC motor behind an H-bridge
//!
//! Speed goes out as a PWM duty cycle, direction as a single GPIO level
//! (high = clockwise). Speeds 1-255 are mapped above a minimum duty, below
//! which the motor would stall and just heat up.
//!
//! The direction pin is never switched while the bridge is driven: a
//! reversal always drops the duty to zero first.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use spinwash_core::traits::{Direction, MotorDriver, MotorError};

/// H-bridge driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HBridgeConfig {
    /// Minimum duty cycle percentage (below this the motor won't start)
    pub min_duty_percent: u8,
    /// Direction pin level is inverted (low = clockwise)
    pub invert_direction: bool,
}

impl Default for HBridgeConfig {
    fn default() -> Self {
        Self {
            min_duty_percent: 20,
            invert_direction: false,
        }
    }
}

/// PWM H-bridge motor driver
pub struct HBridgeMotor<PWM, DIR> {
    pwm: PWM,
    dir: DIR,
    config: HBridgeConfig,
    /// Direction currently on the pin, `None` until first driven
    direction: Option<Direction>,
    /// Duty currently applied
    duty: u16,
}

impl<PWM, DIR> HBridgeMotor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    /// Create a driver and make sure the bridge is off
    pub fn new(pwm: PWM, dir: DIR, config: HBridgeConfig) -> Result<Self, MotorError> {
        let mut motor = Self {
            pwm,
            dir,
            config,
            direction: None,
            duty: 0,
        };
        motor.set_duty(0)?;
        Ok(motor)
    }

    /// Duty currently applied
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Direction currently on the pin
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Give the pins back
    pub fn release(self) -> (PWM, DIR) {
        (self.pwm, self.dir)
    }

    /// Map speed 0-255 onto `[min_duty, max_duty]`, 0 = off
    pub fn scale_duty(&self, speed: u8) -> u16 {
        if speed == 0 {
            return 0;
        }
        let max = self.pwm.max_duty_cycle() as u32;
        let min = max * self.config.min_duty_percent.min(100) as u32 / 100;
        let scaled = min + speed as u32 * (max - min) / u8::MAX as u32;
        scaled.min(max) as u16
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), MotorError> {
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| MotorError::Pwm)?;
        self.duty = duty;
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), MotorError> {
        let high = (direction == Direction::Clockwise) != self.config.invert_direction;
        let result = if high {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        };
        result.map_err(|_| MotorError::DirectionPin)?;
        self.direction = Some(direction);
        Ok(())
    }
}

impl<PWM, DIR> MotorDriver for HBridgeMotor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    fn run(&mut self, direction: Direction, speed: u8) -> Result<(), MotorError> {
        if self.direction != Some(direction) {
            if self.duty != 0 {
                debug!("reversing: cutting duty first");
                self.set_duty(0)?;
            }
            self.set_direction(direction)?;
        }

        let duty = self.scale_duty(speed);
        trace!("motor run speed={} duty={}", speed, duty);
        self.set_duty(duty)
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        self.set_duty(0)
    }
}
