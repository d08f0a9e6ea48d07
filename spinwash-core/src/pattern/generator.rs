//! Phase generation from pattern descriptors
//!
//! Generation is a pure function: a descriptor maps to one immutable,
//! ordered phase sequence computed up front.

use heapless::Vec;

use super::descriptor::{PatternDescriptor, PatternMode, MAX_PHASES};
use crate::engine::Phase;
use crate::error::ParamError;
use crate::traits::Direction;

/// Ordered phases of one pattern
pub type PhaseSequence = Vec<Phase, MAX_PHASES>;

/// Generate the phases of a pattern
///
/// # Returns
/// The phase sequence, or the reason the descriptor was rejected. No
/// interpolation happens for a rejected descriptor.
pub fn generate_phases(descriptor: &PatternDescriptor) -> Result<PhaseSequence, ParamError> {
    descriptor.validate()?;

    // Validated above: speeds fit in u8, phase count fits in MAX_PHASES
    let speed_a = descriptor.speed_a as u8;
    let speed_b = descriptor.speed_b as u8;
    let steps = descriptor.step_count;
    let time_s = descriptor.step_time_s;
    let direction = descriptor.direction;

    let mut phases = PhaseSequence::new();

    match descriptor.mode {
        PatternMode::Steps => {
            push_ramp(&mut phases, direction, speed_a, speed_b, steps, time_s)?;
        }
        PatternMode::Pyramid => {
            push_ramp(&mut phases, direction, speed_a, speed_b, steps, time_s)?;
            // Descend through the same speeds in reverse. The peak phase is
            // repeated, so the top speed is held for two steps.
            for i in (0..phases.len()).rev() {
                let phase = phases[i];
                push(&mut phases, phase)?;
            }
        }
        PatternMode::Pulse => {
            for _ in 0..steps {
                push(&mut phases, Phase::new_unchecked(direction, speed_a, time_s))?;
                push(&mut phases, Phase::new_unchecked(direction, speed_b, time_s))?;
            }
        }
        PatternMode::Alternate => {
            let mut current = direction;
            for _ in 0..steps * 2 {
                push(&mut phases, Phase::new_unchecked(current, speed_a, time_s))?;
                current = current.opposite();
            }
        }
    }

    Ok(phases)
}

/// Speed of step `index` in a ramp from `from` towards `to`
///
/// The per-step delta is truncated, so the last step stops one delta short
/// of `to` (0 -> 255 in 5 steps ends at 204).
pub fn ramp_speed(from: u8, to: u8, step_count: u16, index: u16) -> u8 {
    let delta = (to as i32 - from as i32) / step_count.max(1) as i32;
    let speed = from as i32 + index as i32 * delta;
    speed.clamp(0, u8::MAX as i32) as u8
}

fn push_ramp(
    phases: &mut PhaseSequence,
    direction: Direction,
    from: u8,
    to: u8,
    step_count: u16,
    time_s: u16,
) -> Result<(), ParamError> {
    for i in 0..step_count {
        let speed = ramp_speed(from, to, step_count, i);
        push(phases, Phase::new_unchecked(direction, speed, time_s))?;
    }
    Ok(())
}

fn push(phases: &mut PhaseSequence, phase: Phase) -> Result<(), ParamError> {
    phases
        .push(phase)
        .map_err(|_| ParamError::StepCountTooLarge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BrakeOption;

    fn descriptor(mode: PatternMode, step_count: u16, speed_a: u16, speed_b: u16) -> PatternDescriptor {
        PatternDescriptor::new(mode, step_count, 7, Direction::Clockwise, speed_a, speed_b)
    }

    fn speeds(phases: &PhaseSequence) -> Vec<u8, MAX_PHASES> {
        phases.iter().map(|p| p.speed()).collect()
    }

    #[test]
    fn test_steps_ascending() {
        let phases = generate_phases(&descriptor(PatternMode::Steps, 5, 0, 255)).unwrap();

        assert_eq!(phases.len(), 5);
        assert_eq!(speeds(&phases)[..], [0, 51, 102, 153, 204]);
        for phase in &phases {
            assert_eq!(phase.duration_s(), 7);
            assert_eq!(phase.direction(), Direction::Clockwise);
        }
    }

    #[test]
    fn test_steps_descending() {
        let phases = generate_phases(&descriptor(PatternMode::Steps, 5, 255, 0)).unwrap();
        assert_eq!(speeds(&phases)[..], [255, 204, 153, 102, 51]);
    }

    #[test]
    fn test_steps_single_step() {
        let phases = generate_phases(&descriptor(PatternMode::Steps, 1, 80, 200)).unwrap();
        assert_eq!(speeds(&phases)[..], [80]);
    }

    #[test]
    fn test_steps_equal_speeds() {
        let phases = generate_phases(&descriptor(PatternMode::Steps, 3, 120, 120)).unwrap();
        assert_eq!(speeds(&phases)[..], [120, 120, 120]);
    }

    #[test]
    fn test_pyramid_doubled_peak() {
        let phases = generate_phases(&descriptor(PatternMode::Pyramid, 5, 0, 255)).unwrap();

        assert_eq!(phases.len(), 10);
        assert_eq!(phases[4].speed(), 204);
        assert_eq!(phases[5].speed(), 204);
        assert_eq!(phases[4], phases[5]);
        assert_eq!(
            speeds(&phases)[..],
            [0, 51, 102, 153, 204, 204, 153, 102, 51, 0]
        );
    }

    #[test]
    fn test_pulse_alternates_speeds() {
        let phases = generate_phases(&descriptor(PatternMode::Pulse, 3, 50, 200)).unwrap();

        assert_eq!(speeds(&phases)[..], [50, 200, 50, 200, 50, 200]);
        assert!(phases.iter().all(|p| p.direction() == Direction::Clockwise));
    }

    #[test]
    fn test_alternate_reverses_direction() {
        let mut d = descriptor(PatternMode::Alternate, 2, 128, 0);
        d.direction = Direction::CounterClockwise;
        let phases = generate_phases(&d).unwrap();

        assert_eq!(phases.len(), 4);
        assert_eq!(phases[0].direction(), Direction::CounterClockwise);
        assert_eq!(phases[1].direction(), Direction::Clockwise);
        assert_eq!(phases[2].direction(), Direction::CounterClockwise);
        assert_eq!(phases[3].direction(), Direction::Clockwise);
        assert!(phases.iter().all(|p| p.speed() == 128));
    }

    #[test]
    fn test_zero_step_count_rejected_for_every_mode() {
        for mode in [
            PatternMode::Steps,
            PatternMode::Pyramid,
            PatternMode::Pulse,
            PatternMode::Alternate,
        ] {
            assert_eq!(
                generate_phases(&descriptor(mode, 0, 0, 255)),
                Err(ParamError::ZeroStepCount)
            );
        }
    }

    #[test]
    fn test_brake_does_not_change_phases() {
        let plain = descriptor(PatternMode::Pulse, 2, 10, 20);
        let braked = plain.with_brake(BrakeOption::Brake);
        assert_eq!(generate_phases(&plain), generate_phases(&braked));
    }

    #[test]
    fn test_ramp_speed_truncates() {
        // 10 / 3 = 3 per step
        assert_eq!(ramp_speed(0, 10, 3, 0), 0);
        assert_eq!(ramp_speed(0, 10, 3, 1), 3);
        assert_eq!(ramp_speed(0, 10, 3, 2), 6);
        // -10 / 3 = -3 per step
        assert_eq!(ramp_speed(10, 0, 3, 2), 4);
    }
}
