//! Flash pulse of the central sphere in the synapse layout.
//!
//! A counter runs down from `period` to `-period`. Within two ticks of zero
//! the sphere swells by 5% per tick of closeness; everywhere else it is at
//! rest and the auxiliary light is off. Passing `-period` restarts the count
//! and fires the light for a single tick.

use rand::Rng;

/// Half-width of the swell window around zero, in ticks.
pub const PULSE_WINDOW: i64 = 2;
/// Scale added per tick of closeness to zero.
pub const PULSE_STEP: f64 = 0.05;

/// What the pulse wants this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseFrame {
    pub scale: f64,
    /// `Some` when the auxiliary light must be switched.
    pub light: Option<bool>,
    pub reset: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseFlash {
    cycles: i64,
    period: i64,
    jitter: Option<u32>,
}

impl PulseFlash {
    /// `period` is clamped to at least 1. With `jitter`, each restart draws a
    /// new period from `[1, jitter)`.
    pub fn new(period: u32, jitter: Option<u32>) -> Self {
        let period = i64::from(period.max(1));
        Self {
            cycles: period,
            period,
            jitter,
        }
    }

    pub fn cycles(&self) -> i64 {
        self.cycles
    }

    pub fn period(&self) -> i64 {
        self.period
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PulseFrame {
        if self.cycles <= -self.period {
            if let Some(jitter) = self.jitter {
                let drawn = (rng.random::<f64>() * f64::from(jitter)).floor() as i64;
                self.period = drawn.max(1);
            }
            self.cycles = self.period;
            return PulseFrame {
                scale: 1.0,
                light: Some(true),
                reset: true,
            };
        }

        self.cycles -= 1;
        let distance = self.cycles.abs();
        if distance <= PULSE_WINDOW {
            PulseFrame {
                scale: 1.0 + (PULSE_WINDOW - distance) as f64 * PULSE_STEP,
                light: None,
                reset: false,
            }
        } else {
            PulseFrame {
                scale: 1.0,
                light: Some(false),
                reset: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_swell_around_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pulse = PulseFlash::new(5, None);
        let frames: Vec<_> = (0..10).map(|_| pulse.tick(&mut rng)).collect();
        let cycles = [4, 3, 2, 1, 0, -1, -2, -3, -4, -5];
        let scales = [1.0, 1.0, 1.0, 1.05, 1.10, 1.05, 1.0, 1.0, 1.0, 1.0];
        for (i, frame) in frames.iter().enumerate() {
            assert_relative_eq!(frame.scale, scales[i], epsilon = 1e-12);
            assert!(!frame.reset);
            let in_window = (cycles[i] as i64).abs() <= PULSE_WINDOW;
            assert_eq!(frame.light.is_none(), in_window, "tick {}", i);
        }
        assert_eq!(pulse.cycles(), -5);
    }

    #[test]
    fn test_reset_fires_light_for_one_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pulse = PulseFlash::new(3, None);
        for _ in 0..6 {
            pulse.tick(&mut rng);
        }
        assert_eq!(pulse.cycles(), -3);

        let reset = pulse.tick(&mut rng);
        assert!(reset.reset);
        assert_eq!(reset.light, Some(true));
        assert_eq!(pulse.cycles(), 3);

        let after = pulse.tick(&mut rng);
        assert_eq!(after.light, None, "cycles 2 is inside the window");
        assert_eq!(pulse.cycles(), 2);
    }

    #[test]
    fn test_light_off_outside_window() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pulse = PulseFlash::new(10, None);
        assert_eq!(pulse.tick(&mut rng).light, Some(false));
    }

    #[test]
    fn test_jitter_redraws_period() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pulse = PulseFlash::new(1, Some(200));
        let mut periods = Vec::new();
        for _ in 0..2000 {
            if pulse.tick(&mut rng).reset {
                periods.push(pulse.period());
            }
        }
        assert!(periods.len() > 2);
        assert!(periods.iter().all(|&p| (1..200).contains(&p)));
        assert!(periods.iter().any(|&p| p != periods[0]));
    }
}
