//! Looping cursor that carries a marker along a path.
//!
//! A traveler is plain data. [`Traveler::advance`] updates the cursor and
//! reports what the marker should look like; [`drive_marker`] pushes that onto
//! a mesh through a [`RenderHost`].

use neurite_core::{NeuriteError, Result};
use neurite_geometry::CurvePath;
use rand::Rng;

use crate::host::{MeshHandle, RenderHost};
use crate::preset::{AnimationPreset, WrapMode};

/// Marker scale while the traveler is on the path.
pub const FULL_SCALE: f64 = 1.0;
/// Marker scale while it is recharging past the end of the path.
pub const FADED_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerState {
    /// `cycles < max_cycles`: visible, positioned at `path[cycles]`.
    Active,
    /// `max_cycles <= cycles < ceiling`: shrunk, position frozen.
    Fading,
}

/// Outcome of one [`Traveler::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelerFrame {
    pub cycles: usize,
    pub state: TravelerState,
    /// The cursor hit the overflow ceiling during this step.
    pub wrapped: bool,
}

impl TravelerFrame {
    pub fn scale(&self) -> f64 {
        match self.state {
            TravelerState::Active => FULL_SCALE,
            TravelerState::Fading => FADED_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traveler {
    cycles: usize,
    max_cycles: usize,
    overflow_ceiling: usize,
    wrap: WrapMode,
}

impl Traveler {
    /// Traveler at cycle 0. The ceiling is clamped to at least 1.
    pub fn new(max_cycles: usize, overflow_multiplier: usize, wrap: WrapMode) -> Self {
        Self {
            cycles: 0,
            max_cycles,
            overflow_ceiling: max_cycles.saturating_mul(overflow_multiplier).max(1),
            wrap,
        }
    }

    /// Traveler with a start offset of `floor(random * spread * max_cycles)`.
    ///
    /// Offsets that would land past the ceiling are folded back into range.
    pub fn with_random_offset<R: Rng + ?Sized>(
        max_cycles: usize,
        overflow_multiplier: usize,
        wrap: WrapMode,
        spread: usize,
        rng: &mut R,
    ) -> Self {
        let mut traveler = Self::new(max_cycles, overflow_multiplier, wrap);
        let range = spread.saturating_mul(max_cycles) as f64;
        let offset = (rng.random::<f64>() * range).floor() as usize;
        traveler.cycles = offset % traveler.overflow_ceiling;
        traveler
    }

    pub fn from_preset<R: Rng + ?Sized>(preset: &AnimationPreset, rng: &mut R) -> Self {
        Self::with_random_offset(
            preset.max_cycles,
            preset.overflow_multiplier,
            preset.wrap,
            preset.start_spread,
            rng,
        )
    }

    /// Place the cursor explicitly, folded into `[0, ceiling)`.
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles % self.overflow_ceiling;
        self
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn max_cycles(&self) -> usize {
        self.max_cycles
    }

    pub fn overflow_ceiling(&self) -> usize {
        self.overflow_ceiling
    }

    pub fn state(&self) -> TravelerState {
        if self.cycles < self.max_cycles {
            TravelerState::Active
        } else {
            TravelerState::Fading
        }
    }

    pub fn advance(&mut self, step: usize) -> TravelerFrame {
        // cycles < ceiling, so the headroom never underflows and the sums never overflow
        let headroom = self.overflow_ceiling - self.cycles;
        let wrapped = step >= headroom;
        let cycles = match (wrapped, self.wrap) {
            (false, _) => self.cycles + step,
            (true, WrapMode::Reset) => 0,
            (true, WrapMode::Carry) => (step - headroom) % self.overflow_ceiling,
        };
        self.cycles = cycles;
        TravelerFrame {
            cycles,
            state: self.state(),
            wrapped,
        }
    }
}

/// Advance `traveler` by `step` and apply the result to `marker`.
///
/// A wrap restores full scale, an active cursor moves the marker to
/// `path[cycles]`, a fading cursor shrinks it and leaves it where it was.
pub fn drive_marker<H: RenderHost + ?Sized>(
    traveler: &mut Traveler,
    step: usize,
    path: &CurvePath,
    marker: MeshHandle,
    host: &mut H,
) -> Result<TravelerFrame> {
    let frame = traveler.advance(step);
    if frame.wrapped {
        host.set_scaling(marker, FULL_SCALE)?;
    }
    match frame.state {
        TravelerState::Active => {
            let position = path.get(frame.cycles).ok_or_else(|| {
                NeuriteError::Animation(format!(
                    "cursor {} is past the end of a {}-point path",
                    frame.cycles,
                    path.len()
                ))
            })?;
            host.set_position(marker, position)?;
        }
        TravelerState::Fading => host.set_scaling(marker, FADED_SCALE)?,
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reset_wrap_sequence() {
        let mut traveler = Traveler::new(50, 10, WrapMode::Reset);
        let mut wraps = 0;
        for i in 1..=167usize {
            let frame = traveler.advance(3);
            if frame.wrapped {
                wraps += 1;
                assert_eq!(i, 167, "only the last step overshoots 500");
            }
            let expected = if i < 167 { 3 * i } else { 0 };
            assert_eq!(frame.cycles, expected);
            let expected_state = if expected < 50 {
                TravelerState::Active
            } else {
                TravelerState::Fading
            };
            assert_eq!(frame.state, expected_state, "step {}", i);
        }
        assert_eq!(wraps, 1);
        assert_eq!(traveler.cycles(), 0);
    }

    #[test]
    fn test_carry_wrap_sequence() {
        let mut traveler = Traveler::new(50, 10, WrapMode::Carry);
        let frames: Vec<_> = (0..167).map(|_| traveler.advance(3)).collect();
        assert_eq!(frames.iter().filter(|f| f.wrapped).count(), 1);
        assert_eq!(frames[165].cycles, 498);
        assert_eq!(frames[166].cycles, 1);
        assert_eq!(frames[166].state, TravelerState::Active);
    }

    #[test]
    fn test_state_boundary() {
        let traveler = Traveler::new(50, 10, WrapMode::Reset).with_cycles(49);
        assert_eq!(traveler.state(), TravelerState::Active);
        let traveler = traveler.with_cycles(50);
        assert_eq!(traveler.state(), TravelerState::Fading);
        assert_eq!(traveler.with_cycles(512).cycles(), 12);
    }

    #[test]
    fn test_random_offset_range_and_reproducible() {
        let mut rng = StdRng::seed_from_u64(7);
        let offsets: Vec<usize> = (0..200)
            .map(|_| Traveler::with_random_offset(50, 10, WrapMode::Reset, 8, &mut rng).cycles())
            .collect();
        assert!(offsets.iter().all(|&c| c < 400));
        assert!(offsets.iter().any(|&c| c != offsets[0]));

        let mut again = StdRng::seed_from_u64(7);
        let first = Traveler::with_random_offset(50, 10, WrapMode::Reset, 8, &mut again);
        assert_eq!(first.cycles(), offsets[0]);
    }

    #[test]
    fn test_offset_folded_below_small_ceiling() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let traveler = Traveler::with_random_offset(10, 2, WrapMode::Reset, 8, &mut rng);
            assert!(traveler.cycles() < traveler.overflow_ceiling());
        }
    }

    #[test]
    fn test_huge_step_does_not_overflow() {
        let mut traveler = Traveler::new(50, 10, WrapMode::Carry).with_cycles(499);
        let frame = traveler.advance(usize::MAX);
        assert!(frame.wrapped);
        assert_eq!(frame.cycles, (usize::MAX - 1) % 500);

        let mut traveler = Traveler::new(usize::MAX, 10, WrapMode::Reset).with_cycles(usize::MAX - 2);
        assert_eq!(traveler.overflow_ceiling(), usize::MAX);
        let frame = traveler.advance(usize::MAX);
        assert!(frame.wrapped);
        assert_eq!(frame.cycles, 0);
    }

    #[test]
    fn test_frame_scale() {
        let mut traveler = Traveler::new(2, 2, WrapMode::Reset);
        assert_eq!(traveler.advance(1).scale(), FULL_SCALE);
        assert_eq!(traveler.advance(1).scale(), FADED_SCALE);
        let frame = traveler.advance(2);
        assert!(frame.wrapped);
        assert_eq!(frame.scale(), FULL_SCALE);
    }
}
