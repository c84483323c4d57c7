//! Roll settlement detection.
//!
//! The physics and geometry of a throw live outside this crate; what
//! arrives here is a per-tick motion sample for each die plus an up-face
//! query. The detector watches for both dice to sit still long enough,
//! then settles the throw against the session exactly once.

use log::debug;

use crate::game::constants::{SETTLE_DELAY, STILLNESS_EPSILON};
use crate::game::{Roll, RollError, Session, Settlement};

/// Motion magnitudes for one die on one simulation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub linear_velocity: f32,
    pub angular_velocity: f32,
}

impl Motion {
    #[must_use]
    pub fn new(linear_velocity: f32, angular_velocity: f32) -> Self {
        Self {
            linear_velocity,
            angular_velocity,
        }
    }

    /// Whether the die has effectively stopped moving.
    #[must_use]
    pub fn is_still(self) -> bool {
        self.linear_velocity < STILLNESS_EPSILON && self.angular_velocity < STILLNESS_EPSILON
    }
}

/// The pair of dice in flight, as exposed by the physics and geometry
/// collaborators. Die indices are 0 and 1.
pub trait DiceTable {
    /// Current motion sample for one die.
    fn motion(&self, die: usize) -> Motion;

    /// Up-face of one die; only meaningful once the die is still.
    fn up_face(&self, die: usize) -> u8;
}

/// One-shot stillness sampler that settles a throw.
///
/// Ticks accumulate simulated time while both dice are still and reset
/// on any movement, so a die clipping a chip stack late doesn't settle
/// early. After resolving, the detector disarms itself; ticks are
/// ignored until [`arm`](SettleDetector::arm) is called for a fresh pair
/// of dice.
#[derive(Clone, Copy, Debug)]
pub struct SettleDetector {
    still_time: f32,
    armed: bool,
}

impl Default for SettleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SettleDetector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            still_time: 0.0,
            armed: true,
        }
    }

    /// Whether the detector is waiting on a throw.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start watching a fresh pair of dice.
    pub fn arm(&mut self) {
        self.still_time = 0.0;
        self.armed = true;
    }

    /// Advance the detector by `dt` seconds of simulated time.
    ///
    /// Returns `Ok(Some(settlement))` on the tick the throw resolves;
    /// `Ok(None)` while the dice are moving, settling, or the detector
    /// is disarmed. A face out of range from the geometry query is
    /// passed through before any state changes.
    pub fn tick<T: DiceTable>(
        &mut self,
        dice: &T,
        dt: f32,
        session: &mut Session,
    ) -> Result<Option<Settlement>, RollError> {
        if !self.armed {
            return Ok(None);
        }
        if !(dice.motion(0).is_still() && dice.motion(1).is_still()) {
            self.still_time = 0.0;
            return Ok(None);
        }
        self.still_time += dt;
        if self.still_time < SETTLE_DELAY {
            return Ok(None);
        }

        let roll = Roll(dice.up_face(0), dice.up_face(1));
        debug!("throw settled on {roll}");
        let settlement = session.resolve_roll(roll)?;
        self.still_time = 0.0;
        self.armed = false;
        Ok(Some(settlement))
    }
}
