//! Reactive bump-and-turn wandering
//!
//! A stimulus-response controller for driving through unknown spaces with
//! nothing but a bumper, two edge range readings, and a heading. There is
//! no map and no plan: drive forward, and on contact square up to the
//! obstacle, swing roughly 90 degrees in a random direction, and resume.
//!
//! # Phases
//!
//! - `Forward`: constant-speed straight driving. Left only when a pressed
//!   bumper contact latches collision handling.
//! - `FacingWall`: slow pure rotation toward the side with the larger edge
//!   reading until both edges agree to within an epsilon (squared up).
//! - `Rotating90`: faster pure rotation toward a randomly chosen target
//!   heading 90-93 degrees away; completing it clears the collision latch.
//!
//! The deliberate 90-93 overshoot reduces immediate re-strikes of the same
//! wall under low sensing and actuation accuracy.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use zigzag_library::algorithms::wander::{BotState, WanderPolicy};
//!
//! let policy = WanderPolicy::default();
//! let mut bot = BotState::new();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // No collision latched: full speed ahead
//! let cmd = policy.decide(&mut bot, &mut rng);
//! assert!(cmd.linear > 0.0 && cmd.angular == 0.0);
//! ```

use crate::algorithms::angles::{angular_difference, normalize_degrees};
use crate::messages::cmd_vel::CmdVel;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direction of a rotation maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Clockwise,
    CounterClockwise,
}

impl TurnDirection {
    /// Sign convention for yaw rates: counterclockwise is positive
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Clockwise => -1.0,
            TurnDirection::CounterClockwise => 1.0,
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            TurnDirection::CounterClockwise
        } else {
            TurnDirection::Clockwise
        }
    }
}

/// Movement phase of the wandering state machine
///
/// The target heading and direction exist only while a `Rotating90`
/// maneuver is in flight, so they live inside that variant rather than as
/// free-floating fields that would be stale the rest of the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WanderPhase {
    /// Driving straight, no collision being handled
    Forward,
    /// Contact latched; turning to face the obstruction squarely
    FacingWall,
    /// Squared up; executing the escape rotation
    Rotating90 {
        /// Heading to stop at, degrees in (-180, 180]
        target_heading: f64,
        direction: TurnDirection,
    },
}

impl WanderPhase {
    /// True from the cycle contact is latched until the escape rotation
    /// completes
    pub fn is_handling_collision(&self) -> bool {
        !matches!(self, WanderPhase::Forward)
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, WanderPhase::Rotating90 { .. })
    }
}

/// Latest known sensed values plus the in-progress maneuver phase
///
/// Owned exclusively by the control node; sensor feeds update it once per
/// tick before the movement decision, and the decision mutates only the
/// phase.
#[derive(Debug, Clone)]
pub struct BotState {
    /// Nearest valid return at the first-beam edge of the scan, or -1.0
    pub left_range: f32,
    /// Nearest valid return at the last-beam edge of the scan, or -1.0
    pub right_range: f32,
    /// Yaw in degrees, always in (-180, 180]
    pub heading: f64,
    /// Absolute world-frame position
    pub x: f64,
    pub y: f64,
    pub phase: WanderPhase,
}

impl Default for BotState {
    fn default() -> Self {
        Self {
            left_range: 0.0,
            right_range: 0.0,
            heading: 0.0,
            x: 0.0,
            y: 0.0,
            phase: WanderPhase::Forward,
        }
    }
}

impl BotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch collision handling from a pressed bumper contact
    ///
    /// Only latches while driving forward; a contact reported mid-maneuver
    /// changes nothing, and nothing but the completed escape rotation ever
    /// clears the latch.
    pub fn latch_bump(&mut self) {
        if let WanderPhase::Forward = self.phase {
            self.phase = WanderPhase::FacingWall;
        }
    }

    /// Store a heading, wrapping it into the circular domain first
    pub fn set_heading(&mut self, heading_degrees: f64) {
        self.heading = normalize_degrees(heading_degrees);
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_edge_ranges(&mut self, left: f32, right: f32) {
        self.left_range = left;
        self.right_range = right;
    }
}

/// Tunable parameters of the wandering policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderPolicy {
    /// Straight-line driving speed, m/s
    pub forward_speed: f32,
    /// Yaw rate while squaring up to a wall, rad/s
    pub face_wall_rate: f32,
    /// Yaw rate during the escape rotation, rad/s
    pub turn_rate: f32,
    /// Edge-reading agreement below which the bot counts as perpendicular
    pub perpendicular_epsilon: f32,
    /// How close (degrees) the heading must get to the rotation target
    pub heading_tolerance: f64,
    /// Inclusive bounds on the randomly drawn rotation magnitude, degrees
    pub turn_degrees_min: u32,
    pub turn_degrees_max: u32,
}

impl Default for WanderPolicy {
    fn default() -> Self {
        Self {
            forward_speed: 0.6,
            face_wall_rate: 0.1,
            turn_rate: 0.3,
            perpendicular_epsilon: 0.01,
            heading_tolerance: 1.0,
            turn_degrees_min: 90,
            turn_degrees_max: 93,
        }
    }
}

impl WanderPolicy {
    /// Decide one cycle of movement
    ///
    /// Produces exactly one command per call (possibly the stop command)
    /// and applies any phase transition that falls out of this cycle.
    /// Never both drives and rotates in the same command.
    pub fn decide<R: Rng>(&self, bot: &mut BotState, rng: &mut R) -> CmdVel {
        match bot.phase {
            WanderPhase::Forward => CmdVel::new(self.forward_speed, 0.0),
            WanderPhase::FacingWall => self.face_wall_or_begin_turn(bot, rng),
            WanderPhase::Rotating90 {
                target_heading,
                direction,
            } => self.continue_turn(bot, target_heading, direction),
        }
    }

    fn face_wall_or_begin_turn<R: Rng>(&self, bot: &mut BotState, rng: &mut R) -> CmdVel {
        let imbalance = bot.left_range - bot.right_range;

        if imbalance.abs() >= self.perpendicular_epsilon {
            // Rotate toward the side with the larger reading: a larger left
            // reading turns counterclockwise (positive), a larger right
            // reading clockwise (negative).
            let toward_larger = if imbalance < 0.0 { -1.0 } else { 1.0 };
            return CmdVel::new(0.0, toward_larger * self.face_wall_rate);
        }

        // Squared up. Set up the escape rotation; actual motion starts on
        // the next cycle.
        let direction = TurnDirection::random(rng);
        let magnitude = rng.gen_range(self.turn_degrees_min..=self.turn_degrees_max) as f64;
        let target_heading = normalize_degrees(bot.heading + direction.sign() * magnitude);

        bot.phase = WanderPhase::Rotating90 {
            target_heading,
            direction,
        };
        CmdVel::zero()
    }

    fn continue_turn(
        &self,
        bot: &mut BotState,
        target_heading: f64,
        direction: TurnDirection,
    ) -> CmdVel {
        if angular_difference(bot.heading, target_heading) > self.heading_tolerance {
            return CmdVel::new(0.0, (direction.sign() * self.turn_rate as f64) as f32);
        }

        // Close enough: the maneuver is over and the collision latch clears
        // in the same evaluation.
        bot.phase = WanderPhase::Forward;
        CmdVel::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_forward_drives_straight() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        let cmd = policy.decide(&mut bot, &mut seeded());

        assert_relative_eq!(cmd.linear, 0.6);
        assert_relative_eq!(cmd.angular, 0.0);
        assert_eq!(bot.phase, WanderPhase::Forward);
    }

    #[test]
    fn test_latch_bump_only_from_forward() {
        let mut bot = BotState::new();
        bot.latch_bump();
        assert_eq!(bot.phase, WanderPhase::FacingWall);

        bot.phase = WanderPhase::Rotating90 {
            target_heading: 45.0,
            direction: TurnDirection::Clockwise,
        };
        bot.latch_bump(); // mid-maneuver contact changes nothing
        assert!(bot.phase.is_rotating());
    }

    #[test]
    fn test_facing_wall_rotates_toward_larger_reading() {
        let policy = WanderPolicy::default();
        let mut rng = seeded();

        // Larger left reading: counterclockwise (positive yaw rate)
        let mut bot = BotState::new();
        bot.latch_bump();
        bot.set_edge_ranges(2.0, 1.0);
        let cmd = policy.decide(&mut bot, &mut rng);
        assert_relative_eq!(cmd.angular, 0.1);
        assert_relative_eq!(cmd.linear, 0.0);
        assert!(bot.phase.is_handling_collision());

        // Larger right reading: clockwise (negative yaw rate)
        bot.set_edge_ranges(1.0, 2.0);
        let cmd = policy.decide(&mut bot, &mut rng);
        assert_relative_eq!(cmd.angular, -0.1);
    }

    #[test]
    fn test_small_imbalance_keeps_squaring_up() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        bot.latch_bump();
        // just above epsilon: not yet perpendicular
        bot.set_edge_ranges(1.02, 1.0);
        let cmd = policy.decide(&mut bot, &mut seeded());
        assert!(cmd.angular != 0.0);
        assert!(!bot.phase.is_rotating());
    }

    #[test]
    fn test_perpendicular_sets_up_rotation() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        bot.latch_bump();
        bot.set_heading(30.0);
        bot.set_edge_ranges(1.5, 1.5005);

        let cmd = policy.decide(&mut bot, &mut seeded());

        // Setup cycle emits no motion
        assert!(cmd.is_stopped());
        match bot.phase {
            WanderPhase::Rotating90 {
                target_heading,
                direction,
            } => {
                let magnitude = angular_difference(target_heading, 30.0);
                assert!((90.0..=93.0).contains(&magnitude));
                let expected =
                    normalize_degrees(30.0 + direction.sign() * magnitude);
                assert_relative_eq!(target_heading, expected);
            }
            other => panic!("expected Rotating90, got {:?}", other),
        }
    }

    #[test]
    fn test_setup_target_wraps_into_domain() {
        let policy = WanderPolicy::default();
        // Try many seeds so both directions and all magnitudes appear
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut bot = BotState::new();
            bot.latch_bump();
            bot.set_heading(175.0);
            bot.set_edge_ranges(1.0, 1.0);

            policy.decide(&mut bot, &mut rng);
            if let WanderPhase::Rotating90 { target_heading, .. } = bot.phase {
                assert!(
                    target_heading > -180.0 && target_heading <= 180.0,
                    "target {} escaped the domain",
                    target_heading
                );
            } else {
                panic!("expected Rotating90");
            }
        }
    }

    #[test]
    fn test_rotation_continues_until_tolerance() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        bot.set_heading(0.0);
        bot.phase = WanderPhase::Rotating90 {
            target_heading: 91.0,
            direction: TurnDirection::CounterClockwise,
        };

        let cmd = policy.decide(&mut bot, &mut seeded());
        assert_relative_eq!(cmd.angular, 0.3);
        assert_relative_eq!(cmd.linear, 0.0);
        assert!(bot.phase.is_rotating());
    }

    #[test]
    fn test_rotation_completion_clears_latch_same_evaluation() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        bot.set_heading(90.5);
        bot.phase = WanderPhase::Rotating90 {
            target_heading: 91.0,
            direction: TurnDirection::CounterClockwise,
        };

        let cmd = policy.decide(&mut bot, &mut seeded());
        assert!(cmd.is_stopped());
        assert_eq!(bot.phase, WanderPhase::Forward);
        assert!(!bot.phase.is_handling_collision());

        // And it stays clear until a new contact is latched
        let cmd = policy.decide(&mut bot, &mut seeded());
        assert_relative_eq!(cmd.linear, 0.6);
    }

    #[test]
    fn test_clockwise_rotation_has_negative_rate() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        bot.set_heading(0.0);
        bot.phase = WanderPhase::Rotating90 {
            target_heading: -92.0,
            direction: TurnDirection::Clockwise,
        };

        let cmd = policy.decide(&mut bot, &mut seeded());
        assert_relative_eq!(cmd.angular, -0.3);
    }

    #[test]
    fn test_sentinel_ranges_do_not_panic() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        bot.latch_bump();
        // Both edges invalid: difference is zero, counts as perpendicular
        bot.set_edge_ranges(-1.0, -1.0);
        let cmd = policy.decide(&mut bot, &mut seeded());
        assert!(cmd.is_stopped());
        assert!(bot.phase.is_rotating());

        // One edge invalid: large imbalance, still a plain rotation command
        let mut bot = BotState::new();
        bot.latch_bump();
        bot.set_edge_ranges(-1.0, 5.0);
        let cmd = policy.decide(&mut bot, &mut seeded());
        assert_relative_eq!(cmd.angular, -0.1);
    }

    #[test]
    fn test_full_collision_sequence() {
        let policy = WanderPolicy::default();
        let mut bot = BotState::new();
        let mut rng = seeded();

        // Driving forward at heading 0
        bot.set_heading(0.0);
        let cmd = policy.decide(&mut bot, &mut rng);
        assert_relative_eq!(cmd.linear, 0.6);

        // Contact latches; uneven edges mean squaring up first
        bot.latch_bump();
        bot.set_edge_ranges(2.0, 1.0);
        let cmd = policy.decide(&mut bot, &mut rng);
        assert_relative_eq!(cmd.angular, 0.1);
        assert!(bot.phase.is_handling_collision());

        // Edges converge: setup cycle
        bot.set_edge_ranges(1.2, 1.2);
        let cmd = policy.decide(&mut bot, &mut rng);
        assert!(cmd.is_stopped());
        let (target, dir) = match bot.phase {
            WanderPhase::Rotating90 {
                target_heading,
                direction,
            } => (target_heading, direction),
            other => panic!("expected Rotating90, got {:?}", other),
        };
        assert!((90.0..=93.0).contains(&angular_difference(target, 0.0)));

        // Simulate the turn: step the heading toward the target
        let mut guard = 0;
        while bot.phase.is_rotating() {
            let cmd = policy.decide(&mut bot, &mut rng);
            if bot.phase.is_rotating() {
                assert_relative_eq!(cmd.angular, (dir.sign() * 0.3) as f32);
                bot.set_heading(bot.heading + dir.sign() * 2.0);
            }
            guard += 1;
            assert!(guard < 100, "rotation never completed");
        }

        // Latch cleared; forward driving resumes
        let cmd = policy.decide(&mut bot, &mut rng);
        assert_relative_eq!(cmd.linear, 0.6);
        assert_relative_eq!(cmd.angular, 0.0);
    }
}
