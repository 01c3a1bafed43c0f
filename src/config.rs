//! central tuning constants. change these and the game plays differently.

/// 8-bit color channels, averaged on merge.
pub type Rgb = [u8; 3];

pub const SIM_WIDTH: f64 = 800.;
pub const SIM_HEIGHT: f64 = 600.;

pub const INITIAL_SHIPS: usize = 5;
/// horizontal spacing of the starting lineup, centered on the world.
pub const SHIP_SPACING: f64 = 200.;
pub const SHIP_COLORS: [Rgb; 2] = [[230, 41, 55], [0, 121, 241]];

/// flat cruising speed outside the slow radius.
pub const CRUISE_SPEED: f64 = 5.;
/// cap on a single steering force.
pub const MAX_FORCE: f64 = 0.1;
/// inside this distance of a target the speed ramps down linearly.
pub const SLOW_RADIUS: f64 = 100.;
pub const WANDER_FORCE: f64 = 2.;
pub const DETECTION_RADIUS: f64 = 150.;
/// detection radius gained by absorbing another ship.
pub const DETECTION_BONUS: f64 = 20.;
/// center-to-center distance below which two ships merge.
pub const MERGE_RADIUS: f64 = 20.;
/// size multiplier gained per consumed food.
pub const GROWTH_PER_FOOD: f64 = 0.02;

/// pool size is rolled once at startup from this half-open range.
pub const FOOD_COUNT_MIN: usize = 50;
pub const FOOD_COUNT_MAX: usize = 150;
pub const FOOD_RADIUS: f64 = 15.;
pub const FOOD_COLOR: Rgb = [0, 117, 44];

/// seconds until food respawns and the weakest ship is culled.
pub const ROUND_LENGTH: f64 = 20.;
/// fixed step the driver runs, one sixtieth of a second.
pub const STEP_SIZE: f64 = 1. / 60.;
