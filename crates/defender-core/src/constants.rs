//! Simulation constants and tuning defaults.
//!
//! Distances are in arena pixels, speeds in pixels per second,
//! durations in seconds.

// --- Arena ---

/// Arena width.
pub const ARENA_WIDTH: f32 = 1600.0;

/// Arena height.
pub const ARENA_HEIGHT: f32 = 900.0;

/// The ground line humanoids patrol on and are deposited at.
pub const GROUND_Y: f32 = ARENA_HEIGHT - 100.0;

/// Height at which fuel pickups rest.
pub const FUEL_PICKUP_Y: f32 = ARENA_HEIGHT - 50.0;

// --- Player ---

pub const PLAYER_WIDTH: f32 = 64.0;
pub const PLAYER_HEIGHT: f32 = 32.0;

/// Movement speed per axis.
pub const PLAYER_SPEED: f32 = 300.0;

pub const PLAYER_MAX_FUEL: f32 = 200.0;

/// Fuel consumed per axis actually moved, per frame.
pub const FUEL_PER_MOVE: f32 = 0.1;

pub const INITIAL_LIVES: u32 = 3;
pub const INITIAL_SHIELDS: u32 = 3;

/// Minimum time between laser shots.
pub const LASER_COOLDOWN: f64 = 0.25;

/// Shield duration; also the re-arm delay before the next activation.
pub const SHIELD_DURATION: f64 = 5.0;

/// Player y at or below which (screen-down) a carried humanoid is deposited.
pub const DEPOSIT_Y: f32 = GROUND_Y - 100.0;

// --- Projectiles ---

pub const LASER_WIDTH: f32 = 40.0;
pub const LASER_HEIGHT: f32 = 5.0;
pub const LASER_SPEED: f32 = 900.0;

/// Lasers are removed once this far outside the arena horizontally.
pub const LASER_OOB_MARGIN: f32 = 200.0;

pub const MISSILE_WIDTH: f32 = 20.0;
pub const MISSILE_HEIGHT: f32 = 10.0;
pub const MISSILE_SPEED: f32 = 200.0;

// --- Landers ---

pub const LANDER_WIDTH: f32 = 48.0;
pub const LANDER_HEIGHT: f32 = 32.0;

/// Direct seek speed toward a target on the ground line.
pub const LANDER_SEEK_SPEED: f32 = 40.0;

/// Axis-aligned creep speed, also the carry ascent rate.
pub const LANDER_CREEP_SPEED: f32 = 120.0;

/// Landers spawn along this line near the top edge.
pub const LANDER_SPAWN_Y: f32 = 50.0;

/// A carrying lander leaves carry mode once it rises above this y.
pub const LANDER_RELEASE_Y: f32 = 50.0;

/// Creep keeps landers this far from the left/right arena edges.
pub const LANDER_EDGE_MARGIN: f32 = 50.0;

/// Creep stops descending this far above the ground line.
pub const LANDER_HOVER_CLEARANCE: f32 = 10.0;

/// Creep never climbs above this y. Matches the spawn line.
pub const LANDER_TOP_MARGIN: f32 = 50.0;

/// Spawn positions horizontally closer than this to the movement target
/// are re-rolled.
pub const LANDER_SPAWN_MIN_DISTANCE: f32 = 100.0;

/// Destroyed landers are parked here until cleanup removes them.
pub const LANDER_PARKED_X: f32 = -50.0;
pub const LANDER_PARKED_Y: f32 = -50.0;

/// Upper bound on spawn re-rolls.
pub const LANDER_SPAWN_MAX_ATTEMPTS: u32 = 16;

/// Random offset range for the initial target of a lander spawned
/// with no humanoid to chase.
pub const LANDER_INITIAL_TARGET_JITTER: f32 = 100.0;

pub const LANDER_SPAWN_INTERVAL: f64 = 1.5;

/// Total landers that may ever spawn in one run.
pub const LANDER_LIFETIME_CAP: u32 = 11;

/// Default per-lander missile cooldown.
pub const MISSILE_FIRE_COOLDOWN: f64 = 5.0;

/// Scale applied to the missile cooldown in simulation mode.
pub const SIMULATION_MISSILE_COOLDOWN_SCALE: f64 = 0.000_001;

// --- Humanoids ---

pub const HUMANOID_WIDTH: f32 = 24.0;
pub const HUMANOID_HEIGHT: f32 = 32.0;

pub const HUMANOID_PATROL_SPEED: f32 = 60.0;
pub const HUMANOID_FALL_SPEED: f32 = 120.0;

/// Patrol direction reverses outside [margin, width - margin].
pub const HUMANOID_PATROL_MARGIN: f32 = 50.0;

/// A humanoid carried to this y (or above) by a lander is lost.
pub const HUMANOID_ABDUCTION_Y: f32 = 60.0;

pub const HUMANOID_CONCURRENT_TARGET: u32 = 5;
pub const HUMANOID_LIFETIME_CAP: u32 = 5;
pub const HUMANOID_SPAWN_INTERVAL: f64 = 0.5;

// --- Fuel pickup ---

pub const FUEL_PICKUP_SIZE: f32 = 30.0;

/// Full visibility cycle length.
pub const FUEL_CYCLE: f64 = 10.0;

/// The pickup is hidden for this long at the start of each cycle.
pub const FUEL_HIDDEN_FOR: f64 = 4.0;

// --- Collision gates ---

/// Minimum time between damaging lander-player crashes.
pub const CRASH_DAMAGE_COOLDOWN: f64 = 2.0;

/// Minimum time between damaging missile hits.
pub const MISSILE_DAMAGE_COOLDOWN: f64 = 1.5;

// --- Scoring ---

pub const LANDER_KILL_BONUS: i64 = 50;
pub const HUMANOID_KILL_PENALTY: i64 = 50;

/// The player wins once more than this many landers are destroyed.
pub const WIN_LANDERS_DESTROYED: u32 = 10;

// --- High scores ---

pub const HIGH_SCORE_CAPACITY: usize = 10;
