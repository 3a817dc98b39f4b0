use crate::types::Rgb;

// All distances are canvas pixels and all rates are per frame unless noted.

// Physics
pub const GROUND_Y: f64 = 500.0;
pub const GRAVITY: f64 = 5.0;
pub const JUMP_VELOCITY: f64 = -45.0;
pub const MOVE_SPEED: f64 = 5.0;

// Spawn positions
pub const PLAYER_ONE_START_X: f64 = 200.0;
pub const PLAYER_TWO_START_X: f64 = 600.0;

// Health / combat
pub const MAX_HEALTH: i32 = 100;
pub const PROJECTILE_DAMAGE: i32 = 10;
/// Half-extent of the square hitbox centred on the target, both axes.
pub const HITBOX_HALF_EXTENT: f64 = 50.0;

// Projectiles
pub const PROJECTILE_SPEED: f64 = 15.0;
pub const PROJECTILE_SIZE: f64 = 12.0;
/// Horizontal muzzle offset, multiplied by the shooter's facing.
pub const MUZZLE_OFFSET_X: f64 = 50.0;
pub const MUZZLE_OFFSET_Y: f64 = -20.0;
pub const TRAIL_LENGTH: usize = 5;

// Shoot cooldown, in host clock milliseconds
pub const SHOOT_COOLDOWN_MS: f64 = 500.0;

// Hit particles
pub const HIT_PARTICLE_COUNT: usize = 8;
pub const HIT_PARTICLE_MIN_SPEED: f64 = 2.0;
pub const HIT_PARTICLE_MAX_SPEED: f64 = 5.0;
pub const HIT_PARTICLE_LIFE: i32 = 255;
pub const HIT_PARTICLE_DECAY: i32 = 10;
pub const HIT_PARTICLE_SIZE: f64 = 5.0;

// Frame rate of the host driver. Animation speed is tied to it.
pub const FRAME_RATE: u32 = 12;

// Owner colours
pub const PLAYER_ONE_COLOR: Rgb = Rgb::new(255, 165, 0);
pub const PLAYER_TWO_COLOR: Rgb = Rgb::new(0, 191, 255);

// Scenery
pub const BACKDROP_GREY: u8 = 220;
pub const GROUND_COLOR: Rgb = Rgb::new(34, 139, 34);
pub const PLATFORM_COLOR: Rgb = Rgb::new(139, 69, 19);
pub const PLATFORM_X: f64 = 300.0;
pub const PLATFORM_Y: f64 = GROUND_Y - 100.0;
pub const PLATFORM_WIDTH: f64 = 200.0;
pub const PLATFORM_HEIGHT: f64 = 20.0;

// HUD
pub const HEALTH_BAR_WIDTH: f64 = 200.0;
pub const HEALTH_BAR_HEIGHT: f64 = 20.0;
pub const HEALTH_BAR_TOP: f64 = 30.0;
pub const HEALTH_BAR_MARGIN: f64 = 50.0;
pub const TITLE: &str = "淡江教育科技";
