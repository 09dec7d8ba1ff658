//! Portal Runner - a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world state)
//! - `render`: Canvas 2D rendering (wasm only)
//! - `assets`: Image loading (wasm only)
//! - `audio`: Procedural sound effects (wasm only)
//! - `input`: Logical key-state mapping
//! - `settings`: User preferences

pub mod input;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Base viewport size in pixels - world coordinates are authored against this
    pub const VIEW_WIDTH: f32 = 1366.0;
    pub const VIEW_HEIGHT: f32 = 633.0;

    /// Ground tile size (32px sprite at 3x)
    pub const TILE_SIZE: f32 = 96.0;
    /// Y coordinate of the walkable floor surface
    pub const GROUND_Y: f32 = VIEW_HEIGHT - TILE_SIZE;

    /// Downward acceleration per frame (the integrator is per-frame, see DESIGN.md)
    pub const GRAVITY: f32 = 0.8;
    /// Horizontal movement per frame while a direction key is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Vertical impulse applied on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Player sprite and hitbox geometry
    pub const PLAYER_SCALE: f32 = 2.2;
    pub const PLAYER_SPRITE_W: f32 = 32.0;
    pub const PLAYER_SPRITE_H: f32 = 32.0;
    pub const PLAYER_HITBOX_W: f32 = 28.0;
    pub const PLAYER_HITBOX_H: f32 = 30.0;
    pub const PLAYER_HITBOX_OFFSET_X: f32 = 2.0;
    pub const PLAYER_HITBOX_OFFSET_Y: f32 = 2.0;

    pub const MAX_HEALTH: u32 = 100;
    /// Where the player (re)spawns in the populated stage
    pub const SPAWN_X: f32 = 4050.0;

    pub const STAGE_WIDTH: f32 = 6000.0;
    pub const STAGE_COUNT: usize = 10;

    /// Real-time cooldowns (wall-clock ms, frame-rate independent)
    pub const JUMP_COOLDOWN_MS: f64 = 500.0;
    pub const DAMAGE_COOLDOWN_MS: f64 = 500.0;
    /// Red damage tint duration
    pub const DAMAGE_FLASH_MS: f64 = 200.0;
    /// Total blink window between death and respawn
    pub const DEATH_BLINK_MS: f64 = 1500.0;
    pub const BLINK_INTERVAL_MS: f64 = 200.0;
    /// Walk animation frame step
    pub const WALK_STEP_MS: f64 = 200.0;

    /// Portal sprite sheet: 6 frames of 32x32, drawn at 3x
    pub const PORTAL_SCALE: f32 = 3.0;
    pub const PORTAL_FRAMES: u32 = 6;
    pub const PORTAL_FRAME_MS: f64 = 100.0;
    pub const PORTAL_SIZE: f32 = 32.0;

    /// Consecutive pillars from one authoring call start offset by this much
    pub const PILLAR_STAGGER_SECS: f32 = 0.25;

    /// End-of-level cutscene timings
    pub const FADE_SECS: f32 = 2.0;
    pub const CREDIT_SECS: f32 = 3.0;

    /// HUD health bar placement
    pub const HEALTHBAR_SCALE: f64 = 2.5;
    pub const HEALTH_BAR_X: f64 = 10.0;
    pub const HEALTH_BAR_Y: f64 = 10.0;
    /// Fill rect offset within the bar sprite; width is one pixel per
    /// health point before HUD scaling
    pub const HEALTH_FILL_X: f64 = 26.0;
    pub const HEALTH_FILL_Y: f64 = 12.0;
    pub const HEALTH_FILL_H: f64 = 7.0;
}
