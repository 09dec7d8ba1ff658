//! Player state: position, vertical velocity, health, death bookkeeping
//!
//! All movement and collision response happens in the frame orchestrator;
//! this module owns the state plus the small derived queries (hitbox,
//! blink phase) the renderer and resolver share.

use crate::consts::*;

use super::geom::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal position in world coordinates
    pub world_x: f32,
    pub y: f32,
    pub vel_y: f32,
    pub grounded: bool,
    pub facing: Facing,
    /// Two-frame walk cycle index
    pub anim_step: u8,
    pub last_step_ms: f64,
    pub health: u32,
    pub dead: bool,
    pub died_at_ms: f64,
    /// Earliest wall-clock time the next jump is allowed
    pub jump_ready_at_ms: f64,
    /// Standing on a slime block this frame; recomputed from contacts,
    /// suppresses manual jumps while the bounce carries the player
    pub on_slime: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            world_x: SPAWN_X,
            y: Self::spawn_y(),
            vel_y: 0.0,
            grounded: false,
            facing: Facing::Right,
            anim_step: 0,
            last_step_ms: 0.0,
            health: MAX_HEALTH,
            dead: false,
            died_at_ms: 0.0,
            jump_ready_at_ms: f64::NEG_INFINITY,
            on_slime: false,
        }
    }

    /// Sprite Y that rests the hitbox exactly on the floor
    pub fn spawn_y() -> f32 {
        GROUND_Y - Self::scaled_hitbox_height() - PLAYER_HITBOX_OFFSET_Y
    }

    #[inline]
    pub fn scaled_hitbox_width() -> f32 {
        PLAYER_HITBOX_W * PLAYER_SCALE
    }

    #[inline]
    pub fn scaled_hitbox_height() -> f32 {
        PLAYER_HITBOX_H * PLAYER_SCALE
    }

    /// World-space hitbox: sprite position plus unscaled offset, scaled size
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.world_x + PLAYER_HITBOX_OFFSET_X,
            self.y + PLAYER_HITBOX_OFFSET_Y,
            Self::scaled_hitbox_width(),
            Self::scaled_hitbox_height(),
        )
    }

    /// Subtract damage with a floor at zero. Returns true if this hit was
    /// lethal (health reached zero while still alive).
    pub fn apply_damage(&mut self, amount: u32, now_ms: f64) -> bool {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 && !self.dead {
            self.dead = true;
            self.died_at_ms = now_ms;
            return true;
        }
        false
    }

    /// Whether the death-blink currently shows the sprite
    pub fn blink_visible(&self, now_ms: f64) -> bool {
        if !self.dead {
            return true;
        }
        let elapsed = now_ms - self.died_at_ms;
        (elapsed / BLINK_INTERVAL_MS) as i64 % 2 == 0
    }

    /// Reset to spawn defaults. Idempotent while alive.
    pub fn respawn(&mut self) {
        self.health = MAX_HEALTH;
        self.dead = false;
        self.died_at_ms = 0.0;
        self.world_x = SPAWN_X;
        self.y = Self::spawn_y();
        self.vel_y = 0.0;
        self.on_slime = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_derivation() {
        let p = Player::new();
        let hb = p.hitbox();
        assert_eq!(hb.left(), SPAWN_X + 2.0);
        assert_eq!(hb.size.x, 28.0 * 2.2);
        assert_eq!(hb.size.y, 30.0 * 2.2);
        // Spawn rests the hitbox bottom on the floor
        assert!((hb.bottom() - GROUND_Y).abs() < 1e-3);
    }

    #[test]
    fn test_damage_floors_at_zero_and_kills_once() {
        let mut p = Player::new();
        assert!(!p.apply_damage(60, 1000.0));
        assert_eq!(p.health, 40);
        assert!(p.apply_damage(60, 2000.0));
        assert_eq!(p.health, 0);
        assert!(p.dead);
        assert_eq!(p.died_at_ms, 2000.0);
        // Further damage while dead changes nothing
        assert!(!p.apply_damage(25, 3000.0));
        assert_eq!(p.died_at_ms, 2000.0);
    }

    #[test]
    fn test_blink_alternates_every_interval() {
        let mut p = Player::new();
        p.apply_damage(100, 10_000.0);
        assert!(p.blink_visible(10_000.0));
        assert!(!p.blink_visible(10_250.0));
        assert!(p.blink_visible(10_450.0));
    }

    #[test]
    fn test_respawn_resets_spawn_state() {
        let mut p = Player::new();
        p.world_x = 123.0;
        p.vel_y = 9.0;
        p.apply_damage(100, 500.0);
        p.respawn();
        assert_eq!(p.health, MAX_HEALTH);
        assert!(!p.dead);
        assert_eq!(p.world_x, SPAWN_X);
        assert_eq!(p.vel_y, 0.0);
    }
}
