//! Stage model and world state
//!
//! A stage is an immutable-after-startup collection of traps, blocks and an
//! optional exit portal. `World` consolidates all mutable simulation state
//! (current stage, player, camera, damage cooldown) into one struct owned by
//! the frame loop.

use glam::Vec2;

use crate::consts::*;

use super::catalog;
use super::geom::Rect;
use super::pillar::Pillar;
use super::player::Player;

/// A hazard placed in the stage
#[derive(Debug, Clone)]
pub enum Trap {
    Spike(SpikeTrap),
    Pillar(Pillar),
}

impl Trap {
    pub fn hitbox(&self) -> Rect {
        match self {
            Trap::Spike(s) => s.hitbox(),
            Trap::Pillar(p) => p.hitbox(),
        }
    }

    pub fn damage(&self) -> u32 {
        match self {
            Trap::Spike(_) => catalog::SPIKE.damage,
            Trap::Pillar(_) => catalog::PILLAR.damage,
        }
    }

    pub fn solid(&self) -> bool {
        match self {
            Trap::Spike(_) => catalog::SPIKE.solid,
            Trap::Pillar(_) => catalog::PILLAR.solid,
        }
    }
}

/// Static spike trap; the hitbox is derived from the sprite position on
/// every query so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct SpikeTrap {
    pub sprite_pos: Vec2,
}

impl SpikeTrap {
    pub fn hitbox(&self) -> Rect {
        catalog::SPIKE.hitbox(self.sprite_pos)
    }
}

/// A platform the player can stand on
#[derive(Debug, Clone)]
pub enum Block {
    Solid { sprite_pos: Vec2 },
    /// Bouncy platform; `bounce` is the upward (negative) impulse applied
    /// to the player on top contact.
    Slime { sprite_pos: Vec2, bounce: f32 },
}

impl Block {
    pub fn sprite_pos(&self) -> Vec2 {
        match self {
            Block::Solid { sprite_pos } | Block::Slime { sprite_pos, .. } => *sprite_pos,
        }
    }

    pub fn hitbox(&self) -> Rect {
        match self {
            Block::Solid { sprite_pos } => catalog::SOLID.hitbox(*sprite_pos),
            Block::Slime { sprite_pos, .. } => catalog::SLIME.hitbox(*sprite_pos),
        }
    }

    pub fn bounce(&self) -> Option<f32> {
        match self {
            Block::Solid { .. } => None,
            Block::Slime { bounce, .. } => Some(*bounce),
        }
    }
}

/// Animated level-exit portal
#[derive(Debug, Clone)]
pub struct Portal {
    pub pos: Vec2,
    pub frame: u32,
    pub last_frame_ms: f64,
    pub active: bool,
    /// One-shot latch so contact emits a single end-of-level event
    pub triggered: bool,
}

impl Portal {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            frame: 0,
            last_frame_ms: 0.0,
            active: true,
            triggered: false,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            PORTAL_SIZE * PORTAL_SCALE,
            PORTAL_SIZE * PORTAL_SCALE,
        )
    }

    pub fn animate(&mut self, now_ms: f64) {
        if now_ms - self.last_frame_ms > PORTAL_FRAME_MS {
            self.frame = (self.frame + 1) % PORTAL_FRAMES;
            self.last_frame_ms = now_ms;
        }
    }
}

/// One scrollable level
#[derive(Debug, Clone)]
pub struct Stage {
    pub width: f32,
    pub traps: Vec<Trap>,
    pub blocks: Vec<Block>,
    pub portal: Option<Portal>,
}

impl Stage {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            traps: Vec::new(),
            blocks: Vec::new(),
            portal: None,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub stages: Vec<Stage>,
    pub current_stage: usize,
    pub player: Player,
    pub camera_x: f32,
    /// Wall-clock timestamp of the last damage tick; one cooldown is
    /// shared across all hazards.
    pub last_damage_ms: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Allocate the stage table and the player. Stages are empty until the
    /// authoring calls populate them.
    pub fn new() -> Self {
        Self {
            stages: (0..STAGE_COUNT).map(|_| Stage::new(STAGE_WIDTH)).collect(),
            current_stage: 0,
            player: Player::new(),
            camera_x: 0.0,
            last_damage_ms: f64::NEG_INFINITY,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stages[self.current_stage]
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stages[self.current_stage]
    }

    /// Place a spike trap. An out-of-range stage index is a no-op.
    pub fn add_spike(&mut self, stage: usize, x: f32, y: f32) {
        let Some(stage) = self.stages.get_mut(stage) else {
            log::warn!("add_spike: stage {stage} does not exist");
            return;
        };
        stage.traps.push(Trap::Spike(SpikeTrap {
            sprite_pos: Vec2::new(x, y),
        }));
    }

    /// Place `count` pillars starting at `x`, spaced by the scaled pillar
    /// width. Timers are staggered by construction order so a row never
    /// moves in lockstep.
    pub fn add_pillar_row(
        &mut self,
        stage: usize,
        x: f32,
        count: u32,
        cycle_time: f32,
        stay_duration: f32,
        velocity: f32,
    ) {
        let Some(stage) = self.stages.get_mut(stage) else {
            log::warn!("add_pillar_row: stage {stage} does not exist");
            return;
        };
        for i in 0..count {
            let mut pillar = Pillar::new(
                x + i as f32 * catalog::PILLAR.width(),
                cycle_time,
                stay_duration,
                velocity,
            );
            pillar.timer += i as f32 * PILLAR_STAGGER_SECS;
            stage.traps.push(Trap::Pillar(pillar));
        }
    }

    pub fn add_solid_block(&mut self, stage: usize, x: f32, y: f32) {
        let Some(stage) = self.stages.get_mut(stage) else {
            log::warn!("add_solid_block: stage {stage} does not exist");
            return;
        };
        stage.blocks.push(Block::Solid {
            sprite_pos: Vec2::new(x, y),
        });
    }

    /// `bounce` magnitude is stored negative (upward) regardless of sign.
    pub fn add_slime_block(&mut self, stage: usize, x: f32, y: f32, bounce: f32) {
        let Some(stage) = self.stages.get_mut(stage) else {
            log::warn!("add_slime_block: stage {stage} does not exist");
            return;
        };
        stage.blocks.push(Block::Slime {
            sprite_pos: Vec2::new(x, y),
            bounce: -bounce.abs(),
        });
    }

    pub fn add_portal(&mut self, stage: usize, x: f32, y: f32) {
        let Some(stage) = self.stages.get_mut(stage) else {
            log::warn!("add_portal: stage {stage} does not exist");
            return;
        };
        stage.portal = Some(Portal::new(x, y));
    }

    /// Build the shipped level layout in stage 0.
    pub fn populate_default(&mut self) {
        // Spike gauntlet
        self.add_spike(0, 750.0, 481.0);
        self.add_spike(0, 950.0, 381.0);
        self.add_spike(0, 1150.0, 441.0);
        self.add_spike(0, 1350.0, 441.0);
        self.add_spike(0, 1550.0, 451.0);
        self.add_spike(0, 1750.0, 471.0);
        self.add_spike(0, 1950.0, 461.0);
        self.add_spike(0, 2085.0, 481.0);
        self.add_spike(0, 2350.0, 481.0);
        self.add_spike(0, 2350.0, 251.0);

        // Pillar corridor, each with its own rhythm
        self.add_pillar_row(0, 2900.0, 1, 2.5, 0.7, 300.0);
        self.add_pillar_row(0, 2975.0, 1, 2.3, 0.5, 320.0);
        self.add_pillar_row(0, 3050.0, 1, 2.0, 0.7, 350.0);
        self.add_pillar_row(0, 3125.0, 1, 2.2, 0.5, 400.0);
        self.add_pillar_row(0, 3200.0, 1, 1.8, 0.5, 420.0);
        self.add_pillar_row(0, 3275.0, 1, 2.5, 0.7, 450.0);
        self.add_pillar_row(0, 3350.0, 1, 2.1, 0.6, 500.0);
        self.add_pillar_row(0, 3425.0, 1, 1.9, 0.5, 550.0);
        self.add_pillar_row(0, 3500.0, 1, 2.0, 0.7, 600.0);
        self.add_pillar_row(0, 3575.0, 1, 1.8, 0.5, 580.0);

        // Platforming finale up to the portal
        self.add_solid_block(0, 4050.0, 441.0);
        self.add_spike(0, 4150.0, 401.0);
        self.add_slime_block(0, 4200.0, 481.0, 25.0);
        self.add_spike(0, 4280.0, 441.0);
        self.add_solid_block(0, 4350.0, 361.0);
        self.add_pillar_row(0, 4350.0, 1, 1.5, 0.5, 300.0);
        self.add_spike(0, 4350.0, 1.0);
        self.add_pillar_row(0, 4450.0, 1, 0.75, 0.3, 400.0);
        self.add_pillar_row(0, 4550.0, 1, 0.3, 0.6, 500.0);
        self.add_solid_block(0, 4650.0, 421.0);
        self.add_spike(0, 4750.0, 391.0);
        self.add_slime_block(0, 4800.0, 461.0, 25.0);
        self.add_solid_block(0, 4950.0, 351.0);
        self.add_spike(0, 5000.0, 301.0);
        self.add_spike(0, 5050.0, 401.0);
        self.add_slime_block(0, 5100.0, 481.0, 25.0);
        self.add_solid_block(0, 5250.0, 361.0);
        self.add_solid_block(0, 5314.0, 361.0);
        self.add_portal(0, 5370.0, 280.0);
    }

    /// Reset the player to spawn with full health, rewind the camera and
    /// re-arm the portal. Safe to call while alive (the cutscene does).
    pub fn respawn_player(&mut self) {
        self.player.respawn();
        self.camera_x = 0.0;
        if let Some(portal) = self.stage_mut().portal.as_mut() {
            portal.triggered = false;
        }
    }
}
