//! Timed crushing pillar state machine
//!
//! Each pillar cycles Waiting -> Descending -> Staying -> Ascending and
//! back, driven by elapsed wall-clock seconds. A pillar that strikes the
//! player mid-descent freezes and drops straight into Staying so one
//! descent can never deal damage twice.

use crate::consts::GROUND_Y;

use super::catalog::PILLAR;
use super::geom::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillarPhase {
    Waiting,
    Descending,
    Staying,
    Ascending,
}

#[derive(Debug, Clone)]
pub struct Pillar {
    pub x: f32,
    pub y: f32,
    /// Resting height the pillar ascends back to
    pub origin_y: f32,
    pub phase: PillarPhase,
    /// Seconds remaining in the current Waiting/Staying phase
    pub timer: f32,
    /// Waiting duration between cycles
    pub cycle_time: f32,
    /// How long the pillar rests on the ground after descending
    pub stay_duration: f32,
    /// Descent/ascent speed in pixels per second
    pub velocity: f32,
    /// Set when this descent already damaged the player
    pub hit_player: bool,
}

impl Pillar {
    pub fn new(x: f32, cycle_time: f32, stay_duration: f32, velocity: f32) -> Self {
        Self {
            x,
            y: 0.0,
            origin_y: 0.0,
            phase: PillarPhase::Waiting,
            timer: cycle_time,
            cycle_time,
            stay_duration,
            velocity,
            hit_player: false,
        }
    }

    /// The pillar's ground-anchored descent target
    #[inline]
    pub fn target_y() -> f32 {
        GROUND_Y - PILLAR.height()
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, PILLAR.width(), PILLAR.height())
    }

    /// Advance the cycle by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        match self.phase {
            PillarPhase::Waiting => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = PillarPhase::Descending;
                    self.hit_player = false;
                }
            }
            PillarPhase::Descending => {
                // Frozen once it has hit the player this cycle; contact
                // handling forces the transition to Staying instead.
                if !self.hit_player {
                    self.y += self.velocity * dt;
                    if self.y >= Self::target_y() {
                        self.y = Self::target_y();
                        self.phase = PillarPhase::Staying;
                        self.timer = self.stay_duration;
                    }
                }
            }
            PillarPhase::Staying => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = PillarPhase::Ascending;
                }
            }
            PillarPhase::Ascending => {
                self.y -= self.velocity * dt;
                if self.y <= self.origin_y {
                    self.y = self.origin_y;
                    self.phase = PillarPhase::Waiting;
                    self.timer = self.cycle_time;
                }
            }
        }
    }

    /// Player contact during descent: mark the cycle as spent and
    /// short-circuit into Staying.
    pub fn strike(&mut self) {
        self.hit_player = true;
        self.phase = PillarPhase::Staying;
        self.timer = self.stay_duration;
    }
}
