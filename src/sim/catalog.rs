//! Static entity archetype tables
//!
//! Read-only geometry and damage data for each trap and block type.
//! Hitboxes are always derived from a sprite position plus these fixed
//! offsets and scales - they are never stored independently.

use glam::Vec2;

use super::geom::Rect;

/// Spike trap archetype
#[derive(Debug, Clone, Copy)]
pub struct TrapArchetype {
    pub sprite_w: f32,
    pub sprite_h: f32,
    pub hitbox_w: f32,
    pub hitbox_h: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub damage: u32,
    pub solid: bool,
}

impl TrapArchetype {
    /// Derive the world-space hitbox from a sprite position.
    /// Width and height scale; the offset does not.
    pub fn hitbox(&self, sprite_pos: Vec2) -> Rect {
        Rect::new(
            sprite_pos.x + self.offset_x,
            sprite_pos.y + self.offset_y,
            self.hitbox_w * self.scale,
            self.hitbox_h * self.scale,
        )
    }
}

pub const SPIKE: TrapArchetype = TrapArchetype {
    sprite_w: 43.0,
    sprite_h: 43.0,
    hitbox_w: 29.0,
    hitbox_h: 25.0,
    offset_x: (53.0 - 30.0) / 2.0,
    offset_y: 12.0,
    scale: 1.8,
    damage: 10,
    solid: true,
};

/// Crushing pillar archetype - the hitbox is the full scaled sprite
#[derive(Debug, Clone, Copy)]
pub struct PillarArchetype {
    pub sprite_w: f32,
    pub sprite_h: f32,
    pub scale: f32,
    pub damage: u32,
    pub solid: bool,
}

impl PillarArchetype {
    #[inline]
    pub fn width(&self) -> f32 {
        self.sprite_w * self.scale
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.sprite_h * self.scale
    }
}

pub const PILLAR: PillarArchetype = PillarArchetype {
    sprite_w: 25.0,
    sprite_h: 64.0,
    scale: 3.0,
    damage: 25,
    solid: true,
};

/// Platform block archetype
#[derive(Debug, Clone, Copy)]
pub struct BlockArchetype {
    pub sprite_w: f32,
    pub sprite_h: f32,
    pub hitbox_w: f32,
    pub hitbox_h: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl BlockArchetype {
    pub fn hitbox(&self, sprite_pos: Vec2) -> Rect {
        Rect::new(
            sprite_pos.x + self.offset_x,
            sprite_pos.y + self.offset_y,
            self.hitbox_w * self.scale,
            self.hitbox_h * self.scale,
        )
    }
}

pub const SOLID: BlockArchetype = BlockArchetype {
    sprite_w: 32.0,
    sprite_h: 16.0,
    hitbox_w: 16.0,
    hitbox_h: 16.0,
    offset_x: 12.0,
    offset_y: 2.0,
    scale: 2.0,
};

/// Slime hitbox covers only the top few pixels so that bounce detection
/// triggers on top contact rather than side brushes.
pub const SLIME: BlockArchetype = BlockArchetype {
    sprite_w: 32.0,
    sprite_h: 16.0,
    hitbox_w: 28.0,
    hitbox_h: 4.0,
    offset_x: 2.0,
    offset_y: 10.0,
    scale: 2.0,
};
