//! Per-frame simulation orchestrator
//!
//! Advances the world by one frame in a fixed order: respawn check, portal
//! animation/contact, pillar state machines, player movement + trap
//! collisions + camera, block collisions, gravity, floor clamp, animation
//! bookkeeping. Cooldowns are wall-clock based; the gravity/movement
//! integrator is per-frame (see DESIGN.md).

use crate::consts::*;

use super::camera;
use super::catalog;
use super::geom::{self, Rect, Side};
use super::pillar::PillarPhase;
use super::player::{Facing, Player};
use super::stage::{Trap, World};

/// Logical input state for one frame, read once at frame start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Things that happened this frame which the shell may react to
/// (sounds, cutscene). The sim itself takes no further action on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    SlimeBounce,
    Damaged,
    Died,
    Respawned,
    PortalEntered,
}

/// Advance the world by one frame. `now_ms` is wall-clock milliseconds,
/// `dt` the elapsed seconds since the previous frame.
pub fn frame(world: &mut World, input: &FrameInput, now_ms: f64, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Death blink window elapsed - back to spawn
    if world.player.dead && now_ms - world.player.died_at_ms >= DEATH_BLINK_MS {
        world.respawn_player();
        events.push(GameEvent::Respawned);
    }

    // Portal animation and contact, one-shot until respawn re-arms it
    let player_rect = world.player.hitbox();
    if let Some(portal) = world.stage_mut().portal.as_mut() {
        if portal.active {
            portal.animate(now_ms);
            if !portal.triggered && geom::overlaps(&player_rect, &portal.hitbox()) {
                portal.triggered = true;
                events.push(GameEvent::PortalEntered);
            }
        }
    }

    // Pillars run on their own clocks whether or not the player is alive
    for trap in world.stage_mut().traps.iter_mut() {
        if let Trap::Pillar(pillar) = trap {
            pillar.advance(dt);
        }
    }

    // No steering while dead; physics below still applies
    if world.player.health > 0 {
        handle_movement(world, input, now_ms, &mut events);
    }

    resolve_block_collisions(world, &mut events);

    // Semi-implicit Euler, position before velocity
    world.player.y += world.player.vel_y;
    world.player.vel_y += GRAVITY;

    // Floor clamp
    let player = &mut world.player;
    let hitbox_bottom = player.y + PLAYER_HITBOX_OFFSET_Y + Player::scaled_hitbox_height();
    if hitbox_bottom > GROUND_Y {
        player.y = GROUND_Y - Player::scaled_hitbox_height() - PLAYER_HITBOX_OFFSET_Y;
        player.vel_y = 0.0;
        player.grounded = true;
    }

    update_animation(world, input, now_ms);

    events
}

fn handle_movement(world: &mut World, input: &FrameInput, now_ms: f64, events: &mut Vec<GameEvent>) {
    if input.left {
        world.player.world_x -= MOVE_SPEED;
    }
    if input.right {
        world.player.world_x += MOVE_SPEED;
    }

    resolve_trap_collisions(world, now_ms, events);

    // World bounds
    let max_x = world.stage().width - Player::scaled_hitbox_width();
    world.player.world_x = world.player.world_x.clamp(0.0, max_x);

    world.camera_x = camera::camera_x(world.player.world_x, world.stage().width);

    // Jump: needs ground under the feet, an expired cooldown, and no
    // slime contact (the bounce owns the vertical velocity there)
    let player = &mut world.player;
    if input.jump && player.grounded && now_ms >= player.jump_ready_at_ms && !player.on_slime {
        player.vel_y = JUMP_IMPULSE;
        player.grounded = false;
        player.jump_ready_at_ms = now_ms + JUMP_COOLDOWN_MS;
        events.push(GameEvent::Jump);
    }
}

fn resolve_trap_collisions(world: &mut World, now_ms: f64, events: &mut Vec<GameEvent>) {
    let World {
        stages,
        current_stage,
        player,
        last_damage_ms,
        ..
    } = world;
    let stage = &mut stages[*current_stage];

    for trap in stage.traps.iter_mut() {
        let trap_rect = trap.hitbox();
        if !geom::overlaps(&player.hitbox(), &trap_rect) {
            continue;
        }

        if trap.solid() {
            push_out(player, &trap_rect);
        }

        let cooled = now_ms - *last_damage_ms > DAMAGE_COOLDOWN_MS;
        match trap {
            Trap::Pillar(pillar) => {
                // One hit per descent, additionally gated by the global cooldown
                if pillar.phase == PillarPhase::Descending && !pillar.hit_player && cooled {
                    *last_damage_ms = now_ms;
                    pillar.strike();
                    events.push(GameEvent::Damaged);
                    if player.apply_damage(catalog::PILLAR.damage, now_ms) {
                        events.push(GameEvent::Died);
                    }
                }
            }
            Trap::Spike(_) => {
                if cooled {
                    *last_damage_ms = now_ms;
                    events.push(GameEvent::Damaged);
                    if player.apply_damage(catalog::SPIKE.damage, now_ms) {
                        events.push(GameEvent::Died);
                    }
                }
            }
        }
    }
}

/// Push the player out of a solid obstacle along the least-overlap face.
fn push_out(player: &mut Player, obstacle: &Rect) {
    match geom::min_penetration_side(&player.hitbox(), obstacle) {
        Side::Top => {
            player.y = obstacle.top() - Player::scaled_hitbox_height() - PLAYER_HITBOX_OFFSET_Y;
            player.vel_y = 0.0;
            player.grounded = true;
        }
        Side::Bottom => {
            player.y = obstacle.bottom() - PLAYER_HITBOX_OFFSET_Y;
            player.vel_y = 0.0;
        }
        Side::Right => {
            player.world_x = obstacle.right() - PLAYER_HITBOX_OFFSET_X;
        }
        Side::Left => {
            player.world_x =
                obstacle.left() - Player::scaled_hitbox_width() - PLAYER_HITBOX_OFFSET_X;
        }
    }
}

fn resolve_block_collisions(world: &mut World, events: &mut Vec<GameEvent>) {
    let World {
        stages,
        current_stage,
        player,
        ..
    } = world;
    let stage = &stages[*current_stage];

    // Grounded is re-derived from this frame's contacts (plus the floor
    // clamp afterwards); slime contact likewise
    player.grounded = false;
    let mut on_slime = false;

    for block in &stage.blocks {
        let rect = block.hitbox();
        if !geom::overlaps(&player.hitbox(), &rect) {
            continue;
        }

        match geom::min_penetration_side(&player.hitbox(), &rect) {
            Side::Top => {
                player.y = rect.top() - Player::scaled_hitbox_height() - PLAYER_HITBOX_OFFSET_Y;
                player.grounded = true;
                if let Some(bounce) = block.bounce() {
                    // Bounce replaces the landing: exact configured impulse,
                    // whatever the incoming velocity was
                    player.vel_y = bounce;
                    on_slime = true;
                    events.push(GameEvent::SlimeBounce);
                } else {
                    player.vel_y = 0.0;
                }
            }
            Side::Bottom => {
                player.y = rect.bottom() - PLAYER_HITBOX_OFFSET_Y;
                player.vel_y = 0.0;
            }
            Side::Right => {
                player.world_x = rect.right() - PLAYER_HITBOX_OFFSET_X;
            }
            Side::Left => {
                player.world_x =
                    rect.left() - Player::scaled_hitbox_width() - PLAYER_HITBOX_OFFSET_X;
            }
        }
    }

    player.on_slime = on_slime;
}

fn update_animation(world: &mut World, input: &FrameInput, now_ms: f64) {
    let player = &mut world.player;

    if input.left || input.right {
        if now_ms - player.last_step_ms > WALK_STEP_MS {
            player.anim_step = (player.anim_step + 1) % 2;
            player.last_step_ms = now_ms;
        }
    } else {
        player.anim_step = 0;
    }

    if input.right {
        player.facing = Facing::Right;
    }
    if input.left {
        player.facing = Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pillar::Pillar;

    const DT: f32 = 1.0 / 60.0;

    fn ground_world() -> World {
        let mut world = World::new();
        world.player.y = Player::spawn_y();
        world
    }

    fn right() -> FrameInput {
        FrameInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_into_spike_clamps_and_damages_once() {
        let mut world = ground_world();
        // Ground-level spike; hitbox left edge lands at 4161.5
        world.add_spike(0, 4150.0, 481.0);
        world.player.world_x = 4090.0;

        let spike_left = catalog::SPIKE.hitbox(glam::Vec2::new(4150.0, 481.0)).left();
        let expected_x = spike_left - Player::scaled_hitbox_width() - PLAYER_HITBOX_OFFSET_X;

        // First frame: no contact yet
        let events = frame(&mut world, &right(), 1000.0, DT);
        assert!(!events.contains(&GameEvent::Damaged));
        assert_eq!(world.player.world_x, 4095.0);

        // Second frame: contact, horizontal push-back, one damage tick
        let events = frame(&mut world, &right(), 1016.0, DT);
        assert!(events.contains(&GameEvent::Damaged));
        assert_eq!(world.player.health, 90);
        assert!((world.player.world_x - expected_x).abs() < 1e-3);

        // Third frame, still within the 500ms cooldown: pushed but unhurt
        let events = frame(&mut world, &right(), 1033.0, DT);
        assert!(!events.contains(&GameEvent::Damaged));
        assert_eq!(world.player.health, 90);
    }

    #[test]
    fn test_damage_cooldown_expires() {
        let mut world = ground_world();
        world.add_spike(0, 4150.0, 481.0);
        world.player.world_x = 4090.0;

        frame(&mut world, &right(), 1000.0, DT);
        frame(&mut world, &right(), 1016.0, DT);
        assert_eq!(world.player.health, 90);

        // Past the cooldown the next contact hurts again
        let events = frame(&mut world, &right(), 1600.0, DT);
        assert!(events.contains(&GameEvent::Damaged));
        assert_eq!(world.player.health, 80);
    }

    #[test]
    fn test_world_x_clamped_to_stage_bounds() {
        let mut world = ground_world();
        world.player.world_x = -50.0;
        frame(&mut world, &FrameInput::default(), 0.0, DT);
        assert_eq!(world.player.world_x, 0.0);

        world.player.world_x = STAGE_WIDTH + 500.0;
        frame(&mut world, &FrameInput::default(), 16.0, DT);
        assert_eq!(
            world.player.world_x,
            STAGE_WIDTH - Player::scaled_hitbox_width()
        );
    }

    #[test]
    fn test_jump_impulse_and_cooldown() {
        let mut world = ground_world();
        world.player.grounded = true;

        let input = FrameInput {
            jump: true,
            ..Default::default()
        };
        let events = frame(&mut world, &input, 1000.0, DT);
        assert!(events.contains(&GameEvent::Jump));
        // Impulse applied, then one integration step already ran
        assert_eq!(world.player.vel_y, JUMP_IMPULSE + GRAVITY);

        // Landing again inside the cooldown window does not re-jump
        world.player.grounded = true;
        world.player.vel_y = 0.0;
        let events = frame(&mut world, &input, 1300.0, DT);
        assert!(!events.contains(&GameEvent::Jump));

        world.player.grounded = true;
        let events = frame(&mut world, &input, 1600.0, DT);
        assert!(events.contains(&GameEvent::Jump));
    }

    #[test]
    fn test_slime_bounce_sets_exact_impulse() {
        let mut world = World::new();
        world.add_slime_block(0, 4200.0, 481.0, 25.0);

        let slime = world.stage().blocks[0].hitbox();
        // Drop the player straight onto the slime top
        world.player.world_x = slime.left();
        world.player.y = slime.top() - Player::scaled_hitbox_height() - PLAYER_HITBOX_OFFSET_Y + 2.0;
        world.player.vel_y = 12.0;

        let events = frame(&mut world, &FrameInput::default(), 1000.0, DT);
        assert!(events.contains(&GameEvent::SlimeBounce));
        // Exactly the configured impulse (plus the gravity step that follows)
        assert_eq!(world.player.vel_y, -25.0 + GRAVITY);
        assert!(world.player.on_slime);

        // Slime contact suppresses manual jumps
        let input = FrameInput {
            jump: true,
            ..Default::default()
        };
        world.player.grounded = true;
        world.player.on_slime = true;
        let events = frame(&mut world, &input, 2000.0, DT);
        assert!(!events.contains(&GameEvent::Jump));
    }

    #[test]
    fn test_descending_pillar_hits_once_per_cycle() {
        let mut world = ground_world();
        let mut pillar = Pillar::new(world.player.world_x, 1.0, 0.5, 300.0);
        // Descended far enough to overlap the player
        pillar.phase = PillarPhase::Descending;
        pillar.y = Pillar::target_y() - 10.0;
        world.stage_mut().traps.push(Trap::Pillar(pillar));

        let events = frame(&mut world, &FrameInput::default(), 1000.0, DT);
        assert!(events.contains(&GameEvent::Damaged));
        assert_eq!(world.player.health, 75);

        // Contact short-circuited the descent
        match &world.stage().traps[0] {
            Trap::Pillar(p) => {
                assert_eq!(p.phase, PillarPhase::Staying);
                assert!(p.hit_player);
            }
            _ => unreachable!(),
        }

        // Well past the cooldown, same cycle: still only one deduction
        let events = frame(&mut world, &FrameInput::default(), 2000.0, DT);
        assert!(!events.contains(&GameEvent::Damaged));
        assert_eq!(world.player.health, 75);
    }

    #[test]
    fn test_death_blink_then_respawn() {
        let mut world = ground_world();
        world.add_spike(0, 4150.0, 481.0);
        world.player.world_x = 4090.0;
        world.player.health = 10;

        frame(&mut world, &right(), 1000.0, DT);
        let events = frame(&mut world, &right(), 1016.0, DT);
        assert!(events.contains(&GameEvent::Died));
        assert!(world.player.dead);
        assert_eq!(world.player.health, 0);

        // Mid-blink: still dead, no input processed
        let events = frame(&mut world, &right(), 1816.0, DT);
        assert!(!events.contains(&GameEvent::Respawned));
        assert!(world.player.dead);

        // Blink window over: back at spawn with full health
        let events = frame(&mut world, &right(), 2600.0, DT);
        assert!(events.contains(&GameEvent::Respawned));
        assert_eq!(world.player.health, MAX_HEALTH);
        assert_eq!(world.player.world_x, SPAWN_X + MOVE_SPEED);
    }

    #[test]
    fn test_portal_contact_is_one_shot() {
        let mut world = ground_world();
        world.add_portal(0, world.player.world_x, world.player.y);

        let events = frame(&mut world, &FrameInput::default(), 1000.0, DT);
        assert!(events.contains(&GameEvent::PortalEntered));

        // Still overlapping next frame: no second event
        let events = frame(&mut world, &FrameInput::default(), 1016.0, DT);
        assert!(!events.contains(&GameEvent::PortalEntered));

        // Respawn re-arms the portal
        world.respawn_player();
        world.add_portal(0, world.player.world_x, world.player.y);
        let events = frame(&mut world, &FrameInput::default(), 2000.0, DT);
        assert!(events.contains(&GameEvent::PortalEntered));
    }

    #[test]
    fn test_gravity_integration_order() {
        let mut world = World::new();
        world.player.y = 100.0;
        world.player.vel_y = 10.0;

        frame(&mut world, &FrameInput::default(), 0.0, DT);
        // Position moved by the old velocity, then velocity accrued gravity
        assert_eq!(world.player.y, 110.0);
        assert_eq!(world.player.vel_y, 10.0 + GRAVITY);
    }

    #[test]
    fn test_floor_clamp_grounds_player() {
        let mut world = World::new();
        world.player.y = GROUND_Y; // well below the resting position
        world.player.vel_y = 20.0;

        frame(&mut world, &FrameInput::default(), 0.0, DT);
        assert_eq!(world.player.y, Player::spawn_y());
        assert_eq!(world.player.vel_y, 0.0);
        assert!(world.player.grounded);
    }

    #[test]
    fn test_camera_follows_and_clamps() {
        let mut world = ground_world();
        world.player.world_x = 200.0;
        frame(&mut world, &FrameInput::default(), 0.0, DT);
        assert_eq!(world.camera_x, 0.0);

        world.player.world_x = 3000.0;
        frame(&mut world, &FrameInput::default(), 16.0, DT);
        assert_eq!(world.camera_x, 3000.0 - VIEW_WIDTH / 2.0);

        world.player.world_x = STAGE_WIDTH - Player::scaled_hitbox_width();
        frame(&mut world, &FrameInput::default(), 32.0, DT);
        assert_eq!(world.camera_x, STAGE_WIDTH - VIEW_WIDTH);
    }

    #[test]
    fn test_facing_and_walk_cycle() {
        let mut world = ground_world();
        frame(&mut world, &right(), 1000.0, DT);
        assert_eq!(world.player.facing, Facing::Right);
        assert_eq!(world.player.anim_step, 1);

        // Within the step interval the frame holds
        frame(&mut world, &right(), 1100.0, DT);
        assert_eq!(world.player.anim_step, 1);

        // Past it, the cycle advances
        frame(&mut world, &right(), 1250.0, DT);
        assert_eq!(world.player.anim_step, 0);

        // Releasing movement snaps back to standing
        frame(&mut world, &FrameInput::default(), 1300.0, DT);
        assert_eq!(world.player.anim_step, 0);

        let input = FrameInput {
            left: true,
            ..Default::default()
        };
        frame(&mut world, &input, 1400.0, DT);
        assert_eq!(world.player.facing, Facing::Left);
    }
}
