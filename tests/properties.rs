//! Property tests over the simulation invariants

use proptest::prelude::*;

use portal_runner::consts::*;
use portal_runner::sim::{camera, frame, geom, FrameInput, Player, Rect, Side, World};

proptest! {
    /// The player never leaves the stage horizontally, whatever the input.
    #[test]
    fn player_stays_in_stage_bounds(
        start_x in -1000.0f32..8000.0,
        steps in prop::collection::vec(prop::bool::ANY, 1..120),
    ) {
        let mut world = World::new();
        world.player.world_x = start_x;

        for (i, go_right) in steps.iter().enumerate() {
            let input = FrameInput {
                left: !go_right,
                right: *go_right,
                jump: false,
            };
            frame(&mut world, &input, i as f64 * 16.7, 1.0 / 60.0);

            prop_assert!(world.player.world_x >= 0.0);
            prop_assert!(
                world.player.world_x <= STAGE_WIDTH - Player::scaled_hitbox_width()
            );
        }
    }

    /// Camera holds at zero before the midpoint and never scrolls past the
    /// stage edge.
    #[test]
    fn camera_within_scroll_range(x in 0.0f32..STAGE_WIDTH) {
        let cam = camera::camera_x(x, STAGE_WIDTH);
        prop_assert!(cam >= 0.0);
        prop_assert!(cam <= STAGE_WIDTH - VIEW_WIDTH);
        if x <= VIEW_WIDTH / 2.0 {
            prop_assert_eq!(cam, 0.0);
        }
    }

    /// The resolver picks the face with the smallest absolute penetration.
    #[test]
    fn resolver_picks_minimum_penetration(
        ax in -100.0f32..100.0,
        ay in -100.0f32..100.0,
        aw in 1.0f32..80.0,
        ah in 1.0f32..80.0,
    ) {
        let obstacle = Rect::new(0.0, 0.0, 50.0, 50.0);
        let actor = Rect::new(ax, ay, aw, ah);
        prop_assume!(geom::overlaps(&actor, &obstacle));

        let from_top = (obstacle.top() - actor.bottom()).abs();
        let from_bottom = (obstacle.bottom() - actor.top()).abs();
        let from_right = (obstacle.right() - actor.left()).abs();
        let from_left = (obstacle.left() - actor.right()).abs();
        let min = from_top.min(from_bottom).min(from_right).min(from_left);

        let chosen = match geom::min_penetration_side(&actor, &obstacle) {
            Side::Top => from_top,
            Side::Bottom => from_bottom,
            Side::Right => from_right,
            Side::Left => from_left,
        };
        prop_assert_eq!(chosen, min);
    }

    /// Health only moves down between respawns and stays in range.
    #[test]
    fn health_is_monotone_between_respawns(
        start_x in 0.0f32..5500.0,
        frames in 10u32..200,
    ) {
        let mut world = World::new();
        world.populate_default();
        world.player.world_x = start_x;

        let input = FrameInput {
            right: true,
            ..Default::default()
        };
        let mut previous = world.player.health;

        for i in 0..frames {
            let events = frame(&mut world, &input, i as f64 * 16.7, 1.0 / 60.0);
            let health = world.player.health;
            prop_assert!(health <= MAX_HEALTH);

            let respawned = events
                .iter()
                .any(|e| *e == portal_runner::sim::GameEvent::Respawned);
            if respawned {
                prop_assert_eq!(health, MAX_HEALTH);
            } else {
                prop_assert!(health <= previous);
            }
            previous = health;
        }
    }
}
