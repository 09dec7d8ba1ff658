//! Scrolling camera transform
//!
//! The camera is stationary until the player passes the viewport midpoint,
//! then tracks, clamped so the view never scrolls past stage bounds.

use crate::consts::VIEW_WIDTH;

/// Camera X for a given player world X and stage width.
pub fn camera_x(player_world_x: f32, stage_width: f32) -> f32 {
    let midpoint = VIEW_WIDTH / 2.0;
    if player_world_x > midpoint {
        (player_world_x - midpoint).clamp(0.0, stage_width - VIEW_WIDTH)
    } else {
        0.0
    }
}

/// World-to-screen X, before viewport pixel scaling.
#[inline]
pub fn to_screen_x(world_x: f32, camera_x: f32) -> f32 {
    world_x - camera_x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STAGE_WIDTH;

    #[test]
    fn test_stationary_before_midpoint() {
        assert_eq!(camera_x(0.0, STAGE_WIDTH), 0.0);
        assert_eq!(camera_x(VIEW_WIDTH / 2.0, STAGE_WIDTH), 0.0);
    }

    #[test]
    fn test_tracks_past_midpoint() {
        let cam = camera_x(1000.0, STAGE_WIDTH);
        assert_eq!(cam, 1000.0 - VIEW_WIDTH / 2.0);
        // The player stays centered on screen
        assert_eq!(to_screen_x(1000.0, cam), VIEW_WIDTH / 2.0);
    }

    #[test]
    fn test_clamped_at_stage_end() {
        let cam = camera_x(STAGE_WIDTH, STAGE_WIDTH);
        assert_eq!(cam, STAGE_WIDTH - VIEW_WIDTH);
    }
}
