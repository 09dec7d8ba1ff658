//! Canvas 2D rendering
//!
//! Draws the world in base viewport coordinates (1366x633); any viewport
//! scaling happens through CSS on the canvas element. Everything here is
//! read-only over the simulation state.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::Assets;
use crate::consts::*;
use crate::sim::{camera, catalog, Block, FrameInput, Trap, World};

const DAMAGE_TINT: &str = "rgba(203, 69, 94, 0.6)";
const HEALTH_FILL_COLOR: &str = "#cb455e";
const HITBOX_COLOR: &str = "#00ff00";

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    assets: Assets,
    /// Offscreen scratch canvas for compositing the damage tint
    tint_canvas: HtmlCanvasElement,
    tint_ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement, assets: Assets) -> Result<Self, JsValue> {
        let ctx = context_2d(canvas)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let tint_canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        tint_canvas.set_width((PLAYER_SPRITE_W * PLAYER_SCALE).ceil() as u32);
        tint_canvas.set_height((PLAYER_SPRITE_H * PLAYER_SCALE).ceil() as u32);
        let tint_ctx = context_2d(&tint_canvas)?;

        Ok(Self {
            ctx,
            assets,
            tint_canvas,
            tint_ctx,
        })
    }

    /// Render one frame of the world.
    pub fn draw(
        &self,
        world: &World,
        input: &FrameInput,
        now_ms: f64,
        debug: bool,
    ) -> Result<(), JsValue> {
        let cam = world.camera_x;

        self.draw_background()?;
        self.draw_ground(cam)?;
        self.draw_blocks(world, cam, debug)?;
        self.draw_portal(world, cam)?;
        self.draw_traps(world, cam, debug)?;
        self.draw_player(world, input, cam, now_ms, debug)?;
        self.draw_health_bar(world.player.health)?;

        if debug {
            self.draw_debug_readout(world)?;
        }
        Ok(())
    }

    fn draw_background(&self) -> Result<(), JsValue> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &self.assets.background,
                0.0,
                0.0,
                VIEW_WIDTH as f64,
                VIEW_HEIGHT as f64,
            )
    }

    fn draw_ground(&self, cam: f32) -> Result<(), JsValue> {
        let first = (cam / TILE_SIZE).floor() as i32;
        let count = (VIEW_WIDTH / TILE_SIZE).ceil() as i32 + 1;
        for i in first..first + count {
            let x = camera::to_screen_x(i as f32 * TILE_SIZE, cam);
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.assets.ground,
                x as f64,
                GROUND_Y as f64,
                TILE_SIZE as f64,
                TILE_SIZE as f64,
            )?;
        }
        Ok(())
    }

    fn draw_blocks(&self, world: &World, cam: f32, debug: bool) -> Result<(), JsValue> {
        for block in &world.stage().blocks {
            let pos = block.sprite_pos();
            let (img, arch) = match block {
                Block::Solid { .. } => (&self.assets.block, &catalog::SOLID),
                Block::Slime { .. } => (&self.assets.slime, &catalog::SLIME),
            };
            let w = arch.sprite_w * arch.scale;
            let h = arch.sprite_h * arch.scale;
            let x = camera::to_screen_x(pos.x, cam);
            if off_screen(x, w) {
                continue;
            }
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                x as f64,
                pos.y as f64,
                w as f64,
                h as f64,
            )?;
            if debug {
                self.stroke_hitbox(&block.hitbox(), cam)?;
            }
        }
        Ok(())
    }

    fn draw_traps(&self, world: &World, cam: f32, debug: bool) -> Result<(), JsValue> {
        for trap in &world.stage().traps {
            match trap {
                Trap::Spike(spike) => {
                    let w = catalog::SPIKE.sprite_w * catalog::SPIKE.scale;
                    let h = catalog::SPIKE.sprite_h * catalog::SPIKE.scale;
                    let x = camera::to_screen_x(spike.sprite_pos.x, cam);
                    if off_screen(x, w) {
                        continue;
                    }
                    self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &self.assets.spike,
                        x as f64,
                        spike.sprite_pos.y as f64,
                        w as f64,
                        h as f64,
                    )?;
                }
                Trap::Pillar(pillar) => {
                    let x = camera::to_screen_x(pillar.x, cam);
                    if off_screen(x, catalog::PILLAR.width()) {
                        continue;
                    }
                    self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &self.assets.pillar,
                        x as f64,
                        pillar.y as f64,
                        catalog::PILLAR.width() as f64,
                        catalog::PILLAR.height() as f64,
                    )?;
                }
            }
            if debug {
                self.stroke_hitbox(&trap.hitbox(), cam)?;
            }
        }
        Ok(())
    }

    fn draw_portal(&self, world: &World, cam: f32) -> Result<(), JsValue> {
        let Some(portal) = &world.stage().portal else {
            return Ok(());
        };
        if !portal.active {
            return Ok(());
        }
        let x = camera::to_screen_x(portal.pos.x, cam);
        let size = PORTAL_SIZE * PORTAL_SCALE;
        if off_screen(x, size) {
            return Ok(());
        }
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &self.assets.portal,
                (portal.frame as f32 * PORTAL_SIZE) as f64,
                0.0,
                PORTAL_SIZE as f64,
                PORTAL_SIZE as f64,
                x as f64,
                portal.pos.y as f64,
                size as f64,
                size as f64,
            )
    }

    fn draw_player(
        &self,
        world: &World,
        input: &FrameInput,
        cam: f32,
        now_ms: f64,
        debug: bool,
    ) -> Result<(), JsValue> {
        let player = &world.player;
        if !player.blink_visible(now_ms) {
            return Ok(());
        }

        let moving = input.left || input.right;
        let img = if moving {
            &self.assets.player_walk[player.anim_step as usize % 2]
        } else {
            &self.assets.player_idle
        };

        let w = (PLAYER_SPRITE_W * PLAYER_SCALE) as f64;
        let h = (PLAYER_SPRITE_H * PLAYER_SCALE) as f64;
        let x = camera::to_screen_x(player.world_x, cam) as f64;
        let y = player.y as f64;

        let flash = !player.dead && now_ms - world.last_damage_ms < DAMAGE_FLASH_MS;
        let flip = player.facing == crate::sim::Facing::Left;

        self.ctx.save();
        if flip {
            self.ctx.translate(x + w, y)?;
            self.ctx.scale(-1.0, 1.0)?;
        } else {
            self.ctx.translate(x, y)?;
        }
        if flash {
            self.tint_sprite(img, w, h)?;
            self.ctx
                .draw_image_with_html_canvas_element(&self.tint_canvas, 0.0, 0.0)?;
        } else {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)?;
        }
        self.ctx.restore();

        if debug {
            self.stroke_hitbox(&player.hitbox(), cam)?;
        }
        Ok(())
    }

    /// Composite the damage tint over the sprite on the scratch canvas.
    fn tint_sprite(&self, img: &HtmlImageElement, w: f64, h: f64) -> Result<(), JsValue> {
        let ctx = &self.tint_ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.tint_canvas.width() as f64,
            self.tint_canvas.height() as f64,
        );
        ctx.set_global_composite_operation("source-over")?;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)?;
        // Only tint opaque sprite pixels
        ctx.set_global_composite_operation("source-atop")?;
        ctx.set_fill_style_str(DAMAGE_TINT);
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_global_composite_operation("source-over")?;
        Ok(())
    }

    fn draw_health_bar(&self, health: u32) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.scale(HEALTHBAR_SCALE, HEALTHBAR_SCALE)?;
        // Bar position is specified in screen pixels, so undo the HUD scale
        let x = HEALTH_BAR_X / HEALTHBAR_SCALE;
        let y = HEALTH_BAR_Y / HEALTHBAR_SCALE;
        self.ctx
            .draw_image_with_html_image_element(&self.assets.health_bar, x, y)?;
        self.ctx.set_fill_style_str(HEALTH_FILL_COLOR);
        // One unscaled pixel of fill per health point
        self.ctx.fill_rect(
            x + HEALTH_FILL_X,
            y + HEALTH_FILL_Y,
            health as f64,
            HEALTH_FILL_H,
        );
        self.ctx.restore();
        Ok(())
    }

    fn stroke_hitbox(&self, rect: &crate::sim::Rect, cam: f32) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(HITBOX_COLOR);
        self.ctx.stroke_rect(
            camera::to_screen_x(rect.left(), cam) as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
        Ok(())
    }

    fn draw_debug_readout(&self, world: &World) -> Result<(), JsValue> {
        let player = &world.player;
        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.set_font("16px monospace");
        self.ctx.fill_text(
            &format!(
                "x: {:.1}  y: {:.1}  vy: {:.1}  hp: {}  cam: {:.1}",
                player.world_x, player.y, player.vel_y, player.health, world.camera_x
            ),
            10.0,
            (HEALTH_BAR_Y + 25.0) * HEALTHBAR_SCALE,
        )?;
        Ok(())
    }

    /// Full-screen fade used by the end-of-level cutscene, with optional
    /// centered credit text.
    pub fn draw_overlay(&self, alpha: f32, text: Option<&str>) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str("#000000");
        self.ctx
            .fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
        self.ctx.restore();

        if let Some(text) = text {
            self.ctx.save();
            self.ctx.set_fill_style_str("#ffffff");
            self.ctx.set_font("48px sans-serif");
            self.ctx.set_text_align("center");
            self.ctx.fill_text(
                text,
                VIEW_WIDTH as f64 / 2.0,
                VIEW_HEIGHT as f64 / 2.0,
            )?;
            self.ctx.restore();
        }
        Ok(())
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}

fn off_screen(screen_x: f32, width: f32) -> bool {
    screen_x + width < 0.0 || screen_x > VIEW_WIDTH
}
