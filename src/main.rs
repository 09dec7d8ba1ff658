//! Portal Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use portal_runner::assets::Assets;
    use portal_runner::audio::{AudioManager, SoundEffect};
    use portal_runner::consts::*;
    use portal_runner::input::apply_key;
    use portal_runner::render::Renderer;
    use portal_runner::sim::{frame, FrameInput, GameEvent, World};
    use portal_runner::Settings;

    /// End-of-level sequence: fade to black, hold the credit card, fade back
    /// in over the respawned world. The simulation is paused throughout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CutscenePhase {
        FadeOut,
        Credit,
        FadeIn,
    }

    struct Cutscene {
        phase: CutscenePhase,
        phase_start: f64,
    }

    enum CutsceneStep {
        Running,
        /// The screen just went fully black - reset the world behind it
        Respawn,
        Finished,
    }

    impl Cutscene {
        fn new(now_ms: f64) -> Self {
            Self {
                phase: CutscenePhase::FadeOut,
                phase_start: now_ms,
            }
        }

        fn update(&mut self, now_ms: f64) -> CutsceneStep {
            let elapsed = ((now_ms - self.phase_start) / 1000.0) as f32;
            match self.phase {
                CutscenePhase::FadeOut if elapsed >= FADE_SECS => {
                    self.phase = CutscenePhase::Credit;
                    self.phase_start = now_ms;
                    CutsceneStep::Respawn
                }
                CutscenePhase::Credit if elapsed >= CREDIT_SECS => {
                    self.phase = CutscenePhase::FadeIn;
                    self.phase_start = now_ms;
                    CutsceneStep::Running
                }
                CutscenePhase::FadeIn if elapsed >= FADE_SECS => CutsceneStep::Finished,
                _ => CutsceneStep::Running,
            }
        }

        fn overlay(&self, now_ms: f64) -> (f32, Option<&'static str>) {
            let t = (((now_ms - self.phase_start) / 1000.0) as f32 / FADE_SECS).clamp(0.0, 1.0);
            match self.phase {
                CutscenePhase::FadeOut => (t, None),
                CutscenePhase::Credit => (1.0, Some("Thanks for playing!")),
                CutscenePhase::FadeIn => (1.0 - t, None),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        world: World,
        input: FrameInput,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        cutscene: Option<Cutscene>,
        last_time: f64,
    }

    impl Game {
        fn new(renderer: Renderer, settings: Settings) -> Self {
            let mut world = World::new();
            world.populate_default();

            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                world,
                input: FrameInput::default(),
                renderer,
                audio,
                settings,
                cutscene: None,
                last_time: 0.0,
            }
        }

        fn tick(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(0.1)
            } else {
                1.0 / 60.0
            };
            self.last_time = time;

            if let Some(cutscene) = &mut self.cutscene {
                match cutscene.update(time) {
                    CutsceneStep::Running => {}
                    CutsceneStep::Respawn => {
                        self.world.respawn_player();
                    }
                    CutsceneStep::Finished => {
                        self.cutscene = None;
                    }
                }
            } else {
                let events = frame(&mut self.world, &self.input, time, dt);
                for event in events {
                    self.react(event, time);
                }
            }

            self.render(time);
        }

        fn react(&mut self, event: GameEvent, time: f64) {
            match event {
                GameEvent::Jump => self.audio.play(SoundEffect::Jump),
                GameEvent::SlimeBounce => self.audio.play(SoundEffect::SlimeBounce),
                GameEvent::Damaged => self.audio.play(SoundEffect::Damage),
                GameEvent::Died => self.audio.play(SoundEffect::Death),
                GameEvent::Respawned => {}
                GameEvent::PortalEntered => {
                    self.audio.play(SoundEffect::PortalEnter);
                    self.cutscene = Some(Cutscene::new(time));
                    log::info!("Level complete");
                }
            }
        }

        fn render(&self, time: f64) {
            if let Err(e) = self
                .renderer
                .draw(&self.world, &self.input, time, self.settings.debug_overlay)
            {
                log::warn!("Render error: {e:?}");
            }
            if let Some(cutscene) = &self.cutscene {
                let (alpha, text) = cutscene.overlay(time);
                if let Err(e) = self.renderer.draw_overlay(alpha, text) {
                    log::warn!("Overlay render error: {e:?}");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Portal Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let assets = match Assets::load().await {
            Ok(assets) => assets,
            Err(e) => {
                log::error!("Failed to load assets: {e:?}");
                return;
            }
        };

        let settings = Settings::load();
        let renderer = match Renderer::new(&canvas, assets) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to create renderer: {e:?}");
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(renderer, settings)));

        setup_input_handlers(game.clone());
        setup_mute_on_blur(game.clone());

        request_animation_frame(game);

        log::info!("Portal Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if apply_key(&mut g.input, &key, true) {
                    event.prevent_default();
                } else if key == "t" || key == "T" {
                    g.settings.debug_overlay = !g.settings.debug_overlay;
                    g.settings.save();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if apply_key(&mut g.input, &event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_on_blur(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                // Drop held keys so nothing sticks across the focus loss
                g.input = FrameInput::default();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().tick(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portal Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation for a few seconds of scripted input and print
/// where the player ends up. Useful as a quick sanity check that the
/// world behaves without a browser in the loop.
#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke_run() {
    use portal_runner::sim::{frame, FrameInput, World};

    let mut world = World::new();
    world.populate_default();

    let dt = 1.0 / 60.0;
    let input = FrameInput {
        right: true,
        ..Default::default()
    };

    for i in 0..600 {
        let now_ms = i as f64 * (1000.0 / 60.0);
        let events = frame(&mut world, &input, now_ms, dt);
        for event in &events {
            log::info!("t={now_ms:.0}ms event: {event:?}");
        }
    }

    println!(
        "After 10s holding right: x={:.1} y={:.1} health={} camera={:.1}",
        world.player.world_x, world.player.y, world.player.health, world.camera_x
    );
}
