//! Deterministic platformer simulation
//!
//! Everything in here is pure state + math with no rendering or platform
//! dependencies, so the whole game logic tests natively. The shell drives it
//! by calling [`tick::frame`] once per animation frame and reacts to the
//! returned [`GameEvent`]s.

pub mod camera;
pub mod catalog;
pub mod geom;
pub mod pillar;
pub mod player;
pub mod stage;
pub mod tick;

pub use geom::{Rect, Side};
pub use pillar::{Pillar, PillarPhase};
pub use player::{Facing, Player};
pub use stage::{Block, Portal, SpikeTrap, Stage, Trap, World};
pub use tick::{frame, FrameInput, GameEvent};
