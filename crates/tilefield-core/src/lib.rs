//! Platform-free core of the tilefield background animation.
//!
//! A lattice of square tiles lights up around the pointer and under
//! expanding click ripples, then holds and fades back to dark. Nothing here
//! touches the browser: callers inject the viewport, timestamps, pointer
//! input and a [`Surface`] to paint on.

pub mod cancel;
pub mod color;
pub mod decay;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hash;
pub mod impulse;
pub mod pointer;
pub mod ripple;
pub mod settings;
pub mod surface;

pub use cancel::CancelToken;
pub use color::Color;
pub use decay::CellPhase;
pub use engine::{BackgroundAnimation, FrameStats};
pub use error::{ConfigError, EngineError};
pub use grid::{Grid, Viewport};
pub use pointer::PointerLatch;
pub use ripple::{Ripple, RippleSet, RippleShape, MAX_RIPPLES};
pub use settings::{Preset, RippleSettings, Settings, SettingsOverrides};
pub use surface::{GridLine, GridLineCache, LineStyle, Rect, Surface};
