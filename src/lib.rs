//! # lsystem-turtle
//!
//! Renders (possibly stochastic) Lindenmayer systems as 2D vector drawings.
//!
//! A [`Grammar`] is rewritten and executed in one pass: rule bodies are walked
//! recursively and every symbol reaching depth zero drives a [`Turtle`]
//! straight away, so memory stays proportional to the iteration count rather
//! than to the length of the expanded string.
//!
//! Two turtles are provided. [`StateTurtle`] only tracks its pose and is used to
//! work out where a drawing starts. [`StreamTurtle`] also emits a stream of
//! [`PathCommand`]s, which [`EpsWriter`] formats as Encapsulated PostScript.
//!
//! ```
//! use lsystem_turtle::{EpsDocument, LSystemConfig};
//!
//! let config = LSystemConfig::from_json(r#"{
//!     "actions": { "F": "draw", "+": "turnL", "-": "turnR" },
//!     "axiom": "F",
//!     "rules": { "F": ["F+F-F"] },
//!     "parameters": { "step": 10.0, "angle": 60.0, "start": [0.0, 0.0, 0.0] }
//! }"#)?;
//! let (grammar, start) = config.build()?;
//! let (eps, bbox) = EpsDocument::new("koch").render(&grammar, &start, 2, Vec::<u8>::new())?;
//! assert!(String::from_utf8_lossy(&eps).ends_with("%%EOF\n"));
//! assert!(bbox.width() > 0.0);
//! # Ok::<(), lsystem_turtle::Error>(())
//! ```

pub mod bounds;
pub mod config;
pub mod eps;
pub mod error;
pub mod grammar;
pub mod state_turtle;
pub mod stream_turtle;
pub mod symbol;
pub mod turtle;

pub use bounds::*;
pub use config::*;
pub use eps::*;
pub use error::*;
pub use grammar::*;
pub use state_turtle::*;
pub use stream_turtle::*;
pub use symbol::*;
pub use turtle::*;
