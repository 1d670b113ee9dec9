//! Turtle state and operations for 2D interpretation.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Step length and turn angle shared by every advance and turn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Units {
    /// Distance covered by one advance.
    pub step: f64,

    /// Angle, in degrees, of one turn.
    pub angle: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            step: 1.0,
            angle: 90.0,
        }
    }
}

/// The pose of a turtle.
///
/// The heading is in degrees and is never normalized; it only feeds `sin`/`cos`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the "cursor".
    pub position: DVec2,

    /// Current heading in degrees, counter-clockwise from +X.
    pub heading: f64,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: 90.0, // Facing up
        }
    }
}

impl TurtleState {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Unit vector pointing along the heading.
    pub fn direction(&self) -> DVec2 {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        DVec2::new(cos, sin)
    }

    /// Moves `distance` along the heading.
    pub fn advance(&mut self, distance: f64) {
        self.position += self.direction() * distance;
    }

    /// Rotates counter-clockwise by `degrees` (negative turns clockwise).
    pub fn rotate(&mut self, degrees: f64) {
        self.heading += degrees;
    }
}

/// Operations that can be performed by a turtle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Advance one step, drawing a segment.
    Draw,
    /// Advance one step without drawing.
    Move,
    /// Turn counter-clockwise by one unit angle.
    TurnLeft,
    /// Turn clockwise by one unit angle.
    TurnRight,
    /// Save the current state onto the stack.
    Push,
    /// Restore the most recently pushed state.
    Pop,
    /// No-op.
    Stay,
}

impl TurtleOp {
    /// Conventional meaning of a symbol with no bound action:
    /// uppercase letters draw, lowercase letters move, anything else stays.
    pub fn default_for(ch: char) -> Self {
        if ch.is_uppercase() {
            TurtleOp::Draw
        } else if ch.is_lowercase() {
            TurtleOp::Move
        } else {
            TurtleOp::Stay
        }
    }
}

/// Named behaviours a turtle knows how to perform.
///
/// Starts with the standard names used by grammar files and can be extended by
/// callers with their own aliases (e.g. `"draw-leaf"`).
#[derive(Clone, Debug)]
pub struct ActionRegistry {
    names: HashMap<String, TurtleOp>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ActionRegistry {
    /// A registry with no names at all.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// The conventional action names.
    pub fn standard() -> Self {
        let mappings = [
            ("draw", TurtleOp::Draw),
            ("move", TurtleOp::Move),
            ("turnL", TurtleOp::TurnLeft),
            ("turnR", TurtleOp::TurnRight),
            ("turn-left", TurtleOp::TurnLeft),
            ("turn-right", TurtleOp::TurnRight),
            ("push", TurtleOp::Push),
            ("pop", TurtleOp::Pop),
            ("stay", TurtleOp::Stay),
        ];

        let mut registry = Self::empty();
        for (name, op) in mappings {
            registry.register(name, op);
        }
        registry
    }

    /// Binds `name` to `op`, replacing any earlier binding of that name.
    pub fn register(&mut self, name: impl Into<String>, op: TurtleOp) {
        self.names.insert(name.into(), op);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, op: TurtleOp) -> Self {
        self.register(name, op);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<TurtleOp> {
        self.names.get(name).copied()
    }
}

/// The capability set shared by every turtle.
pub trait Turtle {
    /// Advances one step and draws the segment.
    fn draw(&mut self);

    /// Advances one step without drawing.
    fn jump(&mut self);

    fn turn_right(&mut self);

    fn turn_left(&mut self);

    /// Saves the current state.
    fn push(&mut self);

    /// Restores the last saved state. Does nothing when no state is saved.
    fn pop(&mut self);

    fn stay(&mut self) {}

    /// Replaces the state outright and clears the save stack.
    fn reset(&mut self, position: DVec2, heading: f64);

    fn position(&self) -> DVec2;

    /// Heading in degrees.
    fn heading(&self) -> f64;

    fn set_units(&mut self, units: Units);

    fn units(&self) -> Units;

    /// Resolves an action name into the operation this turtle performs for it.
    fn resolve_action(&self, name: &str) -> Option<TurtleOp>;

    /// Performs `op`.
    fn apply(&mut self, op: TurtleOp) {
        match op {
            TurtleOp::Draw => self.draw(),
            TurtleOp::Move => self.jump(),
            TurtleOp::TurnLeft => self.turn_left(),
            TurtleOp::TurnRight => self.turn_right(),
            TurtleOp::Push => self.push(),
            TurtleOp::Pop => self.pop(),
            TurtleOp::Stay => self.stay(),
        }
    }
}

/// The state machine both turtle realizations are built on: the current pose,
/// the units and the save stack.
#[derive(Clone, Debug, Default)]
pub struct Pen {
    pub state: TurtleState,
    pub units: Units,
    stack: Vec<TurtleState>,
}

impl Pen {
    pub fn advance(&mut self) {
        self.state.advance(self.units.step);
    }

    pub fn turn_left(&mut self) {
        self.state.rotate(self.units.angle);
    }

    pub fn turn_right(&mut self) {
        self.state.rotate(-self.units.angle);
    }

    pub fn push(&mut self) {
        self.stack.push(self.state);
    }

    /// Returns `true` if a state was restored.
    pub fn pop(&mut self) -> bool {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self, state: TurtleState) {
        self.state = state;
        self.stack.clear();
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn advance_follows_heading_in_degrees() {
        let mut state = TurtleState::new(DVec2::ZERO, 0.0);
        state.advance(2.0);
        assert!(close(state.position, DVec2::new(2.0, 0.0)));

        state.rotate(90.0);
        state.advance(1.0);
        assert!(close(state.position, DVec2::new(2.0, 1.0)));
    }

    #[test]
    fn default_convention() {
        assert_eq!(TurtleOp::default_for('F'), TurtleOp::Draw);
        assert_eq!(TurtleOp::default_for('f'), TurtleOp::Move);
        assert_eq!(TurtleOp::default_for('+'), TurtleOp::Stay);
        assert_eq!(TurtleOp::default_for('7'), TurtleOp::Stay);
    }

    #[test]
    fn registry_is_extensible() {
        let registry = ActionRegistry::standard().with("draw-leaf", TurtleOp::Draw);
        assert_eq!(registry.resolve("turnL"), Some(TurtleOp::TurnLeft));
        assert_eq!(registry.resolve("draw-leaf"), Some(TurtleOp::Draw));
        assert_eq!(registry.resolve("fly"), None);
        assert_eq!(ActionRegistry::empty().resolve("draw"), None);
    }

    #[test]
    fn pen_pop_on_empty_stack_is_noop() {
        let mut pen = Pen::default();
        pen.advance();
        let before = pen.state;
        assert!(!pen.pop());
        assert_eq!(pen.state, before);
    }
}
