//! A turtle that tracks its state and draws nothing.

use crate::turtle::{ActionRegistry, Pen, Turtle, TurtleOp, TurtleState, Units};
use glam::DVec2;

/// Silent turtle used for dry runs.
///
/// Configuration loading writes the starting units and pose into one of these;
/// a real renderer then starts from what it holds.
#[derive(Clone, Debug, Default)]
pub struct StateTurtle {
    pen: Pen,
    actions: ActionRegistry,
}

/// Alias kept for readers who know this turtle as the "mock" one.
pub type MockTurtle = StateTurtle;

impl StateTurtle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the action registry (builder pattern).
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    pub fn state(&self) -> TurtleState {
        self.pen.state
    }

    /// Number of saved states on the stack.
    pub fn depth(&self) -> usize {
        self.pen.depth()
    }
}

impl Turtle for StateTurtle {
    fn draw(&mut self) {
        self.pen.advance();
    }

    fn jump(&mut self) {
        self.pen.advance();
    }

    fn turn_right(&mut self) {
        self.pen.turn_right();
    }

    fn turn_left(&mut self) {
        self.pen.turn_left();
    }

    fn push(&mut self) {
        self.pen.push();
    }

    fn pop(&mut self) {
        self.pen.pop();
    }

    fn reset(&mut self, position: DVec2, heading: f64) {
        self.pen.reset(TurtleState::new(position, heading));
    }

    fn position(&self) -> DVec2 {
        self.pen.state.position
    }

    fn heading(&self) -> f64 {
        self.pen.state.heading
    }

    fn set_units(&mut self, units: Units) {
        self.pen.units = units;
    }

    fn units(&self) -> Units {
        self.pen.units
    }

    fn resolve_action(&self, name: &str) -> Option<TurtleOp> {
        self.actions.resolve(name)
    }
}
