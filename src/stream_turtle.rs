//! A turtle that emits a vector path stream as it moves.

use crate::turtle::{ActionRegistry, Pen, Turtle, TurtleOp, TurtleState, Units};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A primitive path drawing command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Begin a new path with its current point at the given position.
    Open(DVec2),
    /// Extend the current path with a straight segment.
    LineTo(DVec2),
    /// Reposition the current point without drawing.
    MoveTo(DVec2),
    /// Stroke (and thereby close off) the current path.
    Stroke,
}

/// Destination of the commands a [`StreamTurtle`] produces.
pub trait PathSink {
    fn emit(&mut self, command: PathCommand);
}

impl PathSink for Vec<PathCommand> {
    fn emit(&mut self, command: PathCommand) {
        self.push(command);
    }
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    fn emit(&mut self, command: PathCommand) {
        (**self).emit(command);
    }
}

/// Turtle that tracks the same state as
/// [`StateTurtle`](crate::state_turtle::StateTurtle) and writes every visible
/// move to a [`PathSink`].
///
/// A path is opened lazily by the first draw, split at every push and pop, and
/// stroked by [`finish`](Self::finish).
#[derive(Clone, Debug)]
pub struct StreamTurtle<S: PathSink> {
    pen: Pen,
    actions: ActionRegistry,
    sink: S,
    path_open: bool,
}

/// Alias for readers who know the streaming turtle by its output format.
pub type EpsTurtle<S> = StreamTurtle<S>;

impl<S: PathSink> StreamTurtle<S> {
    pub fn new(sink: S) -> Self {
        Self {
            pen: Pen::default(),
            actions: ActionRegistry::default(),
            sink,
            path_open: false,
        }
    }

    /// Replaces the action registry (builder pattern).
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    pub fn state(&self) -> TurtleState {
        self.pen.state
    }

    /// Whether a path has been opened and not yet stroked.
    pub fn is_path_open(&self) -> bool {
        self.path_open
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Strokes the open path, if any, and hands back the sink.
    pub fn finish(mut self) -> S {
        self.close_path();
        self.sink
    }

    fn close_path(&mut self) {
        if self.path_open {
            self.sink.emit(PathCommand::Stroke);
            self.path_open = false;
        }
    }
}

impl<S: PathSink> Turtle for StreamTurtle<S> {
    fn draw(&mut self) {
        if !self.path_open {
            self.sink.emit(PathCommand::Open(self.pen.state.position));
            self.path_open = true;
        }
        self.pen.advance();
        self.sink.emit(PathCommand::LineTo(self.pen.state.position));
    }

    fn jump(&mut self) {
        self.pen.advance();
        self.sink.emit(PathCommand::MoveTo(self.pen.state.position));
    }

    fn turn_right(&mut self) {
        self.pen.turn_right();
    }

    fn turn_left(&mut self) {
        self.pen.turn_left();
    }

    fn push(&mut self) {
        self.pen.push();
        if self.path_open {
            self.sink.emit(PathCommand::Stroke);
            self.sink.emit(PathCommand::Open(self.pen.state.position));
        }
    }

    fn pop(&mut self) {
        if !self.pen.pop() {
            return;
        }
        let restored = self.pen.state.position;
        if self.path_open {
            self.sink.emit(PathCommand::Stroke);
            self.sink.emit(PathCommand::Open(restored));
        } else {
            self.sink.emit(PathCommand::MoveTo(restored));
        }
    }

    fn reset(&mut self, position: DVec2, heading: f64) {
        self.close_path();
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
