//! Encapsulated PostScript output.
//!
//! [`EpsWriter`] turns the [`PathCommand`] stream of a
//! [`StreamTurtle`] into PostScript path operators. [`EpsDocument`] wraps a
//! whole render with the EPS header and a trailer carrying the bounding box.

use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::state_turtle::StateTurtle;
use crate::stream_turtle::{PathCommand, PathSink, StreamTurtle};
use crate::turtle::{ActionRegistry, Turtle};
use std::io::{self, Write};
use tracing::debug;

/// Writes path commands as PostScript operators.
///
/// [`PathSink::emit`] cannot fail, so the first I/O error is held back and
/// returned by [`finish`](Self::finish). Nothing more is written after it.
#[derive(Debug)]
pub struct EpsWriter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> EpsWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Writes the document header. The bounding box is deferred to the trailer.
    pub fn header(&mut self, title: &str, creator: &str) -> io::Result<()> {
        writeln!(self.out, "%!PS-Adobe-3.0 EPSF-3.0")?;
        writeln!(self.out, "%%Title: ({title})")?;
        writeln!(self.out, "%%Creator: ({creator})")?;
        writeln!(self.out, "%%BoundingBox: (atend)")?;
        writeln!(self.out, "%%EndComments")
    }

    /// Writes the trailer, declaring `bbox` rounded outwards to whole points.
    pub fn trailer(&mut self, bbox: &BoundingBox) -> io::Result<()> {
        writeln!(self.out, "%%Trailer")?;
        writeln!(
            self.out,
            "%%BoundingBox: {} {} {} {}",
            bbox.min.x.floor() as i64,
            bbox.min.y.floor() as i64,
            bbox.max.x.ceil() as i64,
            bbox.max.y.ceil() as i64,
        )?;
        writeln!(self.out, "%%EOF")
    }

    /// Flushes and returns the underlying writer, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_command(&mut self, command: PathCommand) -> io::Result<()> {
        match command {
            PathCommand::Open(p) => writeln!(self.out, "newpath {:.2} {:.2} moveto", p.x, p.y),
            PathCommand::LineTo(p) => writeln!(self.out, "{:.2} {:.2} lineto", p.x, p.y),
            PathCommand::MoveTo(p) => writeln!(self.out, "{:.2} {:.2} moveto", p.x, p.y),
            PathCommand::Stroke => writeln!(self.out, "stroke"),
        }
    }
}

impl<W: Write> PathSink for EpsWriter<W> {
    fn emit(&mut self, command: PathCommand) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_command(command) {
            self.error = Some(e);
        }
    }
}

/// A complete EPS rendering of a grammar.
#[derive(Clone, Debug)]
pub struct EpsDocument {
    title: String,
    creator: String,
    actions: ActionRegistry,
}

impl EpsDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            creator: env!("CARGO_PKG_NAME").to_owned(),
            actions: ActionRegistry::standard(),
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Action names the drawing turtle understands.
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    /// Renders the axiom of `grammar` to `out`.
    ///
    /// The drawing turtle starts from the pose and units held by `start`,
    /// normally a [`StateTurtle`] that the configuration was applied to.
    /// Arguments are checked before anything is written.
    pub fn render<W: Write, T: Turtle + ?Sized>(
        &self,
        grammar: &Grammar,
        start: &T,
        rounds: i32,
        out: W,
    ) -> Result<(W, BoundingBox)> {
        if rounds < 0 {
            return Err(Error::invalid_argument(format!(
                "iteration count must be non-negative, got {rounds}"
            )));
        }

        // Both turtles resolve names through the same registry.
        grammar.check_actions(&StateTurtle::new().with_actions(self.actions.clone()))?;

        let mut writer = EpsWriter::new(out);
        writer.header(&self.title, &self.creator)?;

        let mut turtle = StreamTurtle::new(&mut writer).with_actions(self.actions.clone());
        turtle.set_units(start.units());
        turtle.reset(start.position(), start.heading());

        let bbox = grammar.render_axiom(&mut turtle, rounds)?;
        turtle.finish();
        writer.trailer(&bbox)?;

        let out = writer.finish()?;
        debug!(title = %self.title, ?bbox, "document written");
        Ok((out, bbox))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn commands_use_two_decimals() {
        let mut writer = EpsWriter::new(Vec::new());
        writer.emit(PathCommand::Open(DVec2::new(0.0, 0.0)));
        writer.emit(PathCommand::LineTo(DVec2::new(1.0 / 3.0, -2.5)));
        writer.emit(PathCommand::MoveTo(DVec2::new(10.0, 0.126)));
        writer.emit(PathCommand::Stroke);
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            text,
            "newpath 0.00 0.00 moveto\n0.33 -2.50 lineto\n10.00 0.13 moveto\nstroke\n"
        );
    }

    #[test]
    fn trailer_rounds_outwards() {
        let mut writer = EpsWriter::new(Vec::new());
        let mut bbox = BoundingBox::at(DVec2::new(-0.5, 0.2));
        bbox.include(DVec2::new(3.2, 4.0));
        writer.trailer(&bbox).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text, "%%Trailer\n%%BoundingBox: -1 0 4 4\n%%EOF\n");
    }

    #[derive(Debug)]
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_reported_by_finish() {
        let mut writer = EpsWriter::new(Broken);
        writer.emit(PathCommand::Stroke);
        writer.emit(PathCommand::Stroke);
        let err = writer.finish().unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
    }
}
