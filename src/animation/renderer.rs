//! Renderer capability and the built-in renderers
//!
//! A [`Renderer`] receives the scene setup once, then every frame's commands
//! in order, then `finish`. Backends that draw and encode video implement the
//! trait outside this crate; two backends ship here:
//!
//! - [`SceneRecorder`]: applies commands to an in-memory scene (headless runs, tests)
//! - [`JsonLinesRenderer`]: streams setup and frames as JSON lines for an external encoder

use super::scene::{
    DeviationLine, PlaneKind, RenderCommand, RenderCommands, SceneSetup, Segment, SurfaceId,
    SurfaceMesh, Viewport,
};
use crate::geometry::Point3;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Backend that turns render commands into output.
pub trait Renderer {
    /// Prepare the scene. Called once before any frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    fn begin(&mut self, setup: &SceneSetup) -> Result<()>;

    /// Apply one frame's commands.
    ///
    /// # Errors
    ///
    /// Returns an error if a command cannot be applied.
    fn render_frame(&mut self, commands: &RenderCommands) -> Result<()>;

    /// Flush output after the last frame.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be finalized.
    fn finish(&mut self) -> Result<()>;
}

/// Optional court-outline capability, invoked once at setup.
pub trait CourtDecorator {
    /// Court line segments for a court whose center sits at `origin` (xy).
    ///
    /// # Errors
    ///
    /// An error is treated like an absent decorator: logged, court disabled.
    fn draw(&self, origin: [f64; 2], line_width: f64) -> Result<Vec<Segment>>;
}

/// In-memory scene that applies render commands.
///
/// Removing a surface that is not in the scene, adding a duplicate surface
/// handle, or rendering before `begin` is an error, so the recorder doubles as
/// a consistency check on the command stream.
#[derive(Debug, Default)]
pub struct SceneRecorder {
    setup: Option<SceneSetup>,
    viewport: Option<Viewport>,
    skeleton: BTreeMap<usize, Segment>,
    ball: Option<Point3>,
    deviation: BTreeMap<DeviationLine, Segment>,
    surfaces: BTreeMap<SurfaceId, (PlaneKind, SurfaceMesh)>,
    viewports: Vec<Viewport>,
    max_live_surfaces: usize,
    finished: bool,
}

impl SceneRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup received by `begin`, if any.
    #[must_use]
    pub const fn setup(&self) -> Option<&SceneSetup> {
        self.setup.as_ref()
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Viewport of every rendered frame, in order.
    #[must_use]
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.viewports.len()
    }

    /// Current skeleton line by connections-table position.
    #[must_use]
    pub fn skeleton_line(&self, index: usize) -> Option<Segment> {
        self.skeleton.get(&index).copied()
    }

    /// Number of skeleton lines drawn.
    #[must_use]
    pub fn skeleton_line_count(&self) -> usize {
        self.skeleton.len()
    }

    /// Current ball position.
    #[must_use]
    pub const fn ball(&self) -> Option<Point3> {
        self.ball
    }

    /// Current deviation line.
    #[must_use]
    pub fn deviation_line(&self, line: DeviationLine) -> Option<Segment> {
        self.deviation.get(&line).copied()
    }

    /// Surfaces currently in the scene.
    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceId, PlaneKind, &SurfaceMesh)> {
        self.surfaces
            .iter()
            .map(|(id, (plane, mesh))| (*id, *plane, mesh))
    }

    /// Number of live surfaces of one kind.
    #[must_use]
    pub fn surface_count(&self, kind: PlaneKind) -> usize {
        self.surfaces.values().filter(|(plane, _)| *plane == kind).count()
    }

    /// Largest number of surfaces alive at the end of any frame.
    #[must_use]
    pub const fn max_live_surfaces(&self) -> usize {
        self.max_live_surfaces
    }

    /// Whether `finish` was called.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    fn apply(&mut self, command: &RenderCommand) -> Result<()> {
        match command {
            RenderCommand::SetViewport(viewport) => self.viewport = Some(*viewport),
            RenderCommand::UpdateSkeletonLine { index, segment } => {
                self.skeleton.insert(*index, *segment);
            }
            RenderCommand::UpdateBall { position } => self.ball = Some(*position),
            RenderCommand::UpdateDeviationLine { line, segment } => {
                self.deviation.insert(*line, *segment);
            }
            RenderCommand::RemoveSurface { id } => {
                if self.surfaces.remove(id).is_none() {
                    return Err(Error::Render(format!("surface {} is not in the scene", id.0)));
                }
            }
            RenderCommand::AddSurface { id, plane, mesh } => {
                if self.surfaces.insert(*id, (*plane, mesh.clone())).is_some() {
                    return Err(Error::Render(format!("surface {} added twice", id.0)));
                }
            }
        }
        Ok(())
    }
}

impl Renderer for SceneRecorder {
    fn begin(&mut self, setup: &SceneSetup) -> Result<()> {
        self.setup = Some(setup.clone());
        Ok(())
    }

    fn render_frame(&mut self, commands: &RenderCommands) -> Result<()> {
        if self.setup.is_none() {
            return Err(Error::Render("frame rendered before begin".to_string()));
        }
        for command in &commands.commands {
            self.apply(command)?;
        }
        if let Some(viewport) = self.viewport {
            self.viewports.push(viewport);
        }
        self.max_live_surfaces = self.max_live_surfaces.max(self.surfaces.len());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StreamRecord<'a> {
    Setup(&'a SceneSetup),
    Frame(&'a RenderCommands),
    End { frames: usize },
}

/// Streams the scene as newline-delimited JSON.
///
/// Line 1 is the setup, then one line per frame, then an end marker with
/// the frame count.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    writer: W,
    frames: usize,
}

impl<W: Write> JsonLinesRenderer<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &StreamRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn begin(&mut self, setup: &SceneSetup) -> Result<()> {
        self.write_record(&StreamRecord::Setup(setup))
    }

    fn render_frame(&mut self, commands: &RenderCommands) -> Result<()> {
        self.write_record(&StreamRecord::Frame(commands))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_record(&StreamRecord::End {
            frames: self.frames,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
