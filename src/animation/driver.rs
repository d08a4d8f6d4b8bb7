//! Frame-sequenced animation driver
//!
//! State carried across frames:
//! - one skeleton line per connections entry, the ball marker and the three
//!   deviation lines (updated in place every frame)
//! - the live sagittal and coronal surfaces (removed and re-added every
//!   frame, since both their position and their extent follow the camera)
//!
//! ```text
//! Ready ──on_frame(0)──> Running ──on_frame(1..N-2)──> Running ──on_frame(N-1)──> Finished
//! ```
//!
//! Per frame `f`:
//! 1. recenter the viewport on the xy midpoint of the hips (z stays fixed)
//! 2. move every skeleton line to its joints' positions
//! 3. move the ball
//! 4. recompute shoulder midpoint, elbow, wrist and hand; move the deviation lines
//! 5. remove the previous planes and add fresh meshes through the shoulder midpoint

use super::config::AnimationConfig;
use super::connections::Connection;
use super::renderer::{CourtDecorator, Renderer};
use super::scene::{
    DeviationLine, LineStyle, MarkerStyle, PlaneKind, Playback, RenderCommand, RenderCommands,
    SceneSetup, Segment, SurfaceId, SurfaceMesh, SurfaceStyle, Viewport,
};
use crate::geometry::Point3;
use crate::series::TrialSeries;
use crate::trial::JointName;
use crate::{Error, Result};
use tracing::{debug, trace, warn};

/// Court line width passed to the decorator
const COURT_LINE_WIDTH: f64 = 2.0;

/// Joints the camera and analysis overlays read every frame
const OVERLAY_JOINTS: [JointName; 8] = [
    JointName::RHip,
    JointName::LHip,
    JointName::RShoulder,
    JointName::LShoulder,
    JointName::RElbow,
    JointName::RWrist,
    JointName::R1stFinger,
    JointName::R5thFinger,
];

/// Lifecycle of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No frame driven yet
    Ready,
    /// At least one frame driven, last frame not reached
    Running {
        /// Most recent frame position
        last_frame: usize,
    },
    /// Frame N-1 driven; no further transitions
    Finished,
}

#[derive(Debug, Default)]
struct PlaneSurfaces {
    sagittal: Option<SurfaceId>,
    coronal: Option<SurfaceId>,
}

/// Drives the render loop for one trial.
#[derive(Debug)]
pub struct AnimationDriver<'a> {
    series: &'a TrialSeries,
    connections: Vec<Connection>,
    config: AnimationConfig,
    court_enabled: bool,
    state: DriverState,
    planes: PlaneSurfaces,
    next_surface_id: u64,
    next_frame: usize,
}

impl<'a> AnimationDriver<'a> {
    /// Create a driver over a reshaped trial.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTrial`] if the trial has no frames
    /// - [`Error::MissingJoint`] if a connection or overlay joint was never tracked
    /// - [`Error::Other`] if the config fails validation
    pub fn new(
        series: &'a TrialSeries,
        connections: Vec<Connection>,
        config: AnimationConfig,
    ) -> Result<Self> {
        config.validate()?;
        if series.frame_count() == 0 {
            return Err(Error::EmptyTrial {
                trial_id: series.trial_id().to_string(),
            });
        }
        for joint in connections
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .chain(OVERLAY_JOINTS)
        {
            series.joint(joint)?;
        }

        Ok(Self {
            series,
            connections,
            config,
            court_enabled: false,
            state: DriverState::Ready,
            planes: PlaneSurfaces::default(),
            next_surface_id: 0,
            next_frame: 0,
        })
    }

    /// Number of frames the driver will emit.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.series.frame_count()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// True once frame N-1 has been driven.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == DriverState::Finished
    }

    /// Whether the court outline was enabled at setup.
    #[must_use]
    pub const fn court_enabled(&self) -> bool {
        self.court_enabled
    }

    /// Live sagittal and coronal surface handles.
    #[must_use]
    pub const fn live_planes(&self) -> (Option<SurfaceId>, Option<SurfaceId>) {
        (self.planes.sagittal, self.planes.coronal)
    }

    /// Describe the scene. Resolves the optional court capability once.
    ///
    /// With `show_court` set and no decorator (or a failing one) a warning is
    /// logged and the court stays disabled for the whole run.
    #[must_use]
    pub fn setup(&mut self, court: Option<&dyn CourtDecorator>) -> SceneSetup {
        let outline = if self.config.show_court {
            match court {
                Some(decorator) => match decorator.draw([0.0, 0.0], COURT_LINE_WIDTH) {
                    Ok(segments) => Some(segments),
                    Err(e) => {
                        warn!("{}", Error::OptionalCapabilityUnavailable(format!("court outline failed: {e}")));
                        None
                    }
                },
                None => {
                    warn!("{}", Error::OptionalCapabilityUnavailable("no court decorator installed".to_string()));
                    None
                }
            }
        } else {
            None
        };
        self.court_enabled = outline.is_some();

        let deviation_style = |color: &str| LineStyle {
            color: color.to_string(),
            width: 1.0,
        };

        SceneSetup {
            elev: self.config.elev,
            azim: self.config.azim,
            z_extent: [0.0, self.config.zlim],
            box_aspect: [1.0, 1.0, 1.0],
            hide_ticks: true,
            hide_panes: self.court_enabled,
            skeleton: self.connections.clone(),
            player_style: LineStyle {
                color: self.config.player_color.clone(),
                width: self.config.player_line_width,
            },
            ball_style: MarkerStyle {
                color: self.config.ball_color.clone(),
                size: self.config.ball_size,
            },
            deviation_styles: vec![
                (DeviationLine::Elbow, deviation_style("red")),
                (DeviationLine::Wrist, deviation_style("green")),
                (DeviationLine::Hand, deviation_style("blue")),
            ],
            sagittal_style: SurfaceStyle {
                color: "gray".to_string(),
                alpha: 0.3,
            },
            coronal_style: SurfaceStyle {
                color: "blue".to_string(),
                alpha: 0.3,
            },
            court_enabled: self.court_enabled,
            court: outline.unwrap_or_default(),
            playback: Playback {
                frame_count: self.frame_count(),
                frame_interval_ms: self.config.frame_interval_ms(),
                output_fps: self.config.output_fps,
                output_path: self.config.output_path.clone(),
            },
        }
    }

    /// Drive frame `frame` and return the commands that bring the scene to it.
    ///
    /// Frames are accepted strictly in order: 0 first, then each successor.
    ///
    /// # Errors
    ///
    /// - [`Error::AnimationFinished`] once frame N-1 has been driven
    /// - [`Error::FrameOutOfRange`] for `frame >= N`
    /// - [`Error::FrameOutOfOrder`] for any frame other than the next one
    pub fn on_frame(&mut self, frame: usize) -> Result<RenderCommands> {
        let frame_count = self.frame_count();
        if self.is_finished() {
            return Err(Error::AnimationFinished { frame_count });
        }
        if frame >= frame_count {
            return Err(Error::FrameOutOfRange { frame, frame_count });
        }
        if frame != self.next_frame {
            return Err(Error::FrameOutOfOrder {
                frame,
                expected: self.next_frame,
            });
        }

        let mut commands = Vec::with_capacity(self.connections.len() + 7);

        // Camera follows the hips
        let hip_center = self
            .position(JointName::RHip, frame)?
            .xy_midpoint(self.position(JointName::LHip, frame)?);
        let viewport = Viewport::centered(
            hip_center,
            self.config.xbuffer,
            self.config.ybuffer,
            self.config.zlim,
        );
        commands.push(RenderCommand::SetViewport(viewport));

        for (index, &(a, b)) in self.connections.iter().enumerate() {
            commands.push(RenderCommand::UpdateSkeletonLine {
                index,
                segment: Segment {
                    from: self.position(a, frame)?,
                    to: self.position(b, frame)?,
                },
            });
        }

        commands.push(RenderCommand::UpdateBall {
            position: self.series.ball()[frame],
        });

        let shoulder_midpoint = self
            .position(JointName::RShoulder, frame)?
            .midpoint(self.position(JointName::LShoulder, frame)?);
        let hand = self
            .position(JointName::R1stFinger, frame)?
            .midpoint(self.position(JointName::R5thFinger, frame)?);
        let arm = [
            (DeviationLine::Elbow, self.position(JointName::RElbow, frame)?),
            (DeviationLine::Wrist, self.position(JointName::RWrist, frame)?),
            (DeviationLine::Hand, hand),
        ];
        for (line, target) in arm {
            commands.push(RenderCommand::UpdateDeviationLine {
                line,
                segment: Segment {
                    from: shoulder_midpoint,
                    to: target,
                },
            });
        }

        self.replace_planes(&viewport, shoulder_midpoint, &mut commands);

        self.next_frame = frame + 1;
        self.state = if frame + 1 == frame_count {
            DriverState::Finished
        } else {
            DriverState::Running { last_frame: frame }
        };
        trace!(frame, commands = commands.len(), "driven frame");

        Ok(RenderCommands { frame, commands })
    }

    /// Drive the frame after the last one driven (frame 0 first).
    ///
    /// # Errors
    ///
    /// Same as [`AnimationDriver::on_frame`].
    pub fn tick(&mut self) -> Result<RenderCommands> {
        self.on_frame(self.next_frame)
    }

    /// Setup, every frame in order, then `finish`.
    ///
    /// Starts from frame 0 with no live planes regardless of any frames
    /// driven earlier, so each run describes a complete scene.
    ///
    /// # Errors
    ///
    /// Propagates driver and renderer errors; a failed frame aborts the run.
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        court: Option<&dyn CourtDecorator>,
    ) -> Result<()> {
        self.rewind();
        let setup = self.setup(court);
        renderer.begin(&setup)?;
        while !self.is_finished() {
            let commands = self.tick()?;
            renderer.render_frame(&commands)?;
        }
        renderer.finish()?;
        debug!(
            trial_id = self.series.trial_id(),
            frames = self.frame_count(),
            court = self.court_enabled,
            "animation complete"
        );
        Ok(())
    }

    fn rewind(&mut self) {
        self.state = DriverState::Ready;
        self.planes = PlaneSurfaces::default();
        self.next_frame = 0;
    }

    fn position(&self, joint: JointName, frame: usize) -> Result<Point3> {
        self.series.position(joint, frame)
    }

    fn allocate_surface(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next_surface_id);
        self.next_surface_id += 1;
        id
    }

    fn replace_planes(
        &mut self,
        viewport: &Viewport,
        shoulder_midpoint: Point3,
        commands: &mut Vec<RenderCommand>,
    ) {
        for id in [self.planes.sagittal.take(), self.planes.coronal.take()]
            .into_iter()
            .flatten()
        {
            commands.push(RenderCommand::RemoveSurface { id });
        }

        let resolution = self.config.plane_resolution;

        let sagittal = self.allocate_surface();
        commands.push(RenderCommand::AddSurface {
            id: sagittal,
            plane: PlaneKind::Sagittal,
            mesh: SurfaceMesh::sagittal(shoulder_midpoint.x, viewport.y, viewport.z, resolution),
        });
        self.planes.sagittal = Some(sagittal);

        let coronal = self.allocate_surface();
        commands.push(RenderCommand::AddSurface {
            id: coronal,
            plane: PlaneKind::Coronal,
            mesh: SurfaceMesh::coronal(shoulder_midpoint.y, viewport.x, viewport.z, resolution),
        });
        self.planes.coronal = Some(coronal);
    }
}
