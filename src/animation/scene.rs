//! Scene primitives and per-frame render commands
//!
//! The driver never draws. It describes the scene once ([`SceneSetup`]) and
//! then emits one [`RenderCommands`] batch per frame; a renderer applies the
//! batches to whatever backend it wraps.

use crate::geometry::Point3;
use crate::trial::JointName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Axis extents for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// `[min, max]` along x
    pub x: [f64; 2],
    /// `[min, max]` along y
    pub y: [f64; 2],
    /// `[min, max]` along z
    pub z: [f64; 2],
}

impl Viewport {
    /// Viewport centered on `center` in the xy-plane with a fixed z-range `[0, zlim]`.
    #[must_use]
    pub fn centered(center: [f64; 2], xbuffer: f64, ybuffer: f64, zlim: f64) -> Self {
        Self {
            x: [center[0] - xbuffer, center[0] + xbuffer],
            y: [center[1] - ybuffer, center[1] + ybuffer],
            z: [0.0, zlim],
        }
    }

    /// xy center of the viewport.
    #[must_use]
    pub fn center(&self) -> [f64; 2] {
        [(self.x[0] + self.x[1]) / 2.0, (self.y[0] + self.y[1]) / 2.0]
    }
}

/// Straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point
    pub from: Point3,
    /// End point
    pub to: Point3,
}

/// Reference lines from the shoulder midpoint to the shooting arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationLine {
    /// Midpoint to right elbow
    Elbow,
    /// Midpoint to right wrist
    Wrist,
    /// Midpoint to right hand
    Hand,
}

impl DeviationLine {
    /// All three lines.
    pub const ALL: [Self; 3] = [Self::Elbow, Self::Wrist, Self::Hand];
}

/// Vertical analysis planes through the shoulder midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneKind {
    /// Constant x (front-back split)
    Sagittal,
    /// Constant y (left-right split)
    Coronal,
}

/// Handle of a surface object living in the renderer's scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// Rectangular grid mesh in meshgrid layout: `x[i][j]`, `y[i][j]`, `z[i][j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    /// X coordinates
    pub x: Vec<Vec<f64>>,
    /// Y coordinates
    pub y: Vec<Vec<f64>>,
    /// Z coordinates
    pub z: Vec<Vec<f64>>,
}

impl SurfaceMesh {
    /// Plane of constant `x` spanning `y_range` x `z_range`.
    #[must_use]
    pub fn sagittal(x: f64, y_range: [f64; 2], z_range: [f64; 2], resolution: usize) -> Self {
        let ys = linspace(y_range, resolution);
        let zs = linspace(z_range, resolution);
        Self {
            x: vec![vec![x; ys.len()]; zs.len()],
            y: vec![ys.clone(); zs.len()],
            z: zs.iter().map(|&z| vec![z; ys.len()]).collect(),
        }
    }

    /// Plane of constant `y` spanning `x_range` x `z_range`.
    #[must_use]
    pub fn coronal(y: f64, x_range: [f64; 2], z_range: [f64; 2], resolution: usize) -> Self {
        let xs = linspace(x_range, resolution);
        let zs = linspace(z_range, resolution);
        Self {
            x: vec![xs.clone(); zs.len()],
            y: vec![vec![y; xs.len()]; zs.len()],
            z: zs.iter().map(|&z| vec![z; xs.len()]).collect(),
        }
    }

    /// `(rows, columns)` of the grid.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.x.first().map_or(0, Vec::len))
    }
}

/// `n` evenly spaced values from `range[0]` to `range[1]` inclusive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(range: [f64; 2], n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![range[0]],
        _ => {
            let step = (range[1] - range[0]) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| (i as f64).mul_add(step, range[0])).collect();
            values[n - 1] = range[1];
            values
        }
    }
}

/// One state change in the renderer's scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Set axis extents
    SetViewport(Viewport),
    /// Move the skeleton line at `index` (position in the connections table)
    UpdateSkeletonLine {
        /// Connections-table position
        index: usize,
        /// New endpoints
        segment: Segment,
    },
    /// Move the ball marker
    UpdateBall {
        /// New ball center
        position: Point3,
    },
    /// Move a deviation reference line
    UpdateDeviationLine {
        /// Which line
        line: DeviationLine,
        /// Shoulder midpoint to arm landmark
        segment: Segment,
    },
    /// Remove a previously added surface
    RemoveSurface {
        /// Surface to remove
        id: SurfaceId,
    },
    /// Add a new analysis-plane surface
    AddSurface {
        /// Handle for later removal
        id: SurfaceId,
        /// Which plane
        plane: PlaneKind,
        /// Mesh geometry
        mesh: SurfaceMesh,
    },
}

/// Everything a renderer applies for one frame, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderCommands {
    /// Frame position (0-based)
    pub frame: usize,
    /// Commands in application order
    pub commands: Vec<RenderCommand>,
}

/// Line styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Color name or hex
    pub color: String,
    /// Line width
    pub width: f64,
}

/// Marker styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Color name or hex
    pub color: String,
    /// Marker size
    pub size: f64,
}

/// Translucent surface styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    /// Color name or hex
    pub color: String,
    /// Opacity in `[0, 1]`
    pub alpha: f64,
}

/// Frame pacing and output target for the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playback {
    /// Frames that will be emitted
    pub frame_count: usize,
    /// Display time per logical frame
    pub frame_interval_ms: f64,
    /// Encoded frames per second
    pub output_fps: u32,
    /// Target media file
    pub output_path: PathBuf,
}

/// One-time scene description emitted before the first frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSetup {
    /// Camera elevation in degrees
    pub elev: f64,
    /// Camera azimuth in degrees
    pub azim: f64,
    /// Fixed z-extent
    pub z_extent: [f64; 2],
    /// Box aspect ratio
    pub box_aspect: [f64; 3],
    /// Hide axis ticks
    pub hide_ticks: bool,
    /// Hide grid, panes and axis lines (set when the court is drawn)
    pub hide_panes: bool,
    /// Skeleton lines, by connections-table position
    pub skeleton: Vec<(JointName, JointName)>,
    /// Skeleton line style
    pub player_style: LineStyle,
    /// Ball marker style
    pub ball_style: MarkerStyle,
    /// Deviation line styles, in [`DeviationLine::ALL`] order
    pub deviation_styles: Vec<(DeviationLine, LineStyle)>,
    /// Sagittal plane style
    pub sagittal_style: SurfaceStyle,
    /// Coronal plane style
    pub coronal_style: SurfaceStyle,
    /// Whether the court outline is drawn
    pub court_enabled: bool,
    /// Court outline segments (empty when disabled)
    pub court: Vec<Segment>,
    /// Pacing and output
    pub playback: Playback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace([-3.0, 5.0], 10);
        assert_eq!(values.len(), 10);
        assert!((values[0] + 3.0).abs() < f64::EPSILON);
        assert!((values[9] - 5.0).abs() < f64::EPSILON);
        assert!(values.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace([1.0, 2.0], 1), vec![1.0]);
    }

    #[test]
    fn test_viewport_centered() {
        let viewport = Viewport::centered([1.0, 2.0], 4.0, 4.0, 8.0);
        assert_eq!(viewport.x, [-3.0, 5.0]);
        assert_eq!(viewport.y, [-2.0, 6.0]);
        assert_eq!(viewport.z, [0.0, 8.0]);
        assert_eq!(viewport.center(), [1.0, 2.0]);
    }

    #[test]
    fn test_sagittal_mesh_is_flat_in_x() {
        let mesh = SurfaceMesh::sagittal(0.5, [-2.0, 6.0], [0.0, 8.0], 10);
        assert_eq!(mesh.shape(), (10, 10));
        assert!(mesh.x.iter().flatten().all(|&x| (x - 0.5).abs() < f64::EPSILON));
        assert!((mesh.y[3][0] + 2.0).abs() < f64::EPSILON);
        assert!((mesh.y[3][9] - 6.0).abs() < f64::EPSILON);
        assert!((mesh.z[9][4] - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coronal_mesh_is_flat_in_y() {
        let mesh = SurfaceMesh::coronal(-1.25, [-3.0, 5.0], [0.0, 8.0], 4);
        assert_eq!(mesh.shape(), (4, 4));
        assert!(mesh.y.iter().flatten().all(|&y| (y + 1.25).abs() < f64::EPSILON));
        assert!((mesh.x[0][3] - 5.0).abs() < f64::EPSILON);
        assert!(mesh.z[0].iter().all(|&z| z.abs() < f64::EPSILON));
    }

    #[test]
    fn test_command_json_is_tagged() {
        let command = RenderCommand::RemoveSurface { id: SurfaceId(7) };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"op":"remove_surface","id":7}"#);
    }
}
