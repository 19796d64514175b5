//! Line geometry for the viewer: ground grid, picture plane outline and the
//! debug path overlay. Vertices are emitted as a line list (pairs).

use glam::Vec3;

use crate::constants::{
    CONNECTOR_COLOR, CONNECTOR_PARAMS, GRID_CELL_SIZE, GRID_COLOR, GRID_HALF_EXTENT,
    PATH_SAMPLE_DIVISIONS, PLANE_COLOR, POSITION_PATH_COLOR, TARGET_PATH_COLOR,
};
use crate::curve::{CatmullRomCurve, PathCurves};
use crate::keyframe::CameraKeyframe;

const MARKER_HALF_SIZE: f32 = 0.08;
const SELECTED_MARKER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[inline]
fn push_line(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: [f32; 4]) {
    out.push(LineVertex {
        position: a.to_array(),
        color,
    });
    out.push(LineVertex {
        position: b.to_array(),
        color,
    });
}

fn push_polyline(out: &mut Vec<LineVertex>, points: &[Vec3], color: [f32; 4]) {
    for pair in points.windows(2) {
        push_line(out, pair[0], pair[1], color);
    }
}

/// Grid on the y = 0 plane, centred on the origin.
pub fn grid_lines(out: &mut Vec<LineVertex>) {
    let extent = GRID_HALF_EXTENT as f32 * GRID_CELL_SIZE;
    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        let c = i as f32 * GRID_CELL_SIZE;
        push_line(out, Vec3::new(c, 0.0, -extent), Vec3::new(c, 0.0, extent), GRID_COLOR);
        push_line(out, Vec3::new(-extent, 0.0, c), Vec3::new(extent, 0.0, c), GRID_COLOR);
    }
}

/// Outline of the unit picture plane standing at the origin, facing +Z.
pub fn picture_plane_lines(out: &mut Vec<LineVertex>) {
    let corners = [
        Vec3::new(-0.5, 0.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(0.5, 1.0, 0.0),
        Vec3::new(-0.5, 1.0, 0.0),
        Vec3::new(-0.5, 0.0, 0.0),
    ];
    push_polyline(out, &corners, PLANE_COLOR);
}

fn curve_lines(out: &mut Vec<LineVertex>, curve: &CatmullRomCurve, color: [f32; 4]) {
    let points = curve.sample_points(PATH_SAMPLE_DIVISIONS);
    push_polyline(out, &points, color);
}

/// Position path, target path, connectors between them, and a small cross at
/// every keyframe position (white for the selected one).
pub fn path_lines(
    out: &mut Vec<LineVertex>,
    curves: &PathCurves,
    keyframes: &[CameraKeyframe],
    selected: Option<usize>,
) {
    curve_lines(out, &curves.position, POSITION_PATH_COLOR);
    curve_lines(out, &curves.target, TARGET_PATH_COLOR);
    for t in CONNECTOR_PARAMS {
        push_line(
            out,
            curves.position.point_at(t),
            curves.target.point_at(t),
            CONNECTOR_COLOR,
        );
    }
    for (i, kf) in keyframes.iter().enumerate() {
        let color = if selected == Some(i) {
            SELECTED_MARKER_COLOR
        } else {
            POSITION_PATH_COLOR
        };
        let p = kf.position;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            let d = axis * MARKER_HALF_SIZE;
            push_line(out, p - d, p + d, color);
        }
    }
}

/// Inputs that decide the scene line geometry. Lines only need rebuilding
/// when the key changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneKey {
    pub revision: u64,
    pub show_path: bool,
    pub selected: Option<usize>,
}

/// All lines for one frame.
pub fn build_scene_lines(
    curves: &PathCurves,
    keyframes: &[CameraKeyframe],
    show_path: bool,
    selected: Option<usize>,
) -> Vec<LineVertex> {
    let mut out = Vec::with_capacity(2048);
    grid_lines(&mut out);
    picture_plane_lines(&mut out);
    if show_path {
        path_lines(&mut out, curves, keyframes, selected);
    }
    out
}
