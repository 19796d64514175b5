// Host-side tests for the line geometry handed to the renderer.

use scrollpath_core::{
    build_scene_lines, grid_lines, picture_plane_lines, KeyframeStore, LineVertex,
    PATH_SAMPLE_DIVISIONS,
};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[test]
fn line_vertex_layout_matches_the_pipeline() {
    // vec3 position + vec4 color
    assert_eq!(std::mem::size_of::<LineVertex>(), 28);
}

#[test]
fn grid_and_plane_vertex_counts() {
    let mut grid = Vec::new();
    grid_lines(&mut grid);
    // 21 lines along each axis, two vertices per line
    assert_eq!(grid.len(), 21 * 2 * 2);

    let mut plane = Vec::new();
    picture_plane_lines(&mut plane);
    assert_eq!(plane.len(), 8);
}

#[test]
fn path_overlay_is_optional() {
    let store = KeyframeStore::new();
    let base = build_scene_lines(store.curves(), store.keyframes(), false, None);
    assert_eq!(base.len(), 92);

    let with_path = build_scene_lines(store.curves(), store.keyframes(), true, None);
    let curves = 2 * PATH_SAMPLE_DIVISIONS * 2;
    let connectors = 5 * 2;
    let markers = store.len() * 3 * 2;
    assert_eq!(with_path.len(), base.len() + curves + connectors + markers);
    assert_eq!(with_path.len() % 2, 0);
}

#[test]
fn selected_keyframe_marker_is_highlighted() {
    let store = KeyframeStore::new();
    let none = build_scene_lines(store.curves(), store.keyframes(), true, None);
    assert!(none.iter().all(|v| v.color != WHITE));

    let selected = build_scene_lines(store.curves(), store.keyframes(), true, Some(1));
    let white: Vec<_> = selected.iter().filter(|v| v.color == WHITE).collect();
    assert_eq!(white.len(), 6);
    let p = store.keyframes()[1].position;
    for v in white {
        let d = glam::Vec3::from(v.position) - p;
        assert!(d.length() < 0.1);
    }
}
