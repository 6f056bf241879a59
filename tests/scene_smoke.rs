//! Structural checks on the startup scene and resize handling

use xr_room::config::AppConfig;
use xr_room::scene::{RoomSceneBuilder, BALL_TAG, ROOM_NAME};
use xr_room::App;
use xr_room_core::NodeKind;

#[test]
fn test_exactly_200_balls_in_room() {
    let scene = RoomSceneBuilder::new().build();
    assert_eq!(scene.balls().len(), 200);

    for key in scene.balls() {
        assert_eq!(scene.graph.parent(*key), Some(scene.room));
        let node = scene.graph.get(*key).unwrap();
        assert!(node.has_tag(BALL_TAG));
        assert!(matches!(node.kind(), NodeKind::Mesh { .. }));
    }
}

#[test]
fn test_ball_positions_in_unit_cube_of_two() {
    for seed in [0, 1, 99, 12345] {
        let scene = RoomSceneBuilder::new().with_seed(Some(seed)).build();
        for key in scene.balls() {
            let p = scene.graph.get(*key).unwrap().transform().position;
            assert!(p.x >= 0.0 && p.x < 2.0);
            assert!(p.y >= 0.0 && p.y < 2.0);
            assert!(p.z >= 0.0 && p.z < 2.0);
        }
    }
}

#[test]
fn test_room_dimensions() {
    let scene = RoomSceneBuilder::new().build();
    let (_, room) = scene.graph.get_by_name(ROOM_NAME).unwrap();
    let NodeKind::LineSegments { geometry, .. } = room.kind() else {
        panic!("room must be line segments");
    };

    let params = geometry.box_params.unwrap();
    assert_eq!([params.width, params.height, params.depth], [6.0, 6.0, 6.0]);
    assert_eq!(
        [params.width_segments, params.height_segments, params.depth_segments],
        [10, 10, 10]
    );
    assert_eq!(geometry.segment_count(), params.segment_count());
}

#[test]
fn test_resize_updates_camera_aspect() {
    let mut app = App::new(AppConfig::default());
    for (w, h) in [(800u32, 600u32), (1920, 1080), (300, 900)] {
        app.resize(w, h);
        assert!((app.camera().aspect - w as f32 / h as f32).abs() < 1e-6);
    }
}

#[test]
fn test_app_scene_uses_config() {
    let mut config = AppConfig::default();
    config.scene.ball_count = 10;
    config.scene.seed = Some(5);
    let app = App::new(config);
    assert_eq!(app.scene().balls().len(), 10);
}
