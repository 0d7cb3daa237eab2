use orbit_viewer::config::CameraConfig;
use orbit_viewer::primitives::camera::{CameraRig, CameraTarget};
use orbit_viewer::primitives::controller::{CameraController, DragButton};
use rstest::rstest;

fn drag(
    button: DragButton,
    alt: bool,
    from: (f64, f64),
    to: (f64, f64),
) -> (CameraController, CameraRig) {
    let config = CameraConfig::default();
    let mut controller = CameraController::new(&config, true);
    let mut rig = CameraRig::new(&config);

    controller.cursor_moved(from.0, from.1, &mut rig);
    controller.set_alt_held(alt);
    controller.press(button);
    controller.cursor_moved(to.0, to.1, &mut rig);
    controller.release(button);
    (controller, rig)
}

#[rstest]
#[case((0.0, 0.0), (100.0, 0.0), 1.0, 0.0)]
#[case((350.0, 350.0), (350.0, 300.0), 0.0, -0.5)]
#[case((10.0, 10.0), (-15.0, 35.0), -0.25, 0.25)]
fn left_drag_orbits_object_camera(
    #[case] from: (f64, f64),
    #[case] to: (f64, f64),
    #[case] yaw: f32,
    #[case] pitch: f32,
) {
    let (controller, rig) = drag(DragButton::Left, false, from, to);
    assert_eq!(controller.target(), CameraTarget::Object);
    assert!((rig.object.yaw - yaw).abs() < 1e-6, "yaw {}", rig.object.yaw);
    assert!((rig.object.pitch - pitch).abs() < 1e-6, "pitch {}", rig.object.pitch);
    assert_eq!(rig.object.distance(), 5.0);
    assert_eq!(rig.plane, CameraRig::new(&CameraConfig::default()).plane);
}

#[rstest]
#[case(-1000.0, 0.1)]
#[case(-490.0, 0.1)]
#[case(-100.0, 4.0)]
#[case(250.0, 7.5)]
fn right_drag_zooms_with_floor(#[case] dy: f64, #[case] expected: f32) {
    let (_, rig) = drag(DragButton::Right, false, (0.0, 500.0), (0.0, 500.0 + dy));
    assert!(
        (rig.object.distance() - expected).abs() < 1e-5,
        "distance {}",
        rig.object.distance()
    );
    assert!(rig.object.distance() >= 0.1);
}

#[rstest]
#[case(DragButton::Left)]
#[case(DragButton::Right)]
fn alt_drags_drive_the_plane_camera(#[case] button: DragButton) {
    let (controller, rig) = drag(button, true, (0.0, 0.0), (40.0, 80.0));
    assert_eq!(controller.target(), CameraTarget::Plane);
    assert_eq!(rig.object, CameraRig::new(&CameraConfig::default()).object);
    assert_ne!(rig.plane, rig.object);
}

#[test]
fn many_small_zooms_never_cross_the_floor() {
    let config = CameraConfig::default();
    let mut controller = CameraController::new(&config, false);
    let mut rig = CameraRig::new(&config);
    controller.press(DragButton::Right);
    for step in 1..=400 {
        controller.cursor_moved(0.0, -(step as f64) * 7.0, &mut rig);
        assert!(rig.object.distance() >= 0.1);
    }
    assert_eq!(rig.object.distance(), 0.1);
}

#[test]
fn idle_frames_keep_the_same_view() {
    let rig = CameraRig::new(&CameraConfig::default());
    let views: Vec<_> = (0..5).map(|_| rig.object.view_matrix()).collect();
    assert!(views.windows(2).all(|w| w[0] == w[1]));
}
