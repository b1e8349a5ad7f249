use flick_core::{DragTracker, Phase};
use flick_testing::GestureRobot;

/// Position reached after a straight flick: `start + Σ v·fⁿ` over the steps
/// taken while the decayed velocity stays above the threshold, plus the final
/// step that drops below it.
fn geometric_landing(start: f64, velocity: f64, friction: f64, threshold: f64) -> (f64, usize) {
    let mut position = start;
    let mut v = velocity;
    let mut steps = 0;
    loop {
        steps += 1;
        v *= friction;
        position += v;
        if v.abs() <= threshold {
            return (position, steps);
        }
    }
}

fn flick(multiplier: f64) -> GestureRobot {
    let mut robot = GestureRobot::launch(
        DragTracker::builder()
            .multiplier(multiplier)
            .friction(0.9)
            .axes(flick_core::Axes::One),
    );
    robot.press(0.0, 0.0);
    robot.move_to(100.0, 0.0, 50.0);
    robot.frame();
    robot.release();
    robot
}

#[test]
fn flick_lands_where_the_geometric_series_says() {
    let mut robot = flick(1.0);
    assert_eq!(robot.phase(), Phase::Decaying);
    assert!((robot.tracker().velocity().0 - 30.0).abs() < 1e-9);

    let frames = robot.wait_for_idle();
    let (expected, steps) = geometric_landing(100.0, 30.0, 0.9, 0.3);

    assert_eq!(frames, steps);
    assert!((robot.x() - expected).abs() < 1e-9);
    // Roughly 100 + 30·0.9/(1 − 0.9).
    assert!((robot.x() - 370.0).abs() < 5.0);
    assert_eq!(robot.phase(), Phase::Idle);
}

#[test]
fn host_sees_where_the_flick_stopped() {
    let mut robot = flick(1.0);
    let frames = robot.wait_for_idle();

    assert_eq!(robot.updates().len(), 1 + frames);
    let (last_x, _) = robot.updates().last().expect("decay reported");
    assert_eq!(robot.x(), last_x);

    robot.press(0.0, 0.0);
    robot.move_to(10.0, 0.0, 16.0);
    robot.frame();
    assert_eq!(robot.updates().last(), Some((last_x + 10.0, None)));
}

#[test]
fn reported_steps_shrink_every_frame() {
    let mut robot = flick(1.0);
    robot.wait_for_idle();

    let xs = robot.updates().xs();
    let steps: Vec<f64> = xs.windows(2).map(|pair| pair[1] - pair[0]).collect();
    assert!(steps.len() > 10);
    for pair in steps.windows(2) {
        assert!(pair[1] < pair[0], "step {} did not shrink after {}", pair[1], pair[0]);
        assert!(pair[1] > 0.0);
    }
}

#[test]
fn multiplier_does_not_change_how_long_a_flick_lasts() {
    let mut plain = flick(1.0);
    let mut doubled = flick(2.0);

    let plain_frames = plain.wait_for_idle();
    let doubled_frames = doubled.wait_for_idle();

    assert_eq!(plain_frames, doubled_frames);
    assert!((doubled.x() - 2.0 * plain.x()).abs() < 1e-9);
}

#[test]
fn release_after_holding_still_does_not_flick() {
    let mut robot = GestureRobot::launch(DragTracker::builder());
    robot.press(0.0, 0.0);
    robot.drag_to(120.0, 0.0, 48.0, 3);
    robot.wait(150.0);
    robot.release();

    assert_eq!(robot.tracker().velocity(), (0.0, Some(0.0)));
    assert_eq!(robot.phase(), Phase::Idle);
    assert_eq!(robot.frames().pending(), 0);
    assert_eq!(robot.x(), 120.0);
}

#[test]
fn instant_tap_yields_zero_velocity() {
    let mut robot = GestureRobot::launch(DragTracker::builder());
    robot.press(5.0, 5.0);
    robot.release();

    let (vx, vy) = robot.tracker().velocity();
    assert_eq!(vx, 0.0);
    assert_eq!(vy, Some(0.0));
    assert_eq!(robot.phase(), Phase::Idle);
}

#[test]
fn two_axis_flick_keeps_direction() {
    let mut robot = GestureRobot::launch(DragTracker::builder());
    robot.press(0.0, 0.0);
    robot.drag_to(-60.0, 90.0, 48.0, 3);
    robot.release();
    assert_eq!(robot.phase(), Phase::Decaying);

    robot.wait_for_idle();
    let y = robot.y().expect("two-axis tracker");
    assert!(robot.x() < -60.0);
    assert!(y > 90.0);
    assert!((y / robot.x() + 1.5).abs() < 1e-9);
}

#[test]
fn new_press_stops_the_flick_where_it_is() {
    let mut robot = flick(1.0);
    robot.frame();
    robot.frame();
    let (x, _) = robot.tracker().position();

    robot.press(0.0, 0.0);
    assert_eq!(robot.phase(), Phase::Tracking);
    robot.wait_for_idle();
    assert_eq!(robot.x(), x);
}
