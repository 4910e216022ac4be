// End-to-end exercises of the wanderer control node: hand-fed sensor
// messages through real hubs, then a full closed loop against the
// simulated maze.

use approx::assert_relative_eq;
use maze_wanderer::config::WanderConfig;
use maze_wanderer::{MazeSimNode, WandererNode};
use zigzag::prelude::*;

fn make_scan(left: f32, right: f32) -> LaserScan {
    let mut scan = LaserScan::new();
    scan.ranges[30] = left;
    scan.ranges[329] = right;
    scan
}

fn seeded_config() -> WanderConfig {
    let mut config = WanderConfig::default();
    config.seed = Some(7);
    config
}

#[test]
fn test_bump_face_rotate_resume_sequence() {
    let config = seeded_config();
    let mut node = WandererNode::new_with_topics(
        &config, "ctl_scan", "ctl_bump", "ctl_odom", "ctl_pose", "ctl_cmd",
    )
    .unwrap();

    let scan_pub: Hub<LaserScan> = Hub::new("ctl_scan").unwrap();
    let bump_pub: Hub<BumperEvent> = Hub::new("ctl_bump").unwrap();
    let odom_pub: Hub<Odometry> = Hub::new("ctl_odom").unwrap();
    let cmd_sub: Hub<CmdVel> = Hub::new("ctl_cmd").unwrap();

    // Cruising at heading 0: straight ahead at full speed
    odom_pub.send(Odometry::from_planar(0.0, 0.0, 0.0), None).unwrap();
    node.tick(None);
    let cmd = cmd_sub.recv(None).unwrap();
    assert_relative_eq!(cmd.linear, 0.6);
    assert_relative_eq!(cmd.angular, 0.0);

    // Contact with uneven edges: squares up toward the larger left reading
    bump_pub
        .send(BumperEvent::pressed(BumperEvent::CENTER), None)
        .unwrap();
    scan_pub.send(make_scan(2.0, 1.0), None).unwrap();
    node.tick(None);
    let cmd = cmd_sub.recv(None).unwrap();
    assert_relative_eq!(cmd.linear, 0.0);
    assert_relative_eq!(cmd.angular, 0.1);
    assert!(node.bot().phase.is_handling_collision());

    // Edges agree: setup cycle, no motion, rotation target chosen
    scan_pub.send(make_scan(1.5, 1.5), None).unwrap();
    node.tick(None);
    let cmd = cmd_sub.recv(None).unwrap();
    assert!(cmd.is_stopped());
    let (target, direction) = match node.bot().phase {
        WanderPhase::Rotating90 {
            target_heading,
            direction,
        } => (target_heading, direction),
        other => panic!("expected Rotating90, got {:?}", other),
    };
    let swing = (target - 0.0).abs();
    assert!((90.0..=93.0).contains(&swing), "swing was {}", swing);

    // Feed headings stepping toward the target; rotation continues at the
    // faster rate until within a degree, then driving resumes
    let mut heading = 0.0;
    let mut guard = 0;
    while node.bot().phase.is_rotating() {
        heading += direction.sign() * 2.0;
        odom_pub
            .send(Odometry::from_planar(0.0, 0.0, heading.to_radians()), None)
            .unwrap();
        node.tick(None);
        let cmd = cmd_sub.recv(None).unwrap();
        if node.bot().phase.is_rotating() {
            assert_relative_eq!(cmd.angular, (direction.sign() * 0.3) as f32);
        } else {
            assert!(cmd.is_stopped());
        }
        guard += 1;
        assert!(guard < 100, "rotation never completed");
    }

    assert!(!node.bot().phase.is_handling_collision());
    node.tick(None);
    let cmd = cmd_sub.recv(None).unwrap();
    assert_relative_eq!(cmd.linear, 0.6);
}

#[test]
fn test_release_and_silence_do_not_clear_latch() {
    let config = seeded_config();
    let mut node = WandererNode::new_with_topics(
        &config, "rel_scan", "rel_bump", "rel_odom", "rel_pose", "rel_cmd",
    )
    .unwrap();

    let scan_pub: Hub<LaserScan> = Hub::new("rel_scan").unwrap();
    let bump_pub: Hub<BumperEvent> = Hub::new("rel_bump").unwrap();
    let cmd_sub: Hub<CmdVel> = Hub::new("rel_cmd").unwrap();

    bump_pub
        .send(BumperEvent::pressed(BumperEvent::LEFT), None)
        .unwrap();
    scan_pub.send(make_scan(1.0, 2.0), None).unwrap();
    node.tick(None);
    assert!(node.bot().phase.is_handling_collision());
    // toward the larger right reading: clockwise
    assert_relative_eq!(cmd_sub.recv(None).unwrap().angular, -0.1);

    // A release event arrives; the latch must hold
    bump_pub
        .send(BumperEvent::released(BumperEvent::LEFT), None)
        .unwrap();
    node.tick(None);
    assert!(node.bot().phase.is_handling_collision());

    // No events at all; the latch still holds
    node.tick(None);
    assert!(node.bot().phase.is_handling_collision());
}

#[test]
fn test_goal_entry_stops_scheduler() {
    let mut config = seeded_config();
    config.goal = GoalRegion::new(1.0, 2.0, 1.0, 2.0);
    let mut node = WandererNode::new_with_topics(
        &config, "goal_scan", "goal_bump", "goal_odom", "goal_pose", "goal_cmd",
    )
    .unwrap();

    let sched = Scheduler::new();
    let handle = sched.handle();
    node.attach_scheduler(sched.handle());

    let pose_pub: Hub<Pose2D> = Hub::new("goal_pose").unwrap();
    let cmd_sub: Hub<CmdVel> = Hub::new("goal_cmd").unwrap();

    // On the boundary: not a win
    pose_pub.send(Pose2D::new(1.0, 1.5, 0.0), None).unwrap();
    node.tick(None);
    assert!(!node.goal_reached());
    assert!(handle.is_running());
    let _ = cmd_sub.recv(None);

    // Inside: win, scheduler asked to stop, node goes quiet
    pose_pub.send(Pose2D::new(1.5, 1.5, 0.0), None).unwrap();
    node.tick(None);
    assert!(node.goal_reached());
    assert!(!handle.is_running());
    let _ = cmd_sub.recv(None);

    node.tick(None);
    assert!(cmd_sub.recv(None).is_none());
}

#[test]
fn test_closed_loop_against_sim() {
    let mut config = seeded_config();
    // park the goal out of reach so the loop runs the whole time
    config.goal = GoalRegion::new(100.0, 101.0, 100.0, 101.0);

    let mut sim = MazeSimNode::new_with_topics(
        &config, "loop_cmd", "loop_scan", "loop_bump", "loop_odom", "loop_pose",
    )
    .unwrap();
    let mut node = WandererNode::new_with_topics(
        &config, "loop_scan", "loop_bump", "loop_odom", "loop_pose", "loop_cmd",
    )
    .unwrap();

    // A head-on strike squares up in a single evaluation, so FacingWall is
    // transient here; collision handling is observed via the rotation phase.
    let mut saw_rotating = false;
    let mut recovered = false;

    for _ in 0..1500 {
        sim.tick(None);
        node.tick(None);

        match node.bot().phase {
            WanderPhase::Rotating90 { .. } => saw_rotating = true,
            WanderPhase::Forward => {
                if saw_rotating {
                    recovered = true;
                }
            }
            WanderPhase::FacingWall => {}
        }
    }

    assert!(saw_rotating, "never reached the escape rotation");
    assert!(recovered, "never resumed forward driving");

    let (x, y, _) = sim.pose();
    assert!(
        (x - config.sim.start_x).abs() > 0.5 || (y - config.sim.start_y).abs() > 0.5,
        "robot never moved away from the start"
    );
}
