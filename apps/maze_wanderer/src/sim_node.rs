//! Simulated maze environment
//!
//! Stands in for the real robot and its world: integrates the last
//! velocity command kinematically, blocks motion into walls (raising
//! bumper events), and synthesizes the scan, odometry, and ground-truth
//! pose feeds the controller consumes.
//!
//! Walls are axis-aligned slabs; scan beams are cast against them with the
//! standard slab-method ray/box intersection.

use crate::config::{SimConfig, Wall, WanderConfig};
use crate::topics;
use zigzag::library::messages::sensor::SCAN_BEAMS;
use zigzag::prelude::*;

pub struct MazeSimNode {
    cmd_sub: Hub<CmdVel>,
    scan_pub: Hub<LaserScan>,
    bumper_pub: Hub<BumperEvent>,
    odom_pub: Hub<Odometry>,
    pose_pub: Hub<Pose2D>,

    sim: SimConfig,
    /// Integration step, seconds (one scheduler tick)
    dt: f64,

    x: f64,
    y: f64,
    /// Heading in radians, world frame
    heading: f64,
    linear: f64,
    angular: f64,
    blocked: bool,
}

impl MazeSimNode {
    pub fn new(config: &WanderConfig) -> ZigzagResult<Self> {
        Self::new_with_topics(
            config,
            topics::CMD_VEL,
            topics::SCAN,
            topics::BUMPER,
            topics::ODOM,
            topics::MODEL_POSE,
        )
    }

    pub fn new_with_topics(
        config: &WanderConfig,
        cmd_topic: &str,
        scan_topic: &str,
        bumper_topic: &str,
        odom_topic: &str,
        pose_topic: &str,
    ) -> ZigzagResult<Self> {
        Ok(Self {
            cmd_sub: Hub::new(cmd_topic)?,
            scan_pub: Hub::new(scan_topic)?,
            bumper_pub: Hub::new(bumper_topic)?,
            odom_pub: Hub::new(odom_topic)?,
            pose_pub: Hub::new(pose_topic)?,
            sim: config.sim.clone(),
            dt: 1.0 / config.rate_hz.max(0.1),
            x: config.sim.start_x,
            y: config.sim.start_y,
            heading: config.sim.start_heading.to_radians(),
            linear: 0.0,
            angular: 0.0,
            blocked: false,
        })
    }

    pub fn pose(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.heading)
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Would a robot disc at (x, y) overlap any wall?
    fn collides(&self, x: f64, y: f64) -> bool {
        let r = self.sim.robot_radius;
        self.sim.walls.iter().any(|wall| {
            let nearest_x = x.clamp(wall.x_min, wall.x_max);
            let nearest_y = y.clamp(wall.y_min, wall.y_max);
            let dx = x - nearest_x;
            let dy = y - nearest_y;
            dx * dx + dy * dy <= r * r
        })
    }

    /// Distance along a ray to the nearest wall, if any within range
    fn cast_ray(&self, angle: f64) -> Option<f64> {
        let dx = angle.cos();
        let dy = angle.sin();

        let mut nearest: Option<f64> = None;
        for wall in &self.sim.walls {
            if let Some(t) = ray_slab_intersection(self.x, self.y, dx, dy, wall) {
                if t <= self.sim.range_max && nearest.map_or(true, |n| t < n) {
                    nearest = Some(t);
                }
            }
        }
        nearest
    }

    fn synthesize_scan(&self) -> LaserScan {
        let mut scan = LaserScan::new();
        scan.range_max = self.sim.range_max as f32;
        scan.timestamp = now_nanos();

        let half_fov = self.sim.scan_fov.to_radians() / 2.0;
        for i in 0..SCAN_BEAMS {
            let beam = scan.angle_at(i) as f64;
            if beam.abs() > half_fov {
                continue; // outside the sensor's field of view: stays NaN
            }
            if let Some(distance) = self.cast_ray(self.heading + beam) {
                scan.ranges[i] = distance as f32;
            }
        }
        scan
    }

    fn step(&mut self, mut ctx: Option<&mut NodeInfo>) {
        self.heading += self.angular * self.dt;
        // keep the sim heading bounded; the controller re-normalizes its own
        self.heading = self.heading.rem_euclid(2.0 * std::f64::consts::PI);

        let step = self.linear * self.dt;
        let was_blocked = self.blocked;

        if step != 0.0 {
            let next_x = self.x + self.heading.cos() * step;
            let next_y = self.y + self.heading.sin() * step;

            if self.collides(next_x, next_y) {
                self.blocked = true;
            } else {
                self.x = next_x;
                self.y = next_y;
                self.blocked = false;
            }
        } else {
            self.blocked = false;
        }

        // Contact events on transitions only
        if self.blocked && !was_blocked {
            let _ = self
                .bumper_pub
                .send(BumperEvent::pressed(BumperEvent::CENTER), ctx.as_deref_mut());
        } else if !self.blocked && was_blocked {
            let _ = self
                .bumper_pub
                .send(BumperEvent::released(BumperEvent::CENTER), ctx.as_deref_mut());
        }
    }
}

impl Node for MazeSimNode {
    fn name(&self) -> &'static str {
        "MazeSimNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> ZigzagResult<()> {
        ctx.log_info(&format!(
            "simulating {} walls from ({:.2}, {:.2})",
            self.sim.walls.len(),
            self.x,
            self.y
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        if let Some(cmd) = self.cmd_sub.recv_latest(ctx.as_deref_mut()) {
            self.linear = cmd.linear as f64;
            self.angular = cmd.angular as f64;
        }

        self.step(ctx.as_deref_mut());

        let _ = self
            .scan_pub
            .send(self.synthesize_scan(), ctx.as_deref_mut());
        let _ = self.odom_pub.send(
            Odometry::from_planar(self.x, self.y, self.heading),
            ctx.as_deref_mut(),
        );
        let _ = self.pose_pub.send(
            Pose2D::new(self.x, self.y, self.heading),
            ctx.as_deref_mut(),
        );
    }
}

/// Slab-method ray/box intersection
///
/// Returns the entry distance along the (unit) ray direction, or None when
/// the ray misses or the box lies behind the origin.
fn ray_slab_intersection(ox: f64, oy: f64, dx: f64, dy: f64, wall: &Wall) -> Option<f64> {
    let mut t_min = 0.0f64;
    let mut t_max = f64::INFINITY;

    for (origin, dir, lo, hi) in [
        (ox, dx, wall.x_min, wall.x_max),
        (oy, dy, wall.y_min, wall.y_max),
    ] {
        if dir.abs() < 1e-12 {
            if origin < lo || origin > hi {
                return None;
            }
        } else {
            let mut t1 = (lo - origin) / dir;
            let mut t2 = (hi - origin) / dir;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
    }

    Some(t_min)
}

fn now_nanos() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_wall_ahead() {
        let wall = Wall::new(2.0, 2.5, -5.0, 5.0);
        let t = ray_slab_intersection(0.0, 0.0, 1.0, 0.0, &wall).unwrap();
        assert_relative_eq!(t, 2.0);
    }

    #[test]
    fn test_ray_misses_wall_behind() {
        let wall = Wall::new(2.0, 2.5, -5.0, 5.0);
        assert!(ray_slab_intersection(0.0, 0.0, -1.0, 0.0, &wall).is_none());
    }

    #[test]
    fn test_ray_misses_offset_wall() {
        let wall = Wall::new(2.0, 2.5, 1.0, 5.0);
        // ray along +x at y=0 passes under the wall
        assert!(ray_slab_intersection(0.0, 0.0, 1.0, 0.0, &wall).is_none());
    }

    #[test]
    fn test_ray_starting_inside_reports_zero() {
        let wall = Wall::new(-1.0, 1.0, -1.0, 1.0);
        let t = ray_slab_intersection(0.0, 0.0, 1.0, 0.0, &wall).unwrap();
        assert_relative_eq!(t, 0.0);
    }

    #[test]
    fn test_diagonal_ray_distance() {
        let wall = Wall::new(3.0, 4.0, 3.0, 4.0);
        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        let t = ray_slab_intersection(0.0, 0.0, inv_sqrt2, inv_sqrt2, &wall).unwrap();
        // corner of the box at (3,3) is 3*sqrt(2) away
        assert_relative_eq!(t, 3.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
    }
}
