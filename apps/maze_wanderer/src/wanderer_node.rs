//! Wandering control node
//!
//! Subscribes to the scan, bumper, odometry, and ground-truth pose feeds,
//! runs the bump-and-turn policy once per tick, and publishes exactly one
//! velocity command. When the absolute position enters the goal rectangle
//! it asks the scheduler to stop.

use crate::config::WanderConfig;
use crate::topics;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zigzag::prelude::*;

pub struct WandererNode {
    scan_sub: Hub<LaserScan>,
    bumper_sub: Hub<BumperEvent>,
    odom_sub: Hub<Odometry>,
    pose_sub: Hub<Pose2D>,
    cmd_pub: Hub<CmdVel>,

    bot: BotState,
    policy: WanderPolicy,
    goal: GoalRegion,
    rng: StdRng,

    scheduler: Option<SchedulerHandle>,
    goal_reached: bool,
}

impl WandererNode {
    /// Create with the application's default topics
    pub fn new(config: &WanderConfig) -> ZigzagResult<Self> {
        Self::new_with_topics(
            config,
            topics::SCAN,
            topics::BUMPER,
            topics::ODOM,
            topics::MODEL_POSE,
            topics::CMD_VEL,
        )
    }

    /// Create with custom topic names
    pub fn new_with_topics(
        config: &WanderConfig,
        scan_topic: &str,
        bumper_topic: &str,
        odom_topic: &str,
        pose_topic: &str,
        cmd_topic: &str,
    ) -> ZigzagResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            scan_sub: Hub::new(scan_topic)?,
            bumper_sub: Hub::new(bumper_topic)?,
            odom_sub: Hub::new(odom_topic)?,
            pose_sub: Hub::new(pose_topic)?,
            cmd_pub: Hub::new(cmd_topic)?,
            bot: BotState::new(),
            policy: config.policy.clone(),
            goal: config.goal,
            rng,
            scheduler: None,
            goal_reached: false,
        })
    }

    /// Give the node a handle it can stop the scheduler with on victory
    pub fn attach_scheduler(&mut self, handle: SchedulerHandle) {
        self.scheduler = Some(handle);
    }

    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// Current controller state (read-only; used by tests and diagnostics)
    pub fn bot(&self) -> &BotState {
        &self.bot
    }

    fn update_from_sensors(&mut self, mut ctx: Option<&mut NodeInfo>) {
        // Freshest reading wins within a tick; an empty topic leaves the
        // previous value in place.
        if let Some(scan) = self.scan_sub.recv_latest(ctx.as_deref_mut()) {
            let (left, right) = scan.edge_returns();
            self.bot.set_edge_ranges(left, right);
        }

        // Only a pressed contact latches; silence and releases change
        // nothing. The latch is cleared by the turn sequence alone.
        while let Some(event) = self.bumper_sub.recv(ctx.as_deref_mut()) {
            if event.is_pressed() {
                self.bot.latch_bump();
            }
        }

        if let Some(odom) = self.odom_sub.recv_latest(ctx.as_deref_mut()) {
            self.bot.set_heading(odom.orientation.yaw_degrees());
        }

        if let Some(pose) = self.pose_sub.recv_latest(ctx.as_deref_mut()) {
            self.bot.set_position(pose.x, pose.y);
        }
    }
}

impl Node for WandererNode {
    fn name(&self) -> &'static str {
        "WandererNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> ZigzagResult<()> {
        ctx.log_info(&format!(
            "wandering toward goal x:[{:.2}, {:.2}] y:[{:.2}, {:.2}]",
            self.goal.x_min, self.goal.x_max, self.goal.y_min, self.goal.y_max
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        if self.goal_reached {
            return;
        }

        self.update_from_sensors(ctx.as_deref_mut());

        let cmd = self.policy.decide(&mut self.bot, &mut self.rng);
        let _ = self.cmd_pub.send(cmd, ctx.as_deref_mut());

        if self.goal.contains(self.bot.x, self.bot.y) {
            self.goal_reached = true;
            if let Some(ctx) = ctx.as_deref_mut() {
                ctx.log_info("Found the box! Wandering complete.");
            }
            if let Some(handle) = &self.scheduler {
                handle.request_stop();
            }
        }
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> ZigzagResult<()> {
        // Leave the robot stationary whatever state the run ended in
        let _ = self.cmd_pub.send(CmdVel::zero(), Some(ctx));
        Ok(())
    }
}
