//! Demo configuration read from the environment.
use std::env;

use action_list::{DeltaPolicy, SchedulerConfig};

/// Host loop settings for the demo.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Time step handed to every `update`, in seconds.
    pub dt: f64,
    /// Seconds on the bomb fuse.
    pub fuse: u32,
    /// Frames to run before giving up.
    pub max_frames: u32,
    pub scheduler: SchedulerConfig,
}

impl DemoConfig {
    /// Construct demo configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACTION_DEMO_DT` - Time step per frame in seconds (default: 0.25)
    /// - `ACTION_DEMO_FUSE` - Fuse length in seconds (default: 3)
    /// - `ACTION_DEMO_MAX_FRAMES` - Frame limit (default: 1000)
    /// - `ACTION_DEMO_FORWARD_DELTA` - Hand each frame's dt to every newly
    ///   started action (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dt) = read_env::<f64>("ACTION_DEMO_DT")
            && dt.is_finite()
            && dt > 0.0
        {
            config.dt = dt;
        }
        if let Some(fuse) = read_env::<u32>("ACTION_DEMO_FUSE") {
            config.fuse = fuse;
        }
        if let Some(max_frames) = read_env::<u32>("ACTION_DEMO_MAX_FRAMES") {
            config.max_frames = max_frames.max(1);
        }
        if let Some(true) = read_env::<bool>("ACTION_DEMO_FORWARD_DELTA") {
            config.scheduler = config.scheduler.with_delta_policy(DeltaPolicy::Forward);
        }

        config
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            dt: 0.25,
            fuse: 3,
            max_frames: 1000,
            scheduler: SchedulerConfig::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
