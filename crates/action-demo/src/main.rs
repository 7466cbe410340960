//! Action scheduler demo binary.
//!
//! Drives a top-level [`ActionList`] with a fixed time step until every
//! action has finished: a bomb is armed, its fuse ticks down while a timer
//! runs alongside, and the explosion schedules its own aftermath.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=action_list=debug ACTION_DEMO_FUSE=5 cargo run -p action-demo
//! ```
mod config;

use action_list::builder::{callback, parallel, sequence, wait};
use action_list::{ActionList, BoxedAction};
use anyhow::{Result, bail};
use config::DemoConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_env();
    tracing::debug!(?config, "loaded demo configuration");

    let mut list = ActionList::with_config(config.scheduler);
    let aftermath = list.handle();

    list.add_action(callback(|| {
        tracing::info!("bomb armed");
        Ok(())
    }))?;
    list.add_action(parallel(vec![
        countdown(config.fuse)?,
        wait(f64::from(config.fuse)),
    ]))?;
    list.add_action(callback(move || {
        tracing::info!("boom");
        aftermath.add_action(wait(1.0))?;
        aftermath.add_action(callback(|| {
            tracing::info!("smoke clears");
            Ok(())
        }))
    }))?;

    let mut frames = 0;
    while !list.is_over() {
        if frames >= config.max_frames {
            bail!("{} actions still pending after {frames} frames", list.len());
        }
        list.update(config.dt)?;
        frames += 1;
    }

    tracing::info!(frames, "all actions finished");
    Ok(())
}

/// One-second ticks announcing the time left on the fuse.
fn countdown(fuse: u32) -> action_list::Result<BoxedAction> {
    let mut ticks = Vec::new();
    for remaining in (0..fuse).rev() {
        ticks.push(wait(1.0));
        ticks.push(callback(move || {
            tracing::info!(remaining, "tick");
            Ok(())
        }));
    }
    sequence(ticks)
}
