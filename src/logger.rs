use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::time, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// The terminal is owned by the game screen, so output goes to `log_path`
/// when given and is discarded otherwise.  `RUST_LOG` adds or overrides
/// filter directives.  Call once, early in `main`.
pub fn init(log_path: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env()?;

    match log_path {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_timer(time::uptime())
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .with(filter)
                .try_init()?;
        }
    }
    Ok(())
}
