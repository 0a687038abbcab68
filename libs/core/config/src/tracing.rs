use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter for deployed environments when `RUST_LOG` is unset
const PRODUCTION_FILTER: &str = "info,tower_http=info,mongodb=warn";

/// Default filter for local development when `RUST_LOG` is unset
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,mongodb=info,hyper=info";

/// Install color-eyre with a project-standard configuration.
///
/// Safe to call multiple times. Shows file:line where errors occur and
/// hides the environment section.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new(PRODUCTION_FILTER)
        } else {
            EnvFilter::new(DEVELOPMENT_FILTER)
        }
    })
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events, no targets.
/// - **Development** (default): pretty-printed, human-readable output.
///
/// Both modes register an `ErrorLayer` so eyre reports carry span traces.
/// `RUST_LOG` overrides the default filter (e.g. `RUST_LOG=events_api=trace`).
///
/// Calling this more than once is harmless: a second registration is skipped.
pub fn init_tracing(environment: &Environment) {
    let filter = default_filter(environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(
                "Tracing initialized with ErrorLayer. Environment: {:?}",
                environment
            );
        }
        Err(_) => {
            // Already initialized (common in tests)
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}
