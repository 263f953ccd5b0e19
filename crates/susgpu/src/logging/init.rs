use std::sync::Once;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "SUSGPU_LOG";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "susgpu=trace,susgpu_studio=debug"). When unset the filter comes from
/// `SUSGPU_LOG`, then `RUST_LOG`, then defaults to `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Route output through the test harness capture instead of stderr.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            is_test: false,
        }
    }
}

static INIT: Once = Once::new();

/// Picks the filter string: explicit config, then `SUSGPU_LOG`, then `RUST_LOG`.
fn resolve_filter(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit.or_else(|| lookup(LOG_ENV)).or_else(|| lookup("RUST_LOG"))
}

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. A logger installed by someone else
/// first is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(config.env_filter, |key| std::env::var(key).ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style).is_test(config.is_test);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
