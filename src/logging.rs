//! # Structured Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem, plus
//! domain-specific structured logging macros for orders, workers and stations.
//!
//! Every macro emits an `operation` field, any extra `key: value` fields
//! (formatted with `Debug`), and an RFC 3339 `timestamp`.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::constants::env_vars;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with the level derived from `CYRK_ENV`
pub fn init_structured_logging() {
    let environment = get_environment();
    let config = LoggingConfig {
        level: get_log_level(&environment).to_string(),
        json: false,
    };
    init_with_config(&config);
}

/// Initialize console logging from explicit settings
///
/// `RUST_LOG`, when set, takes precedence over `config.level`. Only the first call
/// has any effect.
pub fn init_with_config(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

        let layer = if config.json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_names(true)
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_names(true)
                .with_ansi(std::io::stdout().is_terminal())
                .with_filter(filter)
                .boxed()
        };

        // A global subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %get_environment(),
            level = %config.level,
            json = config.json,
            "🔧 LOGGING: Initialized"
        );
    });
}

fn get_environment() -> String {
    std::env::var(env_vars::ENVIRONMENT).unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log order lifecycle events
#[macro_export]
macro_rules! log_order {
    // Full form with order_id
    ($level:ident, $operation:expr, order_id: $order_id:expr $(, $key:ident: $value:expr)* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            order_id = $order_id,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "📋 ORDER_{} (order: {})", $operation, $order_id
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "📋 ORDER_{}", $operation
        );
    };
}

/// Log order worker events
#[macro_export]
macro_rules! log_worker {
    // Full form with worker index
    ($level:ident, $operation:expr, worker: $worker:expr $(, $key:ident: $value:expr)* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            worker = $worker,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "👷 WORKER_{} (worker: {})", $operation, $worker
        );
    };
}

/// Log station runner events
#[macro_export]
macro_rules! log_station {
    // Full form with product name
    ($level:ident, $operation:expr, product: $product:expr $(, $key:ident: $value:expr)* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            product = %$product,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "🏭 STATION_{} (product: {})", $operation, $product
        );
    };
}

/// Log engine lifecycle events
#[macro_export]
macro_rules! log_system {
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "🚀 SYSTEM_{}", $operation
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "🚀 SYSTEM_{}", $operation
        );
    };
}

/// Log configuration operations
#[macro_export]
macro_rules! log_config {
    // Simple form - just operation
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
    // Generic form with additional fields
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
}
