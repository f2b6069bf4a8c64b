//! tokgate -- TikTok OAuth authorization-code gateway.
//!
//! Entry point. Wires together:
//!   - Configuration loading
//!   - Credential validation
//!   - Token store backend selection
//!   - HTTP server (pages + JSON API)
//!   - Graceful shutdown on SIGTERM / SIGINT

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use tokgate::AppState;
use tokgate::config::Config;
use tokgate::server::build_app;

// ---------------------------------------------------------------------------
// CLI argument parsing (minimal, no clap dependency)
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG_PATH: &str = "tokgate.toml";

struct CliArgs {
    config_path: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                if let Some(path) = args.next() {
                    config_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("tokgate {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run with --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    CliArgs { config_path }
}

fn print_usage() {
    println!(
        "\
tokgate {version} -- TikTok OAuth gateway

USAGE:
    tokgate [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Path to configuration file [default: {default}]
    -h, --help             Print this help message
    -V, --version          Print version information

ENVIRONMENT:
    TIKTOK_CLIENT_KEY      TikTok app client key
    TIKTOK_CLIENT_SECRET   TikTok app client secret
    TOKGATE_CONFIG         Alternative to --config flag
    TOKGATE_STORE_BACKEND  none | memory | file
    RUST_LOG               Override log level (e.g. RUST_LOG=debug)
",
        version = env!("CARGO_PKG_VERSION"),
        default = DEFAULT_CONFIG_PATH,
    );
}

/// `--config` wins over `TOKGATE_CONFIG`, which wins over the default.
fn resolve_config_path(cli: Option<PathBuf>, env: Option<String>) -> PathBuf {
    cli.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse CLI arguments
    let cli = parse_args();
    let config_path = resolve_config_path(cli.config_path, std::env::var("TOKGATE_CONFIG").ok());

    // 2. Load configuration
    let config = Config::load(&config_path)?;

    // 3. Initialize tracing/logging
    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "Starting tokgate"
    );

    // 4. Validate credentials and pick the store backend
    let state = AppState::from_config(config)?;
    log_startup_warnings(&state);

    // 5. Build the router
    let app = build_app(state.clone());

    // 6. Bind and serve
    let listen_addr = state.config.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await?;
    tracing::info!(addr = %listen_addr, "Listening");

    println!();
    println!("  tokgate v{} is running", env!("CARGO_PKG_VERSION"));
    println!("  Portal: http://{listen_addr}/");
    println!("  Status: http://{listen_addr}/api/status");
    println!();

    // 7. Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully");
    Ok(())
}

fn log_startup_warnings(state: &AppState) {
    if state.is_configured() {
        tracing::info!("Client credentials configured");
    } else {
        tracing::warn!(
            "TIKTOK_CLIENT_KEY / TIKTOK_CLIENT_SECRET not set -- running unconfigured"
        );
    }

    match state.tokens.backend_name() {
        Some(backend) => {
            tracing::info!(backend, "Token store enabled");
            tracing::warn!("/tokens and /refresh are unauthenticated -- do not expose publicly");
        }
        None => tracing::info!("Token store disabled; /tokens will answer 501"),
    }

    if !state.config.tiktok.verify_state {
        tracing::warn!("OAuth state verification is DISABLED -- callback accepts any state");
    }
}

// ---------------------------------------------------------------------------
// Tracing initialization
// ---------------------------------------------------------------------------

/// Set up the tracing subscriber based on configuration.
fn init_tracing(config: &Config) {
    // RUST_LOG env var takes precedence over config file
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.logging.level;
        EnvFilter::new(format!("tokgate={level},tower_http={level},warn"))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

// ---------------------------------------------------------------------------
// Graceful shutdown
// ---------------------------------------------------------------------------

/// Wait for a shutdown signal (SIGTERM or SIGINT / Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C)");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_usage_does_not_panic() {
        print_usage();
    }

    #[test]
    fn test_resolve_config_path_precedence() {
        assert_eq!(
            resolve_config_path(Some("a.toml".into()), Some("b.toml".into())),
            PathBuf::from("a.toml")
        );
        assert_eq!(
            resolve_config_path(None, Some("b.toml".into())),
            PathBuf::from("b.toml")
        );
        assert_eq!(
            resolve_config_path(None, Some(String::new())),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
        assert_eq!(resolve_config_path(None, None), PathBuf::from(DEFAULT_CONFIG_PATH));
    }
}
