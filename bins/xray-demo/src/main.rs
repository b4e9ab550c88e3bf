//! xray-demo CLI and Server Binary
//!
//! Entry point for the demo service. Provides commands for initializing,
//! validating and starting the HTTP service.

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use config::{generate_default_config, load_config, save_config, validate_config, AppConfig};
use observability::{init_logging, init_metrics, LogFormat};
use server::{HttpServer, ServerConfig, ServerExt};
use std::path::Path;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let format = resolve_log_format(&cli)?;
    init_logging("xray-demo", format)?;

    info!("xray-demo starting...");
    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Commands::Start { config, port, .. } => {
            info!("Executing 'start' command");
            start_service(config, port).await
        }
        Commands::Validate { config } => {
            info!("Executing 'validate' command");
            validate_command(config).await
        }
        Commands::Init { output } => {
            info!("Executing 'init' command");
            init_command(output).await
        }
    }
}

/// The `--log-format` flag wins; otherwise the configuration file's
/// `logging.format`, falling back to pretty output.
fn resolve_log_format(cli: &Cli) -> Result<LogFormat> {
    let configured = match &cli.command {
        Commands::Start {
            log_format: Some(format),
            ..
        } => Some(format.clone()),
        Commands::Start { config, .. } | Commands::Validate { config } => load_config(config)
            .ok()
            .map(|c| c.logging().format),
        Commands::Init { .. } => None,
    };

    match configured {
        Some(format) => format
            .parse::<LogFormat>()
            .map_err(|e| anyhow::anyhow!(e)),
        None => Ok(LogFormat::default()),
    }
}

async fn start_service<P: AsRef<Path>>(config_path: P, port_override: Option<u16>) -> Result<()> {
    let config_path = config_path.as_ref();

    // Validate the effective port, so an override is checked too
    let config = load_config(config_path)?.with_port_override(port_override);
    check_config(&config)?;

    let http = config.server();
    let port = http.port;
    if port_override.is_none() {
        debug!(port, "Using configured HTTP port");
    }

    if let Some(metrics_port) = config.metrics_port() {
        init_metrics(metrics_port)?;
    }

    let assembly = demo::bootstrap::assemble(&config)?;
    let application_name = assembly.application_name.clone();

    info!(
        application = %application_name,
        host = %http.host,
        port,
        "Starting service"
    );

    let server = HttpServer::new(
        application_name,
        ServerConfig::new(http.host, port),
        assembly.into_router(),
    );

    // Start server with graceful shutdown (Ctrl+C handling)
    server.run_with_ctrl_c().await?;

    info!("xray-demo stopped");
    Ok(())
}

/// Log warnings and refuse to start on any validation error.
fn check_config(config: &AppConfig) -> Result<()> {
    let report = validate_config(config);

    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }

    for default in &report.defaults_applied {
        debug!(field = %default.field, value = %default.value, "Default applied");
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start service due to configuration errors");
    }

    Ok(())
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    let server = config.server();
    let storage = config.storage();

    println!("[ok] Configuration is valid!");
    println!();
    println!("Application: {}", config.application_name().unwrap_or("-"));
    println!("Listen: {}:{}", server.host, server.port);
    println!("Storage: profile={}, region={}", storage.profile, storage.region);
    println!("Remote: {}", config.remote().base_url);
    println!("Count table: {}", config.database.count_table);

    Ok(())
}

async fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Set DATABASE_URL or edit database.url");
    println!("  2. Adjust storage.profile / storage.region for your AWS account");
    println!(
        "  3. Run 'xray-demo validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  4. Run 'xray-demo start --config {:?}' to start the service",
        output_path
    );

    Ok(())
}
