// # failoverctl - DNS failover CLI
//
// Thin integration layer. All reconciliation logic lives in failover-core.
//
// The binary is responsible for:
// 1. Parsing flags and building the layered option source
// 2. Validating configuration before anything touches the network
// 3. Registering zone store providers
// 4. Running the reconciler and mapping failures to exit codes
//
// ## Options
//
// Options are looked up by kebab-case key, in this order:
// 1. `--set key=value` flags
// 2. Environment variables (`FAILOVER_<KEY>`, e.g. `FAILOVER_ID_BROKER_VALUE`)
// 3. The JSON config file given with `--config`
//
// Keys: `domain-name`, `cloudflare-token`, `cloudflare-zone-id`, and for each
// service `<service>-name` / `<service>-value` (mfa-api, twosv-api,
// support-bot, email-service, id-broker, pw-api, ssp, id-sync).
//
// ## Example
//
// ```bash
// export FAILOVER_DOMAIN_NAME=example.com
// export FAILOVER_CLOUDFLARE_TOKEN=your_token
//
// failoverctl --idp acme --read-only \
//     --set id-broker-value=broker.us-west-2.example.net
// ```

use anyhow::{Context, Result};
use clap::Parser;
use failover_core::options::env::DEFAULT_ENV_PREFIX;
use failover_core::options::{
    EnvOptionSource, FileOptionSource, LayeredOptionSource, MapOptionSource,
};
use failover_core::{
    ErrorKind, FailoverConfig, LinePrompt, ReconcileContext, Reconciler, ZoneStoreRegistry,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: All records processed
/// - 1: Configuration or startup error
/// - 2: Run aborted (lookup inconsistency, failed write or operator I/O)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailoverExitCode {
    /// Every record reached a terminal outcome
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Run aborted mid-way
    RuntimeError = 2,
}

impl From<FailoverExitCode> for ExitCode {
    fn from(code: FailoverExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Configure DNS CNAME values for primary or secondary region hostnames
#[derive(Debug, Parser)]
#[command(name = "failoverctl", version, about)]
struct Args {
    /// Identity provider key, used to template per-IdP record names
    #[arg(long, env = "FAILOVER_IDP")]
    idp: String,

    /// Look up and compare records without changing anything
    #[arg(long, env = "FAILOVER_READ_ONLY")]
    read_only: bool,

    /// JSON file of option values
    #[arg(long, env = "FAILOVER_CONFIG")]
    config: Option<PathBuf>,

    /// Override an option (repeatable), e.g. --set ssp-value=ssp.example.net
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FAILOVER_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Build the option source: flags, then environment, then config file
    fn option_source(&self) -> Result<LayeredOptionSource> {
        let mut overrides = MapOptionSource::new();
        for assignment in &self.overrides {
            overrides.insert_assignment(assignment)?;
        }

        let mut options = LayeredOptionSource::new()
            .with_layer(overrides)
            .with_layer(EnvOptionSource::from_env(DEFAULT_ENV_PREFIX));

        if let Some(path) = &self.config {
            let file = FileOptionSource::load(path)
                .with_context(|| format!("loading {}", path.display()))?;
            options = options.with_layer(file);
        }

        Ok(options)
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return FailoverExitCode::ConfigError.into();
        }
    };

    // Narration goes to stdout, logs to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return FailoverExitCode::ConfigError.into();
    }

    let options = match args.option_source() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return FailoverExitCode::ConfigError.into();
        }
    };

    let config = FailoverConfig::from_options(&options, args.idp.as_str(), args.read_only);
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return FailoverExitCode::ConfigError.into();
    }

    if config.reconciler.dry_run {
        warn!("Running in read-only mode - no DNS records will be changed");
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return FailoverExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(config, options)).into()
}

/// Run one reconciliation pass
async fn run(config: FailoverConfig, options: LayeredOptionSource) -> FailoverExitCode {
    let mut registry = ZoneStoreRegistry::new();

    #[cfg(feature = "cloudflare")]
    {
        info!("Registering Cloudflare zone store");
        failover_provider_cloudflare::register(&mut registry);
    }

    let store = match registry.create_store(&config.zone_store) {
        Ok(store) => Arc::from(store),
        Err(e) => {
            error!("Failed to create zone store: {}", e);
            eprintln!("{}", e);
            return FailoverExitCode::ConfigError;
        }
    };

    let context = match ReconcileContext::connect(
        store,
        config.reconciler.clone(),
        config.zone_store.zone_id(),
    )
    .await
    {
        Ok(context) => context,
        Err(e) => {
            error!("Failed to resolve zone {}: {}", config.reconciler.domain_name, e);
            eprintln!("{}", e);
            return FailoverExitCode::ConfigError;
        }
    };

    let reconciler = Reconciler::new(context, Box::new(LinePrompt::stdio()));
    let mut out = std::io::stdout();

    match reconciler.run(&options, &mut out).await {
        Ok(summary) => {
            info!("{}", summary);
            FailoverExitCode::Success
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            eprintln!("{}", e);
            exit_code_for(e.kind())
        }
    }
}

/// Exit code for a run aborted with an error of `kind`
fn exit_code_for(kind: ErrorKind) -> FailoverExitCode {
    match kind {
        ErrorKind::Configuration => FailoverExitCode::ConfigError,
        ErrorKind::Lookup | ErrorKind::Write | ErrorKind::Operator => {
            FailoverExitCode::RuntimeError
        }
    }
}
