use card_validator::app::server;
use card_validator::core::{ConfigProvider, FixedClock, SystemClock};
use card_validator::utils::{logger, validation::Validate};
use card_validator::{CardError, CliConfig, TomlConfig};
use clap::Parser;

/// CLI flags, or the TOML file named by `--config`.
enum Settings {
    Cli(CliConfig),
    File(TomlConfig),
}

impl Settings {
    fn provider(&self) -> &dyn ConfigProvider {
        match self {
            Settings::Cli(config) => config,
            Settings::File(config) => config,
        }
    }

    fn validate(&self) -> card_validator::Result<()> {
        match self {
            Settings::Cli(config) => config.validate(),
            Settings::File(config) => config.validate(),
        }
    }

    fn log_level(&self) -> Option<&str> {
        match self {
            Settings::Cli(_) => None,
            Settings::File(config) => config.log_level(),
        }
    }
}

fn fail(e: &CardError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Settings::File(config),
            Err(e) => fail(&e),
        },
        None => Settings::Cli(cli.clone()),
    };

    let provider = settings.provider();
    let format = if cli.json_logs {
        card_validator::core::LogFormat::Json
    } else {
        provider.log_format()
    };
    logger::init_logger(cli.verbose, settings.log_level(), format);

    tracing::info!("Starting card-validator");
    if let Some(path) = &cli.config {
        tracing::info!("📁 Configuration loaded from: {}", path);
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let router = match cli.today {
        Some(date) => {
            tracing::warn!("🕒 Clock pinned to {}", date);
            server::router_for(FixedClock::new(date), provider)
        }
        None => server::router_for(SystemClock, provider),
    };

    let listener = server::bind(provider).await?;
    server::serve(listener, router).await?;
    Ok(())
}
