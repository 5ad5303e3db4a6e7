use clap::Parser;
use immo_wizard::utils::error::{ErrorSeverity, WizardError};
use immo_wizard::utils::logger;
use immo_wizard::{CliConfig, GeoNamesResolver, HttpPriceEstimator, Session, TerminalWizard};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting immo-wizard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let setup = async {
        let config = cli.resolve()?;
        let resolver = GeoNamesResolver::from_config(&config).await?;
        let estimator = HttpPriceEstimator::from_config(&config)?;
        Ok::<_, WizardError>((resolver, estimator))
    }
    .await;

    let (resolver, estimator) = match setup {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("❌ Startup failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            let exit_code = match e.severity() {
                ErrorSeverity::Critical => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    };

    tracing::info!(
        "📡 Predictions go to {} ({} postal codes loaded)",
        estimator.endpoint(),
        resolver.len()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut wizard = TerminalWizard::new(stdin.lock(), stdout.lock(), &resolver, &estimator);
    let session = wizard.run(Session::new()).await?;

    if let Some(record) = session.last_prediction() {
        tracing::info!("✅ Last estimate of the session: {}", record.value);
    }

    Ok(())
}
