use clap::Parser;
use serde_json::json;
use visitor_counter::core::DisplayOutcome;
use visitor_counter::utils::analytics::{self, track_event};
use visitor_counter::utils::error::CounterError;
use visitor_counter::utils::monitor::LoadMonitor;
use visitor_counter::utils::{logger, validation::Validate};
use visitor_counter::{AnimationSettings, CliConfig, HttpCountSource, TerminalDisplay, VisitorDisplay};

fn report(error: &CounterError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
}

fn fail(error: &CounterError) -> ! {
    report(error);
    std::process::exit(error.exit_code());
}

fn resolve_config(cli: CliConfig) -> visitor_counter::Result<CliConfig> {
    let config = cli.resolve()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let mut monitor = LoadMonitor::new(cli.monitor);
    tracing::info!("Starting visitor-counter");

    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e);
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    // TOML 也可以打開監控
    if config.monitor {
        monitor.enable();
    }

    let source = match HttpCountSource::from_config(&config) {
        Ok(source) => source,
        Err(e) => fail(&e),
    };
    let display = TerminalDisplay::stdout("Visitors");
    let settings = AnimationSettings::from_config(&config);

    let mut visitor_display = VisitorDisplay::with_settings(source, display, settings);
    // 終端機寫入失敗也要走同一套回報與退出碼
    let outcome = match visitor_display.run().await {
        Ok(outcome) => outcome,
        Err(e) => fail(&e),
    };
    if let Err(e) = visitor_display.into_display().finish() {
        fail(&e);
    }

    track_event(
        analytics::PAGE_LOAD_COMPLETE,
        json!({ "load_time_ms": monitor.elapsed().as_secs_f64() * 1000.0 }),
    );
    monitor.log_final_stats();

    if let DisplayOutcome::Failed { error } = outcome {
        fail(&error);
    }

    Ok(())
}
