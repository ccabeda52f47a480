use clap::Parser;
use volby_scrape::utils::{logger, validation::Validate};
use volby_scrape::{CliConfig, ElectionPipeline, EtlEngine, HttpFetcher, LocalStorage};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting volby-scrape");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.into_run_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let fetcher = match HttpFetcher::new(&config.scraper.http) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let storage = LocalStorage::new(".");
    let pipeline = ElectionPipeline::new(storage, fetcher, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            if report.failed_details > 0 {
                println!(
                    "⚠️ U {} z {} obcí se nepodařilo stáhnout detail, jejich hodnoty jsou nulové.",
                    report.failed_details, report.municipalities
                );
            }
            println!("Program úspěšně dokončen.");
        }
        Err(e) => {
            tracing::error!(
                "❌ Scraping failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
