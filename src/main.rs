use box_layout_client::app;
use box_layout_client::utils::logger;
use box_layout_client::CliConfig;
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.json_logs);
    tracing::debug!("CLI config: {:?}", config);

    let result = app::run(&config, BufReader::new(tokio::io::stdin())).await;

    match &result {
        Ok(summary) => {
            for record in &summary.downloads {
                println!("📁 {}", record.path.display());
            }
            tracing::info!(
                "✅ {}/{} submissions downloaded",
                summary.downloads.len(),
                summary.submitted
            );
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
        }
    }

    std::process::exit(app::exit_code(&result));
}
