mod collectors;
mod config;
mod gateway;
mod report;
mod snapshot;

use clap::Parser;
use collectors::HostCollector;
use config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "./hwreport.yaml";

#[derive(Parser, Debug)]
#[command(name = "hwreport")]
#[command(version)]
struct Cli {
    /// YAML-файл конфигурации; без флага читается ./hwreport.yaml, если он есть.
    #[arg(long)]
    config: Option<String>,
    /// Путь к файлу отчёта, перекрывает `output` из конфигурации.
    #[arg(long)]
    output: Option<String>,
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", Config::example_yaml());
        return;
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load_or_default(DEFAULT_CONFIG_PATH),
    };
    let mut cfg = match loaded {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "не удалось загрузить конфигурацию");
            std::process::exit(1);
        }
    };
    if let Some(output) = cli.output {
        cfg.output = output;
    }

    info!(
        output = %cfg.output,
        on_query_error = ?cfg.on_query_error,
        query_timeout_secs = ?cfg.query_timeout_secs,
        "запуск сбора сведений о системе"
    );

    let provider = HostCollector::new();
    let snapshot = match gateway::acquire(&provider, &cfg.acquire_options()).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!(error = %err, "не удалось собрать сведения о системе");
            std::process::exit(1);
        }
    };

    let text = report::render(&snapshot);
    if let Err(err) = report::write_report(&cfg.output, &text) {
        error!(error = %err, "отчёт не сохранён");
        std::process::exit(1);
    }

    info!(path = %cfg.output, bytes = text.len(), "отчёт сохранён");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
