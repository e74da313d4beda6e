use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "discover")]
#[command(about = "Discover the canonical, in-scope URLs belonging to a target website")]
struct Cli {
    /// Start URL, overriding the configured default.
    start_url: Option<String>,

    /// Path to the discovery config YAML.
    #[arg(long, default_value = "config/discovery.yaml")]
    config: PathBuf,

    /// Skip sitemap resolution and crawl directly.
    #[arg(long)]
    no_sitemap: bool,

    /// Log level, e.g. "info", "debug". Overridden by `RUST_LOG` when set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match discovery_core::load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(start_url) = cli.start_url.or_else(|| config.target.clone()) else {
        tracing::error!("no start URL given and no `target` configured");
        return ExitCode::FAILURE;
    };

    let urls = discovery_engine::discover(&start_url, &config, cli.no_sitemap).await;

    for url in &urls {
        println!("DISCOVERED {url}");
    }
    println!("TOTAL={}", urls.len());

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_uses_default_config_path_and_no_start_url() {
        let cli = Cli::try_parse_from(["discover"]).expect("expected valid cli args");
        assert_eq!(cli.start_url, None);
        assert_eq!(cli.config, PathBuf::from("config/discovery.yaml"));
        assert!(!cli.no_sitemap);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn parses_positional_start_url() {
        let cli = Cli::try_parse_from(["discover", "https://example.com"])
            .expect("expected valid cli args");
        assert_eq!(cli.start_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn parses_custom_config_path() {
        let cli = Cli::try_parse_from(["discover", "--config", "custom.yaml"])
            .expect("expected valid cli args");
        assert_eq!(cli.config, PathBuf::from("custom.yaml"));
    }

    #[test]
    fn parses_no_sitemap_flag() {
        let cli =
            Cli::try_parse_from(["discover", "--no-sitemap"]).expect("expected valid cli args");
        assert!(cli.no_sitemap);
    }

    #[test]
    fn parses_log_level() {
        let cli = Cli::try_parse_from(["discover", "--log-level", "debug"])
            .expect("expected valid cli args");
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn combines_start_url_config_and_flags() {
        let cli = Cli::try_parse_from([
            "discover",
            "https://example.com",
            "--config",
            "other.yaml",
            "--no-sitemap",
            "--log-level",
            "warn",
        ])
        .expect("expected valid cli args");
        assert_eq!(cli.start_url.as_deref(), Some("https://example.com"));
        assert_eq!(cli.config, PathBuf::from("other.yaml"));
        assert!(cli.no_sitemap);
        assert_eq!(cli.log_level, "warn");
    }
}
