use clap::Parser;
use std::path::PathBuf;

/// Flapi - schema-driven mock data over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "flapi", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FLAPI_CONFIG", default_value = "flapi.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "FLAPI_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "FLAPI_PORT")]
    pub port: Option<u16>,

    /// Seed every request without its own seed, for reproducible output
    #[arg(long, env = "FLAPI_SEED")]
    pub seed: Option<u64>,

    /// Largest number of documents a single request may ask for
    #[arg(long, env = "FLAPI_MAX_AMOUNT")]
    pub max_amount: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["flapi"]);
        assert_eq!(cli.config, PathBuf::from("flapi.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.seed.is_none());
        assert!(cli.max_amount.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "flapi",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--seed",
            "42",
            "--max-amount",
            "50",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.max_amount, Some(50));
    }
}
