use clap::{Parser, ValueEnum};

use kanto_api::DEFAULT_API_BASE;
use kanto_gallery::{DEFAULT_LANGUAGE, KANTO_DEX_SIZE};

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CliOutputFormat {
    Grid,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "kanto", about = "Pokemon gallery over the public PokeAPI", version)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "KANTO_LIMIT",
        default_value_t = KANTO_DEX_SIZE,
        value_parser = parse_positive_usize,
        help = "Number of catalog entries requested from the listing endpoint."
    )]
    pub limit: usize,

    #[arg(
        long,
        env = "KANTO_LANGUAGE",
        default_value = DEFAULT_LANGUAGE,
        help = "Language tag selecting the flavor text entry used as description."
    )]
    pub language: String,

    #[arg(
        long,
        env = "KANTO_API_BASE",
        default_value = DEFAULT_API_BASE,
        help = "Base URL of the PokeAPI host."
    )]
    pub api_base: String,

    #[arg(
        long,
        env = "KANTO_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Per-request timeout in milliseconds."
    )]
    pub timeout_ms: u64,

    #[arg(
        long,
        env = "KANTO_KEEP_PARTIAL",
        help = "Keep catalog items that loaded instead of failing the whole batch."
    )]
    pub keep_partial: bool,

    #[arg(
        long,
        env = "KANTO_OUTPUT",
        value_enum,
        default_value = "grid",
        help = "Output format: rendered card grid or a JSON state dump."
    )]
    pub output: CliOutputFormat,
}
