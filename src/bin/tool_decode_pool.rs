/// Decode a raw pool account and print it as a unified pool
///
/// Account data comes from the command line (base64, as returned by
/// `getAccountInfo` with `encoding: base64`) or from a raw binary dump.
///
/// Example:
///   tool_decode_pool --program-id whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc --file pool.bin
///   tool_decode_pool --list-programs --debug-registry --no-color

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use pool_decoder::config::{load_config_from_path, with_config, CONFIG_FILE_PATH};
use pool_decoder::logger::{self, LogTag};
use pool_decoder::pools::{self, registry, ProtocolRegistry};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "tool_decode_pool", about = "Decode a pool account into the unified pool model")]
struct Args {
    /// Program that owns the account
    #[arg(long, required_unless_present = "list_programs")]
    program_id: Option<String>,

    /// Account address, echoed into the output
    #[arg(long)]
    pool_address: Option<String>,

    /// Account data as base64
    #[arg(long, conflicts_with = "file")]
    base64: Option<String>,

    /// Raw account data file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Config file (defaults are used when it does not exist)
    #[arg(long, default_value = CONFIG_FILE_PATH)]
    config: PathBuf,

    /// Print the registered programs and exit
    #[arg(long)]
    list_programs: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Verbose output for every tag
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Warnings and errors only
    #[arg(long)]
    quiet: bool,

    /// Plain log output
    #[arg(long)]
    no_color: bool,

    #[arg(long)]
    debug_decoder: bool,

    #[arg(long)]
    debug_registry: bool,

    #[arg(long)]
    debug_config: bool,

    #[arg(long)]
    debug_system: bool,

    #[arg(long)]
    verbose_decoder: bool,

    #[arg(long)]
    verbose_registry: bool,
}

impl Args {
    /// Logger flags in their command-line form
    fn logger_flags(&self) -> Vec<&'static str> {
        [
            (self.verbose, "--verbose"),
            (self.quiet, "--quiet"),
            (self.no_color, "--no-color"),
            (self.debug_decoder, "--debug-decoder"),
            (self.debug_registry, "--debug-registry"),
            (self.debug_config, "--debug-config"),
            (self.debug_system, "--debug-system"),
            (self.verbose_decoder, "--verbose-decoder"),
            (self.verbose_registry, "--verbose-registry"),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, flag)| flag)
        .collect()
    }
}

fn parse_pubkey(label: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim()).with_context(|| format!("Invalid {}: '{}'", label, value))
}

fn read_account_data(args: &Args) -> Result<Vec<u8>> {
    match (&args.base64, &args.file) {
        (Some(encoded), None) => STANDARD
            .decode(encoded.trim())
            .context("Account data is not valid base64"),
        (None, Some(path)) => std::fs::read(path)
            .with_context(|| format!("Failed to read account data from '{}'", path.display())),
        _ => bail!("Provide account data with exactly one of --base64 or --file"),
    }
}

fn print_programs(registry: &ProtocolRegistry) {
    for program_id in registry.supported_programs() {
        let protocol = registry
            .protocol_for(&program_id)
            .map(|p| p.to_string())
            .unwrap_or_default();
        println!("{:<46} {}", program_id, protocol);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    load_config_from_path(&args.config)?;
    with_config(|cfg| logger::init_from_settings(&cfg.logging, args.logger_flags()))?;
    with_config(|cfg| registry::configure(&cfg.decoder))?
        .context("Failed to build protocol registry")?;

    if args.list_programs {
        print_programs(&registry::snapshot());
        return Ok(());
    }

    let program_id = match &args.program_id {
        Some(value) => parse_pubkey("program id", value)?,
        None => bail!("--program-id is required"),
    };
    let pool_address = args
        .pool_address
        .as_deref()
        .map(|value| parse_pubkey("pool address", value))
        .transpose()?;
    let data = read_account_data(&args)?;

    logger::debug(
        LogTag::System,
        &format!("Decoding {} bytes owned by {}", data.len(), program_id),
    );
    logger::verbose(
        LogTag::Decoder,
        &format!("Account head: {:02x?}", &data[..data.len().min(16)]),
    );

    let pool = pools::parse_account(pool_address, &program_id, &data)
        .with_context(|| format!("Failed to decode account owned by {}", program_id))?;

    let json = if args.compact {
        serde_json::to_string(&pool)?
    } else {
        serde_json::to_string_pretty(&pool)?
    };
    println!("{}", json);

    logger::info(
        LogTag::System,
        &format!(
            "{} pool {} / {}",
            pool.protocol(),
            pool.base_mint(),
            pool.quote_mint()
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pool_decoder::config::LoggingConfig;
    use pool_decoder::logger::{LogLevel, LoggerConfig};

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_logger_flags_reach_logger_config() {
        let args = Args::try_parse_from([
            "tool_decode_pool",
            "--list-programs",
            "--verbose",
            "--debug-registry",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(
            args.logger_flags(),
            vec!["--verbose", "--no-color", "--debug-registry"]
        );

        let config = LoggerConfig::from_settings(&LoggingConfig::default(), args.logger_flags());
        assert_eq!(config.min_level, LogLevel::Verbose);
        assert!(config.debug_tags.contains("registry"));
        assert!(!config.colors);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["tool_decode_pool", "--list-programs", "--quiet", "--verbose"])
            .is_err());
        let args = Args::try_parse_from(["tool_decode_pool", "--program-id", "x", "--quiet"]).unwrap();
        assert_eq!(args.logger_flags(), vec!["--quiet"]);
    }

    #[test]
    fn test_program_id_required_without_list() {
        assert!(Args::try_parse_from(["tool_decode_pool", "--debug-decoder"]).is_err());
    }
}
