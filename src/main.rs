use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;
use image::Rgba;
use log::error;

use ethpaper::code::{DEFAULT_CODE_SIZE, MAX_CODE_SIZE};
use ethpaper::{build_wallet, parse_color, save_png, EthKey, Markers, WalletConfig, WalletResult};

#[derive(Parser)]
#[command(name = "ethpaper", version, about = "Generate an Ethereum paper wallet")]
struct Cli {
    /// Wallet template image (PNG); the built-in template is used when empty
    #[arg(long, default_value = "")]
    template: PathBuf,

    /// Paper wallet output path, without the .png extension
    #[arg(long, default_value = "wallet")]
    out: PathBuf,

    /// Generate QR codes without borders
    #[arg(long = "noborders")]
    no_borders: bool,

    /// Marker color of private key placeholders (RRGGBB or RRGGBBAA)
    #[arg(long, value_parser = parse_color, default_value = "d5d5ff")]
    private_color: Rgba<u8>,

    /// Marker color of address placeholders (RRGGBB or RRGGBBAA)
    #[arg(long, value_parser = parse_color, default_value = "d5fff6")]
    address_color: Rgba<u8>,

    /// Side of the rendered QR codes in pixels before they are fitted to the template
    #[arg(
        long,
        default_value_t = DEFAULT_CODE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CODE_SIZE as i64)
    )]
    size: u32,
}

impl From<Cli> for WalletConfig {
    fn from(cli: Cli) -> Self {
        let template = Some(cli.template).filter(|p| !p.as_os_str().is_empty());
        Self {
            template,
            out: cli.out,
            borders: !cli.no_borders,
            code_size: cli.size,
            markers: Markers { private: cli.private_color, address: cli.address_color },
        }
    }
}

fn run(config: &WalletConfig) -> WalletResult<()> {
    let key = EthKey::generate();
    print!("{}", key.banner());

    let wallet = build_wallet(&key, config)?;
    let path = save_png(&config.out, &wallet)?;
    println!("Saved: {}", path.display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = WalletConfig::from(Cli::parse());

    if let Err(e) = run(&config) {
        error!("{e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod cli_tests {
    use clap::Parser;
    use test_case::test_case;

    use super::Cli;
    use ethpaper::WalletConfig;

    #[test]
    fn test_defaults() {
        let config = WalletConfig::from(Cli::try_parse_from(["ethpaper"]).unwrap());
        assert!(config.template.is_none());
        assert!(config.borders);
        assert_eq!(config.code_size, 1024);
    }

    #[test_case("0"; "zero")]
    #[test_case("8193"; "above maximum")]
    #[test_case("100000"; "huge")]
    fn test_size_out_of_range(size: &str) {
        assert!(Cli::try_parse_from(["ethpaper", "--size", size]).is_err());
    }

    #[test]
    fn test_size_at_maximum() {
        let cli = Cli::try_parse_from(["ethpaper", "--size", "8192"]).unwrap();
        assert_eq!(cli.size, 8192);
    }
}
