//! Command-line arguments.
//!
//! ```text
//! storefront catalog [--source escuela|fakestore] [--url URL] [--cap N]
//!                    [--retries N] [--add ID] [--config PATH] [--json]
//! storefront cart FILE [--remove ID]... [--pay]
//! ```

use anyhow::{bail, Context};
use std::ffi::OsString;
use std::path::PathBuf;

use storefront_catalog::{ApiFlavor, CatalogConfig};

pub const USAGE: &str = "\
Usage:
  storefront catalog [--source escuela|fakestore] [--url URL] [--cap N]
                     [--retries N] [--add ID] [--config PATH] [--json]
  storefront cart FILE [--remove ID]... [--pay]";

/// A parsed invocation.
#[derive(Debug, PartialEq)]
pub enum Command {
    Catalog(CatalogArgs),
    Cart(CartArgs),
    Help,
}

/// Flags for `storefront catalog`.
#[derive(Debug, Default, PartialEq)]
pub struct CatalogArgs {
    pub config: Option<PathBuf>,
    pub source: Option<ApiFlavor>,
    pub url: Option<String>,
    pub cap: Option<usize>,
    pub retries: Option<u32>,
    pub add: Option<i64>,
    pub json: bool,
}

impl CatalogArgs {
    /// Applies the flags on top of a loaded config. Flags win.
    pub fn apply_to(&self, config: &mut CatalogConfig) {
        if let Some(flavor) = self.source {
            config.source.flavor = flavor;
        }
        if let Some(ref url) = self.url {
            config.source.url = Some(url.clone());
        }
        if let Some(cap) = self.cap {
            config.loader.cap = cap;
        }
        if let Some(retries) = self.retries {
            config.loader.max_retries = retries;
        }
    }
}

/// Flags for `storefront cart`.
#[derive(Debug, Default, PartialEq)]
pub struct CartArgs {
    pub file: PathBuf,
    pub remove: Vec<i64>,
    pub pay: bool,
}

/// Parses the process arguments.
pub fn parse_env() -> anyhow::Result<Command> {
    parse(pico_args::Arguments::from_env())
}

/// Parses an explicit argument list (without the program name).
pub fn parse_from(args: Vec<OsString>) -> anyhow::Result<Command> {
    parse(pico_args::Arguments::from_vec(args))
}

fn parse(mut args: pico_args::Arguments) -> anyhow::Result<Command> {
    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }

    let command = match args.subcommand()?.as_deref() {
        Some("catalog") => Command::Catalog(CatalogArgs {
            config: args.opt_value_from_str("--config")?,
            source: args.opt_value_from_str("--source")?,
            url: args.opt_value_from_str("--url")?,
            cap: args.opt_value_from_str("--cap")?,
            retries: args.opt_value_from_str("--retries")?,
            add: args.opt_value_from_str("--add")?,
            json: args.contains("--json"),
        }),
        Some("cart") => {
            let remove = args.values_from_str("--remove")?;
            let pay = args.contains("--pay");
            let file = args
                .free_from_str()
                .context("cart needs a JSON file of cart items")?;
            Command::Cart(CartArgs { file, remove, pay })
        }
        Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
        None => bail!("missing command\n\n{}", USAGE),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {:?}\n\n{}", rest, USAGE);
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> anyhow::Result<Command> {
        parse_from(args.iter().map(OsString::from).collect())
    }

    #[test]
    fn test_catalog_flags() {
        let command = parse_args(&[
            "catalog", "--source", "fakestore", "--cap", "6", "--retries", "1", "--add", "3",
        ])
        .unwrap();

        assert_eq!(
            command,
            Command::Catalog(CatalogArgs {
                source: Some(ApiFlavor::FakeStore),
                cap: Some(6),
                retries: Some(1),
                add: Some(3),
                ..CatalogArgs::default()
            })
        );
    }

    #[test]
    fn test_catalog_without_flags() {
        let command = parse_args(&["catalog"]).unwrap();
        assert_eq!(command, Command::Catalog(CatalogArgs::default()));
    }

    #[test]
    fn test_cart_with_repeated_removals() {
        let command = parse_args(&["cart", "--remove", "2", "cart.json", "--remove", "5", "--pay"]).unwrap();
        assert_eq!(
            command,
            Command::Cart(CartArgs {
                file: PathBuf::from("cart.json"),
                remove: vec![2, 5],
                pay: true,
            })
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["checkout"]).is_err());
        assert!(parse_args(&["cart"]).is_err());
        assert!(parse_args(&["catalog", "--source", "amazon"]).is_err());
        assert!(parse_args(&["catalog", "--bogus"]).is_err());
        assert_eq!(parse_args(&["--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = CatalogConfig::default();
        let args = CatalogArgs {
            url: Some("http://localhost:8080/p".into()),
            cap: Some(2),
            ..CatalogArgs::default()
        };
        args.apply_to(&mut config);

        assert_eq!(config.endpoint_url(), "http://localhost:8080/p");
        assert_eq!(config.loader.cap, 2);
        assert_eq!(config.loader.max_retries, 3);
    }
}
