use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use analytics_adapters::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use analytics_catalog::{CatalogSource, CatalogVariant};

mod commands;
use commands::{execute_lookup_command, execute_serve_command, execute_show_command, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "analytics-mock")]
#[command(about = "Mock analytics backend answering get_by_ids lookups from a fixed catalog")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Options used when no subcommand is given (same as `serve`)
    #[command(flatten)]
    pub serve: ServeOpts,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP lookup server (default)
    Serve(ServeOpts),
    /// Look up identifiers without starting a server
    Lookup(LookupOpts),
    /// Print the whole catalog
    Show(CatalogOpts),
}

#[derive(Args, Debug, Clone)]
pub struct CatalogOpts {
    /// Built-in catalog to serve
    #[arg(long, default_value_t = CatalogVariant::Full)]
    pub variant: CatalogVariant,
    /// JSON catalog file to serve instead of a built-in variant
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

impl CatalogOpts {
    pub fn source(&self) -> CatalogSource {
        match &self.catalog {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Builtin(self.variant),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeOpts {
    /// Host to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    #[command(flatten)]
    pub catalog: CatalogOpts,
}

impl ServeOpts {
    fn into_args(self) -> commands::ServeArgs {
        commands::ServeArgs {
            source: self.catalog.source(),
            server: ServerConfig::new(self.host, self.port),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LookupOpts {
    /// Identifiers to look up
    pub ids: Vec<String>,
    #[command(flatten)]
    pub catalog: CatalogOpts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        None => execute_serve_command(cli.serve.into_args()).await,
        Some(Commands::Serve(opts)) => execute_serve_command(opts.into_args()).await,
        Some(Commands::Lookup(opts)) => execute_lookup_command(commands::LookupArgs {
            source: opts.catalog.source(),
            ids: opts.ids,
        }),
        Some(Commands::Show(opts)) => execute_show_command(&opts.source()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_serves_defaults() {
        let cli = parse(&["analytics-mock"]);
        assert!(cli.command.is_none());

        let args = cli.serve.into_args();
        assert_eq!(args.server, ServerConfig::default());
        assert_eq!(args.source, CatalogSource::Builtin(CatalogVariant::Full));
    }

    #[test]
    fn test_top_level_serve_options() {
        let cli = parse(&["analytics-mock", "--port", "8080", "--variant", "reduced"]);
        let args = cli.serve.into_args();
        assert_eq!(args.server.port, 8080);
        assert_eq!(args.source, CatalogSource::Builtin(CatalogVariant::Reduced));
    }

    #[test]
    fn test_serve_subcommand() {
        let cli = parse(&["analytics-mock", "serve", "--host", "0.0.0.0", "-p", "9000"]);
        match cli.command {
            Some(Commands::Serve(opts)) => {
                let args = opts.into_args();
                assert_eq!(args.server, ServerConfig::new("0.0.0.0", 9000));
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_file_overrides_variant() {
        let cli = parse(&[
            "analytics-mock",
            "serve",
            "--variant",
            "reduced",
            "--catalog",
            "fixtures/catalog.json",
        ]);
        match cli.command {
            Some(Commands::Serve(opts)) => assert_eq!(
                opts.catalog.source(),
                CatalogSource::File(PathBuf::from("fixtures/catalog.json"))
            ),
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_subcommand() {
        let cli = parse(&["analytics-mock", "lookup", "A.func", "func2", "--variant", "full"]);
        match cli.command {
            Some(Commands::Lookup(opts)) => {
                assert_eq!(opts.ids, vec!["A.func".to_string(), "func2".to_string()]);
                assert_eq!(opts.catalog.source(), CatalogSource::Builtin(CatalogVariant::Full));
            }
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        assert!(Cli::try_parse_from(["analytics-mock", "--variant", "partial"]).is_err());
    }
}
