//! CLI entry point for mdpress

use anyhow::Result;
use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdpress::config::SiteConfig;
use mdpress::Site;

#[derive(Debug, Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Turn a folder of markdown files into a static blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Configuration file (defaults to _config.yml in the base directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Commands {
    /// Convert markdown files to html
    #[command(alias = "g")]
    Generate,

    /// Serve the html files in the public directory
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// What the command line asks for
#[derive(Debug)]
enum Invocation {
    /// Run a command
    Run(Cli, Commands),
    /// Print usage and exit 0, naming the unknown command if there was one
    Usage { unknown: Option<String> },
}

/// Parse the arguments, turning a missing or unknown command into `Usage`.
///
/// Other clap errors (including `--help` and `--version`) are returned as is.
fn parse_args<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(mut cli) => match cli.command.take() {
            Some(command) => Ok(Invocation::Run(cli, command)),
            None => Ok(Invocation::Usage { unknown: None }),
        },
        Err(e) if matches!(e.kind(), ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument) => {
            let unknown = e
                .get(ContextKind::InvalidSubcommand)
                .or_else(|| e.get(ContextKind::InvalidArg))
                .map(|value| value.to_string());
            Ok(Invocation::Usage { unknown })
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (cli, command) = match parse_args(std::env::args_os()) {
        Ok(Invocation::Run(cli, command)) => (cli, command),
        Ok(Invocation::Usage { unknown }) => {
            if let Some(command) = unknown {
                println!("Unknown command: {}", command);
            }
            print_usage()?;
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    // Initialize logging
    let filter = if cli.debug {
        "mdpress=debug,info"
    } else {
        "mdpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let site = match cli.config {
        Some(path) => Site::with_config(&base_dir, SiteConfig::load(base_dir.join(path))?),
        None => Site::new(&base_dir)?,
    };

    match command {
        Commands::Generate => {
            tracing::info!("Generating static files...");
            let report = site.generate()?;
            if report.skipped.is_empty() {
                println!("Generated successfully!");
            } else {
                println!(
                    "Generated with {} file(s) skipped, see warnings above.",
                    report.skipped.len()
                );
            }
        }

        Commands::Serve { port } => {
            let port = port.unwrap_or(site.config.server.port);
            let ip = site.config.server.ip.clone();
            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdpress::server::start(&site, &ip, port).await?;
        }
    }

    Ok(())
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_prints_usage() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            parse_args(empty).unwrap(),
            Invocation::Usage { unknown: None }
        ));
        assert!(matches!(
            parse_args(["mdpress"]).unwrap(),
            Invocation::Usage { unknown: None }
        ));
    }

    #[test]
    fn test_unknown_command_prints_usage() {
        match parse_args(["mdpress", "foo"]).unwrap() {
            Invocation::Usage { unknown } => assert_eq!(unknown.as_deref(), Some("foo")),
            other => panic!("expected usage, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_prints_usage() {
        match parse_args(["mdpress", "--bogus"]).unwrap() {
            Invocation::Usage { unknown } => assert_eq!(unknown.as_deref(), Some("--bogus")),
            other => panic!("expected usage, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_command() {
        match parse_args(["mdpress", "generate"]).unwrap() {
            Invocation::Run(cli, command) => {
                assert_eq!(command, Commands::Generate);
                assert!(!cli.debug);
                assert!(cli.cwd.is_none());
            }
            other => panic!("expected generate, got {:?}", other),
        }
        assert!(matches!(
            parse_args(["mdpress", "g"]).unwrap(),
            Invocation::Run(_, Commands::Generate)
        ));
    }

    #[test]
    fn test_serve_command_with_port() {
        match parse_args(["mdpress", "serve", "--port", "9000"]).unwrap() {
            Invocation::Run(_, command) => {
                assert_eq!(command, Commands::Serve { port: Some(9000) })
            }
            other => panic!("expected serve, got {:?}", other),
        }
        assert!(matches!(
            parse_args(["mdpress", "s"]).unwrap(),
            Invocation::Run(_, Commands::Serve { port: None })
        ));
    }

    #[test]
    fn test_global_flags_after_command() {
        match parse_args(["mdpress", "generate", "-d", "--cwd", "site"]).unwrap() {
            Invocation::Run(cli, _) => {
                assert!(cli.debug);
                assert_eq!(cli.cwd, Some(PathBuf::from("site")));
            }
            other => panic!("expected generate, got {:?}", other),
        }
    }

    #[test]
    fn test_help_is_left_to_clap() {
        let err = parse_args(["mdpress", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_usage_lists_both_commands() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("generate"));
        assert!(help.contains("serve"));
    }
}
