use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use paypalc_config::{Config, LoadOptions};
use paypalc_core::{parse_document, ExitCode, ParseOptions};
use paypalc_format::{render_events, EventFormat, Generator, GeneratorOptions};
use tracing::info;

mod logging;
mod source;

use source::DocumentSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate Go webhook event constants from the PayPal catalog", long_about = None)]
struct Cli {
    /// Write the generated event enum to this file
    #[arg(long = "webhook-enum", value_name = "PATH")]
    webhook_enum: Option<PathBuf>,

    /// Read the catalog from a local HTML file instead of fetching it (use '-' for stdin)
    #[arg(long = "paypal-html", value_name = "PATH", allow_hyphen_values = true)]
    paypal_html: Option<PathBuf>,

    /// Go package name for the generated file
    #[arg(long = "go-pkg", value_name = "NAME")]
    go_pkg: Option<String>,

    /// Print every parsed event
    #[arg(long = "list-events")]
    list_events: bool,

    /// Output format for --list-events
    #[arg(long = "format", value_enum, default_value_t = FormatArg::Plain)]
    format: FormatArg,

    /// Configuration file overriding .paypalc.toml discovery
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log parsing progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for EventFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => EventFormat::Plain,
            FormatArg::Json => EventFormat::Json,
        }
    }
}

/// Error paired with the exit code it maps to.
struct Failure {
    code: ExitCode,
    error: anyhow::Error,
}

trait OrExit<T> {
    fn or_exit(self, code: ExitCode) -> Result<T, Failure>;
}

impl<T, E: Into<anyhow::Error>> OrExit<T> for Result<T, E> {
    fn or_exit(self, code: ExitCode) -> Result<T, Failure> {
        self.map_err(|err| Failure {
            code,
            error: err.into(),
        })
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => std::process::ExitCode::from(ExitCode::Success as u8),
        Err(failure) => {
            eprintln!("ERR: {:#}", failure.error);
            std::process::ExitCode::from(failure.code as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), Failure> {
    logging::initialize_logging(cli.verbose, cli.quiet).or_exit(ExitCode::Io)?;

    if cli.webhook_enum.is_none() && !cli.list_events {
        return Err(anyhow!("nothing to do")).or_exit(ExitCode::InvalidArguments);
    }

    let package = match cli.go_pkg {
        Some(name) if name.trim().is_empty() => {
            return Err(anyhow!("--go-pkg cannot be empty")).or_exit(ExitCode::InvalidArguments);
        }
        other => other,
    };

    let mut options = LoadOptions::default();
    if let Some(path) = cli.config {
        options = options.with_override_path(path);
    }
    let config = Config::load(options).or_exit(ExitCode::Config)?;

    let source = DocumentSource::select(cli.paypal_html, &config.source.url);
    let html = match source.load(&config.source) {
        Ok(html) => html,
        Err(err) => {
            let code = err.exit_code();
            return Err(err).or_exit(code);
        }
    };

    let parse_options = ParseOptions {
        doc_base_url: config.source.doc_base_url.clone(),
    };
    let document = match parse_document(&html, &parse_options) {
        Ok(document) => document,
        Err(err) => {
            let code = err.exit_code();
            return Err(anyhow::Error::new(err).context("failed to parse event catalog"))
                .or_exit(code);
        }
    };
    info!(
        groups = document.groups.len(),
        webhooks = document.webhook_count(),
        "parsed event catalog"
    );

    if cli.list_events {
        let listing = render_events(&document, cli.format.into())
            .context("failed to render event list")
            .or_exit(ExitCode::InvalidContent)?;
        print!("{listing}");
    }

    if let Some(path) = cli.webhook_enum {
        let generator = Generator::new(GeneratorOptions {
            package: package.unwrap_or(config.generator.package),
            catalog_url: config.source.url,
            max_column: config.generator.max_column,
            tab_width: config.generator.tab_width,
        });
        generator
            .write_file(&document.groups, &path)
            .with_context(|| format!("failed to write {}", path.display()))
            .or_exit(ExitCode::Io)?;
        info!(path = %path.display(), "wrote webhook enum");
    }

    Ok(())
}
