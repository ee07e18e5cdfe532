//! stdsym - list the exported symbols of the Go standard library

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use gostdsym::base::constants::DEFAULT_PATTERN;
use gostdsym::project::BuildContext;
use gostdsym::{Config, Delimiter, Error, for_each_package};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stdsym")]
#[command(about = "Print the exported symbols of Go packages, one per line")]
#[command(version)]
struct Cli {
    /// Use the pkgsite format with the '#' delimiter
    #[arg(long)]
    web: bool,

    /// Package pattern: std, cmd, an import path, or a path with "..."
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Keep internal and vendored packages
    #[arg(long)]
    no_skip: bool,

    /// Go root to read packages from (default: $GOROOT, then `go env GOROOT`)
    #[arg(long, value_name = "DIR")]
    goroot: Option<PathBuf>,

    /// Target operating system (default: $GOOS, then the host)
    #[arg(long, value_name = "OS")]
    goos: Option<String>,

    /// Target architecture (default: $GOARCH, then the host)
    #[arg(long, value_name = "ARCH")]
    goarch: Option<String>,

    /// Extra build tags, comma separated
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Exclude files that require cgo
    #[arg(long)]
    no_cgo: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stdsym: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), Error> {
    let base = Config::discover_in(cli.goroot.clone())?;
    let context = build_context(&cli, base.context.clone());
    let config = base
        .with_context(context)
        .with_delimiter(Delimiter::for_web(cli.web))
        .with_skip_internal(!cli.no_skip);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let write_error = |e: io::Error| Error::io("<stdout>", e);

    let mut packages = 0usize;
    let total = for_each_package(&config, &cli.pattern, |_, symbols| {
        packages += 1;
        for symbol in symbols {
            writeln!(out, "{symbol}").map_err(write_error)?;
        }
        Ok(())
    })?;
    out.flush().map_err(write_error)?;

    info!(
        pattern = %cli.pattern,
        packages,
        symbols = total,
        goos = %config.context.goos,
        goarch = %config.context.goarch,
        "done"
    );
    Ok(())
}

/// Apply the platform flags to the discovered context. A platform other
/// than the host starts with cgo disabled, as `go build` does.
fn build_context(cli: &Cli, discovered: BuildContext) -> BuildContext {
    let mut context = if cli.goos.is_some() || cli.goarch.is_some() {
        let goos = cli.goos.clone().unwrap_or_else(|| discovered.goos.clone());
        let goarch = cli
            .goarch
            .clone()
            .unwrap_or_else(|| discovered.goarch.clone());
        BuildContext {
            release_tags: discovered.release_tags.clone(),
            ..BuildContext::for_platform(goos, goarch)
        }
    } else {
        discovered
    };
    if cli.no_cgo {
        context = context.with_cgo(false);
    }
    if !cli.tags.is_empty() {
        context = context.with_build_tags(cli.tags.iter().filter(|t| !t.is_empty()).cloned());
    }
    context
}
