use std::{ffi::OsString, path::PathBuf};

use clap::{
    CommandFactory as _, Parser, ValueEnum,
    error::{ContextKind, ContextValue, ErrorKind},
};

use goldenframe::{HarnessConfig, RenderSession, Suite, TestMode, TestModeController};

#[derive(Parser, Debug)]
#[command(
    name = "goldenframe",
    version,
    about = "Render a document corpus and generate or verify golden baseline images",
    after_help = "Examples:\n  \
        goldenframe -g            generate baselines for every suite\n  \
        goldenframe -t            verify against existing baselines\n  \
        goldenframe -g -t svg     regenerate, then verify, SVG pictures only"
)]
struct Cli {
    /// Generate baseline images (overwrites existing ones).
    #[arg(short = 'g', long = "generate")]
    generate: bool,

    /// Verify renders against baseline images (default when -g is absent).
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Suites to run. All suites when omitted.
    #[arg(value_enum, value_name = "SUITE")]
    suites: Vec<SuiteArg>,

    /// JSON file overriding the built-in directory layout.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at debug level on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SuiteArg {
    /// `.json` frame-sequence animations.
    #[value(aliases = ["lottie", "json"])]
    Animation,
    /// `.svg` static pictures.
    #[value(alias = "svg")]
    Picture,
}

impl From<SuiteArg> for Suite {
    fn from(arg: SuiteArg) -> Self {
        match arg {
            SuiteArg::Animation => Suite::Animation,
            SuiteArg::Picture => Suite::Picture,
        }
    }
}

fn main() -> anyhow::Result<()> {
    if std::env::args_os().len() < 2 {
        Cli::command().print_help()?;
        return Ok(());
    }

    // Help and version end the run without rendering.
    let (cli, ignored) = match parse_lenient(std::env::args_os().collect()) {
        Ok(parsed) => parsed,
        Err(err) => {
            err.print()?;
            return Ok(());
        }
    };

    init_tracing(cli.verbose);
    for arg in &ignored {
        tracing::warn!(arg = %arg.to_string_lossy(), "ignoring unrecognized argument");
    }

    let config = match &cli.config {
        Some(path) => match HarnessConfig::from_json_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::error!(%err, "unusable config, nothing rendered");
                eprintln!("goldenframe: {err}");
                return Ok(());
            }
        },
        None => HarnessConfig::default(),
    };

    let suites: Vec<Suite> = cli.suites.iter().copied().map(Suite::from).collect();
    let controller =
        TestModeController::new(config, TestMode::from_flags(cli.generate, cli.test))
            .with_suites(&suites);
    tracing::debug!(mode = ?controller.mode(), ?suites, "starting run");

    let session = RenderSession::with_default_threads();
    let mut out = std::io::stdout().lock();
    match controller.run(&session, &mut out) {
        Ok(_) => Ok(()),
        Err(err) if err.is_fatal() => Err(err.into()),
        Err(err) => {
            tracing::error!(%err, "run ended early");
            Ok(())
        }
    }
}

/// Parse `args`, dropping every token clap rejects as unknown or invalid so that a
/// typo still ends in a verify run. Help, version and other errors are returned.
fn parse_lenient(mut args: Vec<OsString>) -> Result<(Cli, Vec<OsString>), clap::Error> {
    let mut ignored = Vec::new();
    loop {
        let err = match Cli::try_parse_from(&args) {
            Ok(cli) => return Ok((cli, ignored)),
            Err(err) => err,
        };
        if !matches!(
            err.kind(),
            ErrorKind::UnknownArgument | ErrorKind::InvalidValue
        ) {
            return Err(err);
        }
        match offending_token(&args, &err) {
            Some(i) => ignored.push(args.remove(i)),
            // Unattributable: keep only the program name, which parses as a plain verify run.
            None if args.len() > 1 => ignored.extend(args.drain(1..)),
            None => return Err(err),
        }
    }
}

/// Index in `args` of the token `err` complains about.
fn offending_token(args: &[OsString], err: &clap::Error) -> Option<usize> {
    let find = |pred: &dyn Fn(&str) -> bool| {
        args.iter()
            .skip(1)
            .position(|a| a.to_str().is_some_and(pred))
            .map(|i| i + 1)
    };

    if let Some(value) = context_str(err, ContextKind::InvalidValue)
        && let Some(i) = find(&|t: &str| t == value)
    {
        return Some(i);
    }

    // `--config <FILE>` names the flag followed by its value placeholder.
    let arg = context_str(err, ContextKind::InvalidArg)?
        .split_whitespace()
        .next()?;
    find(&|t: &str| t == arg || t.strip_prefix(arg).is_some_and(|rest| rest.starts_with('=')))
        .or_else(|| {
            // Unknown short flag inside a cluster such as `-gx`.
            let short = arg.strip_prefix('-').filter(|s| s.chars().count() == 1)?;
            find(&|t: &str| t.starts_with('-') && !t.starts_with("--") && t[1..].contains(short))
        })
}

fn context_str(err: &clap::Error, kind: ContextKind) -> Option<&str> {
    match err.get(kind)? {
        ContextValue::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
