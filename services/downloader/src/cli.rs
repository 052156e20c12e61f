//! Command-line arguments shared by the three tools.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use corrections::Target;
use goes_common::{BoundingBox, DomainTable, GoesError, GoesResult};

use crate::config::{DEFAULT_CONFIG_DIR, DEFAULT_MAX_CONCURRENT};

/// Parse arguments, exiting with status 1 on misuse.
///
/// `--help` and `--version` still exit 0.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            e.print().ok();
            std::process::exit(code);
        }
    }
}

/// Request errors (bad flags, times, boxes or tables) end the process with
/// status 1 and a one-line message; anything else is handed back.
pub fn exit_on_request_error<T>(result: GoesResult<T>) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_request_error() => {
            eprintln!("**Error: {}. Exiting**", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Install the global subscriber. Logs go to stderr; stdout is kept for the
/// confirmation prompt.
pub fn init_tracing(args: &LoggingArgs) -> anyhow::Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}

/// `-d NAME` or `--dbox 'W S E N'`, never both.
#[derive(Args, Debug, Clone, Default)]
pub struct DomainArgs {
    /// Reduce to a named domain (see domains.yaml)
    #[arg(short = 'd', long = "domain", conflicts_with = "dbox")]
    pub domain: Option<String>,

    /// Reduce to a box: 'LonW LatS LonE LatN'
    #[arg(long = "dbox", visible_alias = "domain-box", allow_hyphen_values = true)]
    pub dbox: Option<String>,
}

impl DomainArgs {
    /// The requested box, if any.
    pub fn resolve(&self, domains: &DomainTable) -> GoesResult<Option<BoundingBox>> {
        match (&self.domain, &self.dbox) {
            (Some(_), Some(_)) => Err(GoesError::Usage(
                "-d/--domain and --dbox are mutually exclusive".to_string(),
            )),
            (Some(name), None) => domains.get(name).map(Some),
            (None, Some(dbox)) => BoundingBox::from_domain_box(dbox).map(Some),
            (None, None) => Ok(None),
        }
    }

    /// Like [`resolve`](Self::resolve) but one of the two flags is mandatory.
    pub fn require(&self, domains: &DomainTable) -> GoesResult<BoundingBox> {
        self.resolve(domains)?.ok_or_else(|| {
            GoesError::Usage("one of -d/--domain or --dbox is required".to_string())
        })
    }
}

/// `-f FILE` or `-p DIR`, exactly one.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Single file to process
    #[arg(short = 'f', long = "file", conflicts_with = "path")]
    pub file: Option<PathBuf>,

    /// Process every OR_*.nc file in this directory
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,
}

impl TargetArgs {
    pub fn target(&self) -> GoesResult<Target> {
        match (&self.file, &self.path) {
            (Some(file), None) => Ok(Target::File(file.clone())),
            (None, Some(dir)) => Ok(Target::Directory(dir.clone())),
            (Some(_), Some(_)) => Err(GoesError::Usage(
                "-f/--file and -p/--path are mutually exclusive".to_string(),
            )),
            (None, None) => Err(GoesError::Usage(
                "one of -f/--file or -p/--path is required".to_string(),
            )),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "get-goes")]
#[command(about = "Download GOES ABI imagery and GLM data for a time range")]
pub struct GetGoesArgs {
    /// First scan time [YYYY-mm-dd/HHMM]
    pub start_time: String,

    /// Last scan time [YYYY-mm-dd/HHMM]
    pub end_time: String,

    /// Directory to store files (default: ./DATA_YYYYmmdd-HHMM)
    #[arg(short = 'p', long = "local-path", env = "GOES_OUTPUT_DIR")]
    pub local_path: Option<PathBuf>,

    /// ABI bands: 1,2,...,16 or all
    #[arg(short = 'b', long = "bands")]
    pub bands: Option<String>,

    /// Include GLM lightning data
    #[arg(short = 'g', long = "glm")]
    pub glm: bool,

    /// Scene: econus, emeso-1, emeso-2, wconus, wmeso-1, wmeso-2
    #[arg(short = 'G', long = "goes-domain", default_value = "econus")]
    pub goes_domain: String,

    #[command(flatten)]
    pub domain: DomainArgs,

    /// Do not ask for confirmation before downloading
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Maximum concurrent downloads
    #[arg(long, env = "GOES_MAX_CONCURRENT", default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Configuration directory (domains.yaml, bands.yaml)
    #[arg(long, env = "CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Parser, Debug)]
#[command(name = "domain-reduce")]
#[command(about = "Crop GOES fixed-grid files to a domain in place")]
pub struct DomainReduceArgs {
    #[command(flatten)]
    pub domain: DomainArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Configuration directory (domains.yaml)
    #[arg(long, env = "CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Parser, Debug)]
#[command(name = "fix-wavelengths")]
#[command(about = "Set band_wavelength in GOES files to the expected value")]
pub struct FixWavelengthsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Configuration directory (bands.yaml)
    #[arg(long, env = "CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}
