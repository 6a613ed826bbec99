#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::process;

use structopt::clap::{AppSettings, ErrorKind};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod airports;
mod error;
mod geo;
mod output;

use error::Error;
use geo::LatLon;
use output::{ScriptOptionsBuilder, Target};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "airport_radius",
    about = "Lists the airports within a great-circle radius of a point",
    usage = "airport_radius [FLAGS] [OPTIONS] <latitude> <longitude> <radius-km>",
    setting = AppSettings::AllowNegativeNumbers
)]
struct Args {
    /// Center latitude in decimal degrees
    #[structopt(name = "latitude", parse(try_from_str = parse_number))]
    latitude: f64,
    /// Center longitude in decimal degrees
    #[structopt(name = "longitude", parse(try_from_str = parse_number))]
    longitude: f64,
    /// Search radius in kilometers
    #[structopt(name = "radius-km", parse(try_from_str = parse_number))]
    radius_km: f64,
    /// Airport JSON keyed by airport code
    #[structopt(short = "i", long = "input", parse(from_os_str), default_value = "airports.json")]
    input: PathBuf,
    /// Write a script module to airports-data.js instead of printing JSON
    #[structopt(short = "s", long = "script")]
    script: bool,
    /// Script module path, implies --script
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Insert the hostname into the script filename
    #[structopt(short = "H", long = "qualify-hostname")]
    qualify_hostname: bool,
    /// Variable the script assigns the airports to
    #[structopt(long = "var-name", default_value = "airportsData")]
    var_name: String,
    /// Leave out the module.exports statement
    #[structopt(long = "no-export")]
    no_export: bool,
    /// Spaces per JSON indentation level, at most 16
    #[structopt(long = "indent", default_value = "4", parse(try_from_str = parse_indent))]
    indent: usize,
    /// Log more to stderr, repeat for more detail
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,
}

impl Args {
    fn target(&self) -> error::Result<Target> {
        if !self.script && self.output.is_none() {
            return Ok(Target::Stdout);
        }

        let options = ScriptOptionsBuilder::default()
            .var_name(self.var_name.clone())
            .export(!self.no_export)
            .build()
            .map_err(|e| Error::ScriptOptions { reason: e.to_string() })?;

        let mut path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(output::DEFAULT_SCRIPT_PATH));
        if self.qualify_hostname {
            path = output::qualify_with_host(&path, &output::local_hostname()?);
        }

        Ok(Target::Script { path, options })
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    airports::coerce_str(s).ok_or_else(|| format!("\"{}\" is not a number", s))
}

const MAX_INDENT: usize = 16;

fn parse_indent(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n <= MAX_INDENT => Ok(n),
        _ => Err(format!("indent must be a whole number from 0 to {}", MAX_INDENT)),
    }
}

/// Bad invocations print their usage to stdout and exit 1.
fn parse_args() -> Args {
    match Args::from_iter_safe(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                println!("{}", e.message);
                process::exit(1);
            }
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> error::Result<()> {
    let target = args.target()?;

    info!("Loading airports from {}...", args.input.display());
    let table = airports::load_table(&args.input)?;
    debug!(
        "{} of {} airports have no usable lat/lon",
        airports::count_malformed(&table),
        table.len()
    );

    let center = LatLon::new(args.latitude, args.longitude);
    let nearby = airports::filter_within_radius(&table, center, args.radius_km);
    info!(
        "{} of {} airports within {} km of ({}, {})",
        nearby.len(),
        table.len(),
        args.radius_km,
        center.lat(),
        center.lon()
    );

    if let Target::Script { ref path, .. } = target {
        info!("Writing {}...", path.display());
    }
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    output::emit(&nearby, &target, args.indent, &mut stdout)
}

fn main() {
    let args = parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message += &format!(": {}", cause);
            source = StdError::source(cause);
        }
        eprintln!("error: {}", message);
        process::exit(1);
    }
}
