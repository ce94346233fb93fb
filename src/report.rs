use super::{CSV_IN, PNG_OUT};
use clap::{App, AppSettings, Arg};
use log::LevelFilter;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArgs {
    pub csvin: PathBuf,
    pub pngout: PathBuf,
    pub verbose: bool,
    pub show: bool,
    /// stray positional arguments, accepted and ignored
    pub ignored: Vec<String>,
}

fn app() -> App<'static, 'static> {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name of the csv file with the backlog,connections rows")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(CSV_IN);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file")
        .short("o")
        .long("pngfile")
        .takes_value(true)
        .default_value(PNG_OUT);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    let arg_show = Arg::with_name("show")
        .help("open the png with the default image viewer once written")
        .long("show")
        .takes_value(false)
        .required(false);
    let arg_ignored = Arg::with_name("ignored")
        .multiple(true)
        .hidden(true);
    App::new("backlog_report")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the impact of the backlog on the successful connections")
        .setting(AppSettings::TrailingVarArg)
        .arg(arg_csvin)
        .arg(arg_pngout)
        .arg(arg_verbose)
        .arg(arg_show)
        .arg(arg_ignored)
}

/// Takes the CLI arguments for the backlog report.
/// Without arguments it reads results.csv and writes backlog_impact.png.
pub fn parse_cli() -> ReportArgs {
    match parse_cli_from(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}

pub fn parse_cli_from<I, T>(itr: I) -> Result<ReportArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = app().get_matches_from_safe(itr)?;
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or(CSV_IN));
    let pngout = PathBuf::from(cli_args.value_of("output_pngfile").unwrap_or(PNG_OUT));
    let ignored = cli_args
        .values_of("ignored")
        .map(|v| v.map(String::from).collect())
        .unwrap_or_default();
    Ok(ReportArgs {
        csvin,
        pngout,
        verbose: cli_args.is_present("verbose"),
        show: cli_args.is_present("show"),
        ignored,
    })
}

/// Logger to stderr; the level only depends on the verbose flag.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Hands the png to the desktop's default viewer without waiting for it.
pub fn show_chart(png: &Path) -> std::io::Result<()> {
    if !png.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a file", png.display()),
        ));
    }

    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(&["/c", "start", ""]).arg(png);
        cmd
    };

    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut cmd = Command::new("open");
        cmd.arg(png);
        cmd
    };

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut cmd = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(png);
        cmd
    };

    cmd.spawn().map(|_| ())
}
