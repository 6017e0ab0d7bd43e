//! celgen: generate cel-go bindings for the methods of Go packages.
//!
//! Usage:
//!   celgen [options] [DIR...]
//!
//! Writes one `celfuncs.gen.go` into every directory that declares at least
//! one eligible method, and removes the one it wrote earlier from a
//! directory that no longer does.

use celgen_compiler::{stale_files, write_all, GeneratedFile, Generator};
use celgen_options::{find_config, parse_config_file, ConfigFile};
use clap::Parser as ClapParser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "celgen", version, about = "Generate cel-go function bindings from Go method declarations")]
struct Cli {
    /// Package directories to scan (defaults to the config file's list, then `.`).
    #[arg(value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// Path to celgen.json.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Name of the generated file in each directory.
    #[arg(short = 'o', long)]
    output_file: Option<String>,

    /// Name of the exported []cel.EnvOption variable.
    #[arg(long)]
    registry_name: Option<String>,

    /// Method name pattern to skip; repeat to give several. Replaces the
    /// configured list.
    #[arg(long = "blacklist", value_name = "REGEX")]
    blacklist: Vec<String>,

    /// Print the generated files instead of writing them.
    #[arg(long)]
    stdout: bool,

    /// Write nothing; exit with status 1 if any generated file is out of date.
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print every scanned source file.
    #[arg(long)]
    list_files: bool,

    /// Log every skipped declaration.
    #[arg(short = 'v', long)]
    verbose: bool,
}

// ANSI color codes
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{:?}", report);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `CELGEN_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("CELGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> miette::Result<ExitCode> {
    let (config, config_dir) = load_config(cli)?;
    let mut options = config.generator_options;
    if let Some(output_file) = &cli.output_file {
        options.output_file = output_file.clone();
    }
    if let Some(registry_name) = &cli.registry_name {
        options.registry_name = registry_name.clone();
    }
    if !cli.blacklist.is_empty() {
        options.blacklist = cli.blacklist.clone();
    }

    let dirs = resolve_directories(cli, &config.directories, config_dir.as_deref());
    let generator = Generator::new(options)?;
    tracing::debug!(dirs = ?dirs, "resolved directories");

    if cli.list_files {
        for source in generator.scanner(&dirs) {
            println!("{}", source?.file_name);
        }
    }

    let files = generator.generate(&dirs)?;
    if files.iter().all(|file| file.obsolete) {
        tracing::warn!("no eligible methods found");
    }

    if cli.stdout {
        print_files(&files);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.check {
        let stale = stale_files(&files);
        for file in &stale {
            let state = if file.obsolete { "obsolete" } else { "out of date" };
            print_warning(&format!("{} is {}", file.path.display(), state));
        }
        return Ok(if stale.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    write_all(&files)?;
    for file in &files {
        if file.obsolete {
            tracing::info!(path = %file.path.display(), "removed obsolete bindings");
            continue;
        }
        tracing::info!(
            path = %file.path.display(),
            bindings = file.bindings.len(),
            "wrote bindings"
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// The explicit `--config` file, else `celgen.json` in the working
/// directory, else defaults. Also returns the directory relative paths in
/// the file resolve against.
fn load_config(cli: &Cli) -> miette::Result<(ConfigFile, Option<PathBuf>)> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config(Path::new(".")),
    };
    match path {
        Some(path) => {
            let config = parse_config_file(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            let dir = path.parent().map(Path::to_path_buf);
            Ok((config, dir))
        }
        None => Ok((ConfigFile::default(), None)),
    }
}

fn resolve_directories(cli: &Cli, configured: &[String], config_dir: Option<&Path>) -> Vec<PathBuf> {
    if !cli.dirs.is_empty() {
        return cli.dirs.clone();
    }
    if !configured.is_empty() {
        return configured
            .iter()
            .map(|dir| match config_dir {
                Some(base) if Path::new(dir).is_relative() => base.join(dir),
                _ => PathBuf::from(dir),
            })
            .collect();
    }
    vec![PathBuf::from(".")]
}

fn print_files(files: &[GeneratedFile]) {
    let files: Vec<&GeneratedFile> = files.iter().filter(|file| !file.obsolete).collect();
    for (i, file) in files.iter().enumerate() {
        if files.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("// {}", file.path.display());
        }
        print!("{}", file.contents);
    }
}

fn print_warning(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}warning{}: {}", BOLD, YELLOW, RESET, msg);
    } else {
        eprintln!("warning: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
