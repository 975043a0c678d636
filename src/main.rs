//! xmergesort command-line tool

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xmergesort::{merge_files, MergeConfig, MergeError, MergeFlags, MergeOptions, CONFIG_FILE_NAME};

#[derive(Parser, Debug)]
#[command(name = "xmergesort")]
#[command(about = "Merge sorted text files into a new sorted file", long_about = None)]
#[command(group(ArgGroup::new("policy").required(true).args(["unique", "all"])))]
struct Cli {
    /// Emit each distinct record once
    #[arg(short = 'u')]
    unique: bool,

    /// Emit every record, duplicates included
    #[arg(short = 'a')]
    all: bool,

    /// Compare records ignoring ASCII case
    #[arg(short = 'i')]
    ignore_case: bool,

    /// Fail on the first out-of-order record instead of skipping it
    #[arg(short = 't')]
    check_sorted: bool,

    /// Print the number of records written
    #[arg(short = 'd')]
    count: bool,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// TOML file with merge tunables
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// File to create
    outfile: PathBuf,

    /// Sorted input files, merged in order
    #[arg(required = true, num_args = 2..)]
    inputs: Vec<PathBuf>,
}

impl Cli {
    fn flags(&self) -> MergeFlags {
        let mut flags = MergeFlags::empty();
        if self.all {
            flags |= MergeFlags::ALL_RECORDS;
        }
        if self.unique {
            flags |= MergeFlags::UNIQUE_RECORDS;
        }
        if self.ignore_case {
            flags |= MergeFlags::IGNORE_CASE;
        }
        if self.check_sorted {
            flags |= MergeFlags::CHECK_SORTED;
        }
        if self.count {
            flags |= MergeFlags::RETURN_COUNT;
        }
        flags
    }

    fn load_config(&self) -> Result<MergeConfig, MergeError> {
        match &self.config {
            Some(path) => MergeConfig::from_file(path),
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.is_file() {
                    MergeConfig::from_file(&local)
                } else {
                    Ok(MergeConfig::default())
                }
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "xmergesort={level},xmerge_core={level},xmerge_engine={level},xmerge_files={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<Option<u64>, MergeError> {
    let flags = cli.flags();
    let options = MergeOptions::try_from(flags)?;
    let config = cli.load_config()?;
    tracing::debug!(
        flags = %format_args!("{:#x}", flags.bits()),
        options = %options,
        chunk_size = config.chunk_size,
        "Parsed arguments"
    );

    let result = merge_files(&cli.outfile, &cli.inputs, options, config)?;
    Ok(result.record_count())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(count) => {
            if let Some(n) = count {
                println!("Total records written: {}", n);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("xmergesort: {}", e);
            let code = e.status().unsigned_abs().clamp(1, 255);
            ExitCode::from(code as u8)
        }
    }
}
