use clap::{Args, ValueEnum};
use log::debug;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

static INIT_SYNC: std::sync::Once = std::sync::Once::new();
static GLOBAL_OPTS: OnceCell<GlobalOpts> = OnceCell::new();

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    // write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    // pretty | json
    #[arg(
        short = 'F',
        long,
        value_enum,
        default_value = "pretty",
        value_name = "FMT",
        global = true
    )]
    pub format: OutputFormat,

    #[arg(short = 't', long, help = "Number of threads (optional)")]
    pub threads: Option<usize>,

    // verbosity (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Maps `-v` counts to a log level. RUST_LOG still wins when set.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn setup_logging(verbose: u8) {
    let filter = format!("vecadd={}", log_level(verbose));
    let env = env_logger::Env::default().default_filter_or(filter);

    let _ = env_logger::Builder::from_env(env).try_init();
}

pub fn setup_rayon(threads: Option<usize>) {
    INIT_SYNC.call_once(|| {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        // another library may have built the global pool already
        if let Err(e) = builder.build_global() {
            debug!("rayon global pool not rebuilt: {}", e);
        }
    });
}

pub fn init_globals(opts: GlobalOpts) {
    if GLOBAL_OPTS.set(opts).is_err() {
        panic!("Global options already initialized");
    }

    let opts = get_globals();

    // logging
    setup_logging(opts.verbose);
    // threading
    setup_rayon(opts.threads);

    debug!("globals: {:?}", opts);
}

pub fn get_globals() -> &'static GlobalOpts {
    GLOBAL_OPTS.get().expect("Global options not initialized")
}
