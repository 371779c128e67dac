use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;
use vecadd_core_kernel::Dispatch;
use vecadd_globals::GlobalOpts;

#[derive(Parser, Debug)]
#[command(
    name = "vecadd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bounds-checked element-wise vector addition: c[i] = a[i] + b[i]."
)]
pub struct Cli {
    #[command(flatten)]
    pub g: GlobalOpts,

    #[command(flatten)]
    pub args: AddArgs,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum Mode {
    Scalar,
    #[value(alias = "par")]
    Parallel,
    #[default]
    Auto,
}

impl From<Mode> for Dispatch {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Scalar => Dispatch::Scalar,
            Mode::Parallel => Dispatch::Parallel,
            Mode::Auto => Dispatch::Auto,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Left operand as comma-separated floats, e.g. "1,2,3"
    #[arg(
        short = 'a',
        long = "lhs",
        value_name = "CSV",
        allow_hyphen_values = true,
        required_unless_present = "lhs_file",
        conflicts_with = "lhs_file"
    )]
    pub lhs: Option<String>,

    /// Left operand as a raw little-endian f32 file
    #[arg(long = "lhs-file", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub lhs_file: Option<PathBuf>,

    /// Right operand as comma-separated floats
    #[arg(
        short = 'b',
        long = "rhs",
        value_name = "CSV",
        allow_hyphen_values = true,
        required_unless_present = "rhs_file",
        conflicts_with = "rhs_file"
    )]
    pub rhs: Option<String>,

    /// Right operand as a raw little-endian f32 file
    #[arg(long = "rhs-file", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub rhs_file: Option<PathBuf>,

    /// Number of elements to add (defaults to the shorter operand)
    #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Execution strategy
    #[arg(short = 'm', long, value_enum, default_value = "auto")]
    pub mode: Mode,
}
