mod cli;

use crate::cli::{AddArgs, Cli};
use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::path::Path;
use std::time::Instant;
use vecadd_core_kernel::{Dispatch, check_lengths, checked_count, vecadd_dispatch_f32};
use vecadd_core_report::{AddReport, render_json, render_pretty};
use vecadd_core_view::{DType, VectorView};
use vecadd_globals::{GlobalOpts, OutputFormat, get_globals, init_globals};

fn parse_csv(text: &str) -> Result<Vec<f32>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .with_context(|| format!("invalid number '{}'", s))
        })
        .collect()
}

fn load_file(path: &Path) -> Result<Vec<f32>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let view = VectorView::from_bytes(&bytes, DType::F32)
        .with_context(|| format!("decoding {}", path.display()))?;

    debug!("vecadd: {} -> {} elements", path.display(), view.num_elements());
    Ok(view.as_f32_cow()?.into_owned())
}

fn load_operand(csv: Option<&str>, file: Option<&Path>, name: &str) -> Result<Vec<f32>> {
    match (csv, file) {
        (Some(text), _) => parse_csv(text).with_context(|| format!("parsing --{}", name)),
        (None, Some(path)) => load_file(path),
        (None, None) => bail!("missing operand --{}", name),
    }
}

pub fn run_add_cmd(cmd: AddArgs, globals: &GlobalOpts) -> Result<String> {
    let a = load_operand(cmd.lhs.as_deref(), cmd.lhs_file.as_deref(), "lhs")?;
    let b = load_operand(cmd.rhs.as_deref(), cmd.rhs_file.as_deref(), "rhs")?;

    let n = match cmd.count {
        Some(count) => checked_count("vecadd", count)?,
        None => a.len().min(b.len()),
    };
    debug!("vecadd: a={} b={} n={}", a.len(), b.len(), n);
    // reject before sizing the output buffer from n
    check_lengths("vecadd", a.len(), b.len(), n, n)?;

    let requested = Dispatch::from(cmd.mode);
    let mut c = vec![0.0f32; n];

    let start = Instant::now();
    let used = vecadd_dispatch_f32(&a, &b, &mut c, n, requested)?;
    let elapsed = start.elapsed();
    info!("vecadd: {} elements via {} in {:?}", n, used, elapsed);

    let report = AddReport::new(requested, used, elapsed, &a[..n], &b[..n], &c);
    match globals.format {
        OutputFormat::Pretty => Ok(render_pretty(&report)),
        OutputFormat::Json => render_json(&report),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_globals(cli.g);
    let globals = get_globals();

    let rendered = run_add_cmd(cli.args, globals)?;

    match &globals.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("vecadd: report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vecadd_core_kernel::{KernelError, Operand};

    fn args(argv: &[&str]) -> Cli {
        let mut full = vec!["vecadd"];
        full.extend_from_slice(argv);
        Cli::try_parse_from(full).expect("cli parse failed")
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv("1, 2.5,-3").unwrap(), vec![1.0, 2.5, -3.0]);
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("1,x").is_err());
    }

    #[test]
    fn test_run_basic() {
        let cli = args(&["-a", "1,2,3", "-b", "10,20,30"]);
        let out = run_add_cmd(cli.args, &cli.g).unwrap();

        assert!(out.contains("c: [11, 22, 33]"));
        assert!(out.contains("count: 3"));
    }

    #[test]
    fn test_run_default_count_is_shorter_operand() {
        let cli = args(&["-a", "1,2,3", "-b", "1,1", "-F", "json"]);
        let out = run_add_cmd(cli.args, &cli.g).unwrap();

        assert!(out.contains("\"count\": 2"));
    }

    #[test]
    fn test_run_count_past_shortest() {
        let cli = args(&["-a", "1,2,3", "-b", "1,1", "-n", "3"]);
        let err = run_add_cmd(cli.args, &cli.g).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<KernelError>(),
            Some(KernelError::LengthMismatch { required: 3, .. })
        ));
    }

    #[test]
    fn test_run_huge_count_is_length_mismatch() {
        let cli = args(&["-a", "1", "-b", "1", "-n", "9223372036854775807"]);
        let err = run_add_cmd(cli.args, &cli.g).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<KernelError>(),
            Some(KernelError::LengthMismatch {
                operand: Operand::A,
                len: 1,
                required,
                ..
            }) if *required as u64 == i64::MAX as u64
        ));
    }

    #[test]
    fn test_run_negative_count() {
        let cli = args(&["-a", "1", "-b", "1", "-n", "-1"]);
        let err = run_add_cmd(cli.args, &cli.g).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<KernelError>(),
            Some(KernelError::InvalidCount { count: -1, .. })
        ));
    }

    #[test]
    fn test_run_empty_operands() {
        let cli = args(&["-a", "", "-b", "", "-n", "0"]);
        let out = run_add_cmd(cli.args, &cli.g).unwrap();

        assert!(out.contains("count: 0"));
        assert!(out.contains("c: []"));
    }

    #[test]
    fn test_run_from_files() {
        let tmp = tempfile::tempdir().unwrap();
        let lhs = tmp.path().join("a.bin");
        let rhs = tmp.path().join("b.bin");
        let bytes = |v: &[f32]| v.iter().flat_map(|x| x.to_le_bytes()).collect::<Vec<u8>>();
        fs::write(&lhs, bytes(&[1.0, 2.0])).unwrap();
        fs::write(&rhs, bytes(&[0.5, 0.25])).unwrap();

        let cli = args(&[
            "--lhs-file",
            lhs.to_str().unwrap(),
            "--rhs-file",
            rhs.to_str().unwrap(),
            "-m",
            "parallel",
        ]);
        let out = run_add_cmd(cli.args, &cli.g).unwrap();

        assert!(out.contains("c: [1.5, 2.25]"));
        assert!(out.contains("dispatch: parallel (requested parallel)"));
    }

    #[test]
    fn test_cli_requires_operands() {
        assert!(Cli::try_parse_from(["vecadd", "-a", "1"]).is_err());
        assert!(Cli::try_parse_from(["vecadd", "-a", "1", "--lhs-file", "x", "-b", "1"]).is_err());
    }
}
