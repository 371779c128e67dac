use std::fmt::Write;
use std::time::Duration;

use serde::Serialize;
use vecadd_core_kernel::Dispatch;

/// Elements shown per vector in the pretty report.
pub const PREVIEW_LEN: usize = 10;

/// Outcome of one `c = a + b` run.
#[derive(Debug, Clone, Serialize)]
pub struct AddReport {
    pub count: usize,
    pub requested: Dispatch,
    pub dispatch: Dispatch,
    pub threads: usize,
    pub elapsed_us: u128,
    pub a: Vec<f32>,
    pub b: Vec<f32>,
    pub c: Vec<f32>,
}

impl AddReport {
    pub fn new(
        requested: Dispatch,
        dispatch: Dispatch,
        elapsed: Duration,
        a: &[f32],
        b: &[f32],
        c: &[f32],
    ) -> Self {
        Self {
            count: c.len(),
            requested,
            dispatch,
            threads: rayon_threads(dispatch),
            elapsed_us: elapsed.as_micros(),
            a: a.to_vec(),
            b: b.to_vec(),
            c: c.to_vec(),
        }
    }
}

fn rayon_threads(dispatch: Dispatch) -> usize {
    match dispatch {
        Dispatch::Parallel => rayon::current_num_threads(),
        _ => 1,
    }
}

fn preview(values: &[f32]) -> String {
    let shown: Vec<String> = values.iter().take(PREVIEW_LEN).map(|v| v.to_string()).collect();
    if values.len() > PREVIEW_LEN {
        format!("[{}, ... ({} more)]", shown.join(", "), values.len() - PREVIEW_LEN)
    } else {
        format!("[{}]", shown.join(", "))
    }
}

pub fn render_pretty(report: &AddReport) -> String {
    let mut buf = String::new();

    writeln!(buf, "vecadd").ok();
    writeln!(buf, "  count: {}", report.count).ok();
    writeln!(
        buf,
        "  dispatch: {} (requested {})",
        report.dispatch, report.requested
    )
    .ok();
    writeln!(buf, "  elapsed: {} us", report.elapsed_us).ok();
    writeln!(buf, "  a: {}", preview(&report.a)).ok();
    writeln!(buf, "  b: {}", preview(&report.b)).ok();
    write!(buf, "  c: {}", preview(&report.c)).ok();

    buf
}

pub fn render_json(report: &AddReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
