use std::fmt;

use log::debug;
use serde::Serialize;

use crate::cpu_add::vecadd_f32;
use crate::cpu_par_add::{PAR_MIN_LEN, vecadd_par_f32};
use crate::error::Result;

/// How a vector add is executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// Single-threaded loop.
    Scalar,
    /// rayon. Inputs shorter than [`PAR_MIN_LEN`] still run inline.
    Parallel,
    /// Parallel from [`PAR_MIN_LEN`] elements up, scalar below.
    #[default]
    Auto,
}

impl Dispatch {
    /// The concrete strategy used for `n` elements. Never returns `Auto`.
    pub fn resolve(self, n: usize) -> Dispatch {
        match self {
            Dispatch::Auto if n >= PAR_MIN_LEN => Dispatch::Parallel,
            Dispatch::Auto => Dispatch::Scalar,
            other => other,
        }
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dispatch::Scalar => "scalar",
            Dispatch::Parallel => "parallel",
            Dispatch::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Runs the add with the requested strategy and reports the one actually used.
pub fn vecadd_dispatch_f32(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    dispatch: Dispatch,
) -> Result<Dispatch> {
    let used = dispatch.resolve(n);
    debug!("vecadd dispatch: requested={} used={} n={}", dispatch, used, n);

    match used {
        Dispatch::Parallel => vecadd_par_f32(a, b, c, n)?,
        _ => vecadd_f32(a, b, c, n)?,
    }

    Ok(used)
}
