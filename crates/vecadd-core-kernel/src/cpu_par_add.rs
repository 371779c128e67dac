use log::trace;
use rayon::prelude::*;

use crate::cpu_add::{check_lengths, vecadd_f32};
use crate::error::Result;

/// Below this many elements the rayon split costs more than the adds.
pub const PAR_MIN_LEN: usize = 1 << 14;

/// Data-parallel c[i] = a[i] + b[i] on the global rayon pool.
///
/// Each worker owns a disjoint chunk of `c`, so no synchronization is needed.
/// Results are bit-identical to [`vecadd_f32`].
pub fn vecadd_par_f32(a: &[f32], b: &[f32], c: &mut [f32], n: usize) -> Result<()> {
    check_lengths("vecadd_par_f32", a.len(), b.len(), c.len(), n)?;

    if n < PAR_MIN_LEN {
        return vecadd_f32(a, b, c, n);
    }

    trace!(
        "vecadd_par_f32: n={} threads={}",
        n,
        rayon::current_num_threads()
    );

    c[..n]
        .par_iter_mut()
        .zip(a[..n].par_iter().zip(b[..n].par_iter()))
        .with_min_len(PAR_MIN_LEN / 4)
        .for_each(|(out, (&x, &y))| *out = x + y);

    Ok(())
}
