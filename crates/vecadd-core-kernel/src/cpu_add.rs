use std::cmp::Ordering;
use std::ops::Add;

use log::trace;

use crate::error::{KernelError, Operand, Result};

// Takes two vectors a and b and a count n
// Fills c with c[i] = a[i] + b[i] for i in 0..n
// Lengths are checked up front, nothing is written on error
// No allocations inside
// CPU version

/// Up-front validation shared by every kernel: each operand must hold at
/// least `n` elements. Operands are checked in `a`, `b`, `c` order.
pub fn check_lengths(
    op: &'static str,
    a_len: usize,
    b_len: usize,
    c_len: usize,
    n: usize,
) -> Result<()> {
    for (operand, len) in [(Operand::A, a_len), (Operand::B, b_len), (Operand::C, c_len)] {
        if len < n {
            return Err(KernelError::LengthMismatch {
                op,
                operand,
                len,
                required: n,
            });
        }
    }
    Ok(())
}

#[inline]
fn add_into<T>(a: &[T], b: &[T], c: &mut [T])
where
    T: Copy + Add<Output = T>,
{
    for (out, (&x, &y)) in c.iter_mut().zip(a.iter().zip(b.iter())) {
        *out = x + y;
    }
}

/// c[i] = a[i] + b[i] for the first `n` elements. Elements of `c` past `n`
/// are left alone.
pub fn vecadd_f32(a: &[f32], b: &[f32], c: &mut [f32], n: usize) -> Result<()> {
    check_lengths("vecadd_f32", a.len(), b.len(), c.len(), n)?;
    trace!("vecadd_f32: n={}", n);

    add_into(&a[..n], &b[..n], &mut c[..n]);

    Ok(())
}

/// Converts a signed element count, rejecting negatives.
pub fn checked_count(op: &'static str, count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| KernelError::InvalidCount { op, count })
}

/// Same as [`vecadd_f32`] but takes a signed count, the way C callers pass
/// an `int n`. Negative counts are rejected instead of silently doing nothing.
pub fn vecadd_f32_signed(a: &[f32], b: &[f32], c: &mut [f32], n: i64) -> Result<()> {
    let n = checked_count("vecadd_f32_signed", n)?;

    check_lengths("vecadd_f32_signed", a.len(), b.len(), c.len(), n)?;
    add_into(&a[..n], &b[..n], &mut c[..n]);

    Ok(())
}

/// Whole-slice add: all three slices must be the same length.
///
/// On mismatch the error names the shorter side: an input shorter than `out`,
/// or `out` when an input is longer.
pub fn add_arr_f32(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
    let n = out.len();
    for (operand, len) in [(Operand::A, a.len()), (Operand::B, b.len())] {
        let (operand, len, required) = match len.cmp(&n) {
            Ordering::Equal => continue,
            Ordering::Less => (operand, len, n),
            Ordering::Greater => (Operand::C, n, len),
        };
        return Err(KernelError::LengthMismatch {
            op: "add_arr_f32",
            operand,
            len,
            required,
        });
    }

    add_into(a, b, out);

    Ok(())
}

/// acc[i] += b[i] for the first `n` elements.
///
/// Covers the `c == a` call pattern, which the borrow checker rules out for
/// [`vecadd_f32`].
pub fn vecadd_inplace_f32(acc: &mut [f32], b: &[f32], n: usize) -> Result<()> {
    check_lengths("vecadd_inplace_f32", acc.len(), b.len(), acc.len(), n)?;

    for (x, &y) in acc[..n].iter_mut().zip(b[..n].iter()) {
        *x += y;
    }

    Ok(())
}

/// Fixed-size form. The length lives in the type, so there is nothing to check.
#[inline]
pub fn vecadd_fixed<const N: usize>(a: &[f32; N], b: &[f32; N], c: &mut [f32; N]) {
    add_into(a.as_slice(), b.as_slice(), c.as_mut_slice());
}

/// Generic element type, e.g. `f64` or integer buffers.
///
/// Integer overflow follows the usual `Add` semantics (panics in debug builds).
pub fn vecadd<T>(a: &[T], b: &[T], c: &mut [T], n: usize) -> Result<()>
where
    T: Copy + Add<Output = T>,
{
    check_lengths("vecadd", a.len(), b.len(), c.len(), n)?;
    add_into(&a[..n], &b[..n], &mut c[..n]);
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_pair() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
        (0usize..64).prop_flat_map(|len| {
            (
                prop::collection::vec(-1.0e6f32..1.0e6, len),
                prop::collection::vec(-1.0e6f32..1.0e6, len),
            )
        })
    }

    proptest! {
        #[test]
        fn test_elementwise_sum((a, b) in arb_pair()) {
            let n = a.len();
            let mut c = vec![0.0f32; n];
            vecadd_f32(&a, &b, &mut c, n).unwrap();
            for i in 0..n {
                prop_assert_eq!(c[i], a[i] + b[i]);
            }
        }

        #[test]
        fn test_commutative((a, b) in arb_pair()) {
            let n = a.len();
            let mut ab = vec![0.0f32; n];
            let mut ba = vec![0.0f32; n];
            vecadd_f32(&a, &b, &mut ab, n).unwrap();
            vecadd_f32(&b, &a, &mut ba, n).unwrap();
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn test_idempotent((a, b) in arb_pair()) {
            let n = a.len();
            let mut first = vec![0.0f32; n];
            vecadd_f32(&a, &b, &mut first, n).unwrap();
            let mut second = first.clone();
            vecadd_f32(&a, &b, &mut second, n).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_one_past_shortest_rejected((a, b) in arb_pair(), cut in 0usize..8) {
            let b = &b[..b.len().saturating_sub(cut)];
            let n = a.len().min(b.len());
            let mut c = vec![0.0f32; a.len()];

            prop_assert!(vecadd_f32(&a, b, &mut c, n).is_ok());

            let before = c.clone();
            let err = vecadd_f32(&a, b, &mut c, n + 1);
            let is_mismatch = matches!(err, Err(KernelError::LengthMismatch { .. }));
            prop_assert!(is_mismatch);
            prop_assert_eq!(c, before);
        }
    }
}
