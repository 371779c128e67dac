//! CPU vector-add kernels.
//!
//! Every kernel validates operand lengths against the element count before
//! touching the output, so a failed call leaves `c` exactly as it was.

pub mod cpu_add;
pub mod cpu_par_add;
pub mod dispatch;
pub mod error;

pub use cpu_add::{
    add_arr_f32, check_lengths, checked_count, vecadd, vecadd_f32, vecadd_f32_signed, vecadd_fixed,
    vecadd_inplace_f32,
};
pub use cpu_par_add::{PAR_MIN_LEN, vecadd_par_f32};
pub use dispatch::{Dispatch, vecadd_dispatch_f32};
pub use error::{KernelError, Operand, Result};
