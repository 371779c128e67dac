use std::borrow::Cow;

use anyhow::{Result, bail};
use log::debug;
use vecadd_core_kernel::{Dispatch, vecadd_dispatch_f32};

/// Element type of a raw vector buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum DType {
    F32,
    F64,
}

impl DType {
    #[inline(always)]
    pub const fn element_size(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }
}

/// A 1-D vector borrowed from a raw little-endian byte buffer
/// (a file read into memory, an mmap, a foreign allocation).
#[derive(Debug, Clone)]
pub struct VectorView<'a> {
    pub data: &'a [u8], // Raw bytes, little-endian
    pub len: usize,     // Element count
    pub dtype: DType,   // How to interpret bytes
}

impl<'a> VectorView<'a> {
    /// View the whole buffer. Its size must be a multiple of the element size.
    pub fn from_bytes(data: &'a [u8], dtype: DType) -> Result<Self> {
        let size = dtype.element_size();
        if data.len() % size != 0 {
            bail!(
                "buffer of {} bytes is not a whole number of {:?} elements",
                data.len(),
                dtype
            );
        }

        Ok(Self {
            data,
            len: data.len() / size,
            dtype,
        })
    }

    /// View a `&[f32]` as bytes. Always aligned.
    pub fn from_f32(values: &'a [f32]) -> Self {
        let bytes = unsafe {
            // SAFETY: any initialized f32 is valid as bytes, u8 has no alignment requirement
            std::slice::from_raw_parts(values.as_ptr().cast::<u8>(), std::mem::size_of_val(values))
        };
        Self {
            data: bytes,
            len: values.len(),
            dtype: DType::F32,
        }
    }

    #[inline(always)]
    pub fn num_elements(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn expected_byte_len(&self) -> Option<usize> {
        self.len.checked_mul(self.dtype.element_size())
    }

    /// F32 slice - zero-copy, alignment checked
    pub fn as_f32_slice(&self) -> Result<&'a [f32]> {
        if self.dtype != DType::F32 {
            bail!("vector is not f32");
        }

        if self.data.as_ptr().align_offset(std::mem::align_of::<f32>()) != 0 {
            bail!("vector data is not aligned for f32");
        }

        let Some(expected_len) = self.expected_byte_len() else {
            bail!("vector length {} overflows the byte size", self.len);
        };
        if self.data.len() != expected_len {
            bail!(
                "vector data length mismatch: got {}, expected {}",
                self.data.len(),
                expected_len
            );
        }

        let ptr = self.data.as_ptr().cast::<f32>();
        // SAFETY: We've checked alignment, length, and data type
        unsafe { Ok(std::slice::from_raw_parts(ptr, self.len)) }
    }

    /// F64 slice - zero-copy, alignment checked
    pub fn as_f64_slice(&self) -> Result<&'a [f64]> {
        if self.dtype != DType::F64 {
            bail!("vector is not f64");
        }

        if self.data.as_ptr().align_offset(std::mem::align_of::<f64>()) != 0 {
            bail!("vector data is not aligned for f64");
        }

        if self.expected_byte_len() != Some(self.data.len()) {
            bail!("vector data length mismatch");
        }

        let ptr = self.data.as_ptr().cast::<f64>();
        // SAFETY: We've checked alignment, length, and data type
        unsafe { Ok(std::slice::from_raw_parts(ptr, self.len)) }
    }

    /// Decode by copy. Works for any alignment.
    pub fn to_f32_vec(&self) -> Result<Vec<f32>> {
        if self.dtype != DType::F32 {
            bail!("vector is not f32");
        }
        if self.expected_byte_len() != Some(self.data.len()) {
            bail!("vector data length mismatch");
        }

        Ok(self
            .data
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }

    /// Zero-copy when the buffer allows it, otherwise a decoded copy.
    pub fn as_f32_cow(&self) -> Result<Cow<'a, [f32]>> {
        match self.as_f32_slice() {
            Ok(slice) if cfg!(target_endian = "little") => Ok(Cow::Borrowed(slice)),
            _ => {
                debug!("vector view: falling back to copying decode ({} elements)", self.len);
                Ok(Cow::Owned(self.to_f32_vec()?))
            }
        }
    }
}

/// element-wise addition of two views into `output`
///
/// Both views must have the same length and `output` must hold exactly that
/// many elements.
pub fn add(
    a: &VectorView<'_>,
    b: &VectorView<'_>,
    output: &mut [f32],
    dispatch: Dispatch,
) -> Result<Dispatch> {
    if a.dtype != DType::F32 || b.dtype != DType::F32 {
        bail!("add: only f32 supported");
    }

    if a.len != b.len {
        bail!("add: length mismatch: a={}, b={}", a.len, b.len);
    }

    if output.len() != a.num_elements() {
        bail!(
            "add: output buffer size mismatch: got {}, expected {}",
            output.len(),
            a.num_elements()
        );
    }

    let a_slice = a.as_f32_cow()?;
    let b_slice = b.as_f32_cow()?;

    let used = vecadd_dispatch_f32(&a_slice, &b_slice, output, a.len, dispatch)?;
    Ok(used)
}
