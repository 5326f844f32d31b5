//! Index-based access to sampled arrays.
//!
//! The integrators never assume packed storage: everything is read through
//! [`Samples::element`], so a column of a row-major table or a faer column
//! view can be integrated in place.

use super::QuadratureError;
use faer::ColRef;

pub trait Samples {
    fn len(&self) -> usize;

    fn element(&self, index: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Samples for &[f64] {
    fn len(&self) -> usize {
        <[f64]>::len(self)
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }
}

impl Samples for &Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }
}

impl<const N: usize> Samples for &[f64; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }
}

impl Samples for ColRef<'_, f64> {
    fn len(&self) -> usize {
        self.nrows()
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }
}

/// Strided view `data[offset + i * stride]` for `i < len`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StridedSamples<'a> {
    data: &'a [f64],
    offset: usize,
    stride: usize,
    len: usize,
}

impl<'a> StridedSamples<'a> {
    pub fn new(
        data: &'a [f64],
        offset: usize,
        stride: usize,
        len: usize,
    ) -> Result<Self, QuadratureError> {
        let out_of_bounds = || QuadratureError::StrideOutOfBounds {
            offset,
            stride,
            len,
            buffer_len: data.len(),
        };

        if len > 0 {
            if stride == 0 {
                return Err(out_of_bounds());
            }
            let last = (len - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(offset))
                .ok_or_else(out_of_bounds)?;
            if last >= data.len() {
                return Err(out_of_bounds());
            }
        }

        Ok(Self {
            data,
            offset,
            stride,
            len,
        })
    }

    pub fn contiguous(data: &'a [f64]) -> Self {
        Self {
            data,
            offset: 0,
            stride: 1,
            len: data.len(),
        }
    }

    /// Column `column` of a row-major table stored flat with `columns` entries
    /// per row.
    pub fn column_of(
        data: &'a [f64],
        columns: usize,
        column: usize,
    ) -> Result<Self, QuadratureError> {
        if columns == 0 || column >= columns {
            return Err(QuadratureError::ColumnOutOfRange { column, columns });
        }
        if data.len() % columns != 0 {
            return Err(QuadratureError::RaggedTable {
                buffer_len: data.len(),
                columns,
            });
        }

        Self::new(data, column, columns, data.len() / columns)
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl Samples for StridedSamples<'_> {
    fn len(&self) -> usize {
        self.len
    }

    fn element(&self, index: usize) -> f64 {
        debug_assert!(index < self.len, "strided index {index} out of range {}", self.len);
        self.data[self.offset + index * self.stride]
    }
}

/// Validated `(r, f)` grid: equal lengths, at least one point, finite and
/// strictly increasing radii.
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid<S> {
    radii: S,
    values: S,
}

impl<S: Samples> SampleGrid<S> {
    pub fn new(radii: S, values: S) -> Result<Self, QuadratureError> {
        if values.len() != radii.len() {
            return Err(QuadratureError::ShapeMismatch {
                field: "f",
                expected: radii.len(),
                actual: values.len(),
            });
        }
        if radii.is_empty() {
            return Err(QuadratureError::EmptyGrid);
        }

        let mut previous = radii.element(0);
        if !previous.is_finite() {
            return Err(QuadratureError::NonFiniteRadius {
                index: 0,
                value: previous,
            });
        }
        for index in 1..radii.len() {
            let current = radii.element(index);
            if !current.is_finite() {
                return Err(QuadratureError::NonFiniteRadius {
                    index,
                    value: current,
                });
            }
            if current <= previous {
                return Err(QuadratureError::NonIncreasingRadius {
                    index,
                    previous,
                    current,
                });
            }
            previous = current;
        }

        Ok(Self { radii, values })
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn radius(&self, index: usize) -> f64 {
        self.radii.element(index)
    }

    pub fn value(&self, index: usize) -> f64 {
        self.values.element(index)
    }
}

/// `sin(k r_i)` and `cos(k r_i)` tables aligned with a grid.
#[derive(Debug, Clone, Copy)]
pub struct TrigTables<S> {
    sin: S,
    cos: S,
}

impl<S: Samples> TrigTables<S> {
    pub fn new(sin: S, cos: S, grid_len: usize) -> Result<Self, QuadratureError> {
        if sin.len() != grid_len {
            return Err(QuadratureError::ShapeMismatch {
                field: "sinkr",
                expected: grid_len,
                actual: sin.len(),
            });
        }
        if cos.len() != grid_len {
            return Err(QuadratureError::ShapeMismatch {
                field: "coskr",
                expected: grid_len,
                actual: cos.len(),
            });
        }

        Ok(Self { sin, cos })
    }

    pub fn sin(&self, index: usize) -> f64 {
        self.sin.element(index)
    }

    pub fn cos(&self, index: usize) -> f64 {
        self.cos.element(index)
    }
}
