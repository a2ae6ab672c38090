//! `Array`: a one-dimensional vector of reals.
//!
//! A thin newtype around `nalgebra::DVector<f64>` with indexing,
//! element-wise arithmetic, dot product, and norms. The optimizers work on
//! `Array` parameter vectors.

use mjd_core::Real;
use nalgebra::DVector;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A dynamically-sized 1D vector of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Array(DVector<Real>);

impl Array {
    /// Create a zero-filled array of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(DVector::zeros(n))
    }

    /// Create an array from a slice.
    pub fn from_slice(data: &[Real]) -> Self {
        Self(DVector::from_column_slice(data))
    }

    /// Create an array from a `Vec`.
    pub fn from_vec(data: Vec<Real>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the elements as a slice.
    pub fn as_slice(&self) -> &[Real] {
        self.0.as_slice()
    }

    /// Dot product with another array.
    pub fn dot(&self, other: &Array) -> Real {
        self.0.dot(&other.0)
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> Real {
        self.0.norm()
    }

    /// Squared Euclidean norm.
    pub fn norm_squared(&self) -> Real {
        self.0.norm_squared()
    }

    /// Largest absolute element (L∞ norm); zero for an empty array.
    pub fn norm_inf(&self) -> Real {
        self.0.iter().fold(0.0, |acc: Real, v| acc.max(v.abs()))
    }

    /// `true` if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Iterator over elements.
    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }
}

// ── Index ─────────────────────────────────────────────────────────────────────

impl Index<usize> for Array {
    type Output = Real;
    fn index(&self, i: usize) -> &Real {
        &self.0[i]
    }
}

impl IndexMut<usize> for Array {
    fn index_mut(&mut self, i: usize) -> &mut Real {
        &mut self.0[i]
    }
}

// ── Element-wise arithmetic ───────────────────────────────────────────────────

impl Add for &Array {
    type Output = Array;
    fn add(self, rhs: &Array) -> Array {
        Array(&self.0 + &rhs.0)
    }
}

impl Sub for &Array {
    type Output = Array;
    fn sub(self, rhs: &Array) -> Array {
        Array(&self.0 - &rhs.0)
    }
}

impl Mul<Real> for &Array {
    type Output = Array;
    fn mul(self, rhs: Real) -> Array {
        Array(&self.0 * rhs)
    }
}

impl Neg for &Array {
    type Output = Array;
    fn neg(self) -> Array {
        Array(-&self.0)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
