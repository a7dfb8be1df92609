use std::fmt;
use std::ops::Index;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MatrixError, Result};
use crate::storage::Storage;

/// Dense row-major `f64` matrix. Never mutated after construction.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    storage: Storage,
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("numel", &self.numel())
            .finish()
    }
}

impl Matrix {
    pub fn new(v: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self::try_new(v, rows, cols).expect("new: buffer length must equal rows * cols")
    }

    pub fn try_new(v: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| MatrixError::InvalidArgument {
            op: "matrix.new",
            msg: format!("{rows}x{cols} overflows usize"),
        })?;
        if v.len() != expected {
            return Err(MatrixError::InvalidShape {
                op: "matrix.new",
                rows,
                cols,
                len: v.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            storage: Storage { data: v },
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 0.0)
    }

    pub fn full(rows: usize, cols: usize, value: f64) -> Self {
        Self::new(vec![value; rows * cols], rows, cols)
    }

    /// Sequential fill `0, 1, 2, ...` in row-major order.
    pub fn example(rows: usize, cols: usize) -> Self {
        let data = (0..rows * cols).map(|idx| idx as f64).collect();
        Self::new(data, rows, cols)
    }

    /// Independent uniform samples in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..rows * cols).map(|_| rng.gen::<f64>()).collect();
        Self::new(data, rows, cols)
    }

    /// Random matrix from a fixed seed, or from OS entropy when `seed` is `None`.
    pub fn random_seeded(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::random(rows, cols, &mut rng)
    }

    /// New matrix with `value` added to every entry.
    pub fn offset(&self, value: f64) -> Self {
        let data = self.storage.data.iter().map(|x| x + value).collect();
        Self::new(data, self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.storage.data
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let idx = i * self.cols;
        &self.storage.data[idx..(idx + self.cols)]
    }

    /// Exact elementwise equality. Shapes must agree; no tolerance is applied.
    pub fn array_equal(&self, other: &Matrix) -> bool {
        self.shape() == other.shape()
            && self
                .data()
                .iter()
                .zip(other.data())
                .all(|(lhs, rhs)| lhs == rhs)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.storage.data[row * self.cols + col]
    }
}

fn format_entry(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        return format!("{value:.0}.");
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    let text = format!("{value:.8}");
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        let entries: Vec<String> = self.data().iter().map(|v| format_entry(*v)).collect();
        // Columns line up on the decimal point.
        let parts: Vec<(&str, Option<&str>)> = entries
            .iter()
            .map(|entry| match entry.split_once('.') {
                Some((int, frac)) => (int, Some(frac)),
                None => (entry.as_str(), None),
            })
            .collect();
        let int_width = parts.iter().map(|(int, _)| int.len()).max().unwrap_or(0);
        let frac_width = parts
            .iter()
            .filter_map(|(_, frac)| frac.map(str::len))
            .max()
            .unwrap_or(0);

        write!(f, "[")?;
        for (i, row) in parts.chunks(self.cols).enumerate() {
            if i > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (j, (int, frac)) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match frac {
                    Some(frac) => write!(f, "{int:>int_width$}.{frac:<frac_width$}")?,
                    None => write!(f, "{int:>int_width$}{:pad$}", "", pad = frac_width + 1)?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
