use crate::Float;

/// A small, dense, row-major matrix.
///
/// The Newton solve for reflectance curves needs little more than
/// multiplication, transposition, block concatenation, and solving a linear
/// system with at most a few dozen unknowns. This struct provides just that.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<Float>,
}

impl Matrix {
    /// Create a new matrix filled with zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    /// Create a new square matrix with the given diagonal.
    pub fn diagonal(values: &[Float]) -> Self {
        let mut matrix = Self::zeros(values.len(), values.len());
        for (index, value) in values.iter().enumerate() {
            matrix[(index, index)] = *value;
        }
        matrix
    }

    /// Create a new matrix from its rows.
    ///
    /// # Panics
    ///
    /// If the rows have different lengths.
    pub fn from_rows<R: AsRef<[Float]>>(rows: &[R]) -> Self {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), columns, "rows should have the same length");
            data.extend_from_slice(row);
        }

        Self {
            rows: rows.len(),
            columns,
            data,
        }
    }

    /// Get the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.columns, self.rows);
        for row in 0..self.rows {
            for column in 0..self.columns {
                result[(column, row)] = self[(row, column)];
            }
        }
        result
    }

    /// Multiply this matrix with another one.
    ///
    /// # Panics
    ///
    /// If the inner dimensions do not agree.
    pub fn multiply(&self, other: &Self) -> Self {
        assert_eq!(self.columns, other.rows, "inner dimensions should agree");

        let mut result = Self::zeros(self.rows, other.columns);
        for row in 0..self.rows {
            for inner in 0..self.columns {
                let factor = self[(row, inner)];
                if factor == 0.0 {
                    continue;
                }
                for column in 0..other.columns {
                    result[(row, column)] += factor * other[(inner, column)];
                }
            }
        }
        result
    }

    /// Multiply this matrix with a vector.
    ///
    /// # Panics
    ///
    /// If the vector's length differs from the number of columns.
    pub fn apply(&self, vector: &[Float]) -> Vec<Float> {
        assert_eq!(self.columns, vector.len(), "vector length should agree");

        (0..self.rows)
            .map(|row| {
                self.data[row * self.columns..(row + 1) * self.columns]
                    .iter()
                    .zip(vector)
                    .map(|(a, b)| a * b)
                    .sum()
            })
            .collect()
    }

    /// Assemble a block matrix from four blocks.
    ///
    /// ```text
    /// | top_left    top_right    |
    /// | bottom_left bottom_right |
    /// ```
    ///
    /// # Panics
    ///
    /// If the blocks do not line up.
    pub fn from_blocks(
        top_left: &Self,
        top_right: &Self,
        bottom_left: &Self,
        bottom_right: &Self,
    ) -> Self {
        assert_eq!(top_left.rows, top_right.rows, "top blocks should align");
        assert_eq!(
            bottom_left.rows, bottom_right.rows,
            "bottom blocks should align"
        );
        assert_eq!(
            top_left.columns, bottom_left.columns,
            "left blocks should align"
        );
        assert_eq!(
            top_right.columns, bottom_right.columns,
            "right blocks should align"
        );

        let rows = top_left.rows + bottom_left.rows;
        let columns = top_left.columns + top_right.columns;
        let mut result = Self::zeros(rows, columns);

        for (block, row_offset, column_offset) in [
            (top_left, 0, 0),
            (top_right, 0, top_left.columns),
            (bottom_left, top_left.rows, 0),
            (bottom_right, top_left.rows, top_left.columns),
        ] {
            for row in 0..block.rows() {
                for column in 0..block.columns() {
                    result[(row_offset + row, column_offset + column)] = block[(row, column)];
                }
            }
        }

        result
    }

    /// Solve the linear system `self · x = rhs` for `x`.
    ///
    /// This method uses Gaussian elimination with partial pivoting. It returns
    /// `None` if the matrix is not square, does not match the right-hand side,
    /// or is (numerically) singular.
    pub fn solve(&self, rhs: &[Float]) -> Option<Vec<Float>> {
        const PIVOT_EPSILON: Float = 1e-14;

        let n = self.rows;
        if n != self.columns || n != rhs.len() {
            return None;
        }

        let mut a = self.data.clone();
        let mut b = rhs.to_vec();

        for pivot in 0..n {
            // Find the row with the largest magnitude in the pivot column.
            let mut best = pivot;
            let mut best_magnitude = a[pivot * n + pivot].abs();
            for row in pivot + 1..n {
                let magnitude = a[row * n + pivot].abs();
                if best_magnitude < magnitude {
                    best = row;
                    best_magnitude = magnitude;
                }
            }

            if best_magnitude < PIVOT_EPSILON || !best_magnitude.is_finite() {
                return None;
            }

            if best != pivot {
                for column in 0..n {
                    a.swap(pivot * n + column, best * n + column);
                }
                b.swap(pivot, best);
            }

            let diagonal = a[pivot * n + pivot];
            for row in pivot + 1..n {
                let factor = a[row * n + pivot] / diagonal;
                if factor == 0.0 {
                    continue;
                }
                for column in pivot..n {
                    a[row * n + column] -= factor * a[pivot * n + column];
                }
                b[row] -= factor * b[pivot];
            }
        }

        let mut x = vec![0.0; n];
        for row in (0..n).rev() {
            let mut sum = b[row];
            for column in row + 1..n {
                sum -= a[row * n + column] * x[column];
            }
            x[row] = sum / a[row * n + row];
        }

        Some(x)
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = Float;

    /// Access the entry at the given row and column.
    ///
    /// # Panics
    ///
    /// If the row or column is out of bounds.
    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && column < self.columns, "index out of bounds");
        &self.data[row * self.columns + column]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.rows && column < self.columns, "index out of bounds");
        &mut self.data[row * self.columns + column]
    }
}
