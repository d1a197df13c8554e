use crate::{Error, Result};
use log::trace;
use num_traits::Zero;
use std::ops::{BitOr, BitOrAssign, Index};
use std::str::FromStr;

pub type Word = u64;

const WORD_BITS: usize = Word::BITS as usize;

/// A 2D matrix of booleans combined with OR and AND.
///
/// `BoolMatrix` stores each row as packed words, so the product of two matrices is formed by
/// OR-ing whole rows of the right operand. Unlike a GF(2) matrix, addition is OR, which makes
/// a matrix a binary relation: entry `(sink, source)` is set when `source` relates to `sink`.
///
/// # Example
///
/// ```
/// use bitrel::{BoolMatrix, boolean_multiply};
///
/// // 0 -> 1 -> 2
/// let step: BoolMatrix = "000|100|010".parse().unwrap();
/// let two_steps = boolean_multiply(&step, &step).unwrap();
/// assert!(two_steps.get((2, 0)));
///
/// let closure = step.reflexive_transitive_closure().unwrap();
/// assert!(closure.get((2, 0)));
/// assert!(closure.get((1, 1)));
/// assert!(!closure.get((0, 2)));
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BoolMatrix {
    row_count: usize,
    column_count: usize,
    row_stride: usize,
    words: Vec<Word>,
}

impl BoolMatrix {
    /// Creates a matrix of the given shape with every entry unset.
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        let row_stride = column_count.div_ceil(WORD_BITS);
        Self {
            row_count,
            column_count,
            row_stride,
            words: vec![0; row_count * row_stride],
        }
    }

    /// Creates a matrix of the given shape with every entry set.
    pub fn ones(row_count: usize, column_count: usize) -> Self {
        Self::from_fn(row_count, column_count, |_, _| true)
    }

    /// The identity relation on `dimension` elements.
    ///
    /// ```
    /// use bitrel::BoolMatrix;
    ///
    /// let id = BoolMatrix::identity(3);
    /// assert!(id.get((1, 1)));
    /// assert!(!id.get((0, 1)));
    /// ```
    pub fn identity(dimension: usize) -> Self {
        Self::from_fn(dimension, dimension, |row, column| row == column)
    }

    pub fn from_fn(row_count: usize, column_count: usize, mut entry: impl FnMut(usize, usize) -> bool) -> Self {
        let mut res = Self::zeros(row_count, column_count);
        for row in 0..row_count {
            for column in 0..column_count {
                if entry(row, column) {
                    res.set((row, column), true);
                }
            }
        }
        res
    }

    /// Builds a matrix from rows of booleans.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if a row does not have `column_count` entries.
    pub fn from_rows<Row, Rows>(rows: Rows, column_count: usize) -> Result<Self>
    where
        Row: IntoIterator<Item = bool>,
        Rows: IntoIterator<Item = Row>,
    {
        let rows: Vec<Vec<bool>> = rows.into_iter().map(|row| row.into_iter().collect()).collect();
        if let Some(row) = rows.iter().find(|row| row.len() != column_count) {
            return Err(Error::LengthMismatch {
                expected: column_count,
                found: row.len(),
            });
        }
        Ok(Self::from_fn(rows.len(), column_count, |row, column| rows[row][column]))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.column_count)
    }

    #[must_use]
    pub fn is_square(&self) -> bool {
        self.row_count == self.column_count
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// Number of set entries.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    fn row_words(&self, row: usize) -> &[Word] {
        &self.words[row * self.row_stride..(row + 1) * self.row_stride]
    }

    fn row_words_mut(&mut self, row: usize) -> &mut [Word] {
        &mut self.words[row * self.row_stride..(row + 1) * self.row_stride]
    }

    /// Gets the entry at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the matrix.
    #[must_use]
    pub fn get(&self, (row, column): (usize, usize)) -> bool {
        assert!(row < self.row_count && column < self.column_count);
        (self.row_words(row)[column / WORD_BITS] >> (column % WORD_BITS)) & 1 == 1
    }

    /// Sets the entry at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the matrix.
    pub fn set(&mut self, (row, column): (usize, usize), to: bool) {
        assert!(row < self.row_count && column < self.column_count);
        let word = &mut self.row_words_mut(row)[column / WORD_BITS];
        let bit = 1 << (column % WORD_BITS);
        if to {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Column indexes set in `row`, in increasing order.
    pub fn row_support(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row_words(row).iter().enumerate().flat_map(|(word_index, &word)| {
            (0..WORD_BITS)
                .filter(move |offset| (word >> offset) & 1 == 1)
                .map(move |offset| word_index * WORD_BITS + offset)
        })
    }

    /// Row indexes set in `column`, in increasing order.
    pub fn column_support(&self, column: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.row_count).filter(move |&row| self.get((row, column)))
    }

    pub fn transposed(&self) -> Self {
        Self::from_fn(self.column_count, self.row_count, |row, column| self.get((column, row)))
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && *self == self.transposed()
    }

    /// Closes the relation under reflexivity and transitivity.
    ///
    /// The identity is OR-ed in and the matrix is squared until it stops changing. Each
    /// squaring doubles the path length captured, so the loop ends after at most
    /// `ceil(log2(dimension))` productive squarings; the exit condition is the fixed point
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the matrix is not square.
    pub fn reflexive_transitive_closure(&self) -> Result<BoolMatrix> {
        if !self.is_square() {
            return Err(Error::DimensionMismatch {
                expected: (self.row_count, self.row_count),
                found: self.shape(),
            });
        }
        let mut closure = self | &Self::identity(self.row_count);
        let mut squarings = 0usize;
        loop {
            let squared = boolean_multiply(&closure, &closure)?;
            if squared == closure {
                break;
            }
            closure = squared;
            squarings += 1;
        }
        trace!("closure of {:?} reached a fixed point after {squarings} squarings", self.shape());
        Ok(closure)
    }
}

/// Converts a numeric matrix into its support pattern: nonzero entries become `true`.
///
/// Works for any entry type with a zero, including complex amplitudes.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the rows do not all have the same length.
///
/// # Example
///
/// ```
/// use bitrel::booleanize;
///
/// let support = booleanize(&[vec![0.5, 0.0], vec![-2.0, 0.0]]).unwrap();
/// assert_eq!(support.to_string(), "10\n10\n");
/// ```
pub fn booleanize<T: Zero>(rows: &[Vec<T>]) -> Result<BoolMatrix> {
    let column_count = rows.first().map_or(0, Vec::len);
    BoolMatrix::from_rows(
        rows.iter().map(|row| row.iter().map(|entry| !entry.is_zero())),
        column_count,
    )
}

/// Boolean matrix product: entry `(i, j)` is set when some `k` has both `a[(i, k)]` and
/// `b[(k, j)]` set.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `a.column_count() != b.row_count()`.
pub fn boolean_multiply(a: &BoolMatrix, b: &BoolMatrix) -> Result<BoolMatrix> {
    if a.column_count != b.row_count {
        return Err(Error::DimensionMismatch {
            expected: (a.column_count, b.column_count),
            found: b.shape(),
        });
    }
    let mut res = BoolMatrix::zeros(a.row_count, b.column_count);
    for row in 0..a.row_count {
        let support: Vec<usize> = a.row_support(row).collect();
        let target = res.row_words_mut(row);
        for inner in support {
            for (word, other) in target.iter_mut().zip(b.row_words(inner)) {
                *word |= other;
            }
        }
    }
    Ok(res)
}

impl BitOrAssign<&BoolMatrix> for BoolMatrix {
    /// # Panics
    ///
    /// Panics if the shapes differ.
    fn bitor_assign(&mut self, other: &BoolMatrix) {
        assert_eq!(self.shape(), other.shape());
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            *word |= other;
        }
    }
}

impl BitOr for &BoolMatrix {
    type Output = BoolMatrix;

    fn bitor(self, other: Self) -> Self::Output {
        let mut clone = self.clone();
        clone |= other;
        clone
    }
}

impl Index<(usize, usize)> for BoolMatrix {
    type Output = bool;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl std::fmt::Display for BoolMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "[")?;
        }
        for row in 0..self.row_count {
            for column in 0..self.column_count {
                write!(f, "{}", u8::from(self.get((row, column))))?;
            }
            if f.alternate() {
                if row + 1 < self.row_count {
                    write!(f, "|")?;
                }
            } else {
                writeln!(f)?;
            }
        }
        if f.alternate() {
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BoolMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoolMatrix(shape={:?},value={:#})", self.shape(), self)
    }
}

impl FromStr for BoolMatrix {
    type Err = Error;

    /// Parses rows of `0`/`1` separated by `|`, `;`, or newlines, optionally wrapped in
    /// brackets. Spaces, commas and dashes inside a row are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::<Vec<bool>>::new();
        for row_string in s.split(['|', '[', ']', '(', ')', ';', '\n']) {
            let mut row = Vec::<bool>::new();
            for char in row_string.chars() {
                match char {
                    '0' | '.' => row.push(false),
                    '1' => row.push(true),
                    ' ' | '-' | ',' | '\r' | '\t' => {}
                    _ => return Err(Error::Parse(s.to_owned())),
                }
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        let column_count = rows.first().map_or(0, Vec::len);
        BoolMatrix::from_rows(rows, column_count)
    }
}
