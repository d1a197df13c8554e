use crate::{Error, Result};
use std::str::FromStr;

/// Largest number of sites a [`BitString`] can hold.
pub const MAX_SITES: usize = u64::BITS as usize;

/// A fixed-length string of bits, one bit per site.
///
/// Position 0 is the leftmost character of the text form and the most significant bit of
/// the numeric value, so `"011"` has value 3 and position 0 holds `false`. Strings of equal
/// length order by numeric value; shorter strings sort before longer ones.
///
/// # Example
///
/// ```
/// use bitrel::BitString;
///
/// let state: BitString = "0110".parse().unwrap();
/// assert_eq!(state.len(), 4);
/// assert_eq!(state.value(), 6);
/// assert_eq!(state.get(1), Some(true));
/// assert_eq!(state.to_string(), "0110");
/// ```
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    len: usize,
    value: u64,
}

fn mask(len: usize) -> u64 {
    if len == 0 {
        0
    } else {
        u64::MAX >> (MAX_SITES - len)
    }
}

impl BitString {
    /// Creates a string of `len` bits whose numeric value is `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `len` exceeds [`MAX_SITES`] or `value` needs more
    /// than `len` bits.
    pub fn new(value: u64, len: usize) -> Result<Self> {
        if len > MAX_SITES {
            return Err(Error::OutOfRange {
                index: len,
                length: MAX_SITES,
            });
        }
        if value & !mask(len) != 0 {
            return Err(Error::OutOfRange {
                index: (u64::BITS - value.leading_zeros()) as usize,
                length: len,
            });
        }
        Ok(Self { len, value })
    }

    /// The all-zero string of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `len` exceeds [`MAX_SITES`].
    pub fn zeros(len: usize) -> Result<Self> {
        Self::new(0, len)
    }

    /// Every string of length `len`, in increasing numeric order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `len` exceeds [`MAX_SITES`].
    pub fn all(len: usize) -> Result<impl Iterator<Item = BitString>> {
        let first = Self::zeros(len)?;
        Ok((first.value..=mask(len)).map(move |value| Self { len, value }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Numeric value with position 0 as the most significant bit.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Bit at `position`, or `None` past the end.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<bool> {
        (position < self.len).then(|| self.bit(position))
    }

    fn bit(&self, position: usize) -> bool {
        (self.value >> (self.len - 1 - position)) & 1 == 1
    }

    fn with_bit(mut self, position: usize, bit: bool) -> Self {
        let shift = self.len - 1 - position;
        self.value = (self.value & !(1 << shift)) | (u64::from(bit) << shift);
        self
    }

    /// Iterates over the bits from position 0 onwards.
    pub fn bits(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.len).map(|position| self.bit(position))
    }

    fn check_sites(&self, sites: &[usize]) -> Result<()> {
        match sites.iter().find(|&&site| site >= self.len) {
            Some(&site) => Err(Error::OutOfRange {
                index: site,
                length: self.len,
            }),
            None => Ok(()),
        }
    }

    /// Reads the bits at `sites`, in the order given, as a new string of length `sites.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any site lies beyond the end of `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use bitrel::BitString;
    ///
    /// let state: BitString = "10110".parse().unwrap();
    /// assert_eq!(state.gather(&[4, 0, 1]).unwrap().to_string(), "010");
    /// ```
    pub fn gather(&self, sites: &[usize]) -> Result<BitString> {
        self.check_sites(sites)?;
        let pattern = Self::zeros(sites.len())?;
        Ok(sites
            .iter()
            .enumerate()
            .fold(pattern, |pattern, (offset, &site)| pattern.with_bit(offset, self.bit(site))))
    }

    /// Writes `pattern` into `sites`, the inverse of [`gather`](Self::gather).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `pattern` and `sites` differ in length and
    /// [`Error::OutOfRange`] if any site lies beyond the end of `self`.
    pub fn scatter(&self, sites: &[usize], pattern: &BitString) -> Result<BitString> {
        if pattern.len != sites.len() {
            return Err(Error::LengthMismatch {
                expected: sites.len(),
                found: pattern.len,
            });
        }
        self.check_sites(sites)?;
        Ok(sites
            .iter()
            .enumerate()
            .fold(*self, |state, (offset, &site)| state.with_bit(site, pattern.bit(offset))))
    }
}

impl From<BitString> for u64 {
    fn from(bits: BitString) -> Self {
        bits.value
    }
}

impl FromIterator<bool> for BitString {
    /// # Panics
    ///
    /// Panics if the iterator yields more than [`MAX_SITES`] bits.
    fn from_iter<Iterator: IntoIterator<Item = bool>>(iterator: Iterator) -> Self {
        let mut res = Self { len: 0, value: 0 };
        for bit in iterator {
            assert!(res.len < MAX_SITES, "a BitString holds at most {MAX_SITES} bits");
            res.len += 1;
            res.value = (res.value << 1) | u64::from(bit);
        }
        res
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", u8::from(bit))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitString({self})")
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.chars().count() > MAX_SITES {
            return Err(Error::OutOfRange {
                index: trimmed.chars().count(),
                length: MAX_SITES,
            });
        }
        trimmed
            .chars()
            .map(|char| match char {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(Error::Parse(s.to_owned())),
            })
            .collect::<Result<Vec<bool>>>()
            .map(|bits| bits.into_iter().collect())
    }
}
