//! Mixed-radix mapping between index tuples and flat table offsets.
//!
//! A grid with point counts `[n0, n1, ..., nk]` is addressed either by an
//! index tuple `[i0, i1, ..., ik]` with `iv < nv`, or by a single flat offset
//! into the coefficient table. The mapping is row-major: the last declared
//! variable varies fastest, so
//!
//! ```text
//! offset = Σ_v ( i_v * Π_{k>v} n_k )
//! ```
//!
//! # Examples
//!
//! ```
//! use aerocoef_core::GridIndices;
//!
//! // 3 Mach points × 2 angle-of-attack points
//! let tuples: Vec<_> = GridIndices::new(vec![3, 2]).collect();
//! assert_eq!(tuples.len(), 6);
//! assert_eq!(tuples[0], [0, 0]);
//! assert_eq!(tuples[1], [0, 1]);
//! assert_eq!(tuples[3], [1, 1]);
//! assert_eq!(tuples[5], [2, 1]);
//! ```

use std::iter::FusedIterator;

/// Composes an index tuple into a flat offset.
///
/// The caller guarantees that `indices` and `shape` have equal length and
/// that every component is in range.
#[inline]
pub(crate) fn compose(shape: &[usize], indices: &[usize]) -> usize {
    debug_assert_eq!(shape.len(), indices.len());
    shape
        .iter()
        .zip(indices)
        .fold(0, |offset, (&len, &index)| {
            debug_assert!(index < len);
            offset * len + index
        })
}

/// Decomposes a flat offset into an index tuple, writing it into `out`.
///
/// The caller guarantees that `offset` is smaller than the product of `shape`.
#[inline]
pub(crate) fn decompose_into(shape: &[usize], mut offset: usize, out: &mut [usize]) {
    debug_assert_eq!(shape.len(), out.len());
    for (slot, &len) in out.iter_mut().zip(shape).rev() {
        *slot = offset % len;
        offset /= len;
    }
    debug_assert_eq!(offset, 0);
}

/// Decomposes a flat offset into a freshly allocated index tuple.
#[inline]
pub(crate) fn decompose(shape: &[usize], offset: usize) -> Vec<usize> {
    let mut out = vec![0; shape.len()];
    decompose_into(shape, offset, &mut out);
    out
}

/// Returns the number of cases of a shape, or `None` on overflow.
///
/// The empty shape has exactly one case (the empty tuple).
#[inline]
pub(crate) fn checked_case_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &len| acc.checked_mul(len))
}

/// Iterator over every index tuple of a grid shape in flat-offset order.
///
/// Enumerating the tuples yields the same order as nested loops over the
/// variables with the last variable innermost, so the `n`-th item is the tuple
/// stored at flat offset `n`.
#[derive(Debug, Clone)]
pub struct GridIndices {
    shape: Vec<usize>,
    front: usize,
    back: usize,
}

impl GridIndices {
    /// Creates an iterator over all tuples of `shape`.
    ///
    /// # Panics
    ///
    /// Panics if the product of `shape` overflows `usize`.
    #[must_use]
    pub fn new(shape: Vec<usize>) -> Self {
        let back = checked_case_count(&shape).expect("Grid case count overflows usize");
        Self {
            shape,
            front: 0,
            back,
        }
    }

    /// Returns the shape being enumerated.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = decompose(&self.shape, self.front);
        self.front += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for GridIndices {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(decompose(&self.shape, self.back))
    }
}

impl FusedIterator for GridIndices {}
impl ExactSizeIterator for GridIndices {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_row_major_order() {
        let shape = [3, 2];
        assert_eq!(compose(&shape, &[0, 0]), 0);
        assert_eq!(compose(&shape, &[0, 1]), 1);
        assert_eq!(compose(&shape, &[1, 0]), 2);
        assert_eq!(compose(&shape, &[1, 1]), 3);
        assert_eq!(compose(&shape, &[2, 1]), 5);
    }

    #[test]
    fn test_empty_shape_has_one_case() {
        assert_eq!(checked_case_count(&[]), Some(1));
        let all: Vec<_> = GridIndices::new(vec![]).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_overflow_detected() {
        assert_eq!(checked_case_count(&[usize::MAX, 2]), None);
    }

    #[test]
    fn test_iterator_both_ends() {
        let mut iter = GridIndices::new(vec![2, 3, 2]);
        assert_eq!(iter.len(), 12);
        assert_eq!(iter.next(), Some(vec![0, 0, 0]));
        assert_eq!(iter.next_back(), Some(vec![1, 2, 1]));
        assert_eq!(iter.len(), 10);
        assert_eq!(iter.nth(4), Some(vec![0, 2, 1]));
        assert_eq!(iter.by_ref().count(), 5);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_nested_loop_visits_each_offset_once() {
        let shape = [4, 3, 2, 5];
        let mut expected = 0;
        for a in 0..4 {
            for b in 0..3 {
                for c in 0..2 {
                    for d in 0..5 {
                        assert_eq!(compose(&shape, &[a, b, c, d]), expected);
                        expected += 1;
                    }
                }
            }
        }
        assert_eq!(Some(expected), checked_case_count(&shape));
    }

    proptest! {
        #[test]
        fn prop_compose_is_bijective(shape in prop::collection::vec(1usize..6, 0..=4)) {
            let count = checked_case_count(&shape).unwrap();
            let offsets: HashSet<_> = GridIndices::new(shape.clone())
                .map(|tuple| compose(&shape, &tuple))
                .collect();
            prop_assert_eq!(offsets.len(), count);
            prop_assert!(offsets.iter().all(|&offset| offset < count));
        }

        #[test]
        fn prop_decompose_inverts_compose(
            shape in prop::collection::vec(1usize..8, 1..=4),
            seed in any::<usize>(),
        ) {
            let count = checked_case_count(&shape).unwrap();
            let offset = seed % count;
            let tuple = decompose(&shape, offset);
            prop_assert!(tuple.iter().zip(&shape).all(|(&i, &n)| i < n));
            prop_assert_eq!(compose(&shape, &tuple), offset);
        }
    }
}
