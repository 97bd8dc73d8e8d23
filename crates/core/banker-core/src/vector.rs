//! Elementwise helpers over resource vectors and matrices

use crate::types::{Matrix, ResourceVector};

/// `lhs[j] <= rhs[j]` for every resource class
pub fn fits_within(lhs: &[u32], rhs: &[u32]) -> bool {
    lhs.iter().zip(rhs).all(|(a, b)| a <= b)
}

/// `lhs[j] += rhs[j]`
pub fn add_assign(lhs: &mut [u32], rhs: &[u32]) {
    for (a, b) in lhs.iter_mut().zip(rhs) {
        *a += *b;
    }
}

/// `lhs[j] -= rhs[j]`
///
/// Callers must have checked `fits_within(rhs, lhs)` first.
pub fn sub_assign(lhs: &mut [u32], rhs: &[u32]) {
    for (a, b) in lhs.iter_mut().zip(rhs) {
        *a -= *b;
    }
}

/// True when every component is zero
pub fn is_zero(v: &[u32]) -> bool {
    v.iter().all(|&x| x == 0)
}

/// Per-class sums over all rows
pub fn column_sums(matrix: &Matrix, width: usize) -> ResourceVector {
    let mut sums = vec![0; width];
    for row in matrix {
        add_assign(&mut sums, row);
    }
    sums
}

/// Per-class sums, or `None` if any column overflows `u32`
pub fn checked_column_sums(matrix: &Matrix, width: usize) -> Option<ResourceVector> {
    let mut sums = vec![0u32; width];
    for row in matrix {
        for (sum, &x) in sums.iter_mut().zip(row) {
            *sum = sum.checked_add(x)?;
        }
    }
    Some(sums)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_within() {
        assert!(fits_within(&[1, 2, 3], &[1, 2, 3]));
        assert!(fits_within(&[0, 0], &[0, 5]));
        assert!(!fits_within(&[2, 0], &[1, 5]));
    }

    #[test]
    fn test_add_and_sub() {
        let mut v = vec![3, 4];
        add_assign(&mut v, &[1, 1]);
        assert_eq!(v, vec![4, 5]);
        sub_assign(&mut v, &[4, 2]);
        assert_eq!(v, vec![0, 3]);
        assert!(!is_zero(&v));
        sub_assign(&mut v, &[0, 3]);
        assert!(is_zero(&v));
    }

    #[test]
    fn test_column_sums() {
        let m = vec![vec![1, 2], vec![3, 4], vec![0, 1]];
        assert_eq!(column_sums(&m, 2), vec![4, 7]);
        assert_eq!(column_sums(&Vec::new(), 3), vec![0, 0, 0]);
    }

    #[test]
    fn test_checked_column_sums() {
        let m = vec![vec![1, u32::MAX - 1], vec![2, 1]];
        assert_eq!(checked_column_sums(&m, 2), Some(vec![3, u32::MAX]));

        let overflowing = vec![vec![0, u32::MAX], vec![0, 1]];
        assert_eq!(checked_column_sums(&overflowing, 2), None);
    }
}
