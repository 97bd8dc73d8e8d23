//! Need and availability calculation
//!
//! Both functions assume the allocation invariants already hold
//! (`allocation ≤ max_claim` cell-wise, column sums of `allocation ≤ total`).

use crate::types::{Matrix, ResourceVector};
use crate::vector;

/// Remaining need per process: `max_claim - allocation`
pub fn need(max_claim: &Matrix, allocation: &Matrix) -> Matrix {
    max_claim
        .iter()
        .zip(allocation)
        .map(|(max_row, alloc_row)| {
            max_row
                .iter()
                .zip(alloc_row)
                .map(|(max, held)| max - held)
                .collect()
        })
        .collect()
}

/// Resources not held by any process: `total - Σ_i allocation[i]`
pub fn available(total: &[u32], allocation: &Matrix) -> ResourceVector {
    let held = vector::column_sums(allocation, total.len());
    total.iter().zip(&held).map(|(t, h)| t - h).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_is_elementwise_difference() {
        let max_claim = vec![vec![0, 6, 5, 6], vec![1, 9, 4, 2]];
        let allocation = vec![vec![0, 0, 1, 4], vec![1, 4, 3, 2]];

        assert_eq!(
            need(&max_claim, &allocation),
            vec![vec![0, 6, 4, 2], vec![0, 5, 1, 0]]
        );
    }

    #[test]
    fn test_available_subtracts_column_sums() {
        let total = vec![10, 5, 7];
        let allocation = vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]];

        assert_eq!(available(&total, &allocation), vec![5, 4, 5]);
    }

    #[test]
    fn test_available_with_nothing_held() {
        let total = vec![4, 4];
        let allocation = vec![vec![0, 0]];
        assert_eq!(available(&total, &allocation), total);
    }
}
