//! Stacking-order allocation.

/// Returns the next stacking value: one above the highest current value, or `1` when empty.
pub fn next_stack_order(current: impl IntoIterator<Item = u32>) -> u32 {
    current
        .into_iter()
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_starts_at_one() {
        assert_eq!(next_stack_order(std::iter::empty()), 1);
    }

    #[test]
    fn allocates_above_highest_regardless_of_order() {
        assert_eq!(next_stack_order([3, 9, 2]), 10);
        assert_eq!(next_stack_order([1]), 2);
    }
}
