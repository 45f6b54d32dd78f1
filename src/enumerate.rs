//! Pruned subset-sum search and fixed-size selections.
//!
//! Neither enumerator recurses: the subset-sum search drives an explicit
//! branch stack, and selections step an index array lexicographically, so
//! input size never threatens the call stack.

use crate::error::{Error, Result};

/// A pending branch in the subset-sum search.
///
/// All branches share one path of chosen positions; `depth` says how much of
/// it belongs to this branch's parent.
#[derive(Clone, Copy)]
struct Branch {
    /// Next input position to decide on.
    next: usize,
    /// Sum of the values chosen along this branch.
    sum: i64,
    /// Length of the shared path when this branch was created.
    depth: usize,
    /// Position this branch took, if it was created by a take.
    taken: Option<usize>,
}

/// Finds every set of input positions whose values add up to `target`.
///
/// Each combination is returned as its values in input order. Duplicate
/// values are distinct positions, so equal-valued combinations can repeat.
/// A branch is recorded as soon as its sum reaches `target` and is not
/// extended further.
///
/// Branches are dropped as soon as the running sum would overshoot, or when
/// even every remaining value could not reach `target`. Sorting the input in
/// descending order lets both prunes fire early.
///
/// Fails if `target` or any value is negative.
#[tracing::instrument(level = "debug", skip(values), fields(len = values.len()))]
pub fn combinations(target: i64, values: &[i64]) -> Result<Vec<Vec<i64>>> {
    if target < 0 {
        return Err(Error::NegativeTarget(target));
    }
    if let Some((position, &value)) = values.iter().enumerate().find(|&(_, &v)| v < 0) {
        return Err(Error::NegativeValue { position, value });
    }

    // remaining[i] is the sum of values[i..]
    let mut remaining = vec![0i64; values.len() + 1];
    for position in (0..values.len()).rev() {
        remaining[position] = remaining[position + 1].saturating_add(values[position]);
    }

    let mut found = Vec::new();
    let mut path: Vec<usize> = Vec::with_capacity(values.len());
    let mut stack = vec![Branch {
        next: 0,
        sum: 0,
        depth: 0,
        taken: None,
    }];

    while let Some(branch) = stack.pop() {
        path.truncate(branch.depth);
        if let Some(position) = branch.taken {
            path.push(position);
        }

        if branch.sum == target {
            found.push(path.iter().map(|&position| values[position]).collect());
            continue;
        }

        // even taking everything left falls short (also covers running out)
        if branch.sum.saturating_add(remaining[branch.next]) < target {
            continue;
        }

        let depth = path.len();
        let with_value = branch.sum.saturating_add(values[branch.next]);

        // push the skip first so the take is explored first
        stack.push(Branch {
            next: branch.next + 1,
            sum: branch.sum,
            depth,
            taken: None,
        });
        if with_value <= target {
            stack.push(Branch {
                next: branch.next + 1,
                sum: with_value,
                depth,
                taken: Some(branch.next),
            });
        }
    }

    tracing::debug!(found = found.len(), "subset-sum search finished");
    Ok(found)
}

/// Every way of choosing `k` positions from a slice, as values in input order.
///
/// Produced in lexicographic order of positions; exactly C(n, k) items.
#[derive(Clone, Debug)]
pub struct Selections<'a, T> {
    values: &'a [T],
    indices: Vec<usize>,
    exhausted: bool,
}

impl<T> Selections<'_, T> {
    /// Moves `indices` to the next combination, or marks the end.
    fn advance(&mut self) {
        let n = self.values.len();
        let k = self.indices.len();

        // rightmost slot that can still move right
        let Some(slot) = (0..k).rev().find(|&slot| self.indices[slot] < n - k + slot) else {
            self.exhausted = true;
            return;
        };

        self.indices[slot] += 1;
        for later in slot + 1..k {
            self.indices[later] = self.indices[later - 1] + 1;
        }
    }
}

impl<T: Clone> Iterator for Selections<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.exhausted {
            return None;
        }

        let selection = self
            .indices
            .iter()
            .map(|&index| self.values[index].clone())
            .collect();
        self.advance();
        Some(selection)
    }
}

/// Starts enumerating the `k`-element selections of `values`.
///
/// `k == 0` yields a single empty selection. Fails if `k` exceeds the
/// number of values.
pub fn selections<T: Clone>(values: &[T], k: usize) -> Result<Selections<'_, T>> {
    if k > values.len() {
        return Err(Error::SelectionTooLarge {
            k,
            len: values.len(),
        });
    }

    Ok(Selections {
        values,
        indices: (0..k).collect(),
        exhausted: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: u64, k: u64) -> u64 {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn test_zero_target_yields_only_empty_combination() {
        assert_eq!(combinations(0, &[3, 1, 4]).unwrap(), vec![Vec::<i64>::new()]);
        assert_eq!(combinations(0, &[]).unwrap(), vec![Vec::<i64>::new()]);
    }

    #[test]
    fn test_container_combinations() {
        let found = combinations(25, &[20, 15, 10, 5, 5]).unwrap();

        assert_eq!(
            found,
            vec![vec![20, 5], vec![20, 5], vec![15, 10], vec![15, 5, 5]]
        );

        let fewest = found.iter().map(Vec::len).min().unwrap();
        assert_eq!(fewest, 2);
        assert_eq!(found.iter().filter(|c| c.len() == fewest).count(), 3);
    }

    #[test]
    fn test_unsorted_input_finds_the_same_sets() {
        let mut sorted: Vec<Vec<i64>> = combinations(25, &[5, 10, 20, 5, 15])
            .unwrap()
            .into_iter()
            .map(|mut c| {
                c.sort_unstable();
                c
            })
            .collect();
        sorted.sort();

        assert_eq!(
            sorted,
            vec![vec![5, 5, 15], vec![5, 20], vec![5, 20], vec![10, 15]]
        );
    }

    #[test]
    fn test_no_combination_is_empty_not_error() {
        assert!(combinations(100, &[20, 15, 10]).unwrap().is_empty());
        assert!(combinations(7, &[4, 4]).unwrap().is_empty());
    }

    #[test]
    fn test_every_combination_hits_target() {
        let weights = [11, 10, 9, 8, 7, 5, 4, 3, 2, 1];
        let found = combinations(20, &weights).unwrap();

        assert!(!found.is_empty());
        for combination in &found {
            assert_eq!(combination.iter().sum::<i64>(), 20, "{combination:?}");
        }
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        assert!(matches!(combinations(-1, &[1]), Err(Error::NegativeTarget(-1))));
        assert!(matches!(
            combinations(5, &[3, -2]),
            Err(Error::NegativeValue {
                position: 1,
                value: -2
            })
        ));
    }

    #[test]
    fn test_selections_of_two_from_three() {
        let chosen: Vec<Vec<i32>> = selections(&[1, 2, 3], 2).unwrap().collect();
        assert_eq!(chosen, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn test_selection_counts_match_binomial() {
        let values: Vec<u8> = (0..7).collect();
        for k in 0..=values.len() {
            let count = selections(&values, k).unwrap().count() as u64;
            assert_eq!(count, binomial(7, k as u64), "wrong count for k={k}");
        }
    }

    #[test]
    fn test_empty_selection_and_full_selection() {
        let none: Vec<Vec<char>> = selections(&['a', 'b'], 0).unwrap().collect();
        assert_eq!(none, vec![Vec::<char>::new()]);

        let all: Vec<Vec<char>> = selections(&['a', 'b'], 2).unwrap().collect();
        assert_eq!(all, vec![vec!['a', 'b']]);
    }

    #[test]
    fn test_selections_keep_duplicate_positions() {
        let chosen: Vec<Vec<i32>> = selections(&[5, 5, 5], 2).unwrap().collect();
        assert_eq!(chosen.len(), 3);
        assert!(chosen.iter().all(|pair| pair == &vec![5, 5]));
    }

    #[test]
    fn test_oversized_selection_is_rejected() {
        assert!(matches!(
            selections(&[1, 2], 3),
            Err(Error::SelectionTooLarge { k: 3, len: 2 })
        ));
    }
}
