use std::collections::HashSet;
use std::hash::Hash;

/// Compute the set diff between current and desired link sets.
///
/// Returns `(to_add, to_remove)`. Replacing an association set this way is
/// idempotent: applying the same desired set twice yields no work the second
/// time.
pub fn diff<T: Eq + Hash + Copy>(current: &[T], desired: &[T]) -> (Vec<T>, Vec<T>) {
    let current_set: HashSet<T> = current.iter().copied().collect();
    let desired_set: HashSet<T> = desired.iter().copied().collect();

    let to_add = desired
        .iter()
        .copied()
        .filter(|id| !current_set.contains(id))
        .collect();
    let to_remove = current
        .iter()
        .copied()
        .filter(|id| !desired_set.contains(id))
        .collect();

    (to_add, to_remove)
}
