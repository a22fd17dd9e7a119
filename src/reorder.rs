//! Index arithmetic behind drag-and-drop reordering.

/// Returns a copy of `items` with the element at `from` removed and reinserted
/// at `to`. Out-of-range indices and `from == to` leave the order unchanged.
pub fn move_element<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from == to || from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

/// Resolves a drag gesture given by the ids of the dragged element and the
/// element it was dropped over.
pub fn move_by_id<T, K, F>(items: &[T], active: &K, over: Option<&K>, key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> &K,
{
    let Some(over) = over else {
        return items.to_vec();
    };
    let from = items.iter().position(|item| key(item) == active);
    let to = items.iter().position(|item| key(item) == over);
    match (from, to) {
        (Some(from), Some(to)) => move_element(items, from, to),
        _ => items.to_vec(),
    }
}
