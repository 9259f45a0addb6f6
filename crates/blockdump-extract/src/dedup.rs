use serde::Serialize;

/// A per-state attribute channel: one value shared by every state, or one
/// value per state in state index order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Channel<T> {
    Uniform(T),
    PerState(Vec<T>),
}

/// Collapses `values` to [`Channel::Uniform`] when every element is equal.
/// Anything else is returned untouched; there is no partial compaction.
pub fn dedup<T: PartialEq>(mut values: Vec<T>) -> Channel<T> {
    if values.windows(2).all(|w| w[0] == w[1])
        && let Some(v) = values.pop()
    {
        return Channel::Uniform(v);
    }
    Channel::PerState(values)
}
