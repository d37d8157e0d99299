//! Explicit loading state
//!
//! An empty collection is a valid resolved value, so "not fetched yet" gets
//! its own variant instead of being modelled as an empty `Vec`.

use serde::Serialize;

/// A value that is either still loading or resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Loadable<T> {
    Loading,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Ready(value) => Loadable::Ready(f(value)),
            Self::Loading => Loadable::Loading,
        }
    }

    /// Ready only when both sides are ready
    pub fn zip<U>(self, other: Loadable<U>) -> Loadable<(T, U)> {
        match (self, other) {
            (Self::Ready(a), Loadable::Ready(b)) => Loadable::Ready((a, b)),
            _ => Loadable::Loading,
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ready_is_not_loading() {
        let empty: Loadable<Vec<u32>> = Loadable::Ready(vec![]);
        assert!(empty.is_ready());
        assert_eq!(empty.as_ready().map(Vec::len), Some(0));
    }

    #[test]
    fn test_zip_requires_both() {
        let a: Loadable<u32> = Loadable::Ready(1);
        assert_eq!(a.clone().zip(Loadable::<u32>::Loading), Loadable::Loading);
        assert_eq!(a.zip(Loadable::Ready("x")), Loadable::Ready((1, "x")));
    }

    #[test]
    fn test_map() {
        assert_eq!(Loadable::Ready(2).map(|v| v * 2), Loadable::Ready(4));
        assert_eq!(Loadable::<u32>::Loading.map(|v| v * 2), Loadable::Loading);
    }
}
