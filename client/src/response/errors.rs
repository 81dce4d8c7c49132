use serde::Serialize;
use std::ops::Deref;

/// Ordered, non-empty sequence of errors carried by a failed response.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct Errors<E>(Vec<E>);

impl<E> Errors<E> {
    pub fn single(error: E) -> Self {
        Self(vec![error])
    }

    /// Returns `None` for an empty sequence.
    pub fn new(errors: Vec<E>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn first(&self) -> &E {
        // non-empty by construction
        &self.0[0]
    }

    pub fn into_vec(self) -> Vec<E> {
        self.0
    }

    /// Applies `f` to every error, keeping order.
    pub fn map<E2, F>(self, f: F) -> Errors<E2>
    where
        F: FnMut(E) -> E2,
    {
        Errors(self.0.into_iter().map(f).collect())
    }
}

impl<E> Deref for Errors<E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.0
    }
}

impl<E> From<E> for Errors<E> {
    fn from(error: E) -> Self {
        Self::single(error)
    }
}

impl<E> From<Errors<E>> for Vec<E> {
    fn from(errors: Errors<E>) -> Self {
        errors.0
    }
}

impl<E> IntoIterator for Errors<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Errors<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
