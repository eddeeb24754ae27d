//! Extracting the single element of a resolved path.
//!
//! [`by_dot`](crate::path::by_dot) always returns a list because a path may
//! match several values. When a field is known to be scalar, wrap the result
//! in [`one`].

use crate::error::{Cardinality, CerlError, Result};

/// Return the only element of `items`.
///
/// # Examples
///
/// ```
/// use cerl::singleton::one;
///
/// assert_eq!(one(vec![7]).unwrap(), 7);
/// assert!(one(Vec::<i32>::new()).is_err());
/// ```
///
/// # Errors
///
/// Returns [`CerlError::Cardinality`] with [`Cardinality::Empty`] for an empty
/// sequence and [`Cardinality::Multiple`] when there is more than one element.
pub fn one<T>(items: impl IntoIterator<Item = T>) -> Result<T> {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return Err(CerlError::Cardinality(Cardinality::Empty));
    };
    let extra = iter.count();
    if extra > 0 {
        return Err(CerlError::Cardinality(Cardinality::Multiple(extra + 1)));
    }
    Ok(first)
}
