//! Error chains: many failures reported as one error.
//!
//! An [`ErrorChain`] keeps its errors in insertion order. The first element is
//! the primary error: it leads the message and is what [`Error::source`]
//! returns. Searching ([`ErrorChain::contains`], [`ErrorChain::find`]) treats
//! every element as an independent branch and walks each element's own cause
//! chain, descending into nested chains as further branches.

use std::error::Error;
use std::fmt;

/// Boxed error as stored in a chain.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Ordered collection of errors that is itself an error.
#[derive(Debug, Default)]
pub struct ErrorChain {
    errors: Vec<BoxError>,
}

impl ErrorChain {
    /// Create a chain from errors in order. An empty chain is valid and has an empty message.
    pub fn new(errors: Vec<BoxError>) -> Self {
        Self { errors }
    }

    /// The stored errors, exactly as given.
    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<BoxError> {
        self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Error + Send + Sync + 'static)> {
        self.errors.iter().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First error of the chain, if any.
    pub fn primary(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.errors.first().map(|e| e.as_ref())
    }

    /// Report whether any error in the chain, or any of its causes, equals `target`.
    ///
    /// Stops at the first match.
    pub fn contains<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        self.iter().any(|err| error_is(err, target))
    }

    /// Find the first error of type `E`, in element order, searching each
    /// element's cause chain before moving on to the next element.
    pub fn find<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.iter().find_map(|err| error_find::<E>(err))
    }

    /// Store the first error of type `E` in `slot` and return `true`.
    ///
    /// Leaves `slot` untouched and returns `false` when nothing matches.
    pub fn extract_into<'a, E>(&'a self, slot: &mut Option<&'a E>) -> bool
    where
        E: Error + 'static,
    {
        match self.find::<E>() {
            Some(found) => {
                *slot = Some(found);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for ErrorChain {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors
            .first()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<Vec<BoxError>> for ErrorChain {
    fn from(errors: Vec<BoxError>) -> Self {
        Self::new(errors)
    }
}

impl<E> FromIterator<E> for ErrorChain
where
    E: Into<BoxError>,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for ErrorChain {
    type Item = BoxError;
    type IntoIter = std::vec::IntoIter<BoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorChain {
    type Item = &'a BoxError;
    type IntoIter = std::slice::Iter<'a, BoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Report whether `err` or anything reachable from it equals `target`.
///
/// Follows [`Error::source`] links; an [`ErrorChain`] on the way is searched
/// branch by branch.
pub fn error_is<E>(err: &(dyn Error + 'static), target: &E) -> bool
where
    E: Error + PartialEq + 'static,
{
    walk(err, &mut |e| e.downcast_ref::<E>().filter(|found| *found == target))
        .is_some()
}

/// Find the first error of type `E` reachable from `err`, depth first.
pub fn error_find<'a, E>(err: &'a (dyn Error + 'static)) -> Option<&'a E>
where
    E: Error + 'static,
{
    walk(err, &mut |e| e.downcast_ref::<E>())
}

fn walk<'a, T, F>(err: &'a (dyn Error + 'static), visit: &mut F) -> Option<T>
where
    F: FnMut(&'a (dyn Error + 'static)) -> Option<T>,
{
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = visit(e) {
            return Some(found);
        }
        if let Some(chain) = e.downcast_ref::<ErrorChain>() {
            // a chain's source is its first element; walk all branches instead
            return chain
                .errors
                .iter()
                .find_map(|branch| walk(branch.as_ref() as &(dyn Error + 'static), &mut *visit));
        }
        current = e.source();
    }
    None
}
