//! Sanitized positional integer arguments
//!
//! Call sites that accept an optional list of small integer arguments
//! (interface index, mode selectors) fetch them through an [`ArgIter`].
//! Every fetch consumes exactly one slot, so composing several reads is just
//! a matter of calling [`ArgIter::next_arg`] in order on the same iterator.

/// Smallest meaningful argument value
pub const ARG_MIN: i32 = 0;

/// Largest meaningful argument value
pub const ARG_MAX: i32 = 5;

/// Cursor over positional integer arguments
#[derive(Debug, Clone)]
pub struct ArgIter<I> {
    inner: I,
    consumed: usize,
}

impl<I: Iterator<Item = i32>> ArgIter<I> {
    /// Wrap an argument source
    pub fn new<A>(args: A) -> Self
    where
        A: IntoIterator<Item = i32, IntoIter = I>,
    {
        ArgIter {
            inner: args.into_iter(),
            consumed: 0,
        }
    }

    /// Fetch the next argument, substituting `default` when it is outside
    /// `ARG_MIN..=ARG_MAX` or missing
    pub fn next_arg(&mut self, default: i32) -> i32 {
        match self.inner.next() {
            Some(value) => {
                self.consumed += 1;
                if (ARG_MIN..=ARG_MAX).contains(&value) {
                    value
                } else {
                    log::debug!(
                        "Argument {} out of range ({}), using default {}",
                        self.consumed,
                        value,
                        default
                    );
                    default
                }
            }
            None => default,
        }
    }

    /// Number of argument slots fetched so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<I: Iterator<Item = i32>> From<I> for ArgIter<I> {
    fn from(inner: I) -> Self {
        ArgIter { inner, consumed: 0 }
    }
}
