pub use abai_utils_derive::trace_instrument;

mod macros;

/// Version of the running binary.
pub fn abai_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` with a mutable reference to `self`.
    fn with<X>(mut self, f: impl FnOnce(&mut Self) -> X) -> Self
    where
        Self: Sized,
    {
        f(&mut self);
        self
    }

    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use abai_utils::Apply;
    /// fn add_option(a: i32, b: Option<i32>) -> i32 {
    ///     a.apply_map(b, |slf, arg| slf + arg)
    /// }
    /// assert_eq!(add_option(1, None), 1);
    /// assert_eq!(add_option(1, Some(2)), 3);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_mutates_and_returns_value() {
        let v = vec![1, 2].with(|v| v.push(3));
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn assert_matches_accepts_guard() {
        let value: Result<u8, ()> = Ok(7);
        assert_matches!(value, Ok(x) if *x == 7);
    }

    #[test]
    #[should_panic(expected = "did not match pattern")]
    fn assert_matches_panics_on_mismatch() {
        let value: Option<u8> = None;
        assert_matches!(value, Some(_));
    }
}
