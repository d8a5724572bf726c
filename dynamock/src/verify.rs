// vim: tw=80
//! Call-count verification

use crate::{MockError, Result};

/// The number of recorded calls that matched a verification pattern, as
/// returned by [`FunctionMock::verify`](crate::FunctionMock::verify).
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let f = FunctionMock::new(Signature::new("f").param("a"));
/// f.call(args!(1)).unwrap();
/// f.call(args!(2)).unwrap();
/// f.verify(pattern!(1)).unwrap().once().unwrap();
/// f.verify(pattern!(3)).unwrap().never().unwrap();
/// f.verify(pattern!(Expect::any())).unwrap().times(2).unwrap();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifiedCalls {
    function: String,
    pattern: String,
    count: usize,
}

impl VerifiedCalls {
    pub(crate) fn new(function: String, pattern: String, count: usize) -> Self
    {
        VerifiedCalls{function, pattern, count}
    }

    /// How many recorded calls matched.
    pub fn count(&self) -> usize {
        self.count
    }

    fn check(&self, ok: bool, expected: String) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(MockError::VerificationFailed {
                function: self.function.clone(),
                pattern: self.pattern.clone(),
                expected,
                actual: self.count
            })
        }
    }

    /// Exactly `n` calls matched.
    pub fn times(&self, n: usize) -> Result<()> {
        self.check(self.count == n, format!("exactly {n} times"))
    }

    /// Shortcut for [`times(1)`](Self::times).
    pub fn once(&self) -> Result<()> {
        self.times(1)
    }

    /// No call matched.
    pub fn never(&self) -> Result<()> {
        self.check(self.count == 0, String::from("never"))
    }

    /// Strictly more than `n` calls matched.
    pub fn more_than(&self, n: usize) -> Result<()> {
        self.check(self.count > n, format!("more than {n} times"))
    }

    /// At least `n` calls matched.
    pub fn at_least(&self, n: usize) -> Result<()> {
        self.check(self.count >= n, format!("at least {n} times"))
    }
}

#[cfg(test)]
mod t {
    use super::*;

    fn verified(count: usize) -> VerifiedCalls {
        VerifiedCalls::new("f(a)".to_owned(), "(a=1)".to_owned(), count)
    }

    #[test]
    fn times() {
        assert!(verified(2).times(2).is_ok());
        assert!(verified(2).times(3).is_err());
        assert!(verified(1).once().is_ok());
    }

    #[test]
    fn never() {
        assert!(verified(0).never().is_ok());
        let e = verified(1).never().unwrap_err();
        assert_eq!(e.to_string(),
            "expected f(a) to be called never with (a=1), but it was called \
            1 times");
    }

    #[test]
    fn more_than() {
        assert!(verified(3).more_than(2).is_ok());
        assert!(verified(2).more_than(2).is_err());
    }

    #[test]
    fn at_least() {
        assert!(verified(2).at_least(2).is_ok());
        assert!(verified(1).at_least(2).is_err());
    }

    #[test]
    fn failure_message() {
        let e = verified(0).times(2).unwrap_err();
        assert_eq!(e.to_string(),
            "expected f(a) to be called exactly 2 times with (a=1), but it \
            was called 0 times");
    }
}
