// vim: tw=80
//! Single-argument validators
//!
//! An [`Expect`] is what a test author writes for one argument of a setup
//! pattern: either an exact value or a [`Matcher`].  Binding it to a
//! parameter name and position produces an [`ArgumentValidator`].

use predicates::{function, Predicate};
use predicates_tree::CaseTreeExt;
use std::{any, fmt, marker::PhantomData, rc::Rc};

use crate::Value;

/// Type-erased predicate over a [`Value`].
trait ValuePredicate {
    fn eval(&self, value: &Value) -> bool;

    /// Describe why `value` is rejected, or `None` if it is accepted.
    fn explain(&self, value: &Value) -> Option<String>;

    fn describe(&self) -> String;
}

/// Adapts a `Predicate<T>` to values of unknown type.  Values that aren't a
/// `T` are rejected.
struct Typed<P, T: ?Sized> {
    pred: P,
    _t: PhantomData<fn(&T)>,
}

impl<P, T> ValuePredicate for Typed<P, T>
    where P: Predicate<T>, T: 'static
{
    fn eval(&self, value: &Value) -> bool {
        value.downcast_ref::<T>()
            .map(|t| self.pred.eval(t))
            .unwrap_or(false)
    }

    fn explain(&self, value: &Value) -> Option<String> {
        match value.downcast_ref::<T>() {
            None => Some(format!("expected a {}, got {:?} ({})",
                                 any::type_name::<T>(), value,
                                 value.type_name())),
            Some(t) => self.pred.find_case(false, t)
                .map(|case| case.tree().to_string())
        }
    }

    fn describe(&self) -> String {
        self.pred.to_string()
    }
}

struct Anything;

impl ValuePredicate for Anything {
    fn eval(&self, _value: &Value) -> bool {
        true
    }

    fn explain(&self, _value: &Value) -> Option<String> {
        None
    }

    fn describe(&self) -> String {
        String::from("any")
    }
}

/// A predicate over a single argument.
///
/// Panics raised by the wrapped predicate are not caught; they propagate out
/// of the mock call that evaluated it.
#[derive(Clone)]
pub struct Matcher(Rc<dyn ValuePredicate>);

impl Matcher {
    /// Accept any value at all.
    pub fn any() -> Self {
        Matcher(Rc::new(Anything))
    }

    /// Accept values of type `T` for which `pred` holds.
    ///
    /// # Examples
    /// ```
    /// # use dynamock::*;
    /// let m = Matcher::new::<_, u32>(predicate::gt(10u32));
    /// assert!(m.eval(&Value::new(11u32)));
    /// assert!(!m.eval(&Value::new(11i32)));
    /// ```
    pub fn new<P, T>(pred: P) -> Self
        where P: Predicate<T> + 'static, T: 'static
    {
        Matcher(Rc::new(Typed{pred, _t: PhantomData}))
    }

    /// Accept values of type `T` for which the closure returns true.
    pub fn from_fn<F, T>(f: F) -> Self
        where F: Fn(&T) -> bool + 'static, T: 'static
    {
        Matcher::new(function::function(f))
    }

    pub fn eval(&self, value: &Value) -> bool {
        self.0.eval(value)
    }

    /// Why `value` fails this matcher, or `None` if it passes.
    pub fn explain(&self, value: &Value) -> Option<String> {
        self.0.explain(value)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.describe())
    }
}

/// The expectation for one argument of a setup pattern.
#[derive(Clone, Debug)]
pub enum Expect {
    /// The argument must equal this value.
    Exact(Value),
    /// The argument must satisfy this matcher.
    Predicate(Matcher),
}

impl Expect {
    pub fn any() -> Self {
        Expect::Predicate(Matcher::any())
    }

    pub fn eq<T>(t: T) -> Self
        where T: Clone + PartialEq + fmt::Debug + 'static
    {
        Expect::Exact(Value::new(t))
    }

    /// Shorthand for [`Matcher::new`].
    pub fn pred<P, T>(pred: P) -> Self
        where P: Predicate<T> + 'static, T: 'static
    {
        Expect::Predicate(Matcher::new(pred))
    }

    /// Shorthand for [`Matcher::from_fn`].
    pub fn matching<F, T>(f: F) -> Self
        where F: Fn(&T) -> bool + 'static, T: 'static
    {
        Expect::Predicate(Matcher::from_fn(f))
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        match self {
            Expect::Exact(expected) => expected == value,
            Expect::Predicate(m) => m.eval(value)
        }
    }

    fn explain(&self, value: &Value) -> Option<String> {
        match self {
            Expect::Exact(expected) if expected == value => None,
            Expect::Exact(expected) =>
                Some(format!("expected {expected:?}, got {value:?}")),
            Expect::Predicate(m) => m.explain(value)
        }
    }
}

/// Anything that can stand for one argument of a setup pattern: a plain
/// value (matched exactly), an [`Expect`], a [`Matcher`], or an existing
/// [`ArgumentValidator`] (whose binding is discarded).
pub trait IntoExpect {
    fn into_expect(self) -> Expect;
}

impl<T> IntoExpect for T
    where T: Clone + PartialEq + fmt::Debug + 'static
{
    fn into_expect(self) -> Expect {
        Expect::Exact(Value::new(self))
    }
}

impl IntoExpect for Expect {
    fn into_expect(self) -> Expect {
        self
    }
}

impl IntoExpect for Matcher {
    fn into_expect(self) -> Expect {
        Expect::Predicate(self)
    }
}

impl IntoExpect for ArgumentValidator {
    fn into_expect(self) -> Expect {
        self.expect
    }
}

/// Checks one argument, identified by name and by position.
#[derive(Clone, Debug)]
pub struct ArgumentValidator {
    name: String,
    position: usize,
    expect: Expect,
}

impl ArgumentValidator {
    pub fn new(name: impl Into<String>, position: usize, expect: Expect)
        -> Self
    {
        ArgumentValidator{name: name.into(), position, expect}
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expect(&self) -> &Expect {
        &self.expect
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.expect.is_valid(value)
    }

    /// Describe why `value` is rejected, or `None` if it is accepted.
    pub fn explain(&self, value: &Value) -> Option<String> {
        self.expect.explain(value)
            .map(|reason| format!("{}: {}", self.name, reason))
    }
}

impl fmt::Display for ArgumentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expect {
            Expect::Exact(v) => write!(f, "{}={:?}", self.name, v),
            Expect::Predicate(m) => write!(f, "{}: {:?}", self.name, m)
        }
    }
}

/// Bind a raw pattern argument to a parameter.
///
/// Validators and matchers are reused as they are; any other value becomes an
/// exact-value validator.
pub fn argument_validator_from_argument<A: IntoExpect>(
    argument: A,
    name: &str,
    position: usize) -> ArgumentValidator
{
    ArgumentValidator::new(name, position, argument.into_expect())
}

#[cfg(test)]
mod t {
    use super::*;
    use predicates::prelude::predicate;

    mod exact {
        use super::*;

        #[test]
        fn equal() {
            let v = argument_validator_from_argument(5i32, "x", 0);
            assert!(v.is_valid(&Value::new(5i32)));
        }

        #[test]
        fn not_equal() {
            let v = argument_validator_from_argument(5i32, "x", 0);
            assert!(!v.is_valid(&Value::new(6i32)));
        }

        #[test]
        fn type_distinct() {
            let v = argument_validator_from_argument(5i32, "x", 0);
            assert!(!v.is_valid(&Value::new(5i64)));
            assert!(!v.is_valid(&Value::new(5u32)));
            assert!(!v.is_valid(&Value::new("5")));
        }

        #[test]
        fn explain() {
            let v = argument_validator_from_argument("abc", "url", 1);
            assert_eq!(None, v.explain(&Value::new("abc")));
            assert_eq!(Some("url: expected \"abc\", got \"abd\"".to_owned()),
                       v.explain(&Value::new("abd")));
        }
    }

    mod predicate_validator {
        use super::*;

        #[test]
        fn closure() {
            let v = argument_validator_from_argument(
                Expect::matching(|x: &u32| x % 2 == 0), "x", 0);
            assert!(v.is_valid(&Value::new(4u32)));
            assert!(!v.is_valid(&Value::new(5u32)));
        }

        #[test]
        fn explain_predicate() {
            let v = argument_validator_from_argument(
                Expect::pred::<_, i32>(predicate::lt(3i32)), "n", 0);
            assert_eq!(None, v.explain(&Value::new(1i32)));
            let reason = v.explain(&Value::new(5i32)).unwrap();
            assert!(reason.starts_with("n: "), "{}", reason);
        }

        #[test]
        fn explain_wrong_type() {
            let v = argument_validator_from_argument(
                Expect::pred::<_, i32>(predicate::lt(3i32)), "n", 0);
            let reason = v.explain(&Value::new("x")).unwrap();
            assert!(reason.contains("expected a i32"), "{}", reason);
        }

        #[test]
        #[should_panic(expected = "predicate blew up")]
        fn panics_propagate() {
            let v = argument_validator_from_argument(
                Expect::matching(|_: &u32| -> bool {
                    panic!("predicate blew up")
                }),
                "x", 0);
            v.is_valid(&Value::new(0u32));
        }

        #[test]
        fn predicates_crate() {
            let v = argument_validator_from_argument(
                Expect::pred::<_, u8>(predicate::in_iter(vec![1u8, 2, 3])), "x", 0);
            assert!(v.is_valid(&Value::new(2u8)));
            assert!(!v.is_valid(&Value::new(4u8)));
        }

        #[test]
        fn wrong_type_is_rejected() {
            let v = argument_validator_from_argument(
                Expect::pred::<_, u32>(predicate::gt(0u32)), "x", 0);
            assert!(!v.is_valid(&Value::new(1i32)));
        }
    }

    #[test]
    fn any() {
        let v = argument_validator_from_argument(Expect::any(), "x", 3);
        assert!(v.is_valid(&Value::new(())));
        assert!(v.is_valid(&Value::new("anything")));
    }

    #[test]
    fn rebind_existing_validator() {
        let orig = ArgumentValidator::new("a", 0, Expect::eq(1u8));
        let v = argument_validator_from_argument(orig, "b", 4);
        assert_eq!("b", v.name());
        assert_eq!(4, v.position());
        assert!(v.is_valid(&Value::new(1u8)));
    }

    #[test]
    fn display() {
        let v = ArgumentValidator::new("b", 1, Expect::eq(5i32));
        assert_eq!("b=5", v.to_string());
        let v = ArgumentValidator::new("self", 0, Expect::any());
        assert_eq!("self: any", v.to_string());
    }
}
