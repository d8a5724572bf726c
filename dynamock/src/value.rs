// vim: tw=80
//! Type-erased values passed into and returned from mocked functions.

use downcast::{downcast, Any};
use std::{any, fmt};

/// Object-safe face of every type that can travel through a mock.
trait AnyValue: Any {
    fn clone_box(&self) -> Box<dyn AnyValue>;
    fn eq_value(&self, other: &dyn AnyValue) -> bool;
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn value_type_name(&self) -> &'static str;
}
downcast!(dyn AnyValue);

impl<T> AnyValue for T
    where T: Clone + PartialEq + fmt::Debug + 'static
{
    fn clone_box(&self) -> Box<dyn AnyValue> {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn AnyValue) -> bool {
        other.downcast_ref::<T>()
            .map(|o| o == self)
            .unwrap_or(false)
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn value_type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// An owned argument or return value of any `Clone + PartialEq + Debug`
/// type.
///
/// Two `Value`s are equal only if they hold the same concrete type and that
/// type's own `PartialEq` says so.  In particular `1i32` and `1i64` are
/// different values.
///
/// # Examples
/// ```
/// # use dynamock::Value;
/// let v = Value::new(42u32);
/// assert_eq!(v.downcast_ref::<u32>(), Some(&42));
/// assert_ne!(v, Value::new(42u64));
/// ```
pub struct Value(Box<dyn AnyValue>);

impl Value {
    /// Wrap `t`.  Wrapping a `Value` returns a copy of it rather than nesting.
    pub fn new<T>(t: T) -> Self
        where T: Clone + PartialEq + fmt::Debug + 'static
    {
        if let Some(v) = (&t as &dyn any::Any).downcast_ref::<Value>() {
            return v.clone();
        }
        Value(Box::new(t))
    }

    /// Does this value hold a `T`?
    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>().ok()
    }

    /// Take the inner `T` back out, or get the `Value` back unchanged if it
    /// holds some other type.
    pub fn downcast<T: 'static>(self) -> Result<T, Value> {
        self.0.downcast::<T>()
            .map(|b| *b)
            .map_err(|e| Value(e.into_object()))
    }

    /// Name of the concrete type held, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.0.value_type_name()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Value(self.0.clone_box())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_value(&*other.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_value(f)
    }
}

/// Placeholder bound to the leading `self` parameter of an instance method.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct Receiver;

impl fmt::Debug for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("self")
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[derive(Clone, Debug)]
    struct AlwaysDifferent;
    impl PartialEq for AlwaysDifferent {
        fn eq(&self, _other: &Self) -> bool {
            false
        }
    }

    #[test]
    fn clone_is_equal() {
        let v = Value::new(String::from("abc"));
        assert_eq!(v.clone(), v);
    }

    #[test]
    fn debug_uses_inner_value() {
        assert_eq!("\"abc\"", format!("{:?}", Value::new("abc")));
        assert_eq!("self", format!("{:?}", Value::new(Receiver)));
    }

    #[test]
    fn downcast_mismatch_returns_value() {
        let v = Value::new(5u8);
        let v = v.downcast::<i32>().unwrap_err();
        assert_eq!(Ok(5u8), v.downcast::<u8>().map_err(|_| ()));
    }

    #[test]
    fn equality_is_delegated() {
        let v = Value::new(AlwaysDifferent);
        assert!(v != v.clone());
    }

    #[test]
    fn no_nesting() {
        let inner = Value::new(7i32);
        let outer = Value::new(inner.clone());
        assert_eq!(inner, outer);
        assert!(outer.is::<i32>());
    }

    #[test]
    fn type_distinct_values() {
        assert_ne!(Value::new(1i32), Value::new(1i64));
        assert_ne!(Value::new("1"), Value::new(String::from("1")));
        assert_eq!(Value::new(()), Value::new(()));
    }

    #[test]
    fn type_name() {
        assert_eq!("u16", Value::new(3u16).type_name());
    }
}
