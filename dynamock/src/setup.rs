// vim: tw=80
//! A setup pairs an argument pattern with the value to return when it
//! matches.

use std::{cell::RefCell, fmt};

use crate::{
    BoundCall,
    MockError,
    Result,
    SignatureValidator,
    Value
};

/// Return function for a setup
enum Rfunc {
    /// `returns` hasn't been called yet
    Unbound,
    Mut(Box<dyn FnMut(&BoundCall) -> Value>),
}

/// One registered (argument pattern, return value) rule of a
/// [`FunctionMock`](crate::FunctionMock).
pub struct Setup {
    function: String,
    validator: SignatureValidator,
    rfunc: RefCell<Rfunc>,
}

impl Setup {
    /// Create an unbound setup for the function named `function`.
    pub fn new(function: impl Into<String>, validator: SignatureValidator)
        -> Self
    {
        Setup {
            function: function.into(),
            validator,
            rfunc: RefCell::new(Rfunc::Unbound)
        }
    }

    pub fn validator(&self) -> &SignatureValidator {
        &self.validator
    }

    /// Does this setup accept the call?
    pub fn is_valid(&self, call: &BoundCall) -> bool {
        self.validator.is_valid(call.positional(), call.named())
    }

    /// Reasons this setup rejects the call, if any.
    pub fn explain(&self, call: &BoundCall) -> Vec<String> {
        self.validator.explain(call.positional(), call.named())
    }

    /// Has a return value been bound yet?
    pub fn is_bound(&self) -> bool {
        matches!(*self.rfunc.borrow(), Rfunc::Mut(_))
    }

    /// Supply a closure that computes the return value from the bound call.
    ///
    /// Calling this again replaces the previous closure.
    pub fn returns<F, O>(&mut self, mut f: F) -> &mut Self
        where F: FnMut(&BoundCall) -> O + 'static,
              O: Clone + PartialEq + fmt::Debug + 'static
    {
        let rfunc = move |call: &BoundCall| Value::new(f(call));
        *self.rfunc.get_mut() = Rfunc::Mut(Box::new(rfunc));
        self
    }

    /// Return a clone of `c` from every matching call.
    pub fn returns_const<O>(&mut self, c: O) -> &mut Self
        where O: Clone + PartialEq + fmt::Debug + 'static
    {
        self.returns(move |_| c.clone())
    }

    /// Produce the return value for `call`.
    ///
    /// Fails with [`MockError::UnboundSetup`] if [`returns`](Self::returns)
    /// was never called.
    pub fn get_return_value(&self, call: &BoundCall) -> Result<Value> {
        match &mut *self.rfunc.borrow_mut() {
            Rfunc::Unbound => Err(MockError::UnboundSetup {
                function: self.function.clone(),
                setup: self.validator.to_string()
            }),
            Rfunc::Mut(f) => Ok(f(call))
        }
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("function", &self.function)
            .field("pattern", &self.validator.to_string())
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use crate::{args, pattern, signature_validator_from_arguments, Signature};

    fn sig() -> Signature {
        Signature::new("f").param("a").param_with_default("b", 2)
    }

    fn setup_for(p: crate::CallArgs<crate::Expect>) -> Setup {
        let sig = sig();
        let p = sig.bind_partial(p).unwrap();
        let sv = signature_validator_from_arguments(&sig.param_names(), p)
            .unwrap();
        Setup::new("f", sv)
    }

    #[test]
    fn delegates_to_validator() {
        let s = setup_for(pattern!(1));
        assert!(s.is_valid(&sig().bind(args!(1)).unwrap()));
        assert!(!s.is_valid(&sig().bind(args!(2)).unwrap()));
    }

    #[test]
    fn explain() {
        let s = setup_for(pattern!(1));
        let reasons = s.explain(&sig().bind(args!(1, 3)).unwrap());
        assert_eq!(reasons, vec!["b: expected 2, got 3".to_owned()]);
    }

    #[test]
    fn generator_sees_defaults() {
        let mut s = setup_for(pattern!(1));
        s.returns(|call| *call.arg::<i32>("a").unwrap() +
                         *call.arg::<i32>("b").unwrap());
        let r = s.get_return_value(&sig().bind(args!(1)).unwrap()).unwrap();
        assert_eq!(r, Value::new(3));
    }

    #[test]
    fn generator_may_keep_state() {
        let mut s = setup_for(pattern!());
        let mut n = 0u32;
        s.returns(move |_| { n += 1; n });
        let call = sig().bind(args!(0)).unwrap();
        assert_eq!(s.get_return_value(&call).unwrap(), Value::new(1u32));
        assert_eq!(s.get_return_value(&call).unwrap(), Value::new(2u32));
    }

    #[test]
    fn last_returns_wins() {
        let mut s = setup_for(pattern!(1));
        s.returns_const("first").returns_const("second");
        let r = s.get_return_value(&sig().bind(args!(1)).unwrap()).unwrap();
        assert_eq!(r, Value::new("second"));
    }

    #[test]
    fn unbound() {
        let s = setup_for(pattern!(1));
        assert!(!s.is_bound());
        let e = s.get_return_value(&sig().bind(args!(1)).unwrap())
            .unwrap_err();
        assert_eq!(e.to_string(),
            "setup (a=1, b=2) of f matched, but no return value was bound; \
            call `returns` first");
    }
}
