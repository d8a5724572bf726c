// vim: tw=80
//! Mocking a single function

use std::cell::RefCell;
use tracing::{debug, trace};

use crate::{
    BindError,
    BoundCall,
    CallArgs,
    Expect,
    MockError,
    Result,
    Setup,
    Signature,
    SignatureValidator,
    Value,
    VerifiedCalls,
    signature_validator_from_arguments
};

/// What a mock does with a call that no setup accepts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Behavior {
    /// Return the unmocked-call sentinel, `Ok(None)`.
    #[default]
    Loose,
    /// Fail with [`MockError::NoMatch`].
    Strict,
}

/// A mock of one function, built from its [`Signature`].
///
/// Setups are consulted newest first, so a broad setup registered early can
/// be overridden by a narrower one registered later.
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let sig = Signature::new("f").param("a").param_with_default("b", 2);
/// let mut f = FunctionMock::new(sig);
/// f.setup(pattern!(1)).unwrap().returns_const("one");
/// f.setup(pattern!(1, 5)).unwrap().returns_const("one-five");
///
/// assert_eq!(f.call(args!(1)).unwrap(), Some(Value::new("one")));
/// assert_eq!(f.call(args!(1, 5)).unwrap(), Some(Value::new("one-five")));
/// assert_eq!(f.call(args!(2)).unwrap(), None);
/// ```
#[derive(Debug)]
pub struct FunctionMock {
    signature: Signature,
    setups: Vec<Setup>,
    calls: RefCell<Vec<BoundCall>>,
    behavior: Behavior,
}

impl FunctionMock {
    pub fn new(signature: Signature) -> Self {
        FunctionMock {
            signature,
            setups: Vec::new(),
            calls: RefCell::new(Vec::new()),
            behavior: Behavior::default()
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn set_behavior(&mut self, behavior: Behavior) {
        self.behavior = behavior;
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn setups(&self) -> &[Setup] {
        &self.setups
    }

    fn mismatch(&self, reason: BindError) -> MockError {
        MockError::SignatureMismatch {
            signature: self.signature.to_string(),
            reason
        }
    }

    /// Turn a setup pattern into a validator against this signature.
    fn validator_for(&self, pattern: CallArgs<Expect>)
        -> Result<SignatureValidator>
    {
        let pattern = self.signature.bind_partial(pattern)
            .map_err(|e| self.mismatch(e))?;
        signature_validator_from_arguments(&self.signature.param_names(),
                                           pattern)
    }

    /// Register a new setup.  It must be given a return value with
    /// [`Setup::returns`] before it can be matched.
    ///
    /// Omitted parameters that have defaults are expected to take their
    /// default values.  Omitted required parameters match anything.
    pub fn setup(&mut self, pattern: CallArgs<Expect>) -> Result<&mut Setup> {
        let validator = self.validator_for(pattern)?;
        debug!(function = self.name(), pattern = %validator,
               index = self.setups.len(), "registered setup");
        let setup = Setup::new(self.name(), validator);
        self.setups.push(setup);
        let l = self.setups.len();
        Ok(&mut self.setups[l - 1])
    }

    /// Bind `args` exactly as a call would, without recording or matching.
    pub fn bind(&self, args: CallArgs<Value>) -> Result<BoundCall> {
        self.signature.bind(args).map_err(|e| self.mismatch(e))
    }

    /// Could the real function be called with these arguments?
    pub fn arguments_valid(&self, args: CallArgs<Value>) -> bool {
        self.signature.bind(args).is_ok()
    }

    /// Simulate calling the real function.
    ///
    /// Returns `Ok(None)` when no setup matches and the mock is
    /// [`Behavior::Loose`].  That is distinct from a setup that returns `()`.
    pub fn call(&self, args: CallArgs<Value>) -> Result<Option<Value>> {
        let call = self.bind(args)?;
        self.calls.borrow_mut().push(call.clone());

        let matched = self.setups.iter()
            .enumerate()
            .rev()
            .find(|(index, setup)| {
                let ok = setup.is_valid(&call);
                if !ok {
                    trace!(function = self.name(), index, %call,
                           reasons = ?setup.explain(&call),
                           "setup rejected call");
                }
                ok
            });

        match matched {
            Some((index, setup)) => {
                debug!(function = self.name(), index, %call,
                       "call matched setup");
                setup.get_return_value(&call).map(Some)
            },
            None if self.behavior == Behavior::Strict => {
                Err(MockError::NoMatch {
                    function: self.signature.to_string(),
                    call: call.to_string()
                })
            },
            None => {
                debug!(function = self.name(), %call, "unmocked call");
                Ok(None)
            }
        }
    }

    /// A snapshot of every call received so far, after binding.
    pub fn calls(&self) -> Vec<BoundCall> {
        self.calls.borrow().clone()
    }

    /// Count the received calls that `pattern` accepts.  The pattern is
    /// interpreted the same way as in [`setup`](Self::setup).
    pub fn verify(&self, pattern: CallArgs<Expect>) -> Result<VerifiedCalls> {
        let validator = self.validator_for(pattern)?;
        let count = self.calls.borrow()
            .iter()
            .filter(|c| validator.is_valid(c.positional(), c.named()))
            .count();
        Ok(VerifiedCalls::new(self.signature.to_string(),
                              validator.to_string(), count))
    }

    /// Forget every setup and every recorded call.
    pub fn checkpoint(&mut self) {
        self.setups.clear();
        self.calls.get_mut().clear();
    }
}
