// vim: tw=80
//! A call-interception engine for dynamically scripted test doubles.
//!
//! Dynamock mocks functions and interfaces described at runtime by a
//! [`Signature`]: an ordered list of parameter names, their default values,
//! and whether the function takes a receiver.  Arguments and return values
//! are type-erased [`Value`]s, so one mock can stand in for functions of any
//! shape.
//!
//! # Usage
//!
//! * Describe the function with a [`Signature`], or a whole interface with an
//!   [`InterfaceDescriptor`].  The [`#[interface]`](macro@interface) attribute
//!   builds the descriptor from a trait.
//! * Register setups.  Each setup is an argument pattern plus the value to
//!   return when a call matches it.
//! * Hand the mock to the code under test and call it.  The newest setup that
//!   accepts the call supplies the return value.  If none does, the call
//!   returns `None`, or fails if the mock is [`Behavior::Strict`].
//! * Optionally, [`verify`](FunctionMock::verify) how often the mock was called
//!   with particular arguments.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Argument patterns`](#argument-patterns)
//! * [`Defaults and keywords`](#defaults-and-keywords)
//! * [`Precedence`](#precedence)
//! * [`Return values`](#return-values)
//! * [`Unmatched calls`](#unmatched-calls)
//! * [`Verification`](#verification)
//! * [`Interfaces`](#interfaces)
//! * [`Logging`](#logging)
//!
//! ## Getting Started
//! ```
//! use dynamock::*;
//!
//! let sig = Signature::new("add").param("x").param("y");
//! let mut add = FunctionMock::new(sig);
//! add.setup(pattern!(1, 2)).unwrap()
//!     .returns_const(3);
//! assert_eq!(add.call(args!(1, 2)).unwrap(), Some(Value::new(3)));
//! ```
//!
//! ## Argument patterns
//!
//! Every argument of a [`pattern!`] is either a plain value, which must be
//! equal to the actual argument, or an [`Expect`] / [`Matcher`].  Equality is
//! the argument type's own `PartialEq`, and values of different types never
//! match: a pattern of `1i32` does not accept `1i64`.  Matchers can be built
//! from closures or from any [`Predicate`].
//!
//! ```
//! # use dynamock::*;
//! let mut f = FunctionMock::new(Signature::new("f").param("n").param("s"));
//! f.setup(pattern!(Expect::pred::<_, u32>(predicate::gt(10u32)),
//!                  Expect::matching(|s: &String| s.starts_with("a"))))
//!     .unwrap()
//!     .returns_const(true);
//! assert_eq!(f.call(args!(11u32, "abc".to_owned())).unwrap(),
//!            Some(Value::new(true)));
//! assert_eq!(f.call(args!(9u32, "abc".to_owned())).unwrap(), None);
//! ```
//!
//! ## Defaults and keywords
//!
//! Calls and patterns may pass arguments by position or by keyword; keywords
//! go after a `;`.  Before matching, every omitted parameter with a default
//! takes its default value.  In a pattern, an omitted parameter with a
//! default must equal that default, while an omitted required parameter
//! matches anything.
//!
//! ```
//! # use dynamock::*;
//! let sig = Signature::new("f").param("a").param_with_default("b", 2);
//! let mut f = FunctionMock::new(sig);
//! f.setup(pattern!(; a = 1)).unwrap().returns_const("b is 2");
//! assert_eq!(f.call(args!(1)).unwrap(), Some(Value::new("b is 2")));
//! assert_eq!(f.call(args!(1; b = 2)).unwrap(), Some(Value::new("b is 2")));
//! assert_eq!(f.call(args!(1, 3)).unwrap(), None);
//! ```
//!
//! A call that can't bind to the signature fails with
//! [`MockError::SignatureMismatch`], just as the real call would fail.
//!
//! ## Precedence
//!
//! Setups are tried newest first.  Register the broad case first, then
//! override it with narrower ones.  A broad fallback must wildcard every
//! defaulted parameter explicitly, or it only accepts calls that leave those
//! parameters at their defaults.
//!
//! ```
//! # use dynamock::*;
//! let mut f = FunctionMock::new(Signature::new("f").param("a"));
//! f.setup(pattern!(Expect::any())).unwrap().returns_const("anything");
//! f.setup(pattern!(42)).unwrap().returns_const("the answer");
//! assert_eq!(f.call(args!(42)).unwrap(), Some(Value::new("the answer")));
//! assert_eq!(f.call(args!(7)).unwrap(), Some(Value::new("anything")));
//! ```
//!
//! ## Return values
//!
//! Each setup needs a return value, either a constant with
//! [`returns_const`](Setup::returns_const) or a closure over the
//! [`BoundCall`] with [`returns`](Setup::returns).  A matching setup that
//! never got one fails the call with [`MockError::UnboundSetup`].
//!
//! ```
//! # use dynamock::*;
//! let sig = Signature::new("f").param("a").param_with_default("b", 2);
//! let mut f = FunctionMock::new(sig);
//! f.setup(pattern!(Expect::any())).unwrap()
//!     .returns(|call| call.arg::<i32>("a").unwrap() * call.arg::<i32>("b").unwrap());
//! assert_eq!(f.call(args!(5)).unwrap(), Some(Value::new(10)));
//! ```
//!
//! ## Unmatched calls
//!
//! By default a call that no setup accepts returns `Ok(None)`, which is
//! distinct from any mocked return value, including `()`.  A
//! [`Behavior::Strict`] mock fails such calls with [`MockError::NoMatch`]
//! instead.
//!
//! ## Verification
//!
//! Every call that binds successfully is recorded, whether or not it matched.
//! [`FunctionMock::verify`] counts the recorded calls accepted by a pattern.
//!
//! ```
//! # use dynamock::*;
//! let f = FunctionMock::new(Signature::new("f").param("a"));
//! f.call(args!(1)).unwrap();
//! f.call(args!(1)).unwrap();
//! f.verify(pattern!(1)).unwrap().times(2).unwrap();
//! f.verify(pattern!(2)).unwrap().never().unwrap();
//! ```
//!
//! ## Interfaces
//!
//! An [`ObjectMock`] holds one [`FunctionMock`] per public member of an
//! interface.  Put [`#[interface]`](macro@interface) on a trait to get a
//! `Mock` struct that builds the descriptor for you.  Method parameters
//! become the signature's parameters, methods with a `self` receiver get a
//! receiver, and `#[defaults(..)]` supplies default values.
//!
//! ```
//! # use dynamock::*;
//! #[interface]
//! trait Web {
//!     #[defaults(retries = 3u32)]
//!     fn get(&self, url: &str, retries: u32) -> String;
//! }
//!
//! let mut mock = MockWeb::new();
//! mock.setup("get", pattern!("http://a")).unwrap()
//!     .returns_const(String::from("page"));
//! assert_eq!(mock.call("get", args!("http://a")).unwrap(),
//!            Some(Value::new(String::from("page"))));
//! ```
//!
//! ## Logging
//!
//! Dynamock emits [`tracing`] events: `debug` when a setup is registered and
//! when a call is resolved, and `trace` with the reasons each setup rejected
//! a call.  Install any subscriber to see them.

mod error;
mod function;
mod object;
mod setup;
mod signature;
mod signature_validator;
mod validator;
mod value;
mod verify;

pub use dynamock_derive::interface;
pub use predicates::prelude::{Predicate, predicate};

pub use crate::error::{BindError, MockError, Result};
pub use crate::function::{Behavior, FunctionMock};
pub use crate::object::{Interface, InterfaceDescriptor, ObjectMock};
pub use crate::setup::Setup;
pub use crate::signature::{BoundCall, CallArgs, Parameter, Signature};
pub use crate::signature_validator::{
    SignatureValidator,
    signature_validator_from_arguments
};
pub use crate::validator::{
    ArgumentValidator,
    Expect,
    IntoExpect,
    Matcher,
    argument_validator_from_argument
};
pub use crate::value::{Receiver, Value};
pub use crate::verify::VerifiedCalls;

/// Build the arguments of a call: positional values, then optionally a `;`
/// and `name = value` keyword arguments.
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let a = args!(1, "two"; three = 3.0);
/// assert_eq!(a.positional().len(), 2);
/// assert_eq!(a.named()[0].0, "three");
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)? $(; $($name:ident = $kw:expr),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut a = $crate::CallArgs::<$crate::Value>::new();
        $( a.push($crate::Value::new($arg)); )*
        $($( a.push_named(stringify!($name), $crate::Value::new($kw)); )*)?
        a
    }};
}

/// Build a setup or verification pattern.  The syntax is the same as
/// [`args!`], but each argument may be a plain value or anything else that
/// implements [`IntoExpect`].
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let p = pattern!(1, Expect::any(); b = Expect::matching(|b: &i32| *b > 0));
/// assert_eq!(p.positional().len(), 2);
/// ```
#[macro_export]
macro_rules! pattern {
    ($($arg:expr),* $(,)? $(; $($name:ident = $kw:expr),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut p = $crate::CallArgs::<$crate::Expect>::new();
        $( p.push($crate::IntoExpect::into_expect($arg)); )*
        $($(
            p.push_named(stringify!($name),
                         $crate::IntoExpect::into_expect($kw));
        )*)?
        p
    }};
}
