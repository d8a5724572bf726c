// vim: tw=80
//! Signature descriptors and argument binding
//!
//! A [`Signature`] is the explicit description of a mocked function: its name,
//! its ordered parameters with their defaults, and whether it takes a
//! receiver.  Binding resolves a [`CallArgs`] against it.

use std::{collections::BTreeMap, fmt};

use crate::{
    BindError,
    Expect,
    IntoExpect,
    Receiver,
    Value,
};

/// Positional and keyword arguments of a call (`CallArgs<Value>`) or of a
/// setup pattern (`CallArgs<Expect>`).
///
/// Usually built with the [`args!`](crate::args) and
/// [`pattern!`](crate::pattern) macros.
#[derive(Clone, Debug)]
pub struct CallArgs<A = Value> {
    positional: Vec<A>,
    named: Vec<(String, A)>,
}

impl<A> CallArgs<A> {
    pub fn new() -> Self {
        CallArgs{positional: Vec::new(), named: Vec::new()}
    }

    pub fn push(&mut self, arg: A) {
        self.positional.push(arg);
    }

    pub fn push_named(&mut self, name: impl Into<String>, arg: A) {
        self.named.push((name.into(), arg));
    }

    pub fn positional(&self) -> &[A] {
        &self.positional
    }

    pub fn named(&self) -> &[(String, A)] {
        &self.named
    }

    pub fn into_parts(self) -> (Vec<A>, Vec<(String, A)>) {
        (self.positional, self.named)
    }
}

impl<A> Default for CallArgs<A> {
    fn default() -> Self {
        CallArgs::new()
    }
}

impl CallArgs<Value> {
    pub fn arg<T>(mut self, t: T) -> Self
        where T: Clone + PartialEq + fmt::Debug + 'static
    {
        self.push(Value::new(t));
        self
    }

    pub fn kwarg<T>(mut self, name: impl Into<String>, t: T) -> Self
        where T: Clone + PartialEq + fmt::Debug + 'static
    {
        self.push_named(name, Value::new(t));
        self
    }
}

impl CallArgs<Expect> {
    pub fn arg<E: IntoExpect>(mut self, e: E) -> Self {
        self.push(e.into_expect());
        self
    }

    pub fn kwarg<E: IntoExpect>(mut self, name: impl Into<String>, e: E)
        -> Self
    {
        self.push_named(name, e.into_expect());
        self
    }
}

impl<A: fmt::Debug> fmt::Display for CallArgs<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_args(f, self.positional.iter(),
                   self.named.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

fn write_args<'a, A, P, N>(f: &mut fmt::Formatter<'_>, positional: P, named: N)
    -> fmt::Result
    where A: fmt::Debug + 'a,
          P: Iterator<Item=&'a A>,
          N: Iterator<Item=(&'a str, &'a A)>
{
    f.write_str("(")?;
    let mut first = true;
    for value in positional {
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        write!(f, "{value:?}")?;
    }
    for (name, value) in named {
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        write!(f, "{name}={value:?}")?;
    }
    f.write_str(")")
}

/// One declared parameter of a mocked function.
#[derive(Clone, Debug)]
pub struct Parameter {
    name: String,
    default: Option<Value>,
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The shape of a mocked function.
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let sig = Signature::new("get")
///     .receiver()
///     .param("url")
///     .param_with_default("retries", 3u32);
/// assert_eq!("get(self, url, retries=3)", sig.to_string());
/// ```
#[derive(Clone, Debug)]
pub struct Signature {
    name: String,
    params: Vec<Parameter>,
    receiver: bool,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Signature{name: name.into(), params: Vec::new(), receiver: false}
    }

    /// Mark this as an instance method.  A leading `self` parameter is added,
    /// and every call gets a [`Receiver`] placeholder bound to it.
    pub fn receiver(mut self) -> Self {
        if !self.receiver {
            self.receiver = true;
            self.params.insert(0, Parameter{
                name: String::from("self"),
                default: None
            });
        }
        self
    }

    /// Append a required parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(Parameter{name: name.into(), default: None});
        self
    }

    /// Append a parameter that takes `default` when a call omits it.
    pub fn param_with_default<T>(mut self, name: impl Into<String>, default: T)
        -> Self
        where T: Clone + PartialEq + fmt::Debug + 'static
    {
        self.params.push(Parameter{
            name: name.into(),
            default: Some(Value::new(default))
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Names of all parameters in order, `self` included.
    pub fn param_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.name.clone()).collect()
    }

    pub fn has_receiver(&self) -> bool {
        self.receiver
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Bind a real call: inject the receiver, check it against the declared
    /// parameters, and fill in defaults for everything not supplied.
    pub fn bind(&self, args: CallArgs<Value>) -> Result<BoundCall, BindError> {
        let (positional, named) = self.bind_with(
            args,
            || Value::new(Receiver),
            |param| param.default.clone())?;
        Ok(BoundCall{
            params: self.param_names(),
            positional,
            named: named.into_iter().collect()
        })
    }

    /// Bind a setup pattern.
    ///
    /// Like [`bind`](Self::bind), but required parameters may be left out, in
    /// which case they match anything.  Omitted parameters with defaults are
    /// expected to equal their defaults.  The receiver, if any, matches
    /// anything.
    pub fn bind_partial(&self, pattern: CallArgs<Expect>)
        -> Result<CallArgs<Expect>, BindError>
    {
        let (positional, named) = self.bind_with(
            pattern,
            Expect::any,
            |param| Some(param.default.clone()
                .map_or_else(Expect::any, Expect::Exact)))?;
        Ok(CallArgs{positional, named})
    }

    /// `fill` supplies the argument for a parameter the call left out, or
    /// `None` if it is required.
    fn bind_with<A, R, F>(&self, args: CallArgs<A>, receiver: R, fill: F)
        -> Result<(Vec<A>, Vec<(String, A)>), BindError>
        where R: FnOnce() -> A,
              F: Fn(&Parameter) -> Option<A>
    {
        let (mut positional, supplied) = args.into_parts();
        let implicit = usize::from(self.receiver);
        if self.receiver {
            positional.insert(0, receiver());
        }
        if positional.len() > self.params.len() {
            return Err(BindError::TooManyPositional{
                expected: self.params.len() - implicit,
                given: positional.len() - implicit
            });
        }

        let mut named: Vec<(String, A)> = Vec::with_capacity(supplied.len());
        for (name, arg) in supplied {
            let index = self.index_of(&name)
                .ok_or_else(|| BindError::UnexpectedKeyword(name.clone()))?;
            if index < positional.len() || named.iter().any(|(n, _)| *n == name)
            {
                return Err(BindError::MultipleValues(name));
            }
            named.push((name, arg));
        }

        let mut missing = Vec::new();
        for param in self.params.iter().skip(positional.len()) {
            if named.iter().any(|(n, _)| *n == param.name) {
                continue;
            }
            match fill(param) {
                Some(arg) => named.push((param.name.clone(), arg)),
                None => missing.push(param.name.clone())
            }
        }
        if !missing.is_empty() {
            return Err(BindError::MissingArguments(missing));
        }
        Ok((positional, named))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &p.default {
                Some(d) => write!(f, "{}={:?}", p.name, d)?,
                None => f.write_str(&p.name)?
            }
        }
        f.write_str(")")
    }
}

/// A call after binding and default-filling.
///
/// Arguments supplied positionally stay positional (the receiver, if any, is
/// at position 0); everything else is in the keyword map, defaults included.
#[derive(Clone, Debug)]
pub struct BoundCall {
    params: Vec<String>,
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl BoundCall {
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// Look up an argument by parameter name, wherever it was supplied.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.params.iter().position(|p| p == name) {
            Some(i) if i < self.positional.len() => Some(&self.positional[i]),
            _ => self.named.get(name)
        }
    }

    /// Like [`get`](Self::get), but downcast to `T`.
    pub fn arg<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(Value::downcast_ref)
    }

    /// Every argument by parameter name, in declaration order.
    pub fn arguments(&self) -> Vec<(&str, &Value)> {
        self.params.iter()
            .filter_map(|p| self.get(p).map(|v| (p.as_str(), v)))
            .collect()
    }
}

impl PartialEq for BoundCall {
    fn eq(&self, other: &Self) -> bool {
        self.positional == other.positional && self.named == other.named
    }
}

impl fmt::Display for BoundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_args(f, self.positional.iter(),
                   self.named.iter().map(|(k, v)| (k.as_str(), v)))
    }
}
