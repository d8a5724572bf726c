// vim: tw=80
//! Mocking a whole interface

use std::{collections::HashMap, fmt};

use crate::{
    Behavior,
    CallArgs,
    Expect,
    FunctionMock,
    MockError,
    Result,
    Setup,
    Signature,
    Value
};

/// The members of an interface, as supplied by a signature provider such as
/// [`#[interface]`](crate::interface).
#[derive(Clone, Debug)]
pub struct InterfaceDescriptor {
    name: String,
    members: Vec<Signature>,
}

impl InterfaceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceDescriptor{name: name.into(), members: Vec::new()}
    }

    pub fn member(mut self, signature: Signature) -> Self {
        self.members.push(signature);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Signature] {
        &self.members
    }
}

/// Types that can describe the interface they mock.
pub trait Interface {
    fn descriptor() -> InterfaceDescriptor;
}

fn is_public_name(name: &str) -> bool {
    !name.starts_with('_')
}

/// A mock of every public member of an interface.
///
/// One [`FunctionMock`] is built per member up front.  Members whose names
/// start with `_` are considered private and are left out.
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let iweb = InterfaceDescriptor::new("IWeb")
///     .member(Signature::new("get").receiver().param("url"));
/// let mut mock = ObjectMock::new(iweb);
/// mock.setup("get", pattern!("http://a")).unwrap().returns_const("page");
///
/// assert_eq!(mock.call("get", args!("http://a")).unwrap(),
///            Some(Value::new("page")));
/// assert!(mock.get("post").is_err());
/// ```
pub struct ObjectMock {
    name: String,
    members: Vec<String>,
    functions: HashMap<String, FunctionMock>,
}

impl ObjectMock {
    pub fn new(descriptor: InterfaceDescriptor) -> Self {
        let mut members = Vec::new();
        let mut functions = HashMap::new();
        for signature in descriptor.members {
            let name = signature.name().to_owned();
            if !is_public_name(&name) || functions.contains_key(&name) {
                continue;
            }
            members.push(name.clone());
            functions.insert(name, FunctionMock::new(signature));
        }
        ObjectMock{name: descriptor.name, members, functions}
    }

    /// Apply `behavior` to every member.
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        for f in self.functions.values_mut() {
            f.set_behavior(behavior);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Public member names, in declaration order.
    pub fn member_names(&self) -> &[String] {
        &self.members
    }

    fn unknown(&self, name: &str) -> MockError {
        MockError::UnknownMember {
            mock: self.to_string(),
            name: name.to_owned()
        }
    }

    pub fn get(&self, name: &str) -> Result<&FunctionMock> {
        self.functions.get(name).ok_or_else(|| self.unknown(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut FunctionMock> {
        let e = self.unknown(name);
        self.functions.get_mut(name).ok_or(e)
    }

    /// Register a setup on member `name`.
    pub fn setup(&mut self, name: &str, pattern: CallArgs<Expect>)
        -> Result<&mut Setup>
    {
        self.get_mut(name)?.setup(pattern)
    }

    /// Call member `name`.
    pub fn call(&self, name: &str, args: CallArgs<Value>)
        -> Result<Option<Value>>
    {
        self.get(name)?.call(args)
    }

    /// Forget every setup and recorded call on every member.
    pub fn checkpoint(&mut self) {
        for f in self.functions.values_mut() {
            f.checkpoint();
        }
    }
}

impl fmt::Display for ObjectMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mock[{}]", self.name)
    }
}

impl fmt::Debug for ObjectMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
