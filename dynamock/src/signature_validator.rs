// vim: tw=80
//! Whole-call validation
//!
//! A [`SignatureValidator`] holds one [`ArgumentValidator`] per constrained
//! parameter and judges an entire argument list against them.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt
};

use crate::{
    CallArgs,
    Expect,
    MockError,
    Result,
    Value,
    validator::{ArgumentValidator, argument_validator_from_argument}
};

/// An immutable set of [`ArgumentValidator`]s, unique by name and by
/// position.
///
/// Validators are sparse: arguments that no validator covers are rejected,
/// but parameters that aren't supplied at all are not checked.
#[derive(Clone, Debug)]
pub struct SignatureValidator {
    validators: Vec<ArgumentValidator>,
    by_name: HashMap<String, usize>,
    by_position: HashMap<usize, usize>,
}

impl SignatureValidator {
    /// Fails if two validators share a name or a position.
    pub fn new(validators: Vec<ArgumentValidator>) -> Result<Self> {
        let names = duplicates(validators.iter().map(|v| v.name().to_owned()));
        if !names.is_empty() {
            return Err(MockError::DuplicateNames{names});
        }
        let positions = duplicates(validators.iter().map(|v| v.position()));
        if !positions.is_empty() {
            return Err(MockError::DuplicatePositions{positions});
        }

        let by_name = validators.iter()
            .enumerate()
            .map(|(i, v)| (v.name().to_owned(), i))
            .collect();
        let by_position = validators.iter()
            .enumerate()
            .map(|(i, v)| (v.position(), i))
            .collect();
        Ok(SignatureValidator{validators, by_name, by_position})
    }

    pub fn validators(&self) -> &[ArgumentValidator] {
        &self.validators
    }

    pub fn by_name(&self, name: &str) -> Option<&ArgumentValidator> {
        self.by_name.get(name).map(|&i| &self.validators[i])
    }

    pub fn by_position(&self, position: usize) -> Option<&ArgumentValidator> {
        self.by_position.get(&position).map(|&i| &self.validators[i])
    }

    /// Does every supplied argument satisfy its validator?
    pub fn is_valid(&self, positional: &[Value],
                    named: &BTreeMap<String, Value>) -> bool
    {
        if positional.len() > self.validators.len() {
            return false;
        }
        let positional_ok = positional.iter()
            .enumerate()
            .all(|(i, value)| {
                self.by_position(i).map_or(false, |v| v.is_valid(value))
            });
        positional_ok && named.iter().all(|(name, value)| {
            self.by_name(name).map_or(false, |v| v.is_valid(value))
        })
    }

    /// List every reason the arguments are rejected.  Empty if
    /// [`is_valid`](Self::is_valid) would return true.
    pub fn explain(&self, positional: &[Value],
                   named: &BTreeMap<String, Value>) -> Vec<String>
    {
        let mut reasons = Vec::new();
        if positional.len() > self.validators.len() {
            reasons.push(format!("{} positional arguments, but only {} \
                                  validators", positional.len(),
                                  self.validators.len()));
        }
        for (i, value) in positional.iter().enumerate() {
            match self.by_position(i) {
                None => reasons.push(format!("no validator at position {i}")),
                Some(v) => reasons.extend(v.explain(value)),
            }
        }
        for (name, value) in named {
            match self.by_name(name) {
                None => reasons.push(format!("no validator named {name}")),
                Some(v) => reasons.extend(v.explain(value)),
            }
        }
        reasons
    }
}

impl fmt::Display for SignatureValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<_> = self.validators.iter().collect();
        sorted.sort_by_key(|v| v.position());
        f.write_str("(")?;
        for (i, v) in sorted.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

fn duplicates<T: Ord>(items: impl Iterator<Item=T>) -> Vec<T> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for item in items {
        if seen.contains(&item) {
            dups.insert(item);
        } else {
            seen.insert(item);
        }
    }
    dups.into_iter().collect()
}

/// Build a [`SignatureValidator`] from a raw setup pattern.
///
/// Positional arguments are bound by call order to `argument_names`.  A
/// keyword argument takes the position of its name in `argument_names`; a name
/// that isn't listed there goes one past the highest position so far.
///
/// # Examples
/// ```
/// # use dynamock::*;
/// let names = ["a".to_owned(), "b".to_owned()];
/// let sv = signature_validator_from_arguments(&names, pattern!(1; b = 5))
///     .unwrap();
/// assert_eq!(1, sv.by_name("b").unwrap().position());
/// ```
pub fn signature_validator_from_arguments(
    argument_names: &[String],
    pattern: CallArgs<Expect>) -> Result<SignatureValidator>
{
    let (positional, named) = pattern.into_parts();
    let mut validators = Vec::with_capacity(positional.len() + named.len());

    for (position, argument) in positional.into_iter().enumerate() {
        let name = argument_names.get(position)
            .cloned()
            .unwrap_or_else(|| format!("arg{position}"));
        validators.push(
            argument_validator_from_argument(argument, &name, position));
    }

    for (name, argument) in named {
        let position = argument_names.iter()
            .position(|n| *n == name)
            .unwrap_or_else(|| {
                validators.iter()
                    .map(ArgumentValidator::position)
                    .max()
                    .map_or(0, |p| p + 1)
            });
        validators.push(
            argument_validator_from_argument(argument, &name, position));
    }

    SignatureValidator::new(validators)
}
