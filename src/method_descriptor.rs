//! Non-generic JVM method descriptors.
use std::{
    fmt::Display,
    str::{Chars, FromStr},
};

use itertools::Itertools;

use crate::{
    errors::InvalidDescriptor,
    field_type::{FieldType, PrimitiveType},
    macros::see_jvm_spec,
};

/// The descriptor of a method.
/// Consists of the parameters types and the return type.
#[doc = see_jvm_spec!(4, 3, 3)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct MethodDescriptor {
    /// The type of the parameters.
    pub parameters_types: Vec<FieldType>,
    /// The return type.
    pub return_type: ReturnType,
}

/// Denotes the return type of a method.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub enum ReturnType {
    /// The method returns a specific type.
    Some(FieldType),
    /// The return type of the method is `void`.
    Void,
}

impl Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnType::Some(t) => t.fmt(f),
            ReturnType::Void => write!(f, "void"),
        }
    }
}

impl Display for MethodDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for param in &self.parameters_types {
            write!(f, "{}", param.descriptor())?;
        }
        write!(f, ")")?;
        write!(f, "{}", self.return_type.descriptor())
    }
}

impl MethodDescriptor {
    /// Returns the canonical descriptor string of the method.
    #[must_use]
    pub fn descriptor(&self) -> String {
        self.to_string()
    }

    /// Parses a parameter type from a string and advances the iterator.
    /// For an input as follows.
    /// ```text
    ///   L      java/lang/String;IJB)V
    ///   ^      ^
    ///   prefix remaining
    /// ````
    /// It returns a [`FieldType::Object`] with `"java/lang/String"` and the [remaining] is as
    /// follows.
    /// ```text
    ///   ...;IJB)V
    ///       ^
    ///       remaining
    /// ````
    fn parse_single_parameter(prefix: char, remaining: &mut Chars<'_>) -> Option<FieldType> {
        if let Ok(primitive) = PrimitiveType::try_from(prefix) {
            return Some(FieldType::Base(primitive));
        }
        match prefix {
            'L' => {
                let binary_name: String = remaining.take_while_ref(|c| *c != ';').collect();
                match remaining.next() {
                    Some(';') if !binary_name.is_empty() => {
                        Some(FieldType::object(&binary_name))
                    }
                    _ => None,
                }
            }
            '[' => {
                let next_prefix = remaining.next()?;
                Self::parse_single_parameter(next_prefix, remaining)
                    .map(FieldType::into_array_type)
            }
            _ => None,
        }
    }
}

impl FromStr for MethodDescriptor {
    type Err = InvalidDescriptor;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidDescriptor(descriptor.to_owned());
        let mut chars = descriptor.chars();
        if chars.next() != Some('(') {
            return Err(malformed());
        }
        let mut parameters_types = Vec::new();
        let return_type = loop {
            match chars.next() {
                Some(')') => break ReturnType::from_str(chars.as_str()).map_err(|_| malformed())?,
                Some(c) => {
                    let param =
                        Self::parse_single_parameter(c, &mut chars).ok_or_else(malformed)?;
                    parameters_types.push(param);
                }
                None => return Err(malformed()),
            }
        };
        Ok(Self {
            parameters_types,
            return_type,
        })
    }
}

impl FromStr for ReturnType {
    type Err = InvalidDescriptor;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        if descriptor == "V" {
            Ok(ReturnType::Void)
        } else {
            FieldType::from_str(descriptor).map(ReturnType::Some)
        }
    }
}

impl ReturnType {
    /// Returns the canonical descriptor string of the return type.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self {
            ReturnType::Some(it) => it.descriptor(),
            ReturnType::Void => "V".to_owned(),
        }
    }
}
