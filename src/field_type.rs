//! Non-generic JVM field types.
use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::{errors::InvalidDescriptor, macros::see_jvm_spec, names::QualifiedName};

/// A primitive type in Java.
#[doc = see_jvm_spec!(4, 3, 2)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum PrimitiveType {
    /// The `boolean` type.
    #[display("boolean")]
    Boolean,
    /// The `char` type.
    #[display("char")]
    Char,
    /// The `float` type.
    #[display("float")]
    Float,
    /// The `double` type.
    #[display("double")]
    Double,
    /// The `byte` type.
    #[display("byte")]
    Byte,
    /// The `short` type.
    #[display("short")]
    Short,
    /// The `int` type.
    #[display("int")]
    Int,
    /// The `long` type.
    #[display("long")]
    Long,
}

impl TryFrom<char> for PrimitiveType {
    type Error = InvalidDescriptor;

    fn try_from(descriptor: char) -> Result<Self, Self::Error> {
        match descriptor {
            'Z' => Ok(Self::Boolean),
            'C' => Ok(Self::Char),
            'F' => Ok(Self::Float),
            'D' => Ok(Self::Double),
            'B' => Ok(Self::Byte),
            'S' => Ok(Self::Short),
            'I' => Ok(Self::Int),
            'J' => Ok(Self::Long),
            _ => Err(InvalidDescriptor(descriptor.to_string())),
        }
    }
}

impl PrimitiveType {
    /// The descriptor character of the primitive type.
    #[must_use]
    pub const fn descriptor_char(&self) -> char {
        match self {
            Self::Boolean => 'Z',
            Self::Char => 'C',
            Self::Float => 'F',
            Self::Double => 'D',
            Self::Byte => 'B',
            Self::Short => 'S',
            Self::Int => 'I',
            Self::Long => 'J',
        }
    }
}

/// A field type (i.e., a non-generic type of a value).
#[doc = see_jvm_spec!(4, 3, 2)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub enum FieldType {
    /// A primitive type.
    Base(PrimitiveType),
    /// A class or interface type.
    Object(QualifiedName),
    /// An array type.
    Array(Box<FieldType>),
}

impl FieldType {
    /// Creates an object type from a binary class name (e.g., `java/lang/String`).
    #[must_use]
    pub fn object(binary_name: &str) -> Self {
        Self::Object(QualifiedName::from_binary_name(binary_name))
    }

    /// Creates an array type with this type as its element.
    #[must_use]
    pub fn into_array_type(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Creates an array type with the given number of dimensions.
    #[must_use]
    pub fn array_of(element: Self, dimensions: u8) -> Self {
        (0..dimensions).fold(element, |result, _| result.into_array_type())
    }

    /// Returns the canonical descriptor string of the type.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self {
            Self::Base(it) => it.descriptor_char().to_string(),
            Self::Object(name) => format!("L{};", name.binary_name()),
            Self::Array(inner) => format!("[{}", inner.descriptor()),
        }
    }
}

impl FromStr for FieldType {
    type Err = InvalidDescriptor;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let mut chars = descriptor.chars();
        match chars.next() {
            Some('[') => Self::from_str(chars.as_str())
                .map(Self::into_array_type)
                .map_err(|_| InvalidDescriptor(descriptor.to_owned())),
            Some('L') => {
                let binary_name: String = chars.take_while_ref(|it| *it != ';').collect();
                match (chars.next(), chars.next()) {
                    (Some(';'), None) if !binary_name.is_empty() => {
                        Ok(Self::Object(QualifiedName::from_binary_name(&binary_name)))
                    }
                    _ => Err(InvalidDescriptor(descriptor.to_owned())),
                }
            }
            Some(c) => match chars.next() {
                None => PrimitiveType::try_from(c).map(Self::Base),
                Some(_) => Err(InvalidDescriptor(descriptor.to_owned())),
            },
            None => Err(InvalidDescriptor(descriptor.to_owned())),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base(it) => it.fmt(f),
            Self::Object(name) => name.fmt(f),
            Self::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}
