//! Erasure of generic signatures into raw descriptors.
//!
//! Erasure mirrors the rule the JVM itself applies: class types drop their
//! type arguments, arrays erase their element type, and a type variable
//! erases to the erasure of its class bound, else of its first interface
//! bound, else to `java.lang.Object`. Erasure is total and cannot fail on
//! any signature value, resolved or not.

use crate::{
    field_type::FieldType,
    method_descriptor::{MethodDescriptor, ReturnType},
    names::QualifiedName,
};

use super::{
    ClassTypeSignature, MethodSignature, ReturnTypeSignature, ThrowsSignature, TypeSignature,
    TypeVariable,
};

impl TypeSignature {
    /// Computes the raw type the JVM sees for this type.
    #[must_use]
    pub fn erasure(&self) -> FieldType {
        match self {
            Self::Base(primitive) => FieldType::Base(primitive.clone()),
            Self::Object(class_type) => class_type.erasure(),
            Self::Array(component) => component.erasure().into_array_type(),
            Self::Variable(variable) => variable.erasure(),
        }
    }
}

impl ClassTypeSignature {
    /// Computes the raw type of the class, dropping all type arguments and
    /// keeping the full nesting chain.
    #[must_use]
    pub fn erasure(&self) -> FieldType {
        FieldType::Object(self.qualified_name())
    }
}

impl TypeVariable {
    /// Computes the raw type of the variable: the erasure of its class
    /// bound, else of its first interface bound, else `java.lang.Object`.
    ///
    /// An unresolved variable has no bounds to consult and erases to
    /// `java.lang.Object` as well.
    #[must_use]
    pub fn erasure(&self) -> FieldType {
        self.declaration()
            .and_then(|declaration| {
                declaration
                    .class_bound()
                    .or_else(|| declaration.interface_bounds().first())
                    .map(TypeSignature::erasure)
            })
            .unwrap_or_else(|| FieldType::Object(QualifiedName::object()))
    }
}

impl ThrowsSignature {
    /// Computes the raw type of the thrown type.
    #[must_use]
    pub fn erasure(&self) -> FieldType {
        match self {
            Self::Class(class_type) => class_type.erasure(),
            Self::Variable(variable) => variable.erasure(),
        }
    }
}

impl ReturnTypeSignature {
    /// Computes the raw return type the JVM sees for this return type.
    #[must_use]
    pub fn erasure(&self) -> ReturnType {
        match self {
            Self::Some(signature) => ReturnType::Some(signature.erasure()),
            Self::Void => ReturnType::Void,
        }
    }
}

impl MethodSignature {
    /// Computes the raw descriptor of the method by erasing its parameter
    /// and return types.
    #[must_use]
    pub fn descriptor(&self) -> MethodDescriptor {
        MethodDescriptor {
            parameters_types: self
                .parameters_types
                .iter()
                .map(TypeSignature::erasure)
                .collect(),
            return_type: self.return_type.erasure(),
        }
    }
}
