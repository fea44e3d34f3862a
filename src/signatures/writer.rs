//! Serialization of signatures into their class file form.
//!
//! Serialization is the canonical inverse of parsing: encoding a parsed
//! signature reproduces the input string, and re-parsing an encoded
//! signature reproduces a structurally equal value. Type variables are
//! written from their name alone, so which declaration instance a variable
//! holds never influences the output. Segments of a nested class chain are
//! canonically joined with `$`, whichever separator the parsed input used.

use std::rc::Rc;

use super::{
    ClassSignature, ClassTypeSignature, MethodSignature, ReturnTypeSignature,
    SimpleClassTypeSignature, ThrowsSignature, TypeArgument, TypeParameter, TypeSignature,
    TypeVariable, WildcardIndicator,
};

impl ClassSignature {
    /// Encodes the signature into its canonical class file form.
    #[must_use]
    pub fn signature_string(&self) -> String {
        let mut out = String::new();
        write_type_parameters(&mut out, self.type_parameters.as_deref());
        self.superclass.write_into(&mut out);
        for interface in &self.interfaces {
            interface.write_into(&mut out);
        }
        out
    }
}

impl MethodSignature {
    /// Encodes the signature into its canonical class file form.
    #[must_use]
    pub fn signature_string(&self) -> String {
        let mut out = String::new();
        write_type_parameters(&mut out, self.type_parameters.as_deref());
        out.push('(');
        for parameter in &self.parameters_types {
            parameter.write_into(&mut out);
        }
        out.push(')');
        self.return_type.write_into(&mut out);
        for thrown in &self.throws {
            out.push('^');
            thrown.write_into(&mut out);
        }
        out
    }
}

impl TypeSignature {
    /// Encodes the type into its canonical class file form.
    #[must_use]
    pub fn signature_string(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    pub(crate) fn write_into(&self, out: &mut String) {
        match self {
            Self::Base(primitive) => out.push(primitive.descriptor_char()),
            Self::Object(class_type) => class_type.write_into(out),
            Self::Array(component) => {
                out.push('[');
                component.write_into(out);
            }
            Self::Variable(variable) => variable.write_into(out),
        }
    }
}

fn write_type_parameters(out: &mut String, type_parameters: Option<&[Rc<TypeParameter>]>) {
    if let Some(type_parameters) = type_parameters {
        out.push('<');
        for parameter in type_parameters {
            parameter.write_into(out);
        }
        out.push('>');
    }
}

impl TypeParameter {
    pub(crate) fn write_into(&self, out: &mut String) {
        out.push_str(self.name());
        out.push(':');
        if let Some(bound) = self.class_bound() {
            bound.write_into(out);
        }
        for bound in self.interface_bounds() {
            out.push(':');
            bound.write_into(out);
        }
    }
}

impl ClassTypeSignature {
    pub(crate) fn write_into(&self, out: &mut String) {
        out.push('L');
        if !self.package.is_empty() {
            out.push_str(&self.package.binary_string());
            out.push('/');
        }
        let mut first = true;
        for segment in &self.segments {
            if !first {
                out.push('$');
            }
            first = false;
            segment.write_into(out);
        }
        out.push(';');
    }
}

impl SimpleClassTypeSignature {
    pub(crate) fn write_into(&self, out: &mut String) {
        out.push_str(&self.name);
        if let Some(type_arguments) = &self.type_arguments {
            out.push('<');
            for argument in type_arguments {
                argument.write_into(out);
            }
            out.push('>');
        }
    }
}

impl TypeArgument {
    pub(crate) fn write_into(&self, out: &mut String) {
        match self {
            Self::Any => out.push('*'),
            Self::Concrete {
                wildcard,
                signature,
            } => {
                match wildcard {
                    Some(WildcardIndicator::Extends) => out.push('+'),
                    Some(WildcardIndicator::Super) => out.push('-'),
                    None => {}
                }
                signature.write_into(out);
            }
        }
    }
}

impl TypeVariable {
    pub(crate) fn write_into(&self, out: &mut String) {
        out.push('T');
        out.push_str(self.name());
        out.push(';');
    }
}

impl ThrowsSignature {
    pub(crate) fn write_into(&self, out: &mut String) {
        match self {
            Self::Class(class_type) => class_type.write_into(out),
            Self::Variable(variable) => variable.write_into(out),
        }
    }
}

impl ReturnTypeSignature {
    pub(crate) fn write_into(&self, out: &mut String) {
        match self {
            Self::Some(signature) => signature.write_into(out),
            Self::Void => out.push('V'),
        }
    }
}
