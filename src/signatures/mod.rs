//! Generic type signatures in the JVM.
//!
//! A signature carries the generic type information that descriptors erase:
//! type parameters and their bounds, type arguments, wildcards, and type
//! variables. Signatures are stored in the `Signature` attribute of classes,
//! methods, fields, and record components.
//!
//! See the [JVM Specification §4.7.9.1](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.7.9.1)
//! for more information.
//!
//! Type variables do not own the type parameter they refer to. Every
//! occurrence of a variable within a scope holds a non-owning reference to
//! the *same* declaration, which is owned by the [`ClassSignature`] or
//! [`MethodSignature`] that introduced it. This sharing is what makes a
//! recursive bound such as `<T:Ljava/lang/Comparable<TT;>;>` representable.

mod erasure;
mod parser;
mod substitution;
mod writer;

use std::{
    cell::OnceCell,
    collections::HashMap,
    fmt::Display,
    rc::{Rc, Weak},
};

use itertools::Itertools;

use crate::{
    field_type::{FieldType, PrimitiveType},
    method_descriptor::{MethodDescriptor, ReturnType},
    names::{PackageName, QualifiedName, ShortClassName},
};

/// The type parameters visible at some point of a class file, indexed by
/// name.
///
/// A nested class sees the parameters of its enclosing classes, and a method
/// sees the parameters of the class declaring it. Build a scope with
/// [`ClassSignature::type_parameter_scope`] (extending an outer scope via
/// [`HashMap::extend`] where necessary) and pass it to the parsing entry
/// points.
pub type TypeParameterScope = HashMap<String, Rc<TypeParameter>>;

/// A generic type, as it appears in a signature.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TypeSignature {
    /// A primitive type.
    Base(PrimitiveType),
    /// A possibly parameterized class or interface type.
    Object(ClassTypeSignature),
    /// An array type.
    Array(Box<TypeSignature>),
    /// A reference to a type parameter (e.g., `TT;`).
    Variable(TypeVariable),
}

/// The signature of a field, a formal parameter, a local variable, or a
/// record component.
///
/// Field signatures denote reference types, so a top level primitive is
/// rejected when parsing one (primitives may still occur as array elements
/// or type arguments of the field's type).
pub type FieldSignature = TypeSignature;

/// A possibly parameterized class or interface type.
///
/// The segments chain the simple class names from the outermost class to the
/// innermost one, each carrying its own type arguments (e.g.,
/// `Louter/Container<TT;>$Entry;` has two segments).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassTypeSignature {
    /// The package the class belongs to.
    pub package: PackageName,
    /// The chain of simple class names, outermost class first.
    pub segments: Vec<SimpleClassTypeSignature>,
}

/// A simple class name together with the type arguments applied to it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SimpleClassTypeSignature {
    /// The simple name of the class.
    pub name: String,
    /// The type arguments applied at this segment.
    ///
    /// `None` denotes a use without a `<...>` clause (i.e., a raw use or a
    /// non-generic class). The grammar never produces `Some` with an empty
    /// list.
    pub type_arguments: Option<Vec<TypeArgument>>,
}

/// An argument applied to a type parameter of a generic class.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TypeArgument {
    /// The unbounded wildcard `*`, matching any type.
    Any,
    /// A concrete argument, optionally relaxed into a bounded wildcard.
    Concrete {
        /// `None` for an exact argument, or the variance of a bounded
        /// wildcard (`? extends` / `? super`).
        wildcard: Option<WildcardIndicator>,
        /// The argument type. Always a reference type.
        signature: TypeSignature,
    },
}

impl TypeArgument {
    /// Creates an exact (non-wildcard) type argument.
    #[must_use]
    pub fn exact(signature: TypeSignature) -> Self {
        Self::Concrete {
            wildcard: None,
            signature,
        }
    }

    /// Creates an argument referring to the given declaration, for applying
    /// a generic class to its own parameters (e.g., building the `Node<T>`
    /// in `class Node<T> implements Container<Node<T>>`).
    #[must_use]
    pub fn of_parameter(declaration: &Rc<TypeParameter>) -> Self {
        Self::exact(TypeSignature::Variable(TypeVariable::new(declaration)))
    }
}

/// The variance of a bounded wildcard type argument.
#[derive(Debug, PartialEq, Eq, Clone, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum WildcardIndicator {
    /// An upper bounded wildcard (`? extends`), encoded as `+`.
    #[display("extends")]
    Extends,
    /// A lower bounded wildcard (`? super`), encoded as `-`.
    #[display("super")]
    Super,
}

/// A reference to a type parameter (e.g., the `T` in `List<T>`).
///
/// The reference is non-owning. [`TypeVariable::declaration`] resolves it to
/// the declaring [`TypeParameter`], which stays available for as long as the
/// signature owning the declaration is alive. A variable parsed without a
/// scope to resolve it against remains unresolved and yields `None`.
///
/// Equality and hashing consider the name only, so structural comparison of
/// signatures does not depend on which declaration instance a variable holds.
#[derive(Debug, Clone)]
pub struct TypeVariable {
    name: String,
    declaration: Weak<TypeParameter>,
}

impl TypeVariable {
    /// Creates a variable referring to the given declaration.
    #[must_use]
    pub fn new(declaration: &Rc<TypeParameter>) -> Self {
        Self {
            name: declaration.name().to_owned(),
            declaration: Rc::downgrade(declaration),
        }
    }

    /// Creates a variable that refers to no declaration.
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: Weak::new(),
        }
    }

    /// The name of the referenced type parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration this variable refers to, or `None` when the variable
    /// is unresolved or the declaring signature has been dropped.
    #[must_use]
    pub fn declaration(&self) -> Option<Rc<TypeParameter>> {
        self.declaration.upgrade()
    }
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeVariable {}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
struct TypeParameterBounds {
    class_bound: Option<TypeSignature>,
    interface_bounds: Vec<TypeSignature>,
}

/// The declaration of a formal type parameter of a class or a method (e.g.,
/// the `<T: ...>` clause), consisting of a name, an optional class bound,
/// and the interface bounds.
///
/// The bounds live behind a write-once cell that the parser seals before a
/// signature escapes it. This is what allows a bound to refer to the
/// parameter it belongs to: the declaration is allocated and registered
/// before its own bounds are read.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TypeParameter {
    name: String,
    bounds: OnceCell<TypeParameterBounds>,
}

impl TypeParameter {
    /// Creates a declaration with the given bounds.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        class_bound: Option<TypeSignature>,
        interface_bounds: Vec<TypeSignature>,
    ) -> Self {
        Self {
            name: name.into(),
            bounds: OnceCell::from(TypeParameterBounds {
                class_bound,
                interface_bounds,
            }),
        }
    }

    /// Creates a declaration whose bounds are filled in later via
    /// [`TypeParameter::seal`].
    pub(crate) fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: OnceCell::new(),
        }
    }

    /// Fills in the bounds of a declaration created by
    /// [`TypeParameter::unresolved`]. Has no effect when called twice.
    pub(crate) fn seal(
        &self,
        class_bound: Option<TypeSignature>,
        interface_bounds: Vec<TypeSignature>,
    ) {
        let _ = self.bounds.set(TypeParameterBounds {
            class_bound,
            interface_bounds,
        });
    }

    /// The name of the type parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class bound, if an explicit one was declared.
    #[must_use]
    pub fn class_bound(&self) -> Option<&TypeSignature> {
        self.bounds.get().and_then(|it| it.class_bound.as_ref())
    }

    /// The interface bounds, in declaration order.
    #[must_use]
    pub fn interface_bounds(&self) -> &[TypeSignature] {
        self.bounds.get().map_or(&[], |it| &it.interface_bounds)
    }

}

/// A type allowed in the `throws` clause of a method signature: a class type
/// or a type variable.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ThrowsSignature {
    /// A class or interface type.
    Class(ClassTypeSignature),
    /// A reference to a type parameter.
    Variable(TypeVariable),
}

/// The return type of a method signature.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReturnTypeSignature {
    /// The method returns a specific type.
    Some(TypeSignature),
    /// The return type of the method is `void`.
    Void,
}

/// The generic signature of a class declaration: its own type parameters,
/// its superclass, and its superinterfaces.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassSignature {
    /// The type parameters declared by the class. `None` when the class
    /// declaration has no `<...>` clause.
    pub type_parameters: Option<Vec<Rc<TypeParameter>>>,
    /// The superclass, including its type arguments.
    pub superclass: ClassTypeSignature,
    /// The implemented interfaces, including their type arguments.
    pub interfaces: Vec<ClassTypeSignature>,
}

/// The generic signature of a method declaration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodSignature {
    /// The type parameters declared by the method. `None` when the method
    /// declaration has no `<...>` clause.
    pub type_parameters: Option<Vec<Rc<TypeParameter>>>,
    /// The type of the parameters.
    pub parameters_types: Vec<TypeSignature>,
    /// The return type.
    pub return_type: ReturnTypeSignature,
    /// The types in the `throws` clause.
    pub throws: Vec<ThrowsSignature>,
}

impl ClassTypeSignature {
    /// Creates a class type that applies no type arguments to any segment.
    #[must_use]
    pub fn with_no_type_args(name: &QualifiedName) -> Self {
        Self {
            package: name.package.clone(),
            segments: name
                .short_name
                .components()
                .iter()
                .map(|it| SimpleClassTypeSignature {
                    name: it.clone(),
                    type_arguments: None,
                })
                .collect(),
        }
    }

    /// Creates a class type that applies the given type arguments to the
    /// innermost class of the chain. An empty argument list is normalized
    /// into the absence of a `<...>` clause.
    #[must_use]
    pub fn with_type_args_on_innermost(
        name: &QualifiedName,
        type_arguments: Vec<TypeArgument>,
    ) -> Self {
        let mut result = Self::with_no_type_args(name);
        if !type_arguments.is_empty() {
            result
                .segments
                .last_mut()
                .expect("A class name must have at least one component")
                .type_arguments = Some(type_arguments);
        }
        result
    }

    /// The type of `java.lang.Object`.
    #[must_use]
    pub fn object() -> Self {
        Self::with_no_type_args(&QualifiedName::object())
    }

    /// The qualified name of the class, with all type arguments dropped.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName {
            package: self.package.clone(),
            short_name: ShortClassName::from_components(
                self.segments.iter().map(|it| it.name.clone()).collect(),
            ),
        }
    }
}

impl ClassSignature {
    /// The scope formed by the type parameters this class declares, for
    /// parsing the signatures of its members and nested classes.
    ///
    /// The returned map borrows nothing; it shares the declarations by
    /// reference counting. For a nested class, extend the enclosing class's
    /// scope with this one.
    #[must_use]
    pub fn type_parameter_scope(&self) -> TypeParameterScope {
        type_parameter_scope(self.type_parameters.as_deref())
    }
}

impl MethodSignature {
    /// The scope formed by the type parameters this method declares together
    /// with those it inherits from its class.
    #[must_use]
    pub fn type_parameter_scope(&self) -> TypeParameterScope {
        type_parameter_scope(self.type_parameters.as_deref())
    }
}

fn type_parameter_scope(type_parameters: Option<&[Rc<TypeParameter>]>) -> TypeParameterScope {
    type_parameters
        .unwrap_or_default()
        .iter()
        .map(|it| (it.name().to_owned(), Rc::clone(it)))
        .collect()
}

impl From<FieldType> for TypeSignature {
    /// Lifts a raw field type into the signature grammar, applying no type
    /// arguments anywhere.
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Base(primitive) => Self::Base(primitive),
            FieldType::Object(name) => Self::Object(ClassTypeSignature::with_no_type_args(&name)),
            FieldType::Array(inner) => Self::Array(Box::new((*inner).into())),
        }
    }
}

impl From<ReturnType> for ReturnTypeSignature {
    fn from(return_type: ReturnType) -> Self {
        match return_type {
            ReturnType::Some(field_type) => Self::Some(field_type.into()),
            ReturnType::Void => Self::Void,
        }
    }
}

impl From<MethodDescriptor> for MethodSignature {
    /// Lifts a raw method descriptor into a signature with no type
    /// parameters, no type arguments, and no `throws` clause.
    fn from(descriptor: MethodDescriptor) -> Self {
        Self {
            type_parameters: None,
            parameters_types: descriptor
                .parameters_types
                .into_iter()
                .map(Into::into)
                .collect(),
            return_type: descriptor.return_type.into(),
            throws: Vec::new(),
        }
    }
}

impl Display for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base(it) => it.fmt(f),
            Self::Object(it) => it.fmt(f),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Variable(it) => it.fmt(f),
        }
    }
}

impl Display for ClassTypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}", self.segments.iter().join("."))
    }
}

impl Display for SimpleClassTypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(type_arguments) = &self.type_arguments {
            write!(f, "<{}>", type_arguments.iter().join(", "))?;
        }
        Ok(())
    }
}

impl Display for TypeArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Concrete {
                wildcard: None,
                signature,
            } => signature.fmt(f),
            Self::Concrete {
                wildcard: Some(indicator),
                signature,
            } => write!(f, "? {indicator} {signature}"),
        }
    }
}

impl Display for TypeVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for TypeParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        let bounds = self
            .class_bound()
            .into_iter()
            .chain(self.interface_bounds());
        let rendered = bounds.map(ToString::to_string).join(" & ");
        if !rendered.is_empty() {
            write!(f, " extends {rendered}")?;
        }
        Ok(())
    }
}

impl Display for ThrowsSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class(it) => it.fmt(f),
            Self::Variable(it) => it.fmt(f),
        }
    }
}

impl Display for ReturnTypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Some(it) => it.fmt(f),
            Self::Void => write!(f, "void"),
        }
    }
}

impl Display for ClassSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(type_parameters) = &self.type_parameters {
            write!(f, "<{}> ", type_parameters.iter().join(", "))?;
        }
        write!(f, "extends {}", self.superclass)?;
        if !self.interfaces.is_empty() {
            write!(f, " implements {}", self.interfaces.iter().join(", "))?;
        }
        Ok(())
    }
}

impl Display for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(type_parameters) = &self.type_parameters {
            write!(f, "<{}> ", type_parameters.iter().join(", "))?;
        }
        write!(
            f,
            "({}): {}",
            self.parameters_types.iter().join(", "),
            self.return_type
        )?;
        if !self.throws.is_empty() {
            write!(f, " throws {}", self.throws.iter().join(", "))?;
        }
        Ok(())
    }
}
