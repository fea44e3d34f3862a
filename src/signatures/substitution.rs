//! Structural rewriting of signatures: mapping over type variables and
//! visiting contained class types.
//!
//! Substitution replaces type variables with concrete types, the operation
//! that instantiates the generics a nested class inherits from its enclosing
//! class. Variables whose name is not mapped pass through unchanged, so
//! their references to outer declarations stay live without copying those
//! declarations.

use std::{collections::HashMap, rc::Rc};

use super::{
    ClassSignature, ClassTypeSignature, MethodSignature, ReturnTypeSignature,
    SimpleClassTypeSignature, ThrowsSignature, TypeArgument, TypeParameter, TypeParameterScope,
    TypeSignature, TypeVariable,
};

impl TypeSignature {
    /// Rebuilds the type, replacing every type variable the mapper maps.
    /// Returning `None` from the mapper keeps a variable as it is.
    ///
    /// The traversal recurses through class type argument lists and array
    /// element types. It does not descend into the declarations the
    /// variables refer to.
    #[must_use]
    pub fn map_type_variables<F>(&self, mapper: &mut F) -> Self
    where
        F: FnMut(&TypeVariable) -> Option<TypeSignature>,
    {
        match self {
            Self::Base(_) => self.clone(),
            Self::Object(class_type) => Self::Object(class_type.map_type_variables(mapper)),
            Self::Array(component) => Self::Array(Box::new(component.map_type_variables(mapper))),
            Self::Variable(variable) => mapper(variable).unwrap_or_else(|| self.clone()),
        }
    }

    /// Replaces every type variable whose name is in the mapping with the
    /// mapped type. Unmapped variables pass through unchanged.
    #[must_use]
    pub fn substitute(&self, mapping: &HashMap<String, TypeSignature>) -> Self {
        self.map_type_variables(&mut |variable| mapping.get(variable.name()).cloned())
    }

    /// Visits every class type contained in the type, outermost first,
    /// including those nested in type arguments and array element types.
    /// Declarations referred to by type variables are not entered.
    pub fn visit_class_types<'a, F>(&'a self, visitor: &mut F)
    where
        F: FnMut(&'a ClassTypeSignature),
    {
        match self {
            Self::Base(_) | Self::Variable(_) => {}
            Self::Object(class_type) => class_type.visit_class_types(visitor),
            Self::Array(component) => component.visit_class_types(visitor),
        }
    }
}

impl ClassTypeSignature {
    /// Rebuilds the class type, replacing the mapped type variables in its
    /// type arguments.
    #[must_use]
    pub fn map_type_variables<F>(&self, mapper: &mut F) -> Self
    where
        F: FnMut(&TypeVariable) -> Option<TypeSignature>,
    {
        Self {
            package: self.package.clone(),
            segments: self
                .segments
                .iter()
                .map(|segment| SimpleClassTypeSignature {
                    name: segment.name.clone(),
                    type_arguments: segment.type_arguments.as_ref().map(|type_arguments| {
                        type_arguments
                            .iter()
                            .map(|argument| argument.map_type_variables(mapper))
                            .collect()
                    }),
                })
                .collect(),
        }
    }

    /// Visits this class type and every class type nested in its type
    /// arguments.
    pub fn visit_class_types<'a, F>(&'a self, visitor: &mut F)
    where
        F: FnMut(&'a ClassTypeSignature),
    {
        visitor(self);
        for segment in &self.segments {
            for argument in segment.type_arguments.iter().flatten() {
                if let TypeArgument::Concrete { signature, .. } = argument {
                    signature.visit_class_types(visitor);
                }
            }
        }
    }
}

impl TypeArgument {
    /// Rebuilds the type argument, replacing the mapped type variables.
    #[must_use]
    pub fn map_type_variables<F>(&self, mapper: &mut F) -> Self
    where
        F: FnMut(&TypeVariable) -> Option<TypeSignature>,
    {
        match self {
            Self::Any => Self::Any,
            Self::Concrete {
                wildcard,
                signature,
            } => Self::Concrete {
                wildcard: wildcard.clone(),
                signature: signature.map_type_variables(mapper),
            },
        }
    }
}

impl ReturnTypeSignature {
    /// Rebuilds the return type, replacing the mapped type variables.
    #[must_use]
    pub fn map_type_variables<F>(&self, mapper: &mut F) -> Self
    where
        F: FnMut(&TypeVariable) -> Option<TypeSignature>,
    {
        match self {
            Self::Some(signature) => Self::Some(signature.map_type_variables(mapper)),
            Self::Void => Self::Void,
        }
    }

    /// Visits every class type contained in the return type.
    pub fn visit_class_types<'a, F>(&'a self, visitor: &mut F)
    where
        F: FnMut(&'a ClassTypeSignature),
    {
        if let Self::Some(signature) = self {
            signature.visit_class_types(visitor);
        }
    }
}

impl ThrowsSignature {
    /// Rebuilds the throws type, replacing the mapped type variables.
    ///
    /// The JVM restricts throwable types to class types and type variables,
    /// so a variable whose replacement is neither is kept unchanged.
    #[must_use]
    pub fn map_type_variables<F>(&self, mapper: &mut F) -> Self
    where
        F: FnMut(&TypeVariable) -> Option<TypeSignature>,
    {
        match self {
            Self::Class(class_type) => Self::Class(class_type.map_type_variables(mapper)),
            Self::Variable(variable) => match mapper(variable) {
                Some(TypeSignature::Variable(replacement)) => Self::Variable(replacement),
                Some(TypeSignature::Object(class_type)) => Self::Class(class_type),
                Some(_) | None => self.clone(),
            },
        }
    }
}

impl TypeParameter {
    /// Rebuilds the declaration, replacing the mapped type variables in its
    /// bounds.
    #[must_use]
    pub fn map_type_variables<F>(&self, mapper: &mut F) -> Self
    where
        F: FnMut(&TypeVariable) -> Option<TypeSignature>,
    {
        Self::new(
            self.name(),
            self.class_bound()
                .map(|bound| bound.map_type_variables(mapper)),
            self.interface_bounds()
                .iter()
                .map(|bound| bound.map_type_variables(mapper))
                .collect(),
        )
    }
}

impl ClassSignature {
    /// Replaces every type variable whose name is in the mapping, recursing
    /// through the declared type parameters' bounds, the superclass, and the
    /// interfaces.
    ///
    /// The declared type parameters are rebuilt, and variables referring to
    /// them are re-pointed at the rebuilt declarations. A declared name
    /// shadows the mapping, the way a redeclared type parameter hides an
    /// enclosing one in Java.
    #[must_use]
    pub fn substitute(&self, mapping: &HashMap<String, TypeSignature>) -> Self {
        let (type_parameters, rebound) =
            substitute_parameters(self.type_parameters.as_deref(), mapping);
        Self {
            type_parameters,
            superclass: self
                .superclass
                .map_type_variables(&mut rebinding_mapper(mapping, &rebound)),
            interfaces: self
                .interfaces
                .iter()
                .map(|it| it.map_type_variables(&mut rebinding_mapper(mapping, &rebound)))
                .collect(),
        }
    }
}

impl MethodSignature {
    /// Replaces every type variable whose name is in the mapping, recursing
    /// through the declared type parameters' bounds, the parameter types,
    /// the return type, and the throws clause.
    ///
    /// The declared type parameters are rebuilt, and variables referring to
    /// them are re-pointed at the rebuilt declarations. A declared name
    /// shadows the mapping, the way a redeclared type parameter hides an
    /// enclosing one in Java.
    #[must_use]
    pub fn substitute(&self, mapping: &HashMap<String, TypeSignature>) -> Self {
        let (type_parameters, rebound) =
            substitute_parameters(self.type_parameters.as_deref(), mapping);
        Self {
            type_parameters,
            parameters_types: self
                .parameters_types
                .iter()
                .map(|it| it.map_type_variables(&mut rebinding_mapper(mapping, &rebound)))
                .collect(),
            return_type: self
                .return_type
                .map_type_variables(&mut rebinding_mapper(mapping, &rebound)),
            throws: self
                .throws
                .iter()
                .map(|it| it.map_type_variables(&mut rebinding_mapper(mapping, &rebound)))
                .collect(),
        }
    }
}

/// Rebuilds a declaration list under a substitution. The fresh declarations
/// are allocated first and registered by name, then the bounds are rewritten
/// against that registry, so that recursive and mutually recursive bounds
/// end up referring to the fresh declarations.
fn substitute_parameters(
    type_parameters: Option<&[Rc<TypeParameter>]>,
    mapping: &HashMap<String, TypeSignature>,
) -> (Option<Vec<Rc<TypeParameter>>>, TypeParameterScope) {
    let Some(type_parameters) = type_parameters else {
        return (None, TypeParameterScope::new());
    };
    let fresh: Vec<Rc<TypeParameter>> = type_parameters
        .iter()
        .map(|it| Rc::new(TypeParameter::unresolved(it.name())))
        .collect();
    let rebound: TypeParameterScope = fresh
        .iter()
        .map(|it| (it.name().to_owned(), Rc::clone(it)))
        .collect();
    for (original, replacement) in type_parameters.iter().zip(&fresh) {
        replacement.seal(
            original
                .class_bound()
                .map(|bound| bound.map_type_variables(&mut rebinding_mapper(mapping, &rebound))),
            original
                .interface_bounds()
                .iter()
                .map(|bound| bound.map_type_variables(&mut rebinding_mapper(mapping, &rebound)))
                .collect(),
        );
    }
    (Some(fresh), rebound)
}

fn rebinding_mapper<'a>(
    mapping: &'a HashMap<String, TypeSignature>,
    rebound: &'a TypeParameterScope,
) -> impl FnMut(&TypeVariable) -> Option<TypeSignature> + 'a {
    move |variable| {
        if let Some(declaration) = rebound.get(variable.name()) {
            return Some(TypeSignature::Variable(TypeVariable::new(declaration)));
        }
        mapping.get(variable.name()).cloned()
    }
}
