//! Parsing of signature strings.
//!
//! The parser is a single left-to-right descent over the grammar. Type
//! parameter names are registered into the local scope *before* their bounds
//! are read, so a bound may refer to the parameter being declared (e.g.,
//! `<T:Ljava/lang/Comparable<TT;>;>`). A reference to a name that is not in
//! scope yet does not fail: the variable is left unresolved and, once the
//! whole signature has been read, a second traversal re-points every such
//! variable at the now-complete declaration. Names that are declared nowhere
//! make that second traversal fail.

use std::rc::Rc;

use crate::{
    errors::InvalidSignature,
    field_type::PrimitiveType,
    names::PackageName,
};

use super::{
    ClassSignature, ClassTypeSignature, FieldSignature, MethodSignature, ReturnTypeSignature,
    SimpleClassTypeSignature, ThrowsSignature, TypeArgument, TypeParameter, TypeParameterScope,
    TypeSignature, TypeVariable, WildcardIndicator,
};

impl ClassSignature {
    /// Parses the signature of a class declaration (e.g.,
    /// `<E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;`).
    ///
    /// `scope` carries the type parameters of the enclosing classes, which
    /// the signature may refer to. When it is `None` there is no outer scope
    /// to fall back to, and variables referring to names the signature does
    /// not declare are left unresolved instead of being rejected.
    ///
    /// # Errors
    /// See [`InvalidSignature`].
    pub fn parse(
        signature: &str,
        scope: Option<&TypeParameterScope>,
    ) -> Result<Self, InvalidSignature> {
        SignatureParser::new(signature, scope).parse_class()
    }
}

impl MethodSignature {
    /// Parses the signature of a method declaration (e.g.,
    /// `<T:Ljava/lang/Object;>(TT;)TT;^Ljava/io/IOException;`).
    ///
    /// `scope` carries the type parameters of the declaring class and its
    /// enclosing classes. When it is `None`, variables referring to names
    /// the signature does not declare are left unresolved.
    ///
    /// # Errors
    /// See [`InvalidSignature`].
    pub fn parse(
        signature: &str,
        scope: Option<&TypeParameterScope>,
    ) -> Result<Self, InvalidSignature> {
        SignatureParser::new(signature, scope).parse_method()
    }
}

impl TypeSignature {
    /// Parses a type signature, i.e., a reference type or a primitive
    /// (e.g., `[Ljava/util/List<TT;>;` or `I`).
    ///
    /// # Errors
    /// See [`InvalidSignature`].
    pub fn parse(
        signature: &str,
        scope: Option<&TypeParameterScope>,
    ) -> Result<Self, InvalidSignature> {
        SignatureParser::new(signature, scope).parse_type()
    }

    /// Parses the signature of a field, a formal parameter, a local
    /// variable, or a record component (e.g.,
    /// `Ljava/util/List<Ljava/lang/String;>;`).
    ///
    /// A field signature denotes a reference type, so a top level primitive
    /// is rejected.
    ///
    /// # Errors
    /// See [`InvalidSignature`].
    pub fn parse_field(
        signature: &str,
        scope: Option<&TypeParameterScope>,
    ) -> Result<FieldSignature, InvalidSignature> {
        SignatureParser::new(signature, scope).parse_field()
    }
}

impl std::str::FromStr for ClassSignature {
    type Err = InvalidSignature;

    fn from_str(signature: &str) -> Result<Self, Self::Err> {
        Self::parse(signature, None)
    }
}

impl std::str::FromStr for MethodSignature {
    type Err = InvalidSignature;

    fn from_str(signature: &str) -> Result<Self, Self::Err> {
        Self::parse(signature, None)
    }
}

/// A declaration whose bounds have been read but not yet sealed into the
/// write-once cell. Sealing is deferred until unresolved variables have been
/// re-pointed, since the bounds themselves may contain such variables.
struct PendingParameter {
    declaration: Rc<TypeParameter>,
    class_bound: Option<TypeSignature>,
    interface_bounds: Vec<TypeSignature>,
}

struct SignatureParser<'s> {
    signature: &'s str,
    pos: usize,
    scope: TypeParameterScope,
    pending: Vec<PendingParameter>,
    saw_unresolved: bool,
    has_inherited_scope: bool,
}

impl<'s> SignatureParser<'s> {
    fn new(signature: &'s str, scope: Option<&TypeParameterScope>) -> Self {
        Self {
            signature,
            pos: 0,
            scope: scope.cloned().unwrap_or_default(),
            pending: Vec::new(),
            saw_unresolved: false,
            has_inherited_scope: scope.is_some(),
        }
    }

    fn parse_class(mut self) -> Result<ClassSignature, InvalidSignature> {
        let type_parameters = if self.peek() == Some('<') {
            Some(self.read_formal_type_parameters()?)
        } else {
            None
        };
        let superclass = self.read_class_type_signature()?;
        let mut interfaces = Vec::new();
        while !self.at_end() {
            interfaces.push(self.read_class_type_signature()?);
        }
        let mut result = ClassSignature {
            type_parameters,
            superclass,
            interfaces,
        };
        if self.should_resolve() {
            let mut missing = None;
            self.resolve_pending(&mut missing);
            result.superclass = result
                .superclass
                .map_type_variables(&mut resolver(&self.scope, &mut missing));
            result.interfaces = result
                .interfaces
                .iter()
                .map(|it| it.map_type_variables(&mut resolver(&self.scope, &mut missing)))
                .collect();
            if let Some(name) = missing {
                return Err(InvalidSignature::UnresolvedTypeVariable(name));
            }
        }
        self.seal_pending();
        Ok(result)
    }

    fn parse_method(mut self) -> Result<MethodSignature, InvalidSignature> {
        let type_parameters = if self.peek() == Some('<') {
            Some(self.read_formal_type_parameters()?)
        } else {
            None
        };
        self.expect('(')?;
        let mut parameters_types = Vec::new();
        while self.peek() != Some(')') {
            if self.at_end() {
                return Err(InvalidSignature::UnexpectedEnd);
            }
            parameters_types.push(self.read_type_signature()?);
        }
        self.pos += 1;
        let return_type = if self.peek() == Some('V') {
            self.pos += 1;
            ReturnTypeSignature::Void
        } else {
            ReturnTypeSignature::Some(self.read_type_signature()?)
        };
        let mut throws = Vec::new();
        while !self.at_end() {
            throws.push(self.read_throws_signature()?);
        }
        let mut result = MethodSignature {
            type_parameters,
            parameters_types,
            return_type,
            throws,
        };
        if self.should_resolve() {
            let mut missing = None;
            self.resolve_pending(&mut missing);
            result.parameters_types = result
                .parameters_types
                .iter()
                .map(|it| it.map_type_variables(&mut resolver(&self.scope, &mut missing)))
                .collect();
            result.return_type = result
                .return_type
                .map_type_variables(&mut resolver(&self.scope, &mut missing));
            result.throws = result
                .throws
                .iter()
                .map(|it| it.map_type_variables(&mut resolver(&self.scope, &mut missing)))
                .collect();
            if let Some(name) = missing {
                return Err(InvalidSignature::UnresolvedTypeVariable(name));
            }
        }
        self.seal_pending();
        Ok(result)
    }

    fn parse_field(mut self) -> Result<FieldSignature, InvalidSignature> {
        let result = self.read_field_type_signature()?;
        self.finish_type(result)
    }

    fn parse_type(mut self) -> Result<TypeSignature, InvalidSignature> {
        let result = self.read_type_signature()?;
        self.finish_type(result)
    }

    fn finish_type(&mut self, result: TypeSignature) -> Result<TypeSignature, InvalidSignature> {
        if !self.at_end() {
            return Err(InvalidSignature::TrailingData { offset: self.pos });
        }
        let result = if self.should_resolve() {
            let mut missing = None;
            let resolved = result.map_type_variables(&mut resolver(&self.scope, &mut missing));
            if let Some(name) = missing {
                return Err(InvalidSignature::UnresolvedTypeVariable(name));
            }
            resolved
        } else {
            result
        };
        self.seal_pending();
        Ok(result)
    }

    fn should_resolve(&self) -> bool {
        self.saw_unresolved && self.has_inherited_scope
    }

    /// Re-points unresolved variables inside the pending bounds, which is
    /// only possible before the bounds are sealed.
    fn resolve_pending(&mut self, missing: &mut Option<String>) {
        let pending = std::mem::take(&mut self.pending);
        self.pending = pending
            .into_iter()
            .map(|it| PendingParameter {
                class_bound: it
                    .class_bound
                    .map(|bound| bound.map_type_variables(&mut resolver(&self.scope, missing))),
                interface_bounds: it
                    .interface_bounds
                    .iter()
                    .map(|bound| bound.map_type_variables(&mut resolver(&self.scope, missing)))
                    .collect(),
                declaration: it.declaration,
            })
            .collect();
    }

    fn seal_pending(&mut self) {
        for it in self.pending.drain(..) {
            it.declaration.seal(it.class_bound, it.interface_bounds);
        }
    }

    fn read_formal_type_parameters(&mut self) -> Result<Vec<Rc<TypeParameter>>, InvalidSignature> {
        self.expect('<')?;
        let mut parameters = Vec::new();
        while self.peek() != Some('>') {
            if self.at_end() {
                return Err(InvalidSignature::UnexpectedEnd);
            }
            parameters.push(self.read_formal_type_parameter()?);
        }
        self.pos += 1;
        if parameters.is_empty() {
            return Err(InvalidSignature::EmptyTypeParameterList);
        }
        Ok(parameters)
    }

    fn read_formal_type_parameter(&mut self) -> Result<Rc<TypeParameter>, InvalidSignature> {
        let name = self.read_identifier(&[b':']);
        self.expect(':')?;
        // Registered before its own bounds are read, so that the bounds may
        // refer to it.
        let declaration = Rc::new(TypeParameter::unresolved(name));
        self.scope
            .insert(name.to_owned(), Rc::clone(&declaration));
        let class_bound = match self.peek() {
            Some('L' | '[' | 'T') => Some(self.read_field_type_signature()?),
            _ => None,
        };
        let mut interface_bounds = Vec::new();
        while self.peek() == Some(':') {
            self.pos += 1;
            interface_bounds.push(self.read_field_type_signature()?);
        }
        self.pending.push(PendingParameter {
            declaration: Rc::clone(&declaration),
            class_bound,
            interface_bounds,
        });
        Ok(declaration)
    }

    fn read_class_type_signature(&mut self) -> Result<ClassTypeSignature, InvalidSignature> {
        self.expect('L')?;
        let package = self.read_package_specifier();
        let mut segments = Vec::new();
        while self.peek() != Some(';') {
            if self.at_end() {
                return Err(InvalidSignature::UnexpectedEnd);
            }
            segments.push(self.read_simple_class_type_signature()?);
        }
        if segments.is_empty() {
            return Err(InvalidSignature::UnexpectedCharacter {
                found: ';',
                offset: self.pos,
                parsing: "a class type signature",
            });
        }
        self.pos += 1;
        Ok(ClassTypeSignature { package, segments })
    }

    fn read_simple_class_type_signature(
        &mut self,
    ) -> Result<SimpleClassTypeSignature, InvalidSignature> {
        let name = self.read_identifier(&[b'<', b'.', b'$', b';']).to_owned();
        let type_arguments = if self.peek() == Some('<') {
            Some(self.read_type_arguments()?)
        } else {
            None
        };
        // Which separator joined the segments (`.` or `$`) is not retained;
        // serialization canonicalizes the chain.
        if let Some('.' | '$') = self.peek() {
            self.pos += 1;
        }
        Ok(SimpleClassTypeSignature {
            name,
            type_arguments,
        })
    }

    fn read_type_arguments(&mut self) -> Result<Vec<TypeArgument>, InvalidSignature> {
        self.expect('<')?;
        let mut arguments = Vec::new();
        while self.peek() != Some('>') {
            if self.at_end() {
                return Err(InvalidSignature::UnexpectedEnd);
            }
            arguments.push(self.read_type_argument()?);
        }
        self.pos += 1;
        if arguments.is_empty() {
            return Err(InvalidSignature::EmptyTypeParameterList);
        }
        Ok(arguments)
    }

    fn read_type_argument(&mut self) -> Result<TypeArgument, InvalidSignature> {
        if self.peek() == Some('*') {
            self.pos += 1;
            return Ok(TypeArgument::Any);
        }
        let wildcard = match self.peek() {
            Some('+') => Some(WildcardIndicator::Extends),
            Some('-') => Some(WildcardIndicator::Super),
            _ => None,
        };
        if wildcard.is_some() {
            self.pos += 1;
        }
        let signature = self.read_field_type_signature()?;
        Ok(TypeArgument::Concrete {
            wildcard,
            signature,
        })
    }

    fn read_field_type_signature(&mut self) -> Result<TypeSignature, InvalidSignature> {
        match self.peek() {
            Some('L') => Ok(TypeSignature::Object(self.read_class_type_signature()?)),
            Some('[') => {
                self.pos += 1;
                Ok(TypeSignature::Array(Box::new(self.read_type_signature()?)))
            }
            Some('T') => Ok(TypeSignature::Variable(self.read_type_variable_signature()?)),
            Some(found) => Err(InvalidSignature::UnexpectedCharacter {
                found,
                offset: self.pos,
                parsing: "a field type signature",
            }),
            None => Err(InvalidSignature::UnexpectedEnd),
        }
    }

    fn read_type_signature(&mut self) -> Result<TypeSignature, InvalidSignature> {
        if let Some(primitive) = self
            .peek()
            .and_then(|c| PrimitiveType::try_from(c).ok())
        {
            self.pos += 1;
            return Ok(TypeSignature::Base(primitive));
        }
        self.read_field_type_signature()
    }

    fn read_type_variable_signature(&mut self) -> Result<TypeVariable, InvalidSignature> {
        self.expect('T')?;
        let name = self.read_identifier(&[b';']);
        let variable = match self.scope.get(name) {
            Some(declaration) => TypeVariable::new(declaration),
            None => {
                // The name may be declared later on (a recursive or forward
                // reference). If it never is, resolution fails after the
                // whole signature has been read.
                self.saw_unresolved = true;
                TypeVariable::unresolved(name)
            }
        };
        self.expect(';')?;
        Ok(variable)
    }

    fn read_throws_signature(&mut self) -> Result<ThrowsSignature, InvalidSignature> {
        self.expect('^')?;
        match self.peek() {
            Some('L') => Ok(ThrowsSignature::Class(self.read_class_type_signature()?)),
            Some('T') => Ok(ThrowsSignature::Variable(
                self.read_type_variable_signature()?,
            )),
            Some(found) => Err(InvalidSignature::UnexpectedCharacter {
                found,
                offset: self.pos,
                parsing: "a throws signature",
            }),
            None => Err(InvalidSignature::UnexpectedEnd),
        }
    }

    /// Splits off the package from the class name chain. The chain starts
    /// after the last `/` that precedes the first of `<`, `$`, or `;`. The
    /// look-ahead is needed because a `/` may occur before a `$` joined
    /// inner class suffix.
    fn read_package_specifier(&mut self) -> PackageName {
        let bytes = self.signature.as_bytes();
        let mut last_slash = None;
        let mut index = self.pos;
        while index < bytes.len() {
            match bytes[index] {
                b'/' => last_slash = Some(index),
                b'<' | b'$' | b';' => break,
                _ => {}
            }
            index += 1;
        }
        match last_slash {
            None => PackageName::default(),
            Some(end) => {
                let components = self.signature[self.pos..end]
                    .split('/')
                    .map(str::to_owned)
                    .collect();
                self.pos = end + 1;
                PackageName::from_components(components)
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.signature[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.signature.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), InvalidSignature> {
        match self.peek() {
            Some(found) if found == expected => {
                self.pos += found.len_utf8();
                Ok(())
            }
            Some(found) => Err(InvalidSignature::MismatchedCharacter {
                expected,
                found,
                offset: self.pos,
            }),
            None => Err(InvalidSignature::UnexpectedEnd),
        }
    }

    /// Reads up to (but not including) the first of the given terminator
    /// bytes, or to the end of the signature. The terminators are all ASCII,
    /// so scanning bytes never splits a multi-byte character.
    fn read_identifier(&mut self, terminators: &[u8]) -> &'s str {
        let bytes = self.signature.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && !terminators.contains(&bytes[self.pos]) {
            self.pos += 1;
        }
        &self.signature[start..self.pos]
    }
}

/// A variable mapper that re-points unresolved variables at the declaration
/// registered under their name, recording the first name that has none.
fn resolver<'a>(
    scope: &'a TypeParameterScope,
    missing: &'a mut Option<String>,
) -> impl FnMut(&TypeVariable) -> Option<TypeSignature> + 'a {
    move |variable| {
        if variable.declaration().is_some() {
            return None;
        }
        if let Some(declaration) = scope.get(variable.name()) {
            Some(TypeSignature::Variable(TypeVariable::new(declaration)))
        } else {
            if missing.is_none() {
                *missing = Some(variable.name().to_owned());
            }
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvalidSignature;
    use crate::names::QualifiedName;

    fn single_argument(class_type: &ClassTypeSignature) -> &TypeArgument {
        let arguments = class_type
            .segments
            .last()
            .and_then(|it| it.type_arguments.as_ref())
            .expect("Expected type arguments on the innermost segment");
        assert_eq!(arguments.len(), 1);
        &arguments[0]
    }

    #[test]
    fn field_signature_with_one_type_argument() {
        let field = TypeSignature::parse_field("Ljava/util/List<Ljava/lang/String;>;", None)
            .expect("Failed to parse field signature");
        let TypeSignature::Object(list) = &field else {
            panic!("Expected a class type");
        };
        assert_eq!(
            list.qualified_name(),
            QualifiedName::from_binary_name("java/util/List")
        );
        let TypeArgument::Concrete {
            wildcard: None,
            signature: TypeSignature::Object(string),
        } = single_argument(list)
        else {
            panic!("Expected an exact class type argument");
        };
        assert_eq!(
            string.qualified_name(),
            QualifiedName::from_binary_name("java/lang/String")
        );
    }

    #[test]
    fn method_signature_shares_one_declaration() {
        let method = MethodSignature::parse("<T:Ljava/lang/Object;>(TT;)TT;", None)
            .expect("Failed to parse method signature");
        let parameters = method.type_parameters.as_ref().unwrap();
        assert_eq!(parameters.len(), 1);
        let declaration = &parameters[0];
        assert_eq!(declaration.name(), "T");
        assert_eq!(
            declaration.class_bound(),
            Some(&TypeSignature::Object(ClassTypeSignature::object()))
        );
        assert!(declaration.interface_bounds().is_empty());

        let TypeSignature::Variable(parameter) = &method.parameters_types[0] else {
            panic!("Expected a type variable parameter");
        };
        let ReturnTypeSignature::Some(TypeSignature::Variable(returned)) = &method.return_type
        else {
            panic!("Expected a type variable return type");
        };
        let parameter_declaration = parameter.declaration().unwrap();
        let return_declaration = returned.declaration().unwrap();
        assert!(std::rc::Rc::ptr_eq(&parameter_declaration, declaration));
        assert!(std::rc::Rc::ptr_eq(
            &parameter_declaration,
            &return_declaration
        ));
    }

    #[test]
    fn recursive_bound_points_back_at_its_own_declaration() {
        let class = ClassSignature::parse(
            "<T:Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;",
            None,
        )
        .expect("Failed to parse class signature");
        let declaration = &class.type_parameters.as_ref().unwrap()[0];
        let Some(TypeSignature::Object(comparable)) = declaration.class_bound() else {
            panic!("Expected a class bound");
        };
        let TypeArgument::Concrete {
            signature: TypeSignature::Variable(variable),
            ..
        } = single_argument(comparable)
        else {
            panic!("Expected a type variable argument");
        };
        assert!(std::rc::Rc::ptr_eq(
            &variable.declaration().unwrap(),
            declaration
        ));
    }

    #[test]
    fn mutually_recursive_bounds_resolve_with_a_scope() {
        let scope = TypeParameterScope::new();
        let class = ClassSignature::parse(
            "<A:Ljava/util/List<TB;>;B:Ljava/util/List<TA;>;>Ljava/lang/Object;",
            Some(&scope),
        )
        .expect("Failed to parse class signature");
        let parameters = class.type_parameters.as_ref().unwrap();
        let Some(TypeSignature::Object(list_of_b)) = parameters[0].class_bound() else {
            panic!("Expected a class bound on A");
        };
        let TypeArgument::Concrete {
            signature: TypeSignature::Variable(b),
            ..
        } = single_argument(list_of_b)
        else {
            panic!("Expected a type variable argument");
        };
        assert!(std::rc::Rc::ptr_eq(
            &b.declaration().unwrap(),
            &parameters[1]
        ));
    }

    #[test]
    fn forward_reference_without_scope_stays_unresolved() {
        let class = ClassSignature::parse(
            "<A:Ljava/util/List<TB;>;B:Ljava/lang/Object;>Ljava/lang/Object;",
            None,
        )
        .expect("Failed to parse class signature");
        let parameters = class.type_parameters.as_ref().unwrap();
        let Some(TypeSignature::Object(list_of_b)) = parameters[0].class_bound() else {
            panic!("Expected a class bound on A");
        };
        let TypeArgument::Concrete {
            signature: TypeSignature::Variable(b),
            ..
        } = single_argument(list_of_b)
        else {
            panic!("Expected a type variable argument");
        };
        assert!(b.declaration().is_none());
    }

    #[test]
    fn variable_resolves_against_the_inherited_scope() {
        let class = ClassSignature::parse("<T:Ljava/lang/Object;>Ljava/lang/Object;", None)
            .expect("Failed to parse class signature");
        let scope = class.type_parameter_scope();
        let field = TypeSignature::parse_field("Ljava/util/List<TT;>;", Some(&scope))
            .expect("Failed to parse field signature");
        let TypeSignature::Object(list) = &field else {
            panic!("Expected a class type");
        };
        let TypeArgument::Concrete {
            signature: TypeSignature::Variable(variable),
            ..
        } = single_argument(list)
        else {
            panic!("Expected a type variable argument");
        };
        assert!(std::rc::Rc::ptr_eq(
            &variable.declaration().unwrap(),
            &class.type_parameters.as_ref().unwrap()[0]
        ));
    }

    #[test]
    fn undeclared_variable_with_scope_is_rejected() {
        let scope = TypeParameterScope::new();
        let result = TypeSignature::parse_field("Ljava/util/List<TT;>;", Some(&scope));
        assert_eq!(
            result,
            Err(InvalidSignature::UnresolvedTypeVariable("T".to_owned()))
        );
    }

    #[test]
    fn undeclared_variable_without_scope_is_accepted() {
        let field = TypeSignature::parse_field("Ljava/util/List<TT;>;", None)
            .expect("Failed to parse field signature");
        let TypeSignature::Object(list) = &field else {
            panic!("Expected a class type");
        };
        let TypeArgument::Concrete {
            signature: TypeSignature::Variable(variable),
            ..
        } = single_argument(list)
        else {
            panic!("Expected a type variable argument");
        };
        assert!(variable.declaration().is_none());
    }

    #[test]
    fn empty_type_parameter_list_is_rejected() {
        assert_eq!(
            ClassSignature::parse("<>Ljava/lang/Object;", None),
            Err(InvalidSignature::EmptyTypeParameterList)
        );
        assert_eq!(
            TypeSignature::parse_field("Ljava/util/List<>;", None),
            Err(InvalidSignature::EmptyTypeParameterList)
        );
    }

    #[test]
    fn empty_class_name_chain_is_rejected() {
        assert!(matches!(
            TypeSignature::parse_field("Ljava/util/;", None),
            Err(InvalidSignature::UnexpectedCharacter { found: ';', .. })
        ));
    }

    #[test]
    fn top_level_primitive_field_signature_is_rejected() {
        assert!(matches!(
            TypeSignature::parse_field("I", None),
            Err(InvalidSignature::UnexpectedCharacter { found: 'I', .. })
        ));
        assert_eq!(
            TypeSignature::parse("I", None),
            Ok(TypeSignature::Base(PrimitiveType::Int))
        );
    }

    #[test]
    fn array_of_primitives_is_a_valid_field_signature() {
        let field = TypeSignature::parse_field("[[I", None).unwrap();
        assert_eq!(
            field,
            TypeSignature::Array(Box::new(TypeSignature::Array(Box::new(
                TypeSignature::Base(PrimitiveType::Int)
            ))))
        );
    }

    #[test]
    fn inner_class_separators_are_consumed_but_not_retained() {
        let dotted = TypeSignature::parse_field("Lfoo/Outer<TT;>.Inner;", None).unwrap();
        let dollared = TypeSignature::parse_field("Lfoo/Outer<TT;>$Inner;", None).unwrap();
        assert_eq!(dotted, dollared);
        let TypeSignature::Object(class_type) = &dotted else {
            panic!("Expected a class type");
        };
        assert_eq!(class_type.segments.len(), 2);
        assert_eq!(class_type.segments[0].name, "Outer");
        assert!(class_type.segments[0].type_arguments.is_some());
        assert_eq!(class_type.segments[1].name, "Inner");
        assert_eq!(class_type.segments[1].type_arguments, None);
    }

    #[test]
    fn package_boundary_looks_ahead_past_slashes() {
        let field =
            TypeSignature::parse_field("Ljava/util/Map<TK;TV;>$Entry;", None).unwrap();
        let TypeSignature::Object(class_type) = &field else {
            panic!("Expected a class type");
        };
        assert_eq!(class_type.package.components(), ["java", "util"]);
        assert_eq!(class_type.segments[0].name, "Map");
        assert_eq!(class_type.segments[1].name, "Entry");
    }

    #[test]
    fn class_without_package() {
        let field = TypeSignature::parse_field("LMyClass;", None).unwrap();
        let TypeSignature::Object(class_type) = &field else {
            panic!("Expected a class type");
        };
        assert!(class_type.package.is_empty());
        assert_eq!(class_type.segments[0].name, "MyClass");
    }

    #[test]
    fn wildcard_arguments() {
        let field = TypeSignature::parse_field(
            "Ljava/util/Map<+Ljava/lang/Number;-TT;>;",
            None,
        )
        .unwrap();
        let TypeSignature::Object(map) = &field else {
            panic!("Expected a class type");
        };
        let arguments = map.segments[0].type_arguments.as_ref().unwrap();
        assert!(matches!(
            &arguments[0],
            TypeArgument::Concrete {
                wildcard: Some(WildcardIndicator::Extends),
                ..
            }
        ));
        assert!(matches!(
            &arguments[1],
            TypeArgument::Concrete {
                wildcard: Some(WildcardIndicator::Super),
                ..
            }
        ));

        let starred = TypeSignature::parse_field("Ljava/util/List<*>;", None).unwrap();
        let TypeSignature::Object(list) = &starred else {
            panic!("Expected a class type");
        };
        assert_eq!(
            list.segments[0].type_arguments,
            Some(vec![TypeArgument::Any])
        );
    }

    #[test]
    fn method_signature_with_throws_clause() {
        let method = MethodSignature::parse(
            "<X:Ljava/lang/Throwable;>(Ljava/util/function/Supplier<+TX;>;)TT;^TX;",
            None,
        )
        .unwrap();
        assert_eq!(method.throws.len(), 1);
        let ThrowsSignature::Variable(thrown) = &method.throws[0] else {
            panic!("Expected a type variable in the throws clause");
        };
        assert!(std::rc::Rc::ptr_eq(
            &thrown.declaration().unwrap(),
            &method.type_parameters.as_ref().unwrap()[0]
        ));
    }

    #[test]
    fn method_signature_with_class_throws() {
        let method = MethodSignature::parse("()V^Ljava/io/IOException;", None).unwrap();
        assert_eq!(method.parameters_types.len(), 0);
        assert_eq!(method.return_type, ReturnTypeSignature::Void);
        let ThrowsSignature::Class(thrown) = &method.throws[0] else {
            panic!("Expected a class type in the throws clause");
        };
        assert_eq!(
            thrown.qualified_name(),
            QualifiedName::from_binary_name("java/io/IOException")
        );
    }

    #[test]
    fn interface_only_bound_keeps_no_class_bound() {
        let method = MethodSignature::parse(
            "<T::Ljava/lang/Comparable<-TT;>;>(Ljava/util/List<TT;>;)V",
            None,
        )
        .unwrap();
        let declaration = &method.type_parameters.as_ref().unwrap()[0];
        assert_eq!(declaration.class_bound(), None);
        assert_eq!(declaration.interface_bounds().len(), 1);
    }

    #[test]
    fn class_signature_with_superinterfaces() {
        let class = ClassSignature::parse(
            "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;Ljava/util/Map<TK;TV;>;Ljava/lang/Cloneable;",
            None,
        )
        .unwrap();
        assert_eq!(class.type_parameters.as_ref().unwrap().len(), 2);
        assert_eq!(
            class.superclass.qualified_name(),
            QualifiedName::from_binary_name("java/util/AbstractMap")
        );
        assert_eq!(class.interfaces.len(), 2);
    }

    #[test]
    fn truncated_signatures_are_rejected() {
        assert_eq!(
            ClassSignature::parse("", None),
            Err(InvalidSignature::UnexpectedEnd)
        );
        assert_eq!(
            TypeSignature::parse_field("Ljava/util/List", None),
            Err(InvalidSignature::UnexpectedEnd)
        );
        assert_eq!(
            MethodSignature::parse("(I", None),
            Err(InvalidSignature::UnexpectedEnd)
        );
        assert_eq!(
            TypeSignature::parse_field("TT", None),
            Err(InvalidSignature::UnexpectedEnd)
        );
    }

    #[test]
    fn trailing_data_is_rejected() {
        assert_eq!(
            TypeSignature::parse_field("Ljava/lang/String;I", None),
            Err(InvalidSignature::TrailingData { offset: 18 })
        );
    }

    #[test]
    fn mismatched_character_reports_the_offset() {
        assert_eq!(
            MethodSignature::parse("I)V", None),
            Err(InvalidSignature::MismatchedCharacter {
                expected: '(',
                found: 'I',
                offset: 0,
            })
        );
    }
}
