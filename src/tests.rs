use std::{collections::HashMap, rc::Rc};

use proptest::prelude::*;

use crate::{
    field_type::{FieldType, PrimitiveType},
    method_descriptor::ReturnType,
    names::QualifiedName,
    signatures::{
        ClassSignature, ClassTypeSignature, MethodSignature, ReturnTypeSignature,
        SimpleClassTypeSignature, ThrowsSignature, TypeArgument, TypeParameter, TypeSignature,
        TypeVariable, WildcardIndicator,
    },
};

pub(crate) fn arb_class_name() -> impl Strategy<Value = String> {
    let arb_ident = prop::string::string_regex(r"[a-zA-Z][\w\$_]*").expect("The regex is invalid");
    prop::collection::vec(arb_ident, 1..10).prop_map(|v| v.join("/"))
}

pub(crate) fn arb_non_array_field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        any::<PrimitiveType>().prop_map(FieldType::Base),
        arb_class_name()
            .prop_map(|it| QualifiedName::from_binary_name(&it))
            .prop_map(FieldType::Object),
    ]
}

prop_compose! {
    fn arb_array_field_type()(
        t in arb_non_array_field_type(),
        dim in 1..=u8::MAX
    ) -> FieldType {
        FieldType::array_of(t, dim)
    }
}

pub(crate) fn arb_field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![arb_non_array_field_type(), arb_array_field_type()]
}

pub(crate) fn arb_return_type() -> impl Strategy<Value = ReturnType> {
    prop_oneof![
        Just(ReturnType::Void),
        arb_field_type().prop_map(ReturnType::Some),
    ]
}

/// An identifier that survives a signature round trip. `$` is excluded
/// because serialization canonicalizes it into a segment separator, and `/`,
/// `.`, `;`, `:`, `<`, and `>` because the grammar treats them as
/// punctuation.
pub(crate) fn arb_signature_identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-zA-Z_][a-zA-Z0-9_]{0,8}").expect("The regex is invalid")
}

pub(crate) fn arb_signature_class_name() -> impl Strategy<Value = QualifiedName> {
    (
        prop::collection::vec(arb_signature_identifier(), 0..3),
        prop::collection::vec(arb_signature_identifier(), 1..3),
    )
        .prop_map(|(package, short_name)| {
            QualifiedName::new(
                crate::names::PackageName::from_components(package),
                crate::names::ShortClassName::from_components(short_name),
            )
        })
}

/// Wraps a primitive into an array so that the result is a reference type,
/// as required in type argument, bound, and field signature positions.
fn into_reference(signature: TypeSignature) -> TypeSignature {
    match signature {
        TypeSignature::Base(_) => TypeSignature::Array(Box::new(signature)),
        other => other,
    }
}

fn arb_type_argument(
    signature: impl Strategy<Value = TypeSignature>,
) -> impl Strategy<Value = TypeArgument> {
    prop_oneof![
        1 => Just(TypeArgument::Any),
        4 => (prop::option::of(any::<WildcardIndicator>()), signature).prop_map(
            |(wildcard, signature)| TypeArgument::Concrete {
                wildcard,
                signature: into_reference(signature),
            }
        ),
    ]
}

fn arb_class_type_signature(
    signature: impl Strategy<Value = TypeSignature>,
) -> impl Strategy<Value = ClassTypeSignature> {
    (
        arb_signature_class_name(),
        prop::collection::vec(
            prop::option::of(prop::collection::vec(arb_type_argument(signature), 1..3)),
            1..3,
        ),
    )
        .prop_map(|(name, argument_lists)| ClassTypeSignature {
            package: name.package.clone(),
            segments: name
                .short_name
                .components()
                .iter()
                .zip(argument_lists.into_iter().chain(std::iter::repeat(None)))
                .map(|(name, type_arguments)| SimpleClassTypeSignature {
                    name: name.clone(),
                    type_arguments,
                })
                .collect(),
        })
}

pub(crate) fn arb_type_signature() -> impl Strategy<Value = TypeSignature> {
    let leaf = prop_oneof![
        any::<PrimitiveType>().prop_map(TypeSignature::Base),
        arb_signature_class_name()
            .prop_map(|it| TypeSignature::Object(ClassTypeSignature::with_no_type_args(&it))),
        arb_signature_identifier()
            .prop_map(|it| TypeSignature::Variable(TypeVariable::unresolved(it))),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|it| TypeSignature::Array(Box::new(it))),
            arb_class_type_signature(inner).prop_map(TypeSignature::Object),
        ]
    })
}

fn arb_type_parameter() -> impl Strategy<Value = Rc<TypeParameter>> {
    (
        arb_signature_identifier(),
        prop::option::of(arb_type_signature().prop_map(into_reference)),
        prop::collection::vec(arb_type_signature().prop_map(into_reference), 0..2),
    )
        .prop_map(|(name, class_bound, interface_bounds)| {
            Rc::new(TypeParameter::new(name, class_bound, interface_bounds))
        })
}

fn arb_type_parameters() -> impl Strategy<Value = Option<Vec<Rc<TypeParameter>>>> {
    prop::option::of(prop::collection::vec(arb_type_parameter(), 1..3))
}

pub(crate) fn arb_class_signature() -> impl Strategy<Value = ClassSignature> {
    (
        arb_type_parameters(),
        arb_class_type_signature(arb_type_signature()),
        prop::collection::vec(arb_class_type_signature(arb_type_signature()), 0..3),
    )
        .prop_map(|(type_parameters, superclass, interfaces)| ClassSignature {
            type_parameters,
            superclass,
            interfaces,
        })
}

fn arb_throws_signature() -> impl Strategy<Value = ThrowsSignature> {
    prop_oneof![
        arb_class_type_signature(arb_type_signature()).prop_map(ThrowsSignature::Class),
        arb_signature_identifier()
            .prop_map(|it| ThrowsSignature::Variable(TypeVariable::unresolved(it))),
    ]
}

pub(crate) fn arb_method_signature() -> impl Strategy<Value = MethodSignature> {
    (
        arb_type_parameters(),
        prop::collection::vec(arb_type_signature(), 0..4),
        prop_oneof![
            Just(ReturnTypeSignature::Void),
            arb_type_signature().prop_map(ReturnTypeSignature::Some),
        ],
        prop::collection::vec(arb_throws_signature(), 0..2),
    )
        .prop_map(
            |(type_parameters, parameters_types, return_type, throws)| MethodSignature {
                type_parameters,
                parameters_types,
                return_type,
                throws,
            },
        )
}

pub(crate) fn arb_substitution_mapping() -> impl Strategy<Value = HashMap<String, TypeSignature>> {
    prop::collection::hash_map(arb_signature_identifier(), arb_type_signature(), 0..3)
}
