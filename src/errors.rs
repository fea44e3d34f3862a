//! Errors raised when decoding descriptors and signatures.

/// An error indicating that a descriptor string is invalid.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("Invalid descriptor: {0}")]
pub struct InvalidDescriptor(pub String);

/// An error indicating that a signature string is invalid.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum InvalidSignature {
    /// A character other than the one the grammar requires was found.
    #[error("Expected `{expected}` at offset {offset} but found `{found}`")]
    MismatchedCharacter {
        /// The character the grammar requires at this position.
        expected: char,
        /// The character that was found instead.
        found: char,
        /// The byte offset of the offending character.
        offset: usize,
    },
    /// A character that cannot start the production being parsed was found.
    #[error("Unexpected character `{found}` at offset {offset} when parsing {parsing}")]
    UnexpectedCharacter {
        /// The character that was found.
        found: char,
        /// The byte offset of the offending character.
        offset: usize,
        /// The grammar production being parsed.
        parsing: &'static str,
    },
    /// The signature ends in the middle of a production.
    #[error("Unexpected end of signature")]
    UnexpectedEnd,
    /// The signature continues after the entry point's production is complete.
    #[error("Trailing characters after offset {offset}")]
    TrailingData {
        /// The byte offset of the first character that was not consumed.
        offset: usize,
    },
    /// A `<...>` clause contains no entries. The grammar requires at least one.
    #[error("A type parameter or type argument list must not be empty")]
    EmptyTypeParameterList,
    /// A type variable refers to a name that is declared neither in the
    /// signature itself nor in any enclosing scope.
    #[error("Cannot find the declaration of type variable `{0}`")]
    UnresolvedTypeVariable(String),
}
