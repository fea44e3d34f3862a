//! Qualified names of Java classes and packages.
use std::fmt::Display;

/// The package a class belongs to, as an ordered list of segments.
///
/// The default value is the unnamed package.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct PackageName {
    components: Vec<String>,
}

impl PackageName {
    /// Creates a package name from its segments.
    #[must_use]
    pub fn from_components(components: Vec<String>) -> Self {
        Self { components }
    }

    /// Parses a slash-separated package string (e.g., `java/lang`).
    /// An empty string denotes the unnamed package.
    #[must_use]
    pub fn from_binary_name(package: &str) -> Self {
        if package.is_empty() {
            Self::default()
        } else {
            Self {
                components: package.split('/').map(str::to_owned).collect(),
            }
        }
    }

    /// The segments of the package name.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Checks whether this is the unnamed package.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the slash-separated form used in class files (e.g., `java/lang`).
    #[must_use]
    pub fn binary_string(&self) -> String {
        self.components.join("/")
    }
}

impl Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

/// The name of a class without its package, as an ordered list of simple
/// names starting from the outermost class.
///
/// A top level class has a single component. `Map$Entry` has two.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ShortClassName {
    components: Vec<String>,
}

impl ShortClassName {
    /// Creates a short class name from its simple names, outermost first.
    ///
    /// # Panics
    /// Panics when `components` is empty.
    #[must_use]
    pub fn from_components(components: Vec<String>) -> Self {
        assert!(
            !components.is_empty(),
            "A class name must have at least one component"
        );
        Self { components }
    }

    /// Parses a dollar-separated class name (e.g., `Map$Entry`).
    #[must_use]
    pub fn from_binary_name(name: &str) -> Self {
        Self {
            components: name.split('$').map(str::to_owned).collect(),
        }
    }

    /// The simple names, outermost class first.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The simple name of the outermost class.
    #[must_use]
    pub fn outermost(&self) -> &str {
        &self.components[0]
    }

    /// The simple name of the innermost class.
    #[must_use]
    pub fn innermost(&self) -> &str {
        self.components
            .last()
            .expect("A class name must have at least one component")
    }

    /// Returns the dollar-separated form used in class files (e.g., `Map$Entry`).
    #[must_use]
    pub fn binary_string(&self) -> String {
        self.components.join("$")
    }
}

impl Display for ShortClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

/// The fully qualified name of a class.
///
/// Equality and hashing are structural, so two names compare equal exactly
/// when their package and class segments match.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct QualifiedName {
    /// The package the class belongs to.
    pub package: PackageName,
    /// The class name within the package, outermost class first.
    pub short_name: ShortClassName,
}

impl QualifiedName {
    /// Creates a qualified name from its parts.
    #[must_use]
    pub fn new(package: PackageName, short_name: ShortClassName) -> Self {
        Self {
            package,
            short_name,
        }
    }

    /// Parses a binary class name (e.g., `java/util/Map$Entry`).
    ///
    /// The last `/` separates the package from the class name, and the class
    /// name is split at each `$` into the nesting chain.
    #[must_use]
    pub fn from_binary_name(name: &str) -> Self {
        match name.rfind('/') {
            Some(separator) => Self {
                package: PackageName::from_binary_name(&name[..separator]),
                short_name: ShortClassName::from_binary_name(&name[separator + 1..]),
            },
            None => Self {
                package: PackageName::default(),
                short_name: ShortClassName::from_binary_name(name),
            },
        }
    }

    /// The name of `java.lang.Object`.
    #[must_use]
    pub fn object() -> Self {
        Self::from_binary_name("java/lang/Object")
    }

    /// Returns the binary form used in class files (e.g., `java/util/Map$Entry`).
    #[must_use]
    pub fn binary_name(&self) -> String {
        if self.package.is_empty() {
            self.short_name.binary_string()
        } else {
            format!(
                "{}/{}",
                self.package.binary_string(),
                self.short_name.binary_string()
            )
        }
    }

    /// The name of a class nested directly inside this one.
    #[must_use]
    pub fn inner_class(&self, name: impl Into<String>) -> Self {
        let mut components = self.short_name.components().to_vec();
        components.push(name.into());
        Self {
            package: self.package.clone(),
            short_name: ShortClassName::from_components(components),
        }
    }

    /// The name of the class this one is nested in, or `None` for a top
    /// level class.
    #[must_use]
    pub fn outer_class(&self) -> Option<Self> {
        let components = self.short_name.components();
        (components.len() > 1).then(|| Self {
            package: self.package.clone(),
            short_name: ShortClassName::from_components(components[..components.len() - 1].to_vec()),
        })
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.package.is_empty() {
            self.short_name.fmt(f)
        } else {
            write!(f, "{}.{}", self.package, self.short_name)
        }
    }
}
