//! Doc-oriented view of a package's declarations.
//!
//! A [`DeclarationSet`] groups top-level declarations the way package
//! documentation presents them: every type owns the values and factory
//! functions that mention it, everything else stays at package level.

use smol_str::SmolStr;

/// Declarations of one package, sorted for presentation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    /// Types, sorted by name
    pub types: Vec<DocType>,
    /// Package-level `var` groups
    pub vars: Vec<DocValue>,
    /// Package-level `const` groups
    pub consts: Vec<DocValue>,
    /// Package-level functions, sorted by name
    pub funcs: Vec<DocFunc>,
}

impl DeclarationSet {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.vars.is_empty() && self.consts.is_empty() && self.funcs.is_empty()
    }
}

/// A declared type with its associated declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocType {
    pub name: SmolStr,
    /// `const` groups whose dominant type is this type
    pub consts: Vec<DocValue>,
    /// `var` groups whose dominant type is this type
    pub vars: Vec<DocValue>,
    /// Factory functions returning this type, sorted by name
    pub funcs: Vec<DocFunc>,
    /// Declared methods and promoted methods of unexported embedded types,
    /// sorted by name
    pub methods: Vec<DocFunc>,
}

/// One `const` or `var` declaration, all of its names in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocValue {
    pub names: Vec<SmolStr>,
}

impl DocValue {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A function or method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocFunc {
    pub name: SmolStr,
    /// Receiver type as written (`*List`), or the promoted receiver
    pub recv: Option<SmolStr>,
    /// Receiver the method was declared on
    pub orig: Option<SmolStr>,
    /// Embedding depth: 0 for declared methods and functions
    pub level: u32,
}

impl DocFunc {
    pub fn func(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
