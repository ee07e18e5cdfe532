//! Declaration-level AST for Go source files
//!
//! Only the shape needed to build a package's doc model is kept: names,
//! the outline of type expressions, receivers and result lists. Function
//! bodies and initializer expressions are checked for balance and dropped.

use smol_str::SmolStr;

/// A parsed Go source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: SmolStr,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Function and method declarations, in source order
    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            _ => None,
        })
    }
}

/// The package clause and imports of a file, without its declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub package: SmolStr,
    pub imports: Vec<ImportSpec>,
}

impl FileHeader {
    pub fn imports_path(&self, path: &str) -> bool {
        self.imports.iter().any(|import| import.path == path)
    }
}

/// `import name "path"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name: an identifier, `.` or `_`
    pub name: Option<SmolStr>,
    pub path: SmolStr,
}

impl ImportSpec {
    pub fn is_dot_import(&self) -> bool {
        self.name.as_deref() == Some(".")
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Value(ValueDecl),
    Type(TypeDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Const,
    Var,
}

/// `const (...)` or `var (...)`, grouped or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    pub kind: ValueKind,
    pub specs: Vec<ValueSpec>,
}

/// One line of a value declaration: `a, b T = x, y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<SmolStr>,
    pub ty: Option<TypeExpr>,
    pub has_values: bool,
}

/// `type T ...` or `type (...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: SmolStr,
    pub type_params: Vec<SmolStr>,
    pub ty: TypeExpr,
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: SmolStr,
    /// Receiver type for methods
    pub recv: Option<TypeExpr>,
    pub type_params: Vec<SmolStr>,
    /// One entry per result field; `(a, b T)` is a single field
    pub results: Vec<TypeExpr>,
    /// Whether a comment group sits directly above the declaration
    pub has_doc: bool,
}

/// Outline of a type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `T`
    Name(SmolStr),
    /// `pkg.T`
    Qualified { package: SmolStr, name: SmolStr },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `T[A, B]`; the type arguments are not kept
    Generic(Box<TypeExpr>),
    /// `(T)`
    Paren(Box<TypeExpr>),
    /// `[N]T`, `[...]T` or `[]T`
    Array(Box<TypeExpr>),
    /// `struct { ... }` with its embedded fields
    Struct { embedded: Vec<TypeExpr> },
    /// `interface { ... }` with its embedded type names
    Interface { embedded: Vec<TypeExpr> },
    /// map, chan and func types
    Other,
}

impl TypeExpr {
    /// Name of the named type at the core of this expression.
    ///
    /// Pointers, parentheses and type arguments are looked through. Returns
    /// the name and whether it is qualified by an imported package, or
    /// `None` for composite types.
    pub fn base_type_name(&self) -> Option<(&SmolStr, bool)> {
        match self {
            Self::Name(name) => Some((name, false)),
            Self::Qualified { name, .. } => Some((name, true)),
            Self::Pointer(inner) | Self::Generic(inner) | Self::Paren(inner) => {
                inner.base_type_name()
            }
            Self::Array(_) | Self::Struct { .. } | Self::Interface { .. } | Self::Other => None,
        }
    }

    /// Base name when it is declared in the current package
    pub fn local_base_name(&self) -> Option<&SmolStr> {
        match self.base_type_name() {
            Some((name, false)) => Some(name),
            _ => None,
        }
    }
}
