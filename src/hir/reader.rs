//! Building a [`DeclarationSet`] from parsed files
//!
//! [`GoDocReader`] groups declarations the way Go package documentation
//! does, with unexported declarations kept:
//!
//! ```text
//! files (sorted by name)
//!     │  pass 1: imports, const/var groups, types, embedded fields
//!     ▼
//! pass 2: functions → factories of a type, methods, package funcs
//!     ▼
//! promoted methods of embedded struct fields
//!     ▼
//! undeclared types: hand members back to the package, then drop
//!     ▼
//! DeclarationSet (sorted)
//! ```

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::trace;

use super::decls::{DeclarationSet, DocFunc, DocType, DocValue};
use super::package::ParsedPackage;
use crate::base::constants::is_predeclared_type;
use crate::base::{is_blank, is_exported};
use crate::parser::{Decl, FuncDecl, ImportSpec, TypeExpr, TypeSpec, ValueDecl, ValueKind};

/// Share of specs that must name one type for a value group to belong to it
const VALUE_ASSOCIATION_THRESHOLD: f64 = 0.75;

/// Turns a parsed package into its [`DeclarationSet`].
pub trait DocExtractor {
    fn declarations(&self, package: &ParsedPackage) -> DeclarationSet;
}

/// Groups declarations like Go's documentation reader in all-declarations
/// mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoDocReader;

impl DocExtractor for GoDocReader {
    fn declarations(&self, package: &ParsedPackage) -> DeclarationSet {
        let mut reader = Reader::default();
        for file in &package.files {
            reader.read_file_decls(&file.source.decls, &file.source.imports);
        }
        for file in &package.files {
            for func in file.source.funcs() {
                reader.read_func(func);
            }
        }
        reader.compute_method_sets();
        reader.cleanup_types();
        trace!(
            package = %package.name,
            types = reader.types.len(),
            values = reader.values.len(),
            funcs = reader.funcs.len(),
            "read declarations"
        );
        reader.finish()
    }
}

// ============================================================================
// Reader state
// ============================================================================

#[derive(Debug, Clone)]
struct Value {
    kind: ValueKind,
    names: Vec<SmolStr>,
    /// First name of a single-spec group; empty for multi-spec groups
    sorting_name: SmolStr,
    /// Global read order, stable when values move between lists
    order: usize,
}

#[derive(Debug, Clone)]
struct Method {
    name: SmolStr,
    recv: Option<SmolStr>,
    orig: Option<SmolStr>,
    level: u32,
    has_doc: bool,
    /// Two promotions at the same depth; hides the name
    conflict: bool,
}

impl Method {
    fn declared(func: &FuncDecl) -> Self {
        let recv = func.recv.as_ref().map(recv_string);
        Self {
            name: func.name.clone(),
            orig: recv.clone(),
            recv,
            level: 0,
            has_doc: func.has_doc,
            conflict: false,
        }
    }

    /// Copy of a method promoted into `recv_type` at embedding depth `level`
    fn promoted(&self, recv_type: &str, embedded_is_ptr: bool, level: u32) -> Self {
        let orig_is_ptr = self.orig.as_deref().is_some_and(|r| r.starts_with('*'));
        let recv = if !embedded_is_ptr && orig_is_ptr {
            SmolStr::new(format!("*{recv_type}"))
        } else {
            SmolStr::new(recv_type)
        };
        Self {
            recv: Some(recv),
            level,
            ..self.clone()
        }
    }

    fn to_doc(&self) -> DocFunc {
        DocFunc {
            name: self.name.clone(),
            recv: self.recv.clone(),
            orig: self.orig.clone(),
            level: self.level,
        }
    }
}

/// Functions or methods by name
#[derive(Debug, Clone, Default)]
struct MethodSet(FxHashMap<SmolStr, Method>);

impl MethodSet {
    fn len(&self) -> usize {
        self.0.len()
    }

    /// Record a declaration; an earlier documented one with the same name
    /// is kept.
    fn set(&mut self, func: &FuncDecl) {
        if self.0.get(&func.name).is_some_and(|old| old.has_doc) {
            return;
        }
        self.0.insert(func.name.clone(), Method::declared(func));
    }

    /// Record a promoted method; the shallowest promotion wins and equally
    /// deep ones conflict.
    fn add(&mut self, method: Method) {
        match self.0.get(&method.name) {
            Some(old) if method.level > old.level => {}
            Some(old) if method.level == old.level => {
                let conflict = Method {
                    recv: None,
                    orig: None,
                    has_doc: false,
                    conflict: true,
                    ..method
                };
                self.0.insert(conflict.name.clone(), conflict);
            }
            _ => {
                self.0.insert(method.name.clone(), method);
            }
        }
    }

    /// Sorted by name, conflicts left out. Promoted methods are kept only
    /// when `all_methods` is set or the declaring receiver is unexported.
    fn sorted(&self, all_methods: bool) -> Vec<DocFunc> {
        let mut list: Vec<DocFunc> = self
            .0
            .values()
            .filter(|m| !m.conflict)
            .filter(|m| {
                all_methods
                    || m.level == 0
                    || !is_exported(m.orig.as_deref().unwrap_or("").trim_start_matches('*'))
            })
            .map(Method::to_doc)
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}

#[derive(Debug, Clone, Default)]
struct NamedType {
    name: SmolStr,
    declared: bool,
    is_embedded: bool,
    is_struct: bool,
    /// Embedded type name → embedded through a pointer
    embedded: IndexMap<SmolStr, bool>,
    values: Vec<Value>,
    funcs: MethodSet,
    methods: MethodSet,
}

#[derive(Debug, Default)]
struct Reader {
    has_dot_import: bool,
    order: usize,
    values: Vec<Value>,
    types: FxHashMap<SmolStr, NamedType>,
    funcs: MethodSet,
}

impl Reader {
    /// The type named `name`, created on first use. Blank and empty names
    /// have no type.
    fn lookup_type(&mut self, name: &str) -> Option<&mut NamedType> {
        if name.is_empty() || is_blank(name) {
            return None;
        }
        Some(
            self.types
                .entry(SmolStr::new(name))
                .or_insert_with(|| NamedType {
                    name: SmolStr::new(name),
                    ..NamedType::default()
                }),
        )
    }

    /// Predeclared and not redeclared by the package
    fn is_predeclared(&self, name: &str) -> bool {
        is_predeclared_type(name) && !self.types.contains_key(name)
    }

    // ========================================================================
    // Pass 1
    // ========================================================================

    fn read_file_decls(&mut self, decls: &[Decl], imports: &[ImportSpec]) {
        if imports.iter().any(|import| import.is_dot_import()) {
            self.has_dot_import = true;
        }
        for decl in decls {
            match decl {
                Decl::Value(value) => self.read_value(value),
                Decl::Type(ty) => {
                    for spec in &ty.specs {
                        self.read_type(spec);
                    }
                }
                Decl::Func(_) => {}
            }
        }
    }

    fn read_value(&mut self, decl: &ValueDecl) {
        let mut dominant: Option<SmolStr> = None;
        let mut frequency = 0usize;
        let mut prev: Option<SmolStr> = None;
        let mut counted = 0usize;

        for spec in &decl.specs {
            let name = match &spec.ty {
                Some(ty) => ty.local_base_name().cloned(),
                None if decl.kind == ValueKind::Const && !spec.has_values => prev.clone(),
                None => None,
            };
            if let Some(name) = &name {
                if dominant.as_ref().is_some_and(|d| d != name) {
                    // more than one type name
                    dominant = None;
                    break;
                }
                dominant = Some(name.clone());
                frequency += 1;
            }
            prev = name;
            counted += 1;
        }
        if counted == 0 {
            return;
        }

        let value = Value {
            kind: decl.kind,
            names: decl.specs.iter().flat_map(|s| s.names.iter().cloned()).collect(),
            sorting_name: match decl.specs.as_slice() {
                [only] => only.names.first().cloned().unwrap_or_default(),
                _ => SmolStr::default(),
            },
            order: self.order,
        };
        self.order += 1;

        let threshold = (decl.specs.len() as f64 * VALUE_ASSOCIATION_THRESHOLD) as usize;
        let owner = match dominant {
            Some(name) if frequency >= threshold => self.lookup_type(&name),
            _ => None,
        };
        match owner {
            Some(ty) => ty.values.push(value),
            None => self.values.push(value),
        }
    }

    fn read_type(&mut self, spec: &TypeSpec) {
        let Some(ty) = self.lookup_type(&spec.name) else {
            return;
        };
        ty.declared = true;
        let (embedded, is_struct) = match &spec.ty {
            TypeExpr::Struct { embedded } => (embedded.as_slice(), true),
            TypeExpr::Interface { embedded } => (embedded.as_slice(), false),
            _ => (&[][..], false),
        };
        ty.is_struct = is_struct;
        for field in embedded {
            self.record_embedded_field(&spec.name, field);
        }
    }

    fn record_embedded_field(&mut self, parent: &SmolStr, field: &TypeExpr) {
        let Some(name) = field.local_base_name().cloned() else {
            return;
        };
        let Some(embedded) = self.lookup_type(&name) else {
            return;
        };
        embedded.is_embedded = true;
        let is_ptr = matches!(field, TypeExpr::Pointer(_));
        if let Some(parent) = self.types.get_mut(parent) {
            parent.embedded.insert(name, is_ptr);
        }
    }

    // ========================================================================
    // Pass 2
    // ========================================================================

    fn read_func(&mut self, func: &FuncDecl) {
        if let Some(recv) = &func.recv {
            // methods on imported types are invalid code
            let Some((name, false)) = recv.base_type_name() else {
                return;
            };
            let name = name.clone();
            if let Some(ty) = self.lookup_type(&name) {
                ty.methods.set(func);
            }
            return;
        }

        let mut owner: Option<SmolStr> = None;
        let mut result_types = 0;
        for result in &func.results {
            let factory_type = match result {
                TypeExpr::Array(element) => element.as_ref(),
                other => other,
            };
            let Some(name) = factory_type.local_base_name() else {
                continue;
            };
            if self.is_predeclared(name) || func.type_params.contains(name) {
                continue;
            }
            if self.lookup_type(name).is_some() {
                owner = Some(name.clone());
                result_types += 1;
                if result_types > 1 {
                    break;
                }
            }
        }

        if result_types == 1 {
            if let Some(ty) = owner.and_then(|name| self.types.get_mut(&name)) {
                ty.funcs.set(func);
                return;
            }
        }
        self.funcs.set(func);
    }

    // ========================================================================
    // Promotion and cleanup
    // ========================================================================

    fn compute_method_sets(&mut self) {
        let mut structs: Vec<SmolStr> = self
            .types
            .values()
            .filter(|t| t.is_struct)
            .map(|t| t.name.clone())
            .collect();
        structs.sort();

        for name in structs {
            let mut promoted = Vec::new();
            let mut visited = FxHashSet::default();
            self.collect_embedded_methods(&name, &name, false, 1, &mut visited, &mut promoted);
            if let Some(ty) = self.types.get_mut(&name) {
                for method in promoted {
                    ty.methods.add(method);
                }
            }
        }
    }

    fn collect_embedded_methods(
        &self,
        ty: &SmolStr,
        recv_type: &str,
        embedded_is_ptr: bool,
        level: u32,
        visited: &mut FxHashSet<SmolStr>,
        out: &mut Vec<Method>,
    ) {
        let Some(named) = self.types.get(ty) else {
            return;
        };
        visited.insert(ty.clone());
        for (embedded, &is_ptr) in &named.embedded {
            // pointer embedding is sticky for the rest of the hierarchy
            let this_is_ptr = embedded_is_ptr || is_ptr;
            if let Some(inner) = self.types.get(embedded) {
                out.extend(
                    inner
                        .methods
                        .0
                        .values()
                        .filter(|m| m.level == 0 && !m.conflict)
                        .map(|m| m.promoted(recv_type, this_is_ptr, level)),
                );
            }
            if !visited.contains(embedded) {
                self.collect_embedded_methods(
                    embedded,
                    recv_type,
                    this_is_ptr,
                    level + 1,
                    visited,
                    out,
                );
            }
        }
        visited.remove(ty);
    }

    /// Drop undeclared types. Predeclared or embedded ones first give their
    /// values, factories and methods back to the package.
    fn cleanup_types(&mut self) {
        let mut names: Vec<SmolStr> = self.types.keys().cloned().collect();
        names.sort();

        for name in names {
            if self.types.get(&name).is_some_and(|t| t.declared) {
                continue;
            }
            let Some(ty) = self.types.remove(&name) else {
                continue;
            };
            let predeclared = is_predeclared_type(&ty.name);
            if !(predeclared || ty.is_embedded || self.has_dot_import) {
                trace!(name = %ty.name, "dropping undeclared type");
                continue;
            }
            self.values.extend(ty.values);
            for (func_name, func) in ty.funcs.0 {
                self.funcs.0.insert(func_name, func);
            }
            if !predeclared {
                for (method_name, method) in ty.methods.0 {
                    self.funcs.0.entry(method_name).or_insert(method);
                }
            }
        }
    }

    fn finish(self) -> DeclarationSet {
        let mut types: Vec<DocType> = self
            .types
            .values()
            .map(|t| DocType {
                name: t.name.clone(),
                consts: sorted_values(&t.values, ValueKind::Const),
                vars: sorted_values(&t.values, ValueKind::Var),
                funcs: t.funcs.sorted(true),
                methods: t.methods.sorted(false),
            })
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));

        DeclarationSet {
            types,
            vars: sorted_values(&self.values, ValueKind::Var),
            consts: sorted_values(&self.values, ValueKind::Const),
            funcs: self.funcs.sorted(true),
        }
    }
}

/// Multi-spec groups first, then by first name, then by read order
fn sorted_values(values: &[Value], kind: ValueKind) -> Vec<DocValue> {
    let mut list: Vec<&Value> = values.iter().filter(|v| v.kind == kind).collect();
    list.sort_by(|a, b| {
        a.sorting_name
            .cmp(&b.sorting_name)
            .then(a.order.cmp(&b.order))
    });
    list.into_iter()
        .map(|v| DocValue {
            names: v.names.clone(),
        })
        .collect()
}

/// Receiver type as written, without type arguments
fn recv_string(recv: &TypeExpr) -> SmolStr {
    match recv {
        TypeExpr::Name(name) => name.clone(),
        TypeExpr::Pointer(inner) => SmolStr::new(format!("*{}", recv_string(inner))),
        TypeExpr::Generic(inner) | TypeExpr::Paren(inner) => recv_string(inner),
        TypeExpr::Qualified { package, name } => SmolStr::new(format!("{package}.{name}")),
        _ => SmolStr::new_static("BADRECV"),
    }
}
