//! Flattening a [`DeclarationSet`] into qualified symbol names.

use tracing::debug;

use super::decls::{DeclarationSet, DocValue};
use super::package::parse_package;
use super::reader::{DocExtractor, GoDocReader};
use crate::base::{Delimiter, is_blank, is_exported};
use crate::error::Result;
use crate::project::{PackageLoader, PackageRef};

/// Local names of a package in output order, without the import path.
///
/// Types come first, each followed by its associated vars, consts,
/// factories and `Type.Method` names; then package-level vars, consts and
/// functions. Only exported names are kept and only adjacent repeats are
/// dropped.
pub fn local_names(decls: &DeclarationSet) -> Vec<String> {
    let mut out = Vec::new();

    for ty in decls.types.iter().filter(|t| is_exported(&t.name)) {
        out.push(ty.name.to_string());
        push_values(&mut out, &ty.vars);
        push_values(&mut out, &ty.consts);
        out.extend(
            ty.funcs
                .iter()
                .filter(|f| is_exported(&f.name))
                .map(|f| f.name.to_string()),
        );
        out.extend(
            ty.methods
                .iter()
                .filter(|m| is_exported(&m.name))
                .map(|m| format!("{}.{}", ty.name, m.name)),
        );
    }
    push_values(&mut out, &decls.vars);
    push_values(&mut out, &decls.consts);
    out.extend(
        decls
            .funcs
            .iter()
            .filter(|f| is_exported(&f.name))
            .map(|f| f.name.to_string()),
    );

    out.dedup();
    out
}

fn push_values(out: &mut Vec<String>, values: &[DocValue]) {
    out.extend(
        values
            .iter()
            .flat_map(|v| v.names.iter())
            .filter(|name| !is_blank(name) && is_exported(name))
            .map(|name| name.to_string()),
    );
}

/// Qualify local names with the import path and append the bare path.
pub fn qualify(import_path: &str, delimiter: Delimiter, names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| format!("{import_path}{delimiter}{name}"))
        .chain(std::iter::once(import_path.to_string()))
        .collect()
}

/// Extracts the exported symbols of a package
pub struct SymbolExtractor<'a, D: DocExtractor = GoDocReader> {
    loader: PackageLoader<'a>,
    reader: D,
}

impl<'a> SymbolExtractor<'a> {
    pub fn new(loader: PackageLoader<'a>) -> Self {
        Self::with_reader(loader, GoDocReader)
    }
}

impl<'a, D: DocExtractor> SymbolExtractor<'a, D> {
    pub fn with_reader(loader: PackageLoader<'a>, reader: D) -> Self {
        Self { loader, reader }
    }

    /// Build the declaration set of a package.
    pub fn declarations(&self, package: &PackageRef) -> Result<DeclarationSet> {
        let build = self.loader.import(package.as_str())?;
        let parsed = parse_package(&build)?;
        Ok(self.reader.declarations(&parsed))
    }

    /// Qualified symbol names of a package, its bare import path last.
    pub fn extract(&self, package: &PackageRef, delimiter: Delimiter) -> Result<Vec<String>> {
        let decls = self.declarations(package)?;
        let symbols = qualify(package.as_str(), delimiter, local_names(&decls));
        debug!(package = %package, symbols = symbols.len(), "extracted symbols");
        Ok(symbols)
    }
}
