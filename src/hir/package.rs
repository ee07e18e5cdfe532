//! Parsing the included files of a package.

use std::fs;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::error::{Error, Result};
use crate::parser::{SourceFile, parse_file};
use crate::project::BuildPackage;

/// A parsed file and its name within the package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub name: String,
    pub source: SourceFile,
}

/// The files of one package, sorted by file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPackage {
    pub name: SmolStr,
    pub files: Vec<ParsedFile>,
}

impl ParsedPackage {
    pub fn new(name: impl Into<SmolStr>, mut files: Vec<ParsedFile>) -> Self {
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name: name.into(),
            files,
        }
    }
}

/// Parse every file of the inclusion filter and group the results by
/// declared package name.
///
/// The first file with a syntax error, in file name order, fails the
/// whole package.
pub fn parse_files(package: &BuildPackage) -> Result<IndexMap<SmolStr, Vec<ParsedFile>>> {
    let mut by_name: IndexMap<SmolStr, Vec<ParsedFile>> = IndexMap::new();
    for file_name in &package.go_files {
        let path = package.dir.join(file_name);
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let source = parse_file(&content).map_err(|e| Error::parse(&path, &content, &e))?;
        trace!(file = %file_name, decls = source.decls.len(), "parsed");
        by_name
            .entry(source.package.clone())
            .or_default()
            .push(ParsedFile {
                name: file_name.clone(),
                source,
            });
    }
    Ok(by_name)
}

/// Parse a package and select the files declaring its expected name.
pub fn parse_package(package: &BuildPackage) -> Result<ParsedPackage> {
    let mut by_name = parse_files(package)?;
    match by_name.swap_remove(&package.name) {
        Some(files) => Ok(ParsedPackage::new(package.name.clone(), files)),
        None => Err(Error::Consistency {
            dir: package.dir.clone(),
            expected: package.name.to_string(),
            found: by_name.keys().map(SmolStr::to_string).collect(),
        }),
    }
}
