//! Whole-file generation, for build scripts and code generators.
//!
//! ```no_run
//! use easy_builder_core::{generate_source, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = std::fs::read_to_string("src/model.rs")?;
//! let batch = generate_source(&source, &Config::default())?;
//!
//! for diagnostic in &batch.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! for output in &batch.outputs {
//!     std::fs::write(output.file_name(), output.source())?;
//! }
//! # Ok(())
//! # }
//! ```
use syn::{File, Ident, Item};

use crate::assemble::GeneratedOutput;
use crate::config::Config;
use crate::declaration::TypeDeclaration;
use crate::diagnostics::Diagnostic;
use crate::error::Error;

/// The outputs and diagnostics of every marked declaration in a file.
#[derive(Debug, Default)]
pub struct Batch {
    /// One output per declaration that synthesized without errors, in source order.
    pub outputs: Vec<GeneratedOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Batch {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Looks up the output generated for a type.
    pub fn output(&self, type_name: &str) -> Option<&GeneratedOutput> {
        self.outputs.iter().find(|o| o.type_name() == type_name)
    }
}

/// Parses source text and generates builders for every marked declaration in it.
pub fn generate_source(source: &str, config: &Config) -> Result<Batch, Error> {
    let file = syn::parse_file(source)?;
    Ok(generate_file(&file, config))
}

/// Generates builders for every marked declaration in a file, including inline modules.
///
/// A declaration that fails does not affect the others.
pub fn generate_file(file: &File, config: &Config) -> Batch {
    let mut batch = Batch::default();
    let mut namespace = vec![];
    walk(&file.items, &mut namespace, config, &mut batch);
    batch
}

fn walk(items: &[Item], namespace: &mut Vec<Ident>, config: &Config, batch: &mut Batch) {
    let vocabulary = &config.vocabulary;

    for item in items {
        let decl = match item {
            Item::Struct(item) if vocabulary.is_marked(&item.attrs) => {
                TypeDeclaration::from_item_struct(item, namespace.clone())
            }
            Item::Enum(item) if vocabulary.is_marked(&item.attrs) => {
                TypeDeclaration::from_item_enum(item, namespace.clone())
            }
            Item::Union(item) if vocabulary.is_marked(&item.attrs) => {
                TypeDeclaration::from_item_union(item, namespace.clone())
            }
            Item::Mod(item) => {
                if let Some((_, items)) = &item.content {
                    namespace.push(item.ident.clone());
                    walk(items, namespace, config, batch);
                    namespace.pop();
                }
                continue;
            }
            _ => continue,
        };

        process(&decl, config, batch);
    }
}

fn process(decl: &TypeDeclaration, config: &Config, batch: &mut Batch) {
    let synthesis = crate::synthesize(decl, config);

    for diagnostic in &synthesis.diagnostics {
        tracing::warn!(
            type_name = %diagnostic.type_name,
            error = diagnostic.is_error(),
            "{}",
            diagnostic.message,
        );
    }

    if let Some(output) = synthesis.output {
        tracing::debug!(
            type_name = %output.type_name(),
            module = %output.module_path(),
            "generated builder",
        );
        batch.outputs.push(output);
    }
    batch.diagnostics.extend(synthesis.diagnostics);
}
