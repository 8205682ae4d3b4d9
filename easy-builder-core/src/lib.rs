//! The declaration analysis and synthesis engine behind `easy-builder`.
//!
//! A [`TypeDeclaration`] flows one way through the engine:
//!
//! 1. [`extract()`] normalizes its fields into [`MemberModel`]s, dropping excluded ones;
//! 2. [`derive_names`] computes each member's setter and storage names, reporting collisions;
//! 3. [`BuilderSpec`] and [`ConstructorSpec`] describe the builder and the constructor;
//! 4. [`GeneratedOutput::assemble`] renders both into tokens and formatted source.
//!
//! Every step is a pure function of its input, so synthesizing the same declaration twice yields
//! identical output. Problems with a declaration are reported as [`Diagnostic`]s rather than
//! errors, and a declaration with an error diagnostic produces no output.
//!
//! The `easy-builder` proc macro drives the engine through [`expand_derive`]; build scripts can
//! use [`generate_file`] and [`generate_source`] to process whole files.
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub use crate::assemble::GeneratedOutput;
pub use crate::batch::{generate_file, generate_source, Batch};
pub use crate::builder::{BuilderSpec, Slot};
pub use crate::config::{Annotation, Config, SetterCase, Vocabulary};
pub use crate::constructor::ConstructorSpec;
pub use crate::declaration::{Body, MemberKind, RawMember, TypeDeclaration};
pub use crate::diagnostics::{Diagnostic, Severity};
pub use crate::error::Error;
pub use crate::extract::{extract, Extraction};
pub use crate::member::MemberModel;
pub use crate::naming::{derive_names, title_case_first, NameError};
pub use crate::options::TypeOptions;

mod assemble;
mod batch;
mod builder;
mod config;
mod constructor;
mod declaration;
mod diagnostics;
mod error;
mod extract;
mod member;
mod naming;
mod options;

/// The result of synthesizing one declaration.
#[derive(Debug)]
pub struct Synthesis {
    /// Present unless an error diagnostic was reported.
    pub output: Option<GeneratedOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the whole engine over one declaration.
pub fn synthesize(decl: &TypeDeclaration, config: &Config) -> Synthesis {
    let type_name = decl.type_name();
    let mut diagnostics = vec![];

    let output = synthesize_inner(decl, config, &type_name, &mut diagnostics);

    Synthesis {
        output: if diagnostics.iter().any(Diagnostic::is_error) {
            None
        } else {
            output
        },
        diagnostics,
    }
}

fn synthesize_inner(
    decl: &TypeDeclaration,
    config: &Config,
    type_name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<GeneratedOutput> {
    let members = match &decl.body {
        Body::Struct(members) => members,
        Body::Unsupported(kind) => {
            diagnostics.push(Diagnostic::error(
                type_name,
                decl.name.span(),
                format!("builders can only be generated for structs, not {kind}"),
            ));
            return None;
        }
    };

    if !decl.generics.params.is_empty() {
        diagnostics.push(Diagnostic::error(
            type_name,
            decl.name.span(),
            "builders cannot be generated for generic types",
        ));
    }

    let options = TypeOptions::new(&decl.attrs, &config.vocabulary)
        .and_then(|options| options.resolve(config));
    let options = match options {
        Ok(options) => Some(options),
        Err(e) => {
            diagnostics.extend(Diagnostic::from_syn(type_name, e));
            None
        }
    };

    let extraction = extract(&decl.name, members, &config.vocabulary);
    diagnostics.extend(extraction.diagnostics.iter().cloned());

    let options = options?;
    if diagnostics.iter().any(Diagnostic::is_error) {
        return None;
    }

    let names = match derive_names(type_name, &extraction.members, options.setter_case) {
        Ok(names) => names,
        Err(errors) => {
            diagnostics.extend(errors);
            return None;
        }
    };

    let builder = BuilderSpec::new(
        &decl.name,
        &decl.vis,
        &extraction.members,
        names,
        options.setter_case,
        &options.crate_path,
    );
    let constructor = ConstructorSpec::new(&extraction, &builder);

    match GeneratedOutput::assemble(decl, &builder, &constructor) {
        Ok(output) => Some(output),
        Err(e) => {
            diagnostics.push(Diagnostic::error(
                type_name,
                decl.name.span(),
                format!("generated builder is not valid Rust: {e}"),
            ));
            None
        }
    }
}

/// Expands a derive input into the generated items, or compile errors if any were reported.
///
/// Warnings are rendered alongside the generated items.
pub fn expand_derive(input: &DeriveInput, config: &Config) -> TokenStream {
    let decl = TypeDeclaration::from_derive_input(input);
    let synthesis = synthesize(&decl, config);

    if let Some(error) = diagnostics::combine_errors(&synthesis.diagnostics) {
        return error.into_compile_error();
    }

    let warnings = synthesis
        .diagnostics
        .iter()
        .filter(|d| !d.is_error())
        .map(Diagnostic::warning_tokens);
    let output = synthesis.output.map(GeneratedOutput::into_tokens);

    quote! {
        #output
        #(#warnings)*
    }
}
