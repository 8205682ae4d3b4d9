use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;

use crate::builder::BuilderSpec;
use crate::constructor::ConstructorSpec;
use crate::declaration::TypeDeclaration;
use crate::error::Error;

const HEADER: &str = "// @generated by easy-builder. Do not edit.\n\n";

/// Everything generated for one type declaration.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    type_name: String,
    namespace: Vec<String>,
    tokens: TokenStream,
    source: String,
}

impl GeneratedOutput {
    /// Composes the builder, its `builder()` entry point and the constructor.
    pub fn assemble(
        decl: &TypeDeclaration,
        builder: &BuilderSpec,
        constructor: &ConstructorSpec,
    ) -> Result<GeneratedOutput, Error> {
        let target = &decl.name;
        let vis = &decl.vis;
        let krate = &builder.crate_path;
        let builder_name = &builder.name;

        let tokens = quote! {
            #builder

            impl #target {
                /// Returns a new builder.
                #[inline]
                #vis fn builder() -> #builder_name {
                    #krate::__private::Default::default()
                }

                #constructor
            }
        };

        let file = syn::parse2::<syn::File>(tokens.clone())?;
        let source = format!("{HEADER}{}", prettyplease::unparse(&file));

        Ok(GeneratedOutput {
            type_name: decl.type_name(),
            namespace: decl.namespace.iter().map(|i| i.to_string()).collect(),
            tokens,
            source,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// The enclosing module path, `a::b`, or an empty string at the crate root.
    pub fn module_path(&self) -> String {
        self.namespace.join("::")
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// The formatted source text, with a `@generated` header.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// A stable file name for the generated source: `my_type.g.rs`.
    pub fn file_name(&self) -> String {
        format!("{}.g.rs", self.type_name.to_snake_case())
    }

    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }
}
