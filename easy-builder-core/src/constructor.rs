use proc_macro2::{Literal, TokenStream};
use quote::{quote, ToTokens};
use syn::{Expr, Ident, Member, Path};

use crate::builder::BuilderSpec;
use crate::extract::{Extraction, FieldSource};

#[derive(Debug, Clone)]
pub enum Source {
    /// The builder storage slot with this name.
    Slot(Ident),
    /// An excluded field's default expression.
    Value(Expr),
    /// The field type's zero value.
    Zero,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub target: Member,
    pub source: Source,
}

/// A required member the constructor checks before assembling the value.
#[derive(Debug, Clone)]
pub struct RequiredCheck {
    pub flag: usize,
    pub logical_name: String,
}

/// The constructor moving builder state into the target type.
#[derive(Debug, Clone)]
pub struct ConstructorSpec {
    pub target: Ident,
    pub builder: Ident,
    pub flags: Ident,
    pub assignments: Vec<Assignment>,
    pub checks: Vec<RequiredCheck>,
    pub crate_path: Path,
}

impl ConstructorSpec {
    pub fn new(extraction: &Extraction, builder: &BuilderSpec) -> ConstructorSpec {
        let assignments = extraction
            .fields
            .iter()
            .map(|field| Assignment {
                target: field.target.clone(),
                source: match &field.source {
                    FieldSource::Member(i) => Source::Slot(builder.slots[*i].storage.clone()),
                    FieldSource::Omitted(Some(default)) => Source::Value(default.clone()),
                    FieldSource::Omitted(None) => Source::Zero,
                },
            })
            .collect();

        let checks = builder
            .slots
            .iter()
            .filter_map(|slot| {
                slot.required.map(|flag| RequiredCheck {
                    flag,
                    logical_name: slot.logical_name.clone(),
                })
            })
            .collect();

        ConstructorSpec {
            target: builder.target.clone(),
            builder: builder.name.clone(),
            flags: builder.required_flags(),
            assignments,
            checks,
            crate_path: builder.crate_path.clone(),
        }
    }

    fn checks(&self) -> TokenStream {
        if self.checks.is_empty() {
            return quote!();
        }

        let krate = &self.crate_path;
        let flags = &self.flags;
        let type_name = self.target.to_string();
        let indices = self.checks.iter().map(|c| Literal::usize_unsuffixed(c.flag));
        let names = self.checks.iter().map(|c| &c.logical_name);

        quote! {
            let mut missing = #krate::__private::Vec::new();
            #(
                if !builder.#flags[#indices] {
                    missing.push(#names);
                }
            )*
            if !missing.is_empty() {
                return #krate::__private::Result::Err(#krate::BuildError::new(#type_name, missing));
            }
        }
    }
}

impl ToTokens for ConstructorSpec {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let krate = &self.crate_path;
        let builder = &self.builder;
        let checks = self.checks();

        let targets = self.assignments.iter().map(|a| &a.target);
        let sources = self.assignments.iter().map(|a| match &a.source {
            Source::Slot(storage) => quote!(builder.#storage),
            Source::Value(default) => quote!(#default),
            Source::Zero => quote!(#krate::__private::Default::default()),
        });

        let unused = if self
            .assignments
            .iter()
            .all(|a| !matches!(a.source, Source::Slot(_)))
        {
            quote!(#[allow(unused_variables)])
        } else {
            quote!()
        };

        tokens.extend(quote! {
            #[inline]
            #unused
            fn from_builder(
                builder: #builder,
            ) -> #krate::__private::Result<Self, #krate::BuildError> {
                #checks
                #krate::__private::Result::Ok(Self {
                    #(#targets: #sources,)*
                })
            }
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{SetterCase, Vocabulary};
    use crate::declaration::{Body, TypeDeclaration};
    use crate::extract::extract;
    use crate::naming::derive_names;
    use syn::{parse_quote, DeriveInput};

    fn spec(input: DeriveInput) -> ConstructorSpec {
        let decl = TypeDeclaration::from_derive_input(&input);
        let members = match &decl.body {
            Body::Struct(members) => members,
            Body::Unsupported(kind) => panic!("unexpected {kind}"),
        };
        let extraction = extract(&decl.name, members, &Vocabulary::default());
        let names = derive_names("Test", &extraction.members, SetterCase::Snake).unwrap();
        let builder = BuilderSpec::new(
            &decl.name,
            &decl.vis,
            &extraction.members,
            names,
            SetterCase::Snake,
            &parse_quote!(::easy_builder),
        );
        ConstructorSpec::new(&extraction, &builder)
    }

    fn render(spec: &ConstructorSpec) -> String {
        let item: syn::ImplItemFn = syn::parse2(spec.to_token_stream()).unwrap();
        let file: syn::File = parse_quote! {
            impl Target {
                #item
            }
        };
        prettyplease::unparse(&file)
    }

    #[test]
    fn assignments_in_declaration_order() {
        let spec = spec(parse_quote! {
            struct Person {
                name: String,
                #[builder(required)]
                age: i32,
                #[builder(skip)]
                height: f64,
            }
        });

        let targets = spec
            .assignments
            .iter()
            .map(|a| a.target.to_token_stream().to_string())
            .collect::<Vec<_>>();
        assert_eq!(targets, ["name", "age", "height"]);
        assert!(matches!(&spec.assignments[0].source, Source::Slot(s) if s == "_name"));
        assert!(matches!(spec.assignments[2].source, Source::Zero));

        let source = render(&spec);
        assert!(source.contains("name: builder._name"));
        assert!(source.contains("age: builder._age"));
        assert!(source.contains("height: ::easy_builder::__private::Default::default()"));
        assert!(!source.contains("builder._height"));
    }

    #[test]
    fn required_checks() {
        let spec = spec(parse_quote! {
            struct Person {
                #[builder(required)]
                name: String,
                age: i32,
                #[builder(required)]
                email: String,
            }
        });

        let checks = spec
            .checks
            .iter()
            .map(|c| (c.flag, &*c.logical_name))
            .collect::<Vec<_>>();
        assert_eq!(checks, [(0, "name"), (1, "email")]);

        let source = render(&spec);
        assert!(source.contains("if !builder.required_set[1] {"));
        assert!(source.contains("missing.push(\"email\");"));
        assert!(source.contains("::easy_builder::BuildError::new(\"Person\", missing)"));
    }

    #[test]
    fn no_checks_without_required_members() {
        let spec = spec(parse_quote!(struct Point { x: i32 }));

        assert!(spec.checks.is_empty());
        assert!(!render(&spec).contains("missing"));
    }

    #[test]
    fn tuple_structs_use_indices() {
        let spec = spec(parse_quote! {
            struct Pair(#[builder(setter = first)] i32, #[builder(skip)] i32);
        });

        let source = render(&spec);
        assert!(source.contains("0: builder._0"));
        assert!(source.contains("1: ::easy_builder::__private::Default::default()"));
    }

    #[test]
    fn excluded_default_is_used() {
        let spec = spec(parse_quote! {
            struct Server {
                host: String,
                #[builder(skip, default = 5432)]
                port: u16,
            }
        });

        assert!(matches!(spec.assignments[1].source, Source::Value(_)));
        let source = render(&spec);
        assert!(source.contains("port: 5432"));
        assert!(!source.contains("builder._port"));
    }

    #[test]
    fn fully_excluded_type() {
        let spec = spec(parse_quote! {
            struct Marker {
                #[builder(skip)]
                hidden: u8,
            }
        });

        assert!(render(&spec).contains("#[allow(unused_variables)]"));
    }
}
