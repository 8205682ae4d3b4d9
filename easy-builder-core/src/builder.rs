use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{Expr, Ident, Path, Type, Visibility};

use crate::config::SetterCase;
use crate::member::MemberModel;
use crate::naming::MemberNames;

/// Name of the builder field recording which required members were set.
///
/// Storage slots always start with `_`, so this cannot collide with one.
pub const REQUIRED_FLAGS: &str = "required_set";

/// One storage slot and its fluent setter.
#[derive(Debug, Clone)]
pub struct Slot {
    pub logical_name: String,
    pub storage: Ident,
    pub setter: Ident,
    pub ty: Type,
    /// The slot's initial value; `None` means the type's zero value.
    pub default: Option<Expr>,
    /// Position in the required flags, for required members.
    pub required: Option<usize>,
}

/// The structure of a generated builder, before it is rendered.
#[derive(Debug, Clone)]
pub struct BuilderSpec {
    pub name: Ident,
    pub target: Ident,
    pub vis: Visibility,
    pub slots: Vec<Slot>,
    pub required_count: usize,
    pub setter_case: SetterCase,
    pub crate_path: Path,
}

impl BuilderSpec {
    pub fn new(
        target: &Ident,
        vis: &Visibility,
        members: &[MemberModel],
        names: Vec<MemberNames>,
        setter_case: SetterCase,
        crate_path: &Path,
    ) -> BuilderSpec {
        let mut required_count = 0;

        let slots = members
            .iter()
            .zip(names)
            .map(|(member, names)| {
                let required = if member.required {
                    required_count += 1;
                    Some(required_count - 1)
                } else {
                    None
                };

                Slot {
                    logical_name: member.logical_name.clone(),
                    storage: names.storage,
                    setter: names.setter,
                    ty: member.declared_type.clone(),
                    default: member.default_expression.clone(),
                    required,
                }
            })
            .collect();

        BuilderSpec {
            name: builder_name(target),
            target: target.clone(),
            vis: vis.clone(),
            slots,
            required_count,
            setter_case,
            crate_path: crate_path.clone(),
        }
    }

    pub fn required_flags(&self) -> Ident {
        Ident::new(REQUIRED_FLAGS, self.name.span())
    }

    fn zero_value(&self) -> TokenStream {
        let krate = &self.crate_path;
        quote!(#krate::__private::Default::default())
    }

    fn initializer(&self, slot: &Slot) -> TokenStream {
        match &slot.default {
            Some(default) => default.to_token_stream(),
            None => self.zero_value(),
        }
    }

    fn definition(&self) -> TokenStream {
        let vis = &self.vis;
        let name = &self.name;
        let storages = self.slots.iter().map(|s| &s.storage);
        let types = self.slots.iter().map(|s| &s.ty);

        let flags = if self.required_count > 0 {
            let flags = self.required_flags();
            let count = Literal::usize_unsuffixed(self.required_count);
            quote!(#flags: [bool; #count],)
        } else {
            quote!()
        };

        let docs = format!("A builder for [`{}`].", self.target);

        quote! {
            #[doc = #docs]
            #vis struct #name {
                #(#storages: #types,)*
                #flags
            }
        }
    }

    fn default_impl(&self) -> TokenStream {
        let krate = &self.crate_path;
        let name = &self.name;
        let storages = self.slots.iter().map(|s| &s.storage);
        let initializers = self.slots.iter().map(|s| self.initializer(s));

        let flags = if self.required_count > 0 {
            let flags = self.required_flags();
            let count = Literal::usize_unsuffixed(self.required_count);
            quote!(#flags: [false; #count],)
        } else {
            quote!()
        };

        quote! {
            impl #krate::__private::Default for #name {
                #[inline]
                fn default() -> Self {
                    #name {
                        #(#storages: #initializers,)*
                        #flags
                    }
                }
            }
        }
    }

    fn setter(&self, slot: &Slot) -> TokenStream {
        let setter = &slot.setter;
        let storage = &slot.storage;
        let ty = &slot.ty;
        let docs = format!("Sets the `{}` field.", slot.logical_name);

        let mark = slot.required.map(|i| {
            let flags = self.required_flags();
            let i = Literal::usize_unsuffixed(i);
            quote!(self.#flags[#i] = true;)
        });

        let allow = match self.setter_case {
            SetterCase::Title => quote!(#[allow(non_snake_case)]),
            SetterCase::Snake => quote!(),
        };

        quote! {
            #[doc = #docs]
            #[inline]
            #allow
            pub fn #setter(mut self, value: #ty) -> Self {
                self.#storage = value;
                #mark
                self
            }
        }
    }

    fn build(&self) -> TokenStream {
        let krate = &self.crate_path;
        let target = &self.target;
        let docs = format!(
            "Consumes the builder, returning a [`{target}`].\n\n\
             Fails if a required field was never set."
        );

        quote! {
            #[doc = #docs]
            #[inline]
            pub fn build(self) -> #krate::__private::Result<#target, #krate::BuildError> {
                #target::from_builder(self)
            }
        }
    }
}

impl ToTokens for BuilderSpec {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.name;
        let definition = self.definition();
        let default_impl = self.default_impl();
        let setters = self.slots.iter().map(|s| self.setter(s));
        let build = self.build();

        tokens.extend(quote! {
            #definition

            #default_impl

            impl #name {
                #(#setters)*

                #build
            }
        });
    }
}

/// The builder type's name: `{TypeName}Builder`.
pub fn builder_name(target: &Ident) -> Ident {
    format_ident!("{}Builder", target)
}
