use easy_builder_core::{Config, TypeOptions};
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Attribute, DeriveInput};

/// Creates a fluent builder for a struct.
///
/// The macro adds a `{Type}Builder` struct next to the type, with one storage slot and one setter per member, and
/// adds a `builder` constructor function to the type. Setters take their member's declared type by-value and return
/// the builder, so calls chain. The builder's `build` method returns a `Result`, failing with a
/// [`BuildError`](../easy_builder/struct.BuildError.html) listing every `required` member that was never set.
///
/// Members that are not set keep their slot's initial value: the `default` expression if one was given, and the
/// type's [`Default`] value otherwise.
///
/// # Struct options
///
/// Options can be passed to the attribute itself or applied via a struct-level `#[builder(...)]` attribute, as a
/// comma-separated sequence:
///
/// * `setter_case = "title" | "snake"` - How setter names are derived from member names. `title` (the default)
///     upper-cases the first character and keeps the rest, so `age` gets an `Age` setter; `snake` turns `userName` into
///     `user_name`.
/// * `crate = <path>` - The path to the `easy_builder` crate used by generated code, for crates which re-export it.
///
/// # Field options
///
/// Options can be applied to individual fields via the `#[builder(...)]` attribute as a comma-separated sequence:
///
/// * `skip` - The field gets no slot or setter. It is constructed from its `default` expression if it has one, and
///     its [`Default`] value otherwise.
/// * `default` - The field's slot starts from its [`Default`] value. A custom starting value can be specified with
///     `default = <expr>`, where `<expr>` is an expression.
/// * `setter = <name>` - Overrides the setter's name. Fields of tuple structs have no name and are skipped with a
///     warning unless they carry this option.
/// * `required` - `build` fails unless the field's setter was called.
///
/// # Example expansion
///
/// ```ignore
/// use easy_builder::easy_builder;
///
/// #[easy_builder]
/// pub struct MyStruct {
///     count: u32,
///     #[builder(required)]
///     label: String,
///     #[builder(default = 42, setter = answer)]
///     custom: i32,
///     #[builder(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// Will expand into:
///
/// ```ignore
/// pub struct MyStruct {
///     count: u32,
///     label: String,
///     custom: i32,
///     cache: Vec<u8>,
/// }
///
/// /// A builder for [`MyStruct`].
/// pub struct MyStructBuilder {
///     _count: u32,
///     _label: String,
///     _custom: i32,
///     required_set: [bool; 1],
/// }
///
/// impl Default for MyStructBuilder {
///     fn default() -> Self {
///         MyStructBuilder {
///             _count: Default::default(),
///             _label: Default::default(),
///             _custom: 42,
///             required_set: [false; 1],
///         }
///     }
/// }
///
/// impl MyStructBuilder {
///     pub fn Count(mut self, value: u32) -> Self {
///         // ...
///     }
///
///     pub fn Label(mut self, value: String) -> Self {
///         // ...
///     }
///
///     pub fn answer(mut self, value: i32) -> Self {
///         // ...
///     }
///
///     pub fn build(self) -> Result<MyStruct, easy_builder::BuildError> {
///         // ...
///     }
/// }
///
/// impl MyStruct {
///     pub fn builder() -> MyStructBuilder {
///         Default::default()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn easy_builder(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let args = TokenStream::from(args);
    let options = match syn::parse2::<TypeOptions>(args.clone()) {
        Ok(options) => options,
        Err(e) => return e.into_compile_error().into(),
    };
    let input = parse_macro_input!(input as AttrInput);

    let krate = match options.krate {
        Some(krate) => quote!(#krate),
        None => quote!(::easy_builder),
    };
    let options = if args.is_empty() {
        quote!()
    } else {
        quote!(#[builder(#args)])
    };

    let attrs = input.attrs;
    let body = input.body;
    quote! {
        #[derive(#krate::__EasyBuilderInternalDerive)]
        #options
        #(#attrs)*
        #body
    }
    .into()
}

struct AttrInput {
    attrs: Vec<Attribute>,
    body: TokenStream,
}

impl Parse for AttrInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let body = input.parse()?;

        Ok(AttrInput { attrs, body })
    }
}

// Not public API.
#[doc(hidden)]
#[proc_macro_derive(__EasyBuilderInternalDerive, attributes(builder))]
pub fn __internal_derive_easy_builder(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    easy_builder_core::expand_derive(&input, &Config::default()).into()
}
