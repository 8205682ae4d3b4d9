use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::visit_mut::{self, VisitMut};
use syn::{Attribute, Error, Expr, ExprLit, Ident, Index, Lit, Member, Meta, Path, Token, Type};

use crate::config::{Annotation, Vocabulary};
use crate::declaration::{MemberKind, RawMember};

/// The normalized view of one member the synthesizers work from.
#[derive(Debug, Clone)]
pub struct MemberModel {
    /// The member's name as written (unraw), or its index for tuple struct fields.
    pub logical_name: String,
    /// The member's type, with `Self` spelled as the target type.
    pub declared_type: Type,
    pub excluded: bool,
    /// The expression the storage slot starts from, present iff the member has a default.
    pub default_expression: Option<Expr>,
    pub required: bool,
    /// An explicit setter name, used verbatim.
    pub external_name: Option<String>,
    pub target: Member,
    pub span: Span,
}

/// The outcome of normalizing one raw member.
#[derive(Debug)]
pub enum Normalized {
    Member(MemberModel),
    Excluded(MemberModel),
    /// The member has no usable name.
    Unrepresentable {
        reason: String,
        default: Option<Expr>,
    },
}

impl MemberModel {
    /// Normalizes a member of the type named `target`.
    pub fn normalize(
        raw: &RawMember,
        target: &Ident,
        vocabulary: &Vocabulary,
    ) -> Result<Normalized, Error> {
        let mut overrides = MemberOverrides::new(&raw.attrs, vocabulary)?;
        if let Some(default) = &mut overrides.default {
            ReplaceSelf(target).visit_expr_mut(default);
        }

        let mut declared_type = raw.ty.clone();
        ReplaceSelf(target).visit_type_mut(&mut declared_type);

        let model = match &raw.kind {
            MemberKind::Named(ident) => {
                MemberModel::from_named(ident, raw, declared_type, overrides)
            }
            MemberKind::Positional(index) => {
                if overrides.setter.is_none() && !overrides.excluded {
                    let setter = vocabulary.keyword_for(Annotation::Rename).unwrap_or("setter");
                    return Ok(Normalized::Unrepresentable {
                        reason: format!(
                            "tuple field {} has no name; give it a `{setter}` name or it is left at its default",
                            index.index,
                        ),
                        default: overrides.default,
                    });
                }
                MemberModel::from_positional(index, raw, declared_type, overrides)
            }
        };

        if model.excluded {
            Ok(Normalized::Excluded(model))
        } else {
            Ok(Normalized::Member(model))
        }
    }

    fn from_named(
        ident: &Ident,
        raw: &RawMember,
        declared_type: Type,
        overrides: MemberOverrides,
    ) -> MemberModel {
        MemberModel {
            logical_name: ident.unraw().to_string(),
            declared_type,
            excluded: overrides.excluded,
            default_expression: overrides.default,
            required: overrides.required,
            external_name: overrides.setter,
            target: raw.target(),
            span: raw.span,
        }
    }

    fn from_positional(
        index: &Index,
        raw: &RawMember,
        declared_type: Type,
        overrides: MemberOverrides,
    ) -> MemberModel {
        MemberModel {
            logical_name: index.index.to_string(),
            declared_type,
            excluded: overrides.excluded,
            default_expression: overrides.default,
            required: overrides.required,
            external_name: overrides.setter,
            target: raw.target(),
            span: raw.span,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default_expression.is_some()
    }
}

#[derive(Default)]
struct MemberOverrides {
    excluded: bool,
    default: Option<Expr>,
    setter: Option<String>,
    required: bool,
}

impl MemberOverrides {
    fn new(attrs: &[Attribute], vocabulary: &Vocabulary) -> Result<Self, Error> {
        let mut overrides = MemberOverrides::default();
        let mut seen = vec![];

        for attr in attrs {
            if !vocabulary.is_member(attr) {
                continue;
            }

            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;

            for meta in metas {
                let keyword = meta
                    .path()
                    .get_ident()
                    .ok_or_else(|| Error::new_spanned(meta.path(), "expected a single identifier"))?
                    .to_string();
                let annotation = vocabulary.annotation(&keyword).ok_or_else(|| {
                    Error::new_spanned(
                        meta.path(),
                        format!("expected {}", vocabulary.expected_keywords()),
                    )
                })?;

                if seen.iter().any(|(a, _, _)| *a == annotation) {
                    return Err(Error::new_spanned(
                        meta.path(),
                        format!("parameter `{keyword}` specified more than once"),
                    ));
                }
                seen.push((annotation, meta.path().clone(), keyword.clone()));

                match (annotation, meta) {
                    (Annotation::Exclude, Meta::Path(_)) => overrides.excluded = true,
                    (Annotation::Required, Meta::Path(_)) => overrides.required = true,
                    (Annotation::Default, Meta::Path(_)) => {
                        overrides.default = Some(syn::parse_quote!(
                            ::core::default::Default::default()
                        ));
                    }
                    (Annotation::Default, Meta::NameValue(meta)) => {
                        overrides.default = Some(meta.value);
                    }
                    (Annotation::Rename, Meta::NameValue(meta)) => {
                        overrides.setter = Some(setter_name(&meta.value)?);
                    }
                    (Annotation::Rename, meta) => {
                        return Err(Error::new_spanned(
                            meta,
                            format!("expected `{keyword} = <name>`"),
                        ));
                    }
                    (_, meta) => {
                        return Err(Error::new_spanned(
                            meta,
                            format!("`{keyword}` takes no arguments"),
                        ));
                    }
                }
            }
        }

        if overrides.excluded {
            let conflict = seen
                .iter()
                .find(|(a, _, _)| matches!(a, Annotation::Required | Annotation::Rename));
            if let Some((_, path, keyword)) = conflict {
                let skip = vocabulary.keyword_for(Annotation::Exclude).unwrap_or("skip");
                return Err(Error::new_spanned(
                    path,
                    format!("`{keyword}` has no effect on a `{skip}` field"),
                ));
            }
        }

        Ok(overrides)
    }
}

fn setter_name(value: &Expr) -> Result<String, Error> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.value()),
        Expr::Path(path) if path.qself.is_none() => match path.path.get_ident() {
            Some(ident) => Ok(ident.unraw().to_string()),
            None => Err(Error::new_spanned(path, "expected an identifier")),
        },
        _ => Err(Error::new_spanned(
            value,
            "expected an identifier or string literal",
        )),
    }
}

/// Spells `Self` as the target type. Generated builder items have their own `Self`.
struct ReplaceSelf<'a>(&'a Ident);

impl VisitMut for ReplaceSelf<'_> {
    fn visit_path_mut(&mut self, path: &mut Path) {
        if let Some(first) = path.segments.first_mut() {
            if first.ident == "Self" {
                first.ident = Ident::new(&self.0.to_string(), first.ident.span());
            }
        }
        visit_mut::visit_path_mut(self, path);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proc_macro2::Span;
    use quote::ToTokens;
    use syn::{parse_quote, Field};

    fn named(field: Field) -> RawMember {
        RawMember {
            kind: MemberKind::Named(field.ident.clone().unwrap()),
            ty: field.ty,
            attrs: field.attrs,
            span: Span::call_site(),
        }
    }

    fn normalize(field: Field) -> Result<Normalized, Error> {
        MemberModel::normalize(&named(field), &parse_quote!(Person), &Vocabulary::default())
    }

    fn member(field: Field) -> MemberModel {
        match normalize(field).unwrap() {
            Normalized::Member(model) => model,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn plain_member() {
        let model = member(parse_quote!(name: String));
        assert_eq!(model.logical_name, "name");
        assert!(!model.excluded);
        assert!(!model.has_default());
        assert!(!model.required);
        assert_eq!(model.external_name, None);
    }

    #[test]
    fn raw_identifier_is_unraw() {
        let model = member(parse_quote!(r#type: String));
        assert_eq!(model.logical_name, "type");
    }

    #[test]
    fn all_overrides() {
        let model = member(parse_quote! {
            #[builder(default = "Default name".to_string(), setter = "with_name")]
            #[builder(required)]
            name: String
        });

        assert!(model.required);
        assert_eq!(model.external_name.as_deref(), Some("with_name"));
        assert_eq!(
            model.default_expression.to_token_stream().to_string(),
            quote::quote!("Default name".to_string()).to_string(),
        );
    }

    #[test]
    fn bare_default_is_zero_value() {
        let model = member(parse_quote!(#[builder(default)] count: u32));
        assert!(model.has_default());
        assert_eq!(
            model.default_expression.to_token_stream().to_string(),
            quote::quote!(::core::default::Default::default()).to_string(),
        );
    }

    #[test]
    fn setter_accepts_identifier() {
        let model = member(parse_quote!(#[builder(setter = with_age)] age: i32));
        assert_eq!(model.external_name.as_deref(), Some("with_age"));
    }

    #[test]
    fn excluded_member() {
        let normalized = normalize(parse_quote!(#[builder(skip)] height: f64)).unwrap();
        assert!(matches!(normalized, Normalized::Excluded(model) if model.excluded));
    }

    #[test]
    fn excluded_member_keeps_default() {
        match normalize(parse_quote!(#[builder(skip, default = 5432)] port: u16)).unwrap() {
            Normalized::Excluded(model) => assert_eq!(
                model.default_expression.to_token_stream().to_string(),
                "5432"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn skip_with_required() {
        let error = normalize(parse_quote!(#[builder(skip, required)] age: i32)).unwrap_err();
        assert_eq!(error.to_string(), "`required` has no effect on a `skip` field");
    }

    #[test]
    fn skip_with_setter() {
        let error = normalize(parse_quote!(#[builder(setter = Years, skip)] age: i32)).unwrap_err();
        assert_eq!(error.to_string(), "`setter` has no effect on a `skip` field");
    }

    #[test]
    fn self_is_spelled_as_target() {
        let model = member(parse_quote!(parent: Option<Box<Self>>));
        assert_eq!(
            model.declared_type.to_token_stream().to_string(),
            "Option < Box < Person > >"
        );

        let model = member(parse_quote! {
            #[builder(default = Self::default_children())]
            children: Vec<Self>
        });
        assert_eq!(
            model.declared_type.to_token_stream().to_string(),
            "Vec < Person >"
        );
        assert_eq!(
            model.default_expression.to_token_stream().to_string(),
            "Person :: default_children ()"
        );
    }

    #[test]
    fn unknown_keyword() {
        let error = normalize(parse_quote!(#[builder(ignore)] height: f64)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected `skip`, `default`, `setter`, or `required`"
        );
    }

    #[test]
    fn repeated_keyword() {
        let error = normalize(parse_quote! {
            #[builder(required)]
            #[builder(required)]
            age: i32
        })
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "parameter `required` specified more than once"
        );
    }

    #[test]
    fn flag_with_value() {
        let error = normalize(parse_quote!(#[builder(skip = true)] age: i32)).unwrap_err();
        assert_eq!(error.to_string(), "`skip` takes no arguments");
    }

    #[test]
    fn other_attributes_are_ignored() {
        let model = member(parse_quote!(#[serde(rename = "n")] name: String));
        assert!(!model.excluded);
    }

    #[test]
    fn positional_member_needs_a_name() {
        let raw = RawMember {
            kind: MemberKind::Positional(Index::from(0)),
            ty: parse_quote!(i32),
            attrs: vec![],
            span: Span::call_site(),
        };

        let target = parse_quote!(Pair);
        let normalized = MemberModel::normalize(&raw, &target, &Vocabulary::default()).unwrap();
        assert!(matches!(normalized, Normalized::Unrepresentable { .. }));

        let raw = RawMember {
            attrs: vec![parse_quote!(#[builder(setter = x)])],
            ..raw
        };
        match MemberModel::normalize(&raw, &target, &Vocabulary::default()).unwrap() {
            Normalized::Member(model) => {
                assert_eq!(model.logical_name, "0");
                assert_eq!(model.external_name.as_deref(), Some("x"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
