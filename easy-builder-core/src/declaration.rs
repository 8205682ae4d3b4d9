use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, Generics, Ident, Index, ItemEnum, ItemStruct,
    ItemUnion, Member, Type, Visibility,
};

/// A type declaration as handed to the engine.
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    pub name: Ident,
    /// Enclosing module path, outermost first. Empty when unknown, as in macro expansion.
    pub namespace: Vec<Ident>,
    pub vis: Visibility,
    pub generics: Generics,
    pub attrs: Vec<Attribute>,
    pub body: Body,
}

#[derive(Debug, Clone)]
pub enum Body {
    Struct(Vec<RawMember>),
    /// A declaration the engine cannot build, named by its kind.
    Unsupported(&'static str),
}

impl TypeDeclaration {
    pub fn from_derive_input(input: &DeriveInput) -> Self {
        let body = match &input.data {
            Data::Struct(struct_) => Body::Struct(RawMember::from_fields(&struct_.fields)),
            Data::Enum(_) => Body::Unsupported("enums"),
            Data::Union(_) => Body::Unsupported("unions"),
        };

        TypeDeclaration {
            name: input.ident.clone(),
            namespace: vec![],
            vis: input.vis.clone(),
            generics: input.generics.clone(),
            attrs: input.attrs.clone(),
            body,
        }
    }

    pub fn from_item_struct(item: &ItemStruct, namespace: Vec<Ident>) -> Self {
        TypeDeclaration {
            name: item.ident.clone(),
            namespace,
            vis: item.vis.clone(),
            generics: item.generics.clone(),
            attrs: item.attrs.clone(),
            body: Body::Struct(RawMember::from_fields(&item.fields)),
        }
    }

    pub fn from_item_enum(item: &ItemEnum, namespace: Vec<Ident>) -> Self {
        TypeDeclaration {
            name: item.ident.clone(),
            namespace,
            vis: item.vis.clone(),
            generics: item.generics.clone(),
            attrs: item.attrs.clone(),
            body: Body::Unsupported("enums"),
        }
    }

    pub fn from_item_union(item: &ItemUnion, namespace: Vec<Ident>) -> Self {
        TypeDeclaration {
            name: item.ident.clone(),
            namespace,
            vis: item.vis.clone(),
            generics: item.generics.clone(),
            attrs: item.attrs.clone(),
            body: Body::Unsupported("unions"),
        }
    }

    pub fn type_name(&self) -> String {
        self.name.to_string()
    }
}

/// How a member is addressed on the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A field of a braced struct.
    Named(Ident),
    /// A field of a tuple struct.
    Positional(Index),
}

/// One field as declared, before any annotation is interpreted.
#[derive(Debug, Clone)]
pub struct RawMember {
    pub kind: MemberKind,
    pub ty: Type,
    pub attrs: Vec<Attribute>,
    pub span: Span,
}

impl RawMember {
    fn from_fields(fields: &Fields) -> Vec<RawMember> {
        fields
            .iter()
            .enumerate()
            .map(|(i, field)| RawMember::from_field(i, field))
            .collect()
    }

    fn from_field(index: usize, field: &Field) -> RawMember {
        let kind = match &field.ident {
            Some(ident) => MemberKind::Named(ident.clone()),
            None => MemberKind::Positional(Index {
                index: index as u32,
                span: field.span(),
            }),
        };

        RawMember {
            kind,
            ty: field.ty.clone(),
            attrs: field.attrs.clone(),
            span: field.span(),
        }
    }

    /// The member expression used to initialize this field on the target type.
    pub fn target(&self) -> Member {
        match &self.kind {
            MemberKind::Named(ident) => Member::Named(ident.clone()),
            MemberKind::Positional(index) => Member::Unnamed(index.clone()),
        }
    }
}
