use std::collections::HashMap;

use heck::ToSnakeCase;
use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::Ident;

use crate::config::SetterCase;
use crate::diagnostics::Diagnostic;
use crate::member::MemberModel;

/// The builder's terminal method, which no setter may shadow.
pub const BUILD_METHOD: &str = "build";

/// Prefix marking builder storage slots.
pub const STORAGE_PREFIX: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("identifier is empty")]
    Empty,
    #[error("`{0}` is not a valid identifier")]
    Invalid(String),
}

/// Upper-cases the first character and keeps the rest: `age` becomes `Age`.
pub fn title_case_first(name: &str) -> Result<String, NameError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(NameError::Empty)?;
    Ok(first.to_uppercase().chain(chars).collect())
}

/// Converts a name into an identifier, escaping keywords as raw identifiers.
pub fn to_ident(name: &str, span: Span) -> Result<Ident, NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let bare = name.strip_prefix("r#").unwrap_or(name);
    let mut ident = syn::parse_str::<Ident>(bare)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{bare}")))
        .map_err(|_| NameError::Invalid(name.to_string()))?;
    ident.set_span(span);

    Ok(ident)
}

/// Derives the public setter name of a member.
pub fn setter_name(member: &MemberModel, case: SetterCase) -> Result<Ident, NameError> {
    if let Some(external) = &member.external_name {
        return to_ident(external, member.span);
    }

    let name = match case {
        SetterCase::Snake => {
            let name = member.logical_name.to_snake_case();
            if name.is_empty() {
                return Err(NameError::Invalid(member.logical_name.clone()));
            }
            name
        }
        SetterCase::Title => title_case_first(&member.logical_name)?,
    };

    to_ident(&name, member.span)
}

/// Derives the builder storage slot name of a member.
pub fn storage_name(member: &MemberModel) -> Result<Ident, NameError> {
    if member.logical_name.is_empty() {
        return Err(NameError::Empty);
    }

    to_ident(
        &format!("{STORAGE_PREFIX}{}", member.logical_name),
        member.span,
    )
}

#[derive(Debug, Clone)]
pub struct MemberNames {
    pub setter: Ident,
    pub storage: Ident,
}

/// Derives names for every member, reporting invalid names and collisions.
///
/// The result lines up with `members`. Any error means no names are returned, since emitting two
/// identically named setters or slots would not compile.
pub fn derive_names(
    type_name: &str,
    members: &[MemberModel],
    case: SetterCase,
) -> Result<Vec<MemberNames>, Vec<Diagnostic>> {
    let mut names = Vec::with_capacity(members.len());
    let mut diagnostics = vec![];
    let mut setters = HashMap::<String, &str>::new();
    let mut storages = HashMap::<String, &str>::new();

    for member in members {
        let setter = match setter_name(member, case) {
            Ok(setter) => setter,
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    type_name,
                    member.span,
                    format!("invalid setter name for `{}`: {e}", member.logical_name),
                ));
                continue;
            }
        };
        let storage = match storage_name(member) {
            Ok(storage) => storage,
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    type_name,
                    member.span,
                    format!("invalid storage name for `{}`: {e}", member.logical_name),
                ));
                continue;
            }
        };

        let setter_key = setter.unraw().to_string();
        if setter_key == BUILD_METHOD {
            diagnostics.push(Diagnostic::error(
                type_name,
                member.span,
                format!(
                    "setter `{setter_key}` for `{}` conflicts with the builder's `{BUILD_METHOD}` method",
                    member.logical_name,
                ),
            ));
        } else if let Some(first) = setters.get(&setter_key) {
            diagnostics.push(Diagnostic::error(
                type_name,
                member.span,
                format!(
                    "setter `{setter_key}` for `{}` conflicts with the setter for `{first}`",
                    member.logical_name,
                ),
            ));
        } else {
            setters.insert(setter_key, &member.logical_name);
        }

        let storage_key = storage.unraw().to_string();
        if let Some(first) = storages.get(&storage_key) {
            diagnostics.push(Diagnostic::error(
                type_name,
                member.span,
                format!(
                    "storage slot `{storage_key}` for `{}` conflicts with the slot for `{first}`",
                    member.logical_name,
                ),
            ));
        } else {
            storages.insert(storage_key, &member.logical_name);
        }

        names.push(MemberNames { setter, storage });
    }

    if diagnostics.is_empty() {
        Ok(names)
    } else {
        Err(diagnostics)
    }
}
