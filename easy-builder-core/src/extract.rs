use syn::{Expr, Ident, Member};

use crate::config::Vocabulary;
use crate::declaration::RawMember;
use crate::diagnostics::Diagnostic;
use crate::member::{MemberModel, Normalized};

/// Where the constructor takes a target field's value from.
#[derive(Debug, Clone)]
pub enum FieldSource {
    /// The member at this index of `Extraction::members`.
    Member(usize),
    /// The field has no builder slot. It gets the carried default expression, or its type's
    /// zero value.
    Omitted(Option<Expr>),
}

/// One field of the target type, in declaration order.
#[derive(Debug, Clone)]
pub struct TargetField {
    pub target: Member,
    pub source: FieldSource,
}

/// The members of one declaration that take part in generation.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Builder members in declaration order. Never contains excluded members.
    pub members: Vec<MemberModel>,
    /// Every field of the target type in declaration order.
    pub fields: Vec<TargetField>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Normalizes every raw member of the type named `target`, dropping excluded and
/// unrepresentable ones.
///
/// Annotation errors are collected for all members rather than stopping at the first.
pub fn extract(target: &Ident, raw_members: &[RawMember], vocabulary: &Vocabulary) -> Extraction {
    let type_name = target.to_string();
    let mut extraction = Extraction::default();

    for raw in raw_members {
        let source = match MemberModel::normalize(raw, target, vocabulary) {
            Ok(Normalized::Member(model)) => {
                extraction.members.push(model);
                FieldSource::Member(extraction.members.len() - 1)
            }
            Ok(Normalized::Excluded(model)) => FieldSource::Omitted(model.default_expression),
            Ok(Normalized::Unrepresentable { reason, default }) => {
                extraction
                    .diagnostics
                    .push(Diagnostic::warning(&type_name, raw.span, reason));
                FieldSource::Omitted(default)
            }
            Err(e) => {
                extraction
                    .diagnostics
                    .extend(Diagnostic::from_syn(&type_name, e));
                FieldSource::Omitted(None)
            }
        };

        extraction.fields.push(TargetField {
            target: raw.target(),
            source,
        });
    }

    extraction
}
