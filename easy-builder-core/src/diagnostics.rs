use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Generation continues without the offending member.
    Warning,
    /// The type produces no output.
    Error,
}

/// A message about one type declaration.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub type_name: String,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(type_name: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            type_name: type_name.into(),
            message: message.into(),
            span,
        }
    }

    pub fn warning(type_name: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            type_name: type_name.into(),
            message: message.into(),
            span,
        }
    }

    /// Splits a (possibly combined) `syn::Error` into one error diagnostic per message.
    pub fn from_syn(type_name: &str, error: syn::Error) -> Vec<Diagnostic> {
        error
            .into_iter()
            .map(|e| Diagnostic::error(type_name, e.span(), e.to_string()))
            .collect()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, &self.message)
    }

    /// Renders a warning through the deprecation lint, the only warning channel a stable proc
    /// macro has.
    pub(crate) fn warning_tokens(&self) -> TokenStream {
        let note = format!("easy_builder: {}", self.message);
        quote_spanned! {self.span=>
            const _: () = {
                #[deprecated(note = #note)]
                const EASY_BUILDER_WARNING: () = ();
                EASY_BUILDER_WARNING
            };
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{severity}: `{}`: {}", self.type_name, self.message)
    }
}

/// Folds every error diagnostic into one `syn::Error`.
pub fn combine_errors<'a, I>(diagnostics: I) -> Option<syn::Error>
where
    I: IntoIterator<Item = &'a Diagnostic>,
{
    let mut error = None::<syn::Error>;

    for diagnostic in diagnostics.into_iter().filter(|d| d.is_error()) {
        match &mut error {
            Some(error) => error.combine(diagnostic.to_syn_error()),
            None => error = Some(diagnostic.to_syn_error()),
        }
    }

    error
}
