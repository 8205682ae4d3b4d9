/// Failures of the engine itself, as opposed to diagnostics about a declaration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse source")]
    Parse(#[from] syn::Error),
}
