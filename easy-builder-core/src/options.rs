use structmeta::StructMeta;
use syn::{Attribute, Error, LitStr, Meta, Path};

use crate::config::{Config, SetterCase, Vocabulary};

/// Type-level options, written as marker arguments (`#[easy_builder(...)]`) or in a
/// struct-level `#[builder(...)]`.
#[derive(StructMeta, Default)]
pub struct TypeOptions {
    #[struct_meta(name = "crate")]
    pub krate: Option<Path>,
    pub setter_case: Option<LitStr>,
}

/// Type options merged over the run configuration.
pub struct Resolved {
    pub crate_path: Path,
    pub setter_case: SetterCase,
}

impl TypeOptions {
    pub fn new(attrs: &[Attribute], vocabulary: &Vocabulary) -> Result<Self, Error> {
        let mut options = TypeOptions::default();

        for attr in attrs {
            if !vocabulary.is_marker(attr) && !vocabulary.is_member(attr) {
                continue;
            }
            if !matches!(attr.meta, Meta::List(_)) {
                continue;
            }

            let parsed = attr.parse_args::<TypeOptions>()?;
            if let Some(krate) = parsed.krate {
                if options.krate.is_some() {
                    return Err(Error::new_spanned(krate, "parameter `crate` specified more than once"));
                }
                options.krate = Some(krate);
            }
            if let Some(case) = parsed.setter_case {
                if options.setter_case.is_some() {
                    return Err(Error::new(
                        case.span(),
                        "parameter `setter_case` specified more than once",
                    ));
                }
                options.setter_case = Some(case);
            }
        }

        Ok(options)
    }

    pub fn resolve(self, config: &Config) -> Result<Resolved, Error> {
        let setter_case = match &self.setter_case {
            Some(lit) => SetterCase::from_name(&lit.value())
                .ok_or_else(|| Error::new(lit.span(), "expected `\"snake\"` or `\"title\"`"))?,
            None => config.setter_case,
        };

        Ok(Resolved {
            crate_path: self.krate.unwrap_or_else(|| config.crate_path.clone()),
            setter_case,
        })
    }
}
