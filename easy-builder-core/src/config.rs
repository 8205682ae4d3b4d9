use syn::{parse_quote, Attribute, Path};

/// The semantic effect of a member-level annotation keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// The member gets no storage slot or setter.
    Exclude,
    /// The member's slot starts from a propagated default expression.
    Default,
    /// The member's setter uses an explicit name.
    Rename,
    /// The member must be set before `build` succeeds.
    Required,
}

/// The attribute names the engine recognizes, and what each member keyword means.
///
/// The table is handed to the extractor rather than baked into it, so a host can run the engine
/// under a different marker (for example a build script scanning for `#[generate_builder]`).
#[derive(Debug, Clone)]
pub struct Vocabulary {
    marker: String,
    member: String,
    keywords: Vec<(String, Annotation)>,
}

impl Vocabulary {
    /// Creates a vocabulary with no member keywords.
    ///
    /// `marker` is the type-level attribute requesting generation, `member` the attribute
    /// carrying member keywords and type options.
    pub fn new(marker: impl Into<String>, member: impl Into<String>) -> Self {
        Vocabulary {
            marker: marker.into(),
            member: member.into(),
            keywords: vec![],
        }
    }

    /// Adds a member keyword.
    pub fn keyword(mut self, keyword: impl Into<String>, annotation: Annotation) -> Self {
        self.keywords.push((keyword.into(), annotation));
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    /// Looks up the effect of a member keyword.
    pub fn annotation(&self, keyword: &str) -> Option<Annotation> {
        self.keywords
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, annotation)| *annotation)
    }

    /// Returns the keyword bound to an effect, for messages.
    pub fn keyword_for(&self, annotation: Annotation) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(_, a)| *a == annotation)
            .map(|(k, _)| &**k)
    }

    pub(crate) fn expected_keywords(&self) -> String {
        let keywords = self
            .keywords
            .iter()
            .map(|(k, _)| format!("`{k}`"))
            .collect::<Vec<_>>();

        match keywords.split_last() {
            None => "no options".to_string(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{}, or {last}", rest.join(", ")),
        }
    }

    /// Returns `true` if the attribute is the generation marker.
    ///
    /// Only the last path segment is compared so `#[easy_builder::easy_builder]` qualifies too.
    pub fn is_marker(&self, attr: &Attribute) -> bool {
        attr.path()
            .segments
            .last()
            .map_or(false, |segment| segment.ident == self.marker)
    }

    /// Returns `true` if any of the attributes is the generation marker.
    pub fn is_marked(&self, attrs: &[Attribute]) -> bool {
        attrs.iter().any(|attr| self.is_marker(attr))
    }

    /// Returns `true` if the attribute carries member keywords or type options.
    pub fn is_member(&self, attr: &Attribute) -> bool {
        attr.path().is_ident(&self.member)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::new("easy_builder", "builder")
            .keyword("skip", Annotation::Exclude)
            .keyword("default", Annotation::Default)
            .keyword("setter", Annotation::Rename)
            .keyword("required", Annotation::Required)
    }
}

/// How setter names are derived from member names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetterCase {
    /// The first character is title-cased and the rest kept: `age` becomes `Age`.
    #[default]
    Title,
    /// `user_name` stays `user_name`, `userName` becomes `user_name`.
    Snake,
}

impl SetterCase {
    pub fn from_name(name: &str) -> Option<SetterCase> {
        match name {
            "snake" => Some(SetterCase::Snake),
            "title" => Some(SetterCase::Title),
            _ => None,
        }
    }
}

/// Engine configuration shared by every declaration in a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub vocabulary: Vocabulary,
    pub setter_case: SetterCase,
    /// Path of the runtime crate referenced by generated code.
    pub crate_path: Path,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vocabulary: Vocabulary::default(),
            setter_case: SetterCase::default(),
            crate_path: parse_quote!(::easy_builder),
        }
    }
}
