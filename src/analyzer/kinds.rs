//! Element kinds and the scopes they open.

use phf::phf_map;

/// Semantic category of an element declaration, chosen by its keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Table,
    Enum,
    Ref,
    Note,
    Project,
    Indexes,
    TableGroup,
    /// Any other keyword, such as `database_type` inside a project.
    Custom,
}

static KEYWORDS: phf::Map<&'static str, ElementKind> = phf_map! {
    "table" => ElementKind::Table,
    "enum" => ElementKind::Enum,
    "ref" => ElementKind::Ref,
    "note" => ElementKind::Note,
    "project" => ElementKind::Project,
    "indexes" => ElementKind::Indexes,
    "tablegroup" => ElementKind::TableGroup,
};

impl ElementKind {
    /// Kind selected by an element keyword, compared case-insensitively.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        KEYWORDS
            .get(keyword.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(Self::Custom)
    }

    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::Enum => "Enum",
            Self::Ref => "Ref",
            Self::Note => "Note",
            Self::Project => "Project",
            Self::Indexes => "Indexes",
            Self::TableGroup => "TableGroup",
            Self::Custom => "custom element",
        }
    }
}

/// Scope opened by an element declaration, or the file itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    TopLevel,
    Table,
    Enum,
    Ref,
    Note,
    Project,
    Indexes,
    TableGroup,
    Custom,
}

impl From<ElementKind> for ScopeKind {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Table => Self::Table,
            ElementKind::Enum => Self::Enum,
            ElementKind::Ref => Self::Ref,
            ElementKind::Note => Self::Note,
            ElementKind::Project => Self::Project,
            ElementKind::Indexes => Self::Indexes,
            ElementKind::TableGroup => Self::TableGroup,
            ElementKind::Custom => Self::Custom,
        }
    }
}
