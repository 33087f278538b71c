use serde::Serialize;

/// Heading ranks that take part in the navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// `h2`
    Section,
    /// `h3`
    Subsection,
}

impl HeadingLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h2" => Some(HeadingLevel::Section),
            "h3" => Some(HeadingLevel::Subsection),
            _ => None,
        }
    }
}

/// A heading as seen by the planner: level, text content and current id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingNode {
    pub level: HeadingLevel,
    pub text: String,
    /// `None` when the element has no (or an empty) `id` attribute.
    pub id: Option<String>,
}

impl HeadingNode {
    pub fn new(level: HeadingLevel, text: impl Into<String>) -> Self {
        HeadingNode {
            level,
            text: text.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nesting {
    TopLevel,
    Nested,
}

/// One link in the navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub text: String,
    pub target: String,
    pub level: HeadingLevel,
    pub nesting: Nesting,
    /// Nested entries; only top-level section entries own any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Section entries always open a (possibly empty) nested collection.
    pub fn opens_sublist(&self) -> bool {
        self.level == HeadingLevel::Section
    }
}

/// Ordered top-level entries mirroring the page's heading structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TocTree {
    pub entries: Vec<TocEntry>,
}

impl TocTree {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries, nested ones included.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| 1 + entry.children.len())
            .sum()
    }

    /// Link targets in reading order: each top-level entry followed by its
    /// nested entries.
    pub fn targets(&self) -> Vec<&str> {
        let mut targets = Vec::with_capacity(self.len());
        for entry in &self.entries {
            targets.push(entry.target.as_str());
            targets.extend(entry.children.iter().map(|child| child.target.as_str()));
        }
        targets
    }
}
