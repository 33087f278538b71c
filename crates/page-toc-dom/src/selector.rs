use std::fmt;

use markup5ever_rcdom::Handle;

use crate::error::SelectorError;
use crate::node;

/// A parsed selector list.
///
/// Supports the subset needed to locate content containers: type selectors,
/// `*`, `#id` and `.class` (combined into compound selectors), descendant
/// combinators, and comma-separated lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<ComplexSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ComplexSelector {
    // Left to right; adjacent compounds are joined by a descendant combinator.
    compounds: Vec<Vec<SimpleSelector>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SimpleSelector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut groups = Vec::new();
        for group in trimmed.split(',') {
            let group = group.trim();
            if group.is_empty() {
                return Err(SelectorError::EmptyGroup {
                    selector: trimmed.to_string(),
                });
            }
            let compounds = group
                .split_whitespace()
                .map(|part| parse_selector_one(part, trimmed))
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(ComplexSelector { compounds });
        }

        Ok(Selector {
            source: trimmed.to_string(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `element` matches any selector in the list.
    pub fn matches(&self, element: &Handle) -> bool {
        node::is_element(element) && self.groups.iter().any(|group| group.matches(element))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Selector::parse(value)
    }
}

impl ComplexSelector {
    fn matches(&self, element: &Handle) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !matches_compound(element, subject) {
            return false;
        }

        // Descendant-only chains can be matched greedily from the right.
        let mut pending = ancestors.iter().rev().peekable();
        let mut current = node::parent_element(element);
        while let Some(compound) = pending.peek() {
            let Some(candidate) = current else {
                return false;
            };
            if matches_compound(&candidate, compound) {
                pending.next();
            }
            current = node::parent_element(&candidate);
        }
        true
    }
}

fn matches_compound(element: &Handle, compound: &[SimpleSelector]) -> bool {
    compound
        .iter()
        .all(|selector| matches_selector(element, selector))
}

// Check if an element matches a single simple selector
fn matches_selector(element: &Handle, selector: &SimpleSelector) -> bool {
    match selector {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => node::tag_name(element)
            .map(|name| name.eq_ignore_ascii_case(tag))
            .unwrap_or(false),
        SimpleSelector::Id(want) => node::attribute(element, "id")
            .map(|id| &id == want)
            .unwrap_or(false),
        SimpleSelector::Class(want) => node::has_class(element, want),
    }
}

// input: "main#content", ".page-content", "*"
// output: vec![Type("main"), Id("content")], vec![Class("page-content")], vec![Universal]
fn parse_selector_one(part: &str, selector: &str) -> Result<Vec<SimpleSelector>, SelectorError> {
    let mut simple = Vec::new();
    let mut chars = part.chars().peekable();

    if chars.peek() == Some(&'*') {
        chars.next();
        simple.push(SimpleSelector::Universal);
    } else {
        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            simple.push(SimpleSelector::Type(tag.to_ascii_lowercase()));
        }
    }

    while let Some(marker) = chars.next() {
        match marker {
            '#' | '.' => {
                let name = take_ident(&mut chars);
                if name.is_empty() {
                    return Err(SelectorError::MissingName {
                        selector: selector.to_string(),
                        marker,
                    });
                }
                if marker == '.' {
                    simple.push(SimpleSelector::Class(name));
                } else if simple.iter().any(|s| matches!(s, SimpleSelector::Id(_))) {
                    return Err(SelectorError::DuplicateId {
                        selector: selector.to_string(),
                    });
                } else {
                    simple.push(SimpleSelector::Id(name));
                }
            }
            ch => {
                return Err(SelectorError::Unsupported {
                    selector: selector.to_string(),
                    ch,
                })
            }
        }
    }

    Ok(simple)
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&ch) = chars.peek() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            ident.push(ch);
            chars.next();
        } else {
            break;
        }
    }
    ident
}
