use std::collections::HashSet;

/// Convert heading text into an identifier.
///
/// The text is trimmed and lower-cased, everything except ASCII letters,
/// digits, whitespace and hyphens is dropped, and each run of whitespace or
/// hyphens becomes a single hyphen. Text that reduces to nothing is replaced
/// by `fallback` (which goes through the same normalisation).
pub fn slugify(text: &str, fallback: &str) -> String {
    let slug = normalize(text);
    if slug.is_empty() {
        normalize(fallback)
    } else {
        slug
    }
}

fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim_matches(is_separator).chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if (is_separator(ch) || ch == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug
}

// Unicode White_Space minus NEL (U+0085), plus the byte-order mark (U+FEFF).
fn is_separator(ch: char) -> bool {
    ch == '\u{feff}' || (ch.is_whitespace() && ch != '\u{85}')
}

/// The set of identifiers already taken in one document.
///
/// Seed it with every id present before the pass; each identifier handed out
/// by [`IdRegistry::reserve_unique`] is recorded so later headings see it.
#[derive(Clone, Debug, Default)]
pub struct IdRegistry {
    reserved: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.reserved.contains(id)
    }

    /// Record `id` as taken. Returns `false` if it already was.
    pub fn reserve(&mut self, id: impl Into<String>) -> bool {
        self.reserved.insert(id.into())
    }

    /// Reserve `base`, or the first of `base-2`, `base-3`, … that is free.
    pub fn reserve_unique(&mut self, base: &str) -> String {
        if self.reserve(base) {
            return base.to_string();
        }
        let mut suffix = 2usize;
        loop {
            let candidate = format!("{base}-{suffix}");
            if self.reserve(candidate.as_str()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IdRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        IdRegistry {
            reserved: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_joins_words() {
        assert_eq!(slugify("Intro", "section"), "intro");
        assert_eq!(slugify("  Getting   Started  ", "section"), "getting-started");
        assert_eq!(slugify("3.1 Edge Cases!", "section"), "31-edge-cases");
        assert_eq!(slugify("What's new?", "section"), "whats-new");
    }

    #[test]
    fn collapses_hyphen_runs() {
        assert_eq!(slugify("a - b", "section"), "a-b");
        assert_eq!(slugify("a -- b", "section"), "a-b");
        assert_eq!(slugify("a ! b", "section"), "a-b");
        assert_eq!(slugify("-lead", "section"), "-lead");
    }

    #[test]
    fn separator_set_includes_bom_but_not_nel() {
        assert_eq!(slugify("A\u{feff}B", "section"), "a-b");
        assert_eq!(slugify("A\u{85}B", "section"), "ab");
        assert_eq!(slugify("\u{feff}Intro\u{a0}", "section"), "intro");
        assert_eq!(slugify("a\u{3000}b", "section"), "a-b");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(slugify("São Tomé", "section"), "so-tom");
        assert_eq!(slugify("ÀB", "section"), "b");
    }

    #[test]
    fn falls_back_when_nothing_survives() {
        assert_eq!(slugify("", "section"), "section");
        assert_eq!(slugify("   ", "section"), "section");
        assert_eq!(slugify("!!!", "section"), "section");
        assert_eq!(slugify("日本語", "Part"), "part");
    }

    #[test]
    fn reserve_unique_picks_first_free_suffix() {
        let mut registry: IdRegistry = ["overview", "overview-2"].into_iter().collect();
        assert_eq!(registry.reserve_unique("overview"), "overview-3");
        assert_eq!(registry.reserve_unique("overview"), "overview-4");
        assert_eq!(registry.reserve_unique("setup"), "setup");
        assert_eq!(registry.reserve_unique("setup"), "setup-2");
        assert!(registry.contains("overview-4"));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn slug_is_deterministic_for_same_reserved_set() {
        let texts = ["Overview", "Overview", "Details", "overview 2"];
        let run = || {
            let mut registry: IdRegistry = ["details"].into_iter().collect();
            texts
                .iter()
                .map(|text| registry.reserve_unique(&slugify(text, "section")))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
        assert_eq!(run(), vec!["overview", "overview-2", "details-2", "overview-2-2"]);
    }
}
