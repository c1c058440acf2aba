use std::fmt;

/// Section name and case title joined with `_`.
///
/// The two accounts share no identifiers, so this derived string is the only
/// thing a source case and its target counterpart have in common.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NaturalKey(String);

impl NaturalKey {
    pub fn new(section_name: &str, title: &str) -> Self {
        Self(format!("{section_name}_{title}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_section_and_title() {
        assert_eq!(NaturalKey::new("A", "X").as_str(), "A_X");
        // Separator collisions are possible and accepted.
        assert_eq!(NaturalKey::new("A_B", "C"), NaturalKey::new("A", "B_C"));
    }
}
