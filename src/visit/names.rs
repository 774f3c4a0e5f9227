//! Target name generation for desugared interactive blocks.

use uuid::Uuid;

/// How fresh target names are generated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// `x` followed by a random uuid (unique across documents)
    #[default]
    Random,
    /// `prefix` followed by a counter (reproducible output)
    Sequential { prefix: String },
}

impl NameStyle {
    /// Sequential names with the given prefix
    pub fn sequential(prefix: impl Into<String>) -> Self {
        Self::Sequential {
            prefix: prefix.into(),
        }
    }
}

/// Produces names that are never repeated by the same generator.
#[derive(Debug, Clone)]
pub(crate) struct NameGen {
    style: NameStyle,
    counter: u64,
}

impl NameGen {
    pub(crate) fn new(style: NameStyle) -> Self {
        Self { style, counter: 0 }
    }

    pub(crate) fn next_name(&mut self) -> String {
        self.counter += 1;
        match &self.style {
            NameStyle::Random => format!("x{}", Uuid::new_v4().simple()),
            NameStyle::Sequential { prefix } => format!("{prefix}{}", self.counter),
        }
    }

    /// Number of names handed out so far
    pub(crate) fn issued(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sequential() {
        let mut names = NameGen::new(NameStyle::sequential("t"));
        assert_eq!(names.next_name(), "t1");
        assert_eq!(names.next_name(), "t2");
        assert_eq!(names.issued(), 2);
    }

    #[test]
    fn test_random_unique() {
        let mut names = NameGen::new(NameStyle::Random);
        let seen: HashSet<_> = (0..100).map(|_| names.next_name()).collect();
        assert_eq!(seen.len(), 100);
        assert!(seen.iter().all(|n| n.starts_with('x') && n.len() == 33));
    }
}
