use crate::sml::errors::SmlError;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Label table: label name -> program address.
///
/// A name can be bound once; rebinding fails until [`Labels::reset`] is called.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Labels {
    labels: HashMap<String, usize>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_label(&mut self, label: &str, address: usize) -> Result<(), SmlError> {
        if label.is_empty() {
            return Err(SmlError::MalformedLine("empty label".into()));
        }
        if self.labels.contains_key(label) {
            return Err(SmlError::DuplicateLabel(label.to_string()));
        }
        self.labels.insert(label.to_string(), address);
        Ok(())
    }

    pub fn get_address(&self, label: &str) -> Result<usize, SmlError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| SmlError::UndefinedLabel(label.to_string()))
    }

    pub fn reset(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        entries
    }
}

// HashMap has no Hash impl; hash the bindings in a fixed order so that equal tables hash equally.
impl Hash for Labels {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl fmt::Display for Labels {
    /// `[label -> address, ...]`, ordered by address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, addr)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} -> {addr}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(l: &Labels) -> u64 {
        let mut h = DefaultHasher::new();
        l.hash(&mut h);
        h.finish()
    }

    #[test]
    fn add_and_lookup() {
        let mut labels = Labels::new();
        labels.add_label("f3", 0).unwrap();
        labels.add_label("loop", 4).unwrap();
        assert_eq!(labels.get_address("f3"), Ok(0));
        assert_eq!(labels.get_address("loop"), Ok(4));
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let mut labels = Labels::new();
        labels.add_label("x", 1).unwrap();
        assert_eq!(
            labels.add_label("x", 2),
            Err(SmlError::DuplicateLabel("x".into()))
        );
        // first binding survives
        assert_eq!(labels.get_address("x"), Ok(1));
    }

    #[test]
    fn undefined_label() {
        let labels = Labels::new();
        assert_eq!(
            labels.get_address("nope"),
            Err(SmlError::UndefinedLabel("nope".into()))
        );
    }

    #[test]
    fn empty_label_is_rejected() {
        let mut labels = Labels::new();
        assert!(matches!(
            labels.add_label("", 0),
            Err(SmlError::MalformedLine(_))
        ));
        assert!(labels.is_empty());
    }

    #[test]
    fn reset_clears_bindings() {
        let mut labels = Labels::new();
        labels.add_label("a", 0).unwrap();
        labels.reset();
        assert!(labels.is_empty());
        labels.add_label("a", 3).unwrap();
        assert_eq!(labels.get_address("a"), Ok(3));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = Labels::new();
        a.add_label("one", 1).unwrap();
        a.add_label("two", 2).unwrap();
        let mut b = Labels::new();
        b.add_label("two", 2).unwrap();
        b.add_label("one", 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        b.reset();
        b.add_label("one", 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn display_orders_by_address() {
        let mut labels = Labels::new();
        labels.add_label("end", 7).unwrap();
        labels.add_label("start", 0).unwrap();
        assert_eq!(labels.to_string(), "[start -> 0, end -> 7]");
        assert_eq!(Labels::new().to_string(), "[]");
    }
}
