//! Active statement labels.

#[derive(Debug, Clone, PartialEq, Eq)]
struct Label {
    name: String,
    is_iteration: bool,
}

/// Labels enclosing the current statement. Function and class boundaries
/// start an empty set.
#[derive(Debug, Default)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }

    /// Whether `name` labels an iteration statement.
    pub fn is_iteration(&self, name: &str) -> Option<bool> {
        self.labels
            .iter()
            .rev()
            .find(|label| label.name == name)
            .map(|label| label.is_iteration)
    }

    /// Push a label. Returns `false` if it is already active.
    pub fn push(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.labels.push(Label {
            name: name.to_string(),
            is_iteration: false,
        });
        true
    }

    pub fn pop(&mut self) {
        self.labels.pop();
    }

    /// Mark the labels from index `from` onwards as labelling a loop.
    pub fn mark_iteration(&mut self, from: usize) {
        let start = from.min(self.labels.len());
        for label in &mut self.labels[start..] {
            label.is_iteration = true;
        }
    }

    /// Replace the set with an empty one, returning the old labels.
    pub fn take(&mut self) -> LabelSet {
        std::mem::take(self)
    }

    pub fn restore(&mut self, saved: LabelSet) {
        *self = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_label() {
        let mut labels = LabelSet::new();
        assert!(labels.push("a"));
        assert!(!labels.push("a"));
        labels.pop();
        assert!(labels.push("a"));
    }

    #[test]
    fn test_iteration_marking() {
        let mut labels = LabelSet::new();
        labels.push("outer");
        let pending = labels.len();
        labels.push("a");
        labels.push("b");
        labels.mark_iteration(pending);
        assert_eq!(labels.is_iteration("outer"), Some(false));
        assert_eq!(labels.is_iteration("a"), Some(true));
        assert_eq!(labels.is_iteration("b"), Some(true));
        assert_eq!(labels.is_iteration("c"), None);
    }

    #[test]
    fn test_iteration_marking_past_end() {
        let mut labels = LabelSet::new();
        labels.push("a");
        labels.mark_iteration(5);
        assert_eq!(labels.is_iteration("a"), Some(false));
    }

    #[test]
    fn test_function_boundary() {
        let mut labels = LabelSet::new();
        labels.push("a");
        let saved = labels.take();
        assert!(!labels.contains("a"));
        labels.restore(saved);
        assert!(labels.contains("a"));
    }
}
