use std::collections::VecDeque;

use super::Navigator;

const HISTORY_CAPACITY: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    current: String,
    back_stack: VecDeque<String>,
    forward_stack: VecDeque<String>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: strip_hash(&initial.into()).to_string(),
            ..Self::default()
        }
    }

    pub fn back_len(&self) -> usize {
        self.back_stack.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward_stack.len()
    }

    fn push_back(&mut self, entry: String) {
        if self.back_stack.len() >= HISTORY_CAPACITY {
            self.back_stack.pop_front();
        }
        self.back_stack.push_back(entry);
    }

    fn push_forward(&mut self, entry: String) {
        if self.forward_stack.len() >= HISTORY_CAPACITY {
            self.forward_stack.pop_front();
        }
        self.forward_stack.push_back(entry);
    }
}

impl Navigator for MemoryHistory {
    fn fragment(&self) -> String {
        self.current.clone()
    }

    fn push(&mut self, fragment: &str) {
        let fragment = strip_hash(fragment);
        if fragment == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, fragment.to_string());
        self.push_back(previous);
        self.forward_stack.clear();
    }

    fn replace(&mut self, fragment: &str) {
        self.current = strip_hash(fragment).to_string();
    }

    fn back(&mut self) -> bool {
        let Some(target) = self.back_stack.pop_back() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, target);
        self.push_forward(previous);
        true
    }

    fn forward(&mut self) -> bool {
        let Some(target) = self.forward_stack.pop_back() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, target);
        self.push_back(previous);
        true
    }
}

fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

#[cfg(test)]
mod tests {
    use super::{HISTORY_CAPACITY, MemoryHistory};
    use crate::history::Navigator;

    #[test]
    fn push_then_back_and_forward() {
        let mut history = MemoryHistory::new("#q=a");
        history.push("q=b");
        history.push("#q=c");
        assert_eq!(history.fragment(), "q=c");

        assert!(history.back());
        assert_eq!(history.fragment(), "q=b");
        assert!(history.back());
        assert_eq!(history.fragment(), "q=a");
        assert!(!history.back());

        assert!(history.forward());
        assert_eq!(history.fragment(), "q=b");
    }

    #[test]
    fn push_clears_forward_and_skips_duplicates() {
        let mut history = MemoryHistory::new("q=a");
        history.push("q=b");
        assert!(history.back());
        history.push("q=c");
        assert_eq!(history.forward_len(), 0);

        history.push("q=c");
        assert_eq!(history.back_len(), 1);
    }

    #[test]
    fn replace_does_not_grow_history() {
        let mut history = MemoryHistory::new("q=a");
        history.replace("q=a&num=10");
        assert_eq!(history.fragment(), "q=a&num=10");
        assert_eq!(history.back_len(), 0);
    }

    #[test]
    fn back_stack_is_bounded() {
        let mut history = MemoryHistory::new("");
        for i in 0..(HISTORY_CAPACITY + 10) {
            history.push(&format!("start={i}"));
        }
        assert_eq!(history.back_len(), HISTORY_CAPACITY);
    }
}
