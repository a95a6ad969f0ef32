//! Navigation-history capability: where the current search fragment lives.

mod state;

pub use state::MemoryHistory;

pub trait Navigator {
    /// Current fragment without the leading `#`.
    fn fragment(&self) -> String;
    /// Records a new entry; forward entries are discarded.
    fn push(&mut self, fragment: &str);
    /// Overwrites the current entry without adding one.
    fn replace(&mut self, fragment: &str);
    fn back(&mut self) -> bool;
    fn forward(&mut self) -> bool;
}
