use std::fmt;

pub type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct WorkQueue {
    queue: Vec<Callback>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_callback(&mut self, callback: impl FnOnce() + 'static) {
        self.queue.push(Box::new(callback));
    }

    /// Runs queued callbacks in registration order and leaves the queue empty.
    pub fn execute(&mut self) {
        for callback in self.take() {
            callback();
        }
    }

    pub(crate) fn take(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl fmt::Debug for WorkQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkQueue")
            .field("len", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::WorkQueue;

    #[test]
    fn execute_runs_in_order_and_clears() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = WorkQueue::new();
        for i in 0..3 {
            let log = Rc::clone(&log);
            queue.add_callback(move || log.borrow_mut().push(i));
        }
        assert_eq!(queue.len(), 3);

        queue.execute();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert!(queue.is_empty());

        queue.execute();
        assert_eq!(log.borrow().len(), 3);
    }
}
