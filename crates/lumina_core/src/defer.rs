//! Deferred task queue
//!
//! A cooperative "run on the next tick" primitive. Work deferred during the
//! current synchronous unit of work runs when the host pumps the queue,
//! typically once per frame:
//!
//! ```ignore
//! // In the app's frame loop
//! DeferQueue::main().run_pending();
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

type Task = Box<dyn FnOnce() + Send>;

/// Process-wide queue used by stores that aren't given one explicitly
static MAIN_QUEUE: OnceLock<DeferQueue> = OnceLock::new();

/// Cloneable handle to a FIFO of deferred tasks
#[derive(Clone, Default)]
pub struct DeferQueue {
    tasks: Arc<Mutex<VecDeque<Task>>>,
}

impl DeferQueue {
    /// Create a new, empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide queue (created on first use)
    pub fn main() -> DeferQueue {
        MAIN_QUEUE.get_or_init(DeferQueue::new).clone()
    }

    /// Schedule a task for the next call to [`run_pending`](Self::run_pending)
    pub fn defer(&self, task: impl FnOnce() + Send + 'static) {
        self.tasks.lock().unwrap().push_back(Box::new(task));
    }

    /// Run queued tasks until the queue is empty.
    ///
    /// Tasks deferred while draining also run before this returns. Returns
    /// the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // The lock must not be held while a task runs: tasks may defer.
            let next = self.tasks.lock().unwrap().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        if ran > 0 {
            tracing::trace!("DeferQueue::run_pending - ran {} task(s)", ran);
        }
        ran
    }

    /// Number of tasks waiting to run
    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for DeferQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferQueue")
            .field("pending", &self.len())
            .finish()
    }
}
