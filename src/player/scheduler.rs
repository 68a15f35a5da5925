//! Trigger scheduler - deferred, cancellable playback callbacks
//!
//! A dedicated worker thread owns a priority queue of timed jobs.
//! Scheduling never blocks the caller; cancellation is all-or-nothing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A pending timed job. Ordered by deadline, then by scheduling order, so
/// triggers with coinciding deadlines fire deterministically in the order
/// they were scheduled.
struct Trigger {
    deadline: Instant,
    seq: u64,
    job: Job,
}

impl PartialEq for Trigger {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Trigger {}

impl PartialOrd for Trigger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Trigger {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the earliest deadline
        // (and lowest seq on ties) is at the top.
        (other.deadline, other.seq).cmp(&(self.deadline, self.seq))
    }
}

struct SchedulerState {
    queue: BinaryHeap<Trigger>,
    next_seq: u64,
    shutdown: bool,
}

/// Runs deferred jobs at their deadlines on a single worker thread.
///
/// Jobs fire strictly after their deadline has elapsed and after any
/// earlier-deadline job. `cancel_all` discards every pending trigger; a
/// job already past its deadline may still run (it counts as fired).
/// Dropping the scheduler cancels pending triggers and joins the worker.
pub struct TriggerScheduler {
    shared: Arc<(Mutex<SchedulerState>, Condvar)>,
    worker: Option<JoinHandle<()>>,
}

impl TriggerScheduler {
    pub fn new() -> Self {
        let shared = Arc::new((
            Mutex::new(SchedulerState {
                queue: BinaryHeap::new(),
                next_seq: 0,
                shutdown: false,
            }),
            Condvar::new(),
        ));

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("cadenza-scheduler".into())
            .spawn(move || Self::run_worker(worker_shared))
            .map_err(|e| log::warn!(target: "player::scheduler", "worker spawn failed: {}", e))
            .ok();

        Self { shared, worker }
    }

    /// Schedule `job` to run after `delay`. Returns immediately.
    pub fn schedule(&self, delay: Duration, job: impl FnOnce() + Send + 'static) {
        let (lock, cvar) = &*self.shared;
        let mut state = lock.lock().unwrap();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.push(Trigger {
            deadline: Instant::now() + delay,
            seq,
            job: Box::new(job),
        });
        cvar.notify_one();
    }

    /// Discard every pending trigger. Jobs that have not reached their
    /// deadline will never run.
    pub fn cancel_all(&self) {
        let (lock, cvar) = &*self.shared;
        let mut state = lock.lock().unwrap();
        let dropped = state.queue.len();
        state.queue.clear();
        if dropped > 0 {
            log::debug!(target: "player::scheduler", "cancelled {} pending trigger(s)", dropped);
        }
        cvar.notify_one();
    }

    /// Number of triggers still waiting for their deadline.
    pub fn pending(&self) -> usize {
        let (lock, _) = &*self.shared;
        lock.lock().unwrap().queue.len()
    }

    fn run_worker(shared: Arc<(Mutex<SchedulerState>, Condvar)>) {
        let (lock, cvar) = &*shared;
        let mut state = lock.lock().unwrap();

        loop {
            if state.shutdown {
                break;
            }

            let now = Instant::now();
            match state.queue.peek() {
                None => {
                    state = cvar.wait(state).unwrap();
                }
                Some(next) if next.deadline <= now => {
                    let trigger = state.queue.pop().unwrap();
                    // Run without holding the lock so jobs can schedule
                    // or cancel without deadlocking.
                    drop(state);
                    (trigger.job)();
                    state = lock.lock().unwrap();
                }
                Some(next) => {
                    let wait = next.deadline - now;
                    let (guard, _timeout) = cvar.wait_timeout(state, wait).unwrap();
                    state = guard;
                }
            }
        }
    }
}

impl Default for TriggerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TriggerScheduler {
    fn drop(&mut self) {
        let (lock, cvar) = &*self.shared;
        {
            let mut state = lock.lock().unwrap();
            state.queue.clear();
            state.shutdown = true;
            cvar.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_jobs_fire_in_deadline_order() {
        let scheduler = TriggerScheduler::new();
        let (tx, rx) = mpsc::channel();

        for (label, delay_ms) in [("late", 60u64), ("early", 10), ("mid", 30)] {
            let tx = tx.clone();
            scheduler.schedule(Duration::from_millis(delay_ms), move || {
                tx.send(label).unwrap();
            });
        }

        let order: Vec<_> = (0..3)
            .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap())
            .collect();
        assert_eq!(order, vec!["early", "mid", "late"]);
    }

    #[test]
    fn test_equal_deadlines_fire_in_scheduling_order() {
        let scheduler = TriggerScheduler::new();
        let (tx, rx) = mpsc::channel();
        let deadline = Duration::from_millis(20);

        for i in 0..5 {
            let tx = tx.clone();
            scheduler.schedule(deadline, move || {
                tx.send(i).unwrap();
            });
        }

        let order: Vec<i32> = (0..5)
            .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cancel_all_prevents_firing() {
        let scheduler = TriggerScheduler::new();
        let (tx, rx) = mpsc::channel();

        let tx2 = tx.clone();
        scheduler.schedule(Duration::from_millis(50), move || {
            tx2.send(()).unwrap();
        });
        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);

        assert!(rx.recv_timeout(Duration::from_millis(150)).is_err());
        drop(tx);
    }

    #[test]
    fn test_schedule_from_within_job() {
        let scheduler = Arc::new(TriggerScheduler::new());
        let (tx, rx) = mpsc::channel();

        let inner_scheduler = Arc::clone(&scheduler);
        scheduler.schedule(Duration::from_millis(5), move || {
            let tx = tx.clone();
            inner_scheduler.schedule(Duration::from_millis(5), move || {
                tx.send(()).unwrap();
            });
        });

        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }
}
