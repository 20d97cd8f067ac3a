//! CPU search workers.
//!
//! Each worker is an OS thread with its own job queue. Handing out a job
//! cancels whatever the workers are searching and starts every worker on
//! the new nonce with its own random extranonce. Found solutions arrive on
//! one shared channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::CpuConfig;
use crate::pow::{Challenge, Job, JobKind, Solution};
use crate::Error;

/// Hashes between counter updates and pause checks.
pub const HASH_BATCH: u64 = 100_000;

/// Workers with an id below this yield after each batch.
const YIELDING_WORKERS: usize = 2;

type Cancel = Arc<AtomicBool>;

/// A running set of CPU workers.
pub struct WorkerPool {
    queues: Vec<Sender<(Job, Cancel)>>,
    handles: Vec<JoinHandle<()>>,
    current: Option<Cancel>,
    shared: Arc<Shared>,
    solutions: Receiver<Solution>,
}

struct Shared {
    paused: Mutex<bool>,
    resumed: Condvar,
    hash_counts: Vec<AtomicU64>,
}

impl WorkerPool {
    /// Start the workers described by `config`.
    ///
    /// Fails with [`Error::WorkersDisabled`] if the config turns CPU
    /// workers off.
    pub fn start(config: &CpuConfig) -> Result<WorkerPool, Error> {
        if !config.enabled() {
            return Err(Error::WorkersDisabled);
        }

        let threads = config.resolved_threads();

        let shared = Arc::new(Shared {
            paused: Mutex::new(false),
            resumed: Condvar::new(),
            hash_counts: (0..threads).map(|_| AtomicU64::new(0)).collect(),
        });

        let (solution_tx, solutions) = mpsc::channel();

        let mut pool = WorkerPool {
            queues: Vec::with_capacity(threads),
            handles: Vec::with_capacity(threads),
            current: None,
            shared,
            solutions,
        };

        for id in 0..threads {
            let (tx, rx) = mpsc::channel();
            let solution_tx = solution_tx.clone();
            let shared = pool.shared.clone();

            debug!("Starting CpuWorker[{}] thread", id);

            // On error, dropping `pool` stops the workers started so far.
            let handle = thread::Builder::new()
                .name(format!("cpu-worker-{}", id))
                .spawn(move || run(id, rx, solution_tx, shared))
                .map_err(Error::Spawn)?;

            pool.queues.push(tx);
            pool.handles.push(handle);
        }

        info!("Started {} CPU workers", threads);

        Ok(pool)
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.handles.len()
    }

    /// Cancel the current job and hand `job` to every worker.
    ///
    /// A [`JobKind::Stop`] job only cancels.
    pub fn execute(&mut self, job: Job) {
        if let Some(cancel) = self.current.take() {
            cancel.store(true, Ordering::Relaxed);
        }

        if job.kind == JobKind::Stop {
            debug!("Stopping workers");
            return;
        }

        debug!("Assigning job to workers: {:?}", job);

        let cancel: Cancel = Arc::new(AtomicBool::new(false));
        for queue in &self.queues {
            // A send only fails if the worker is gone, which shutdown handles.
            let _ = queue.send((job.clone(), cancel.clone()));
        }
        self.current = Some(cancel);
    }

    /// Solutions found by any worker, for any job.
    ///
    /// The channel is unbounded and must be drained. At low difficulty
    /// nearly every hash is a solution, and at difficulty 0 every hash is.
    /// Workers drop solutions once their job is cancelled, but one found
    /// just before [`WorkerPool::execute`] can still be queued; compare
    /// [`Solution::nonce`] with the current job.
    pub fn solutions(&self) -> &Receiver<Solution> {
        &self.solutions
    }

    /// Hashes done per worker, counted in [`HASH_BATCH`] steps.
    pub fn hash_counts(&self) -> Vec<u64> {
        self.shared
            .hash_counts
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }

    /// Hold all workers at their next batch boundary.
    pub fn pause(&self) {
        *self.shared.lock_paused() = true;
        debug!("Workers paused");
    }

    /// Let paused workers continue.
    pub fn resume(&self) {
        *self.shared.lock_paused() = false;
        self.shared.resumed.notify_all();
        debug!("Workers resumed");
    }

    /// Whether [`WorkerPool::pause`] is in effect.
    pub fn is_paused(&self) -> bool {
        *self.shared.lock_paused()
    }

    /// Cancel the current job and join all worker threads.
    pub fn shutdown(mut self) {
        self.stop_all();
    }

    fn stop_all(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        if let Some(cancel) = self.current.take() {
            cancel.store(true, Ordering::Relaxed);
        }

        // Closing the queues ends the worker loops.
        self.queues.clear();
        self.resume();

        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("CPU worker panicked");
            }
        }

        debug!("CPU workers stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop_all();
    }
}

impl Shared {
    fn lock_paused(&self) -> MutexGuard<'_, bool> {
        self.paused.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn wait_if_paused(&self) {
        let mut paused = self.lock_paused();
        while *paused {
            paused = self.resumed.wait(paused).unwrap_or_else(|e| e.into_inner());
        }
    }
}

fn run(id: usize, jobs: Receiver<(Job, Cancel)>, solutions: Sender<Solution>, shared: Arc<Shared>) {
    let mut rng = fastrand::Rng::new();

    while let Ok((job, cancel)) = jobs.recv() {
        if cancel.load(Ordering::Relaxed) {
            continue;
        }

        if !search(id, &job, &cancel, &solutions, &shared, &mut rng) {
            break;
        }
    }

    trace!("CpuWorker[{}] exiting", id);
}

/// Search `job` until cancelled. Returns `false` if nobody listens for solutions.
fn search(
    id: usize,
    job: &Job,
    cancel: &AtomicBool,
    solutions: &Sender<Solution>,
    shared: &Shared,
    rng: &mut fastrand::Rng,
) -> bool {
    let mut challenge = Challenge::new(&job.nonce, job.difficulty, rng);
    let mut count = HASH_BATCH;

    trace!("CpuWorker[{}] searching from {}", id, challenge.block());

    while !cancel.load(Ordering::Relaxed) {
        if let Some(solution) = challenge.try_next() {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            debug!("Found solution, nonce = {}", solution);
            if solutions.send(solution).is_err() {
                return false;
            }
        }

        count -= 1;

        if count == 0 {
            shared.hash_counts[id].fetch_add(HASH_BATCH, Ordering::Relaxed);
            count = HASH_BATCH;

            if id < YIELDING_WORKERS {
                // Leave room for other threads and processes.
                thread::sleep(Duration::from_millis(1));
            }

            shared.wait_if_paused();
        }
    }

    true
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Instant;

    fn pool(threads: i32) -> WorkerPool {
        WorkerPool::start(&CpuConfig::new().set_threads(threads)).unwrap()
    }

    #[test]
    fn disabled_config() {
        let err = WorkerPool::start(&CpuConfig::new().set_enabled(false)).err();
        assert!(matches!(err, Some(Error::WorkersDisabled)));
    }

    #[test]
    fn finds_solution() {
        let mut pool = pool(2);
        assert_eq!(pool.threads(), 2);

        let nonce = [0x33; 32];
        pool.execute(Job::new(nonce, 8));

        let solution = pool
            .solutions()
            .recv_timeout(Duration::from_secs(30))
            .expect("solution");

        assert_eq!(solution.nonce, nonce);
        assert!(solution.verify(8));

        pool.shutdown();
    }

    #[test]
    fn counts_hashes() {
        let mut pool = pool(1);
        pool.execute(Job::new([0; 32], 255));

        let start = Instant::now();
        while pool.hash_counts()[0] < HASH_BATCH {
            assert!(start.elapsed() < Duration::from_secs(60), "no hashes counted");
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(pool.hash_counts()[0] % HASH_BATCH, 0);
    }

    #[test]
    fn stop_then_new_job() {
        let mut pool = pool(1);
        pool.execute(Job::new([1; 32], 255));
        pool.execute(Job::stop());

        let nonce = [2; 32];
        pool.execute(Job::new(nonce, 4));

        let start = Instant::now();
        loop {
            let s = pool
                .solutions()
                .recv_timeout(Duration::from_secs(30))
                .expect("solution");
            if s.nonce == nonce {
                assert!(s.verify(4));
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(30));
        }
    }

    #[test]
    fn restart_job() {
        let mut pool = pool(1);
        pool.execute(Job::new([3; 32], 255));

        let nonce = [4; 32];
        pool.execute(Job::restart(nonce, 6));

        let start = Instant::now();
        loop {
            let s = pool
                .solutions()
                .recv_timeout(Duration::from_secs(30))
                .expect("solution");
            if s.nonce == nonce {
                assert!(s.verify(6));
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(30));
        }
    }

    #[test]
    fn no_solutions_after_stop() {
        let mut pool = pool(1);
        let nonce = [6; 32];
        pool.execute(Job::new(nonce, 0));

        let first = pool
            .solutions()
            .recv_timeout(Duration::from_secs(30))
            .expect("solution");
        assert_eq!(first.nonce, nonce);

        pool.execute(Job::stop());

        // Let the worker see the cancel, then drain what was queued before it.
        thread::sleep(Duration::from_millis(100));
        while pool.solutions().try_recv().is_ok() {}

        thread::sleep(Duration::from_millis(300));
        assert!(pool.solutions().try_recv().is_err());
    }

    fn wait_for_counts(pool: &WorkerPool, done: impl Fn(&[u64]) -> bool) -> Vec<u64> {
        let start = Instant::now();
        loop {
            let counts = pool.hash_counts();
            if done(&counts) {
                return counts;
            }
            assert!(
                start.elapsed() < Duration::from_secs(60),
                "hash counts stuck at {:?}",
                counts
            );
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn pause_and_resume() {
        let mut pool = pool(2);
        assert!(!pool.is_paused());

        pool.execute(Job::new([8; 32], 255));
        wait_for_counts(&pool, |c| c.iter().all(|n| *n > 0));

        pool.pause();
        assert!(pool.is_paused());

        // Workers finish the batch they are in before holding.
        let start = Instant::now();
        let mut settled = pool.hash_counts();
        loop {
            thread::sleep(Duration::from_millis(200));
            let now = pool.hash_counts();
            if now == settled {
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(60), "workers did not pause");
            settled = now;
        }

        thread::sleep(Duration::from_secs(1));
        assert_eq!(pool.hash_counts(), settled);

        pool.resume();
        assert!(!pool.is_paused());

        wait_for_counts(&pool, |c| c.iter().zip(&settled).all(|(n, s)| n > s));
    }

    #[test]
    fn shutdown_while_paused() {
        let mut pool = pool(1);
        pool.execute(Job::new([5; 32], 255));
        pool.pause();
        // Must not hang on the paused worker.
        pool.shutdown();
    }
}
