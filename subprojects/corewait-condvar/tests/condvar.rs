//! Multi-thread integration scenarios for the condition-variable emulation.
//!
//! Colocated with the crate as `tests/condvar.rs` rather than a `#[cfg(test)]`
//! module since every scenario here spans real OS threads and deserves its
//! own compilation unit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use corewait_condvar::Condvar;
use corewait_sys::Mutex;

struct Cell {
    mutex: Mutex,
    condvar: Condvar,
    state: std::cell::UnsafeCell<i32>,
}

unsafe impl Send for Cell {}
unsafe impl Sync for Cell {}

impl Cell {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            mutex: Mutex::new().unwrap(),
            condvar: Condvar::new().unwrap(),
            state: std::cell::UnsafeCell::new(0),
        })
    }

    fn set(&self, value: i32) {
        self.mutex.lock().unwrap();
        unsafe { *self.state.get() = value };
        self.mutex.unlock().unwrap();
    }

    fn get(&self) -> i32 {
        self.mutex.lock().unwrap();
        let value = unsafe { *self.state.get() };
        self.mutex.unlock().unwrap();
        value
    }
}

#[test]
fn init_finalize_round_trip() {
    let _condvar = Condvar::new().unwrap();
}

#[test]
fn signal_with_no_waiter_is_a_noop() {
    let condvar = Condvar::new().unwrap();
    condvar.signal();
    condvar.signal();
    drop(condvar);
}

#[test]
fn single_waiter_signal_under_mutex() {
    let cell = Cell::new();
    let ready = Arc::new(corewait_sys::Semaphore::new(0, 1).unwrap());

    let worker = Arc::clone(&cell);
    let worker_ready = Arc::clone(&ready);
    let handle = thread::spawn(move || {
        worker.mutex.lock().unwrap();
        unsafe { *worker.state.get() = 1 };
        worker_ready.signal(1).unwrap();
        worker.condvar.wait(&worker.mutex).unwrap();
        unsafe { *worker.state.get() = 2 };
        worker.mutex.unlock().unwrap();
    });

    ready.wait().unwrap();
    assert_eq!(cell.get(), 1);

    cell.mutex.lock().unwrap();
    cell.condvar.signal();
    cell.mutex.unlock().unwrap();

    handle.join().unwrap();
    assert_eq!(cell.get(), 2);
}

#[test]
fn single_waiter_signal_outside_mutex_retry_loop() {
    let cell = Cell::new();
    let ready = Arc::new(corewait_sys::Semaphore::new(0, 1).unwrap());

    let worker = Arc::clone(&cell);
    let worker_ready = Arc::clone(&ready);
    let handle = thread::spawn(move || {
        worker.mutex.lock().unwrap();
        unsafe { *worker.state.get() = 1 };
        worker_ready.signal(1).unwrap();
        while unsafe { *worker.state.get() } != 2 {
            worker.condvar.wait(&worker.mutex).unwrap();
        }
        worker.mutex.unlock().unwrap();
    });

    ready.wait().unwrap();
    assert_eq!(cell.get(), 1);

    for _ in 0..100 {
        cell.condvar.signal();
        cell.set(2);
        if handle.is_finished() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    handle.join().unwrap();
    assert_eq!(cell.get(), 2);
}

fn n_waiters_broadcast_under_mutex(n: usize) {
    let cell = Cell::new();
    let registered = Arc::new(AtomicUsize::new(0));
    let ready = Arc::new(corewait_sys::Semaphore::new(0, n as u32).unwrap());

    let mut handles = Vec::new();
    for _ in 0..n {
        let worker = Arc::clone(&cell);
        let worker_registered = Arc::clone(&registered);
        let worker_ready = Arc::clone(&ready);
        handles.push(thread::spawn(move || {
            worker.mutex.lock().unwrap();
            if worker_registered.fetch_add(1, Ordering::SeqCst) + 1 == n {
                worker_ready.signal(1).unwrap();
            }
            while unsafe { *worker.state.get() } != 2 {
                worker.condvar.wait(&worker.mutex).unwrap();
            }
            worker.mutex.unlock().unwrap();
        }));
    }

    ready.wait().unwrap();

    cell.mutex.lock().unwrap();
    unsafe { *cell.state.get() = 2 };
    cell.condvar.broadcast();
    cell.mutex.unlock().unwrap();

    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cell.get(), 2);
}

#[test]
fn four_waiters_broadcast_under_mutex() {
    n_waiters_broadcast_under_mutex(4);
}

#[test]
fn one_hundred_twenty_eight_waiters_broadcast_under_mutex() {
    n_waiters_broadcast_under_mutex(128);
}

#[test]
fn mixed_signal_and_broadcast_sequence() {
    const N: usize = 4;
    let cell = Cell::new();
    let registered = Arc::new(AtomicUsize::new(0));
    let cycles_entered = Arc::new(AtomicUsize::new(0));
    let ready = Arc::new(corewait_sys::Semaphore::new(0, N as u32).unwrap());

    let mut handles = Vec::new();
    for _ in 0..N {
        let worker = Arc::clone(&cell);
        let worker_registered = Arc::clone(&registered);
        let worker_cycles = Arc::clone(&cycles_entered);
        let worker_ready = Arc::clone(&ready);
        handles.push(thread::spawn(move || {
            worker.mutex.lock().unwrap();
            if worker_registered.fetch_add(1, Ordering::SeqCst) + 1 == N {
                worker_ready.signal(1).unwrap();
            }
            let mut last_seen = 0;
            while unsafe { *worker.state.get() } < 3 {
                worker.condvar.wait(&worker.mutex).unwrap();
                let current = unsafe { *worker.state.get() };
                if current != last_seen {
                    worker_cycles.fetch_add(1, Ordering::SeqCst);
                    last_seen = current;
                }
            }
            worker.mutex.unlock().unwrap();
        }));
    }

    ready.wait().unwrap();

    // Cycle 1: signal, signal, broadcast - every waiter ends up released
    // through some combination of the three calls.
    cell.condvar.signal();
    cell.condvar.signal();
    cell.mutex.lock().unwrap();
    unsafe { *cell.state.get() = 1 };
    cell.condvar.broadcast();
    cell.mutex.unlock().unwrap();

    // Cycle 2: broadcast outside the mutex.
    thread::sleep(Duration::from_millis(10));
    cell.set(2);
    cell.condvar.broadcast();

    // Cycle 3: signal then broadcast.
    thread::sleep(Duration::from_millis(10));
    cell.mutex.lock().unwrap();
    unsafe { *cell.state.get() = 3 };
    cell.condvar.signal();
    cell.condvar.broadcast();
    cell.mutex.unlock().unwrap();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(cell.get(), 3);
    // Each of the N waiters must have observed all 3 distinct state
    // transitions (1, 2, 3), not just been released once and fallen through.
    assert_eq!(cycles_entered.load(Ordering::SeqCst), 3 * N);
}
