//! # Singleton
//!
//! Process-wide state with exactly one, lazily created instance. Creation is
//! guarded by a mutex: the lock is taken before checking whether the instance
//! exists and released after it was created (or right away if it already
//! existed). The instance is only reachable through [Singleton::instance].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use tracing::{debug, trace};
use tracing_attributes::instrument;

/// Guarded slot. `None` until the first call to [Singleton::instance].
static INSTANCE: Mutex<Option<&'static Singleton>> = Mutex::new(None);

/// Number of times the constructor ran
static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct Singleton {
    /// Name of the thread that created the instance
    created_by: String,
}

impl Singleton {
    fn new() -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        let created_by = thread::current().name().unwrap_or("unnamed").to_string();
        debug!("Constructing singleton on thread {created_by}");
        Singleton { created_by }
    }

    /// The shared instance. Every call, from any thread, returns the same reference.
    #[instrument(level = "trace")]
    pub fn instance() -> &'static Singleton {
        // A poisoned lock still holds a valid slot, the constructor cannot leave it half written
        let mut slot = INSTANCE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(instance) = *slot {
            trace!("Returning existing singleton");
            return instance;
        }
        let instance: &'static Singleton = Box::leak(Box::new(Singleton::new()));
        *slot = Some(instance);
        instance
    }

    /// How often the constructor ran in this process. Never exceeds one.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Business logic executed on the single instance
    pub fn some_business_logic(&self) -> String {
        format!("Singleton created by `{}` at {:p}", self.created_by, self)
    }
}

/// Runs the singleton example (two threads race for the instance) and returns
/// the lines to print
pub fn demo() -> Vec<String> {
    let spawn = |name: &str| {
        thread::Builder::new()
            .name(name.to_string())
            .spawn(|| Singleton::instance() as *const Singleton as usize)
    };
    let handles = [spawn("first"), spawn("second")];

    let addresses: Vec<Option<usize>> = handles
        .into_iter()
        .map(|handle| handle.ok().and_then(|h| h.join().ok()))
        .collect();

    let mut lines = vec![];
    match addresses.as_slice() {
        [Some(first), Some(second)] if first == second => {
            lines.push("Singleton works, both variables contain the same instance.".to_string())
        }
        [Some(_), Some(_)] => lines.push("Singleton failed, variables contain different instances.".to_string()),
        _ => lines.push("Singleton demo could not run its threads.".to_string()),
    }
    lines.push(Singleton::instance().some_business_logic());
    lines.push(format!("Constructed {} time(s)", Singleton::constructions()));
    lines
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_same_instance_across_threads() {
        let handles = (0..8)
            .map(|_| thread::spawn(|| Singleton::instance() as *const Singleton as usize))
            .collect::<Vec<_>>();
        let local = Singleton::instance();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), local as *const Singleton as usize);
        }
        assert!(std::ptr::eq(local, Singleton::instance()));
        assert_eq!(Singleton::constructions(), 1);
    }

    #[test_log::test]
    fn test_poisoned_lock_still_yields_the_instance() {
        let before = Singleton::instance();

        let poisoner = thread::spawn(|| {
            let _slot = INSTANCE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            panic!("panicking while holding the singleton lock");
        });
        assert!(poisoner.join().is_err());
        assert!(INSTANCE.is_poisoned());

        assert!(std::ptr::eq(before, Singleton::instance()));
        assert_eq!(Singleton::constructions(), 1);
    }

    #[test_log::test]
    fn test_demo() {
        let lines = demo();
        assert_eq!(lines[0], "Singleton works, both variables contain the same instance.");
        assert_eq!(lines[2], "Constructed 1 time(s)");
    }
}
