use std::sync::atomic::AtomicU64;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Returns a process-unique number for building distinct default values.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
