use std::sync::atomic::{AtomicUsize, Ordering};

/// Soft, observed byte counter against the `-m <MB>` ceiling, used by the
/// build orchestrator to trigger reclamation between chunks and buckets.
pub struct MemoryTracker {
    used_bytes: AtomicUsize,
    limit_bytes: usize,
}

impl MemoryTracker {
    pub fn new(limit_mb: usize) -> Self {
        MemoryTracker {
            used_bytes: AtomicUsize::new(0),
            limit_bytes: limit_mb.saturating_mul(1024 * 1024),
        }
    }

    pub fn add(&self, bytes: usize) {
        self.used_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn sub(&self, bytes: usize) {
        self.used_bytes.fetch_sub(bytes.min(self.current_usage()), Ordering::Relaxed);
    }

    pub fn current_usage(&self) -> usize {
        self.used_bytes.load(Ordering::Relaxed)
    }

    pub fn pressure(&self) -> f32 {
        if self.limit_bytes == 0 {
            return 1.0;
        }
        self.current_usage() as f32 / self.limit_bytes as f32
    }

    /// Release resident allocator pages back to the OS. This is the
    /// teacher's own `force_gc` verbatim: it is the one reliable way to
    /// make a long-lived allocator give memory back, which is exactly
    /// why §4.6 tears down and respawns the worker pool every 10,000
    /// documents instead of trusting the allocator to self-trim.
    pub fn force_gc(&self) {
        #[cfg(all(not(target_env = "msvc"), target_os = "linux"))]
        unsafe {
            libc::malloc_trim(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_scales_with_limit() {
        let tracker = MemoryTracker::new(1);
        assert_eq!(tracker.pressure(), 0.0);
        tracker.add(1024 * 1024);
        assert!((tracker.pressure() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sub_never_underflows() {
        let tracker = MemoryTracker::new(1);
        tracker.add(100);
        tracker.sub(1000);
        assert_eq!(tracker.current_usage(), 0);
    }
}
