//! Host memory sizing diagnostic
//!
//! Computed once per launch and displayed; the result is not fed back
//! into the artifact's runtime limits.

/// Per-launch memory sizing diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct HeapProfile {
    /// Total host RAM in GB
    pub total_ram_gb: f64,

    /// Heap ceiling the runtime is configured with, in MB
    pub current_heap_limit_mb: u64,

    /// Recommended heap size in MB (85% of total RAM)
    pub optimal_heap_mb: u64,

    /// Whether the configured ceiling is more than 1000 MB below optimal
    pub needs_optimization: bool,
}

impl HeapProfile {
    /// Derive a profile from host totals and the configured runtime ceiling
    pub fn compute(total_ram_mb: u64, current_heap_limit_mb: u64) -> Self {
        let optimal_heap_mb = (total_ram_mb as f64 * 0.85).floor() as u64;
        let headroom = optimal_heap_mb as i64 - current_heap_limit_mb as i64;

        Self {
            total_ram_gb: total_ram_mb as f64 / 1024.0,
            current_heap_limit_mb,
            optimal_heap_mb,
            needs_optimization: headroom > 1000,
        }
    }
}

/// Total physical memory of the host in MB, if the platform exposes it
#[cfg(unix)]
pub fn total_ram_mb() -> Option<u64> {
    // SAFETY: sysconf is async-signal-safe and takes no pointers.
    let pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) };

    if pages <= 0 || page_size <= 0 {
        return None;
    }

    Some((pages as u64).saturating_mul(page_size as u64) / (1024 * 1024))
}

#[cfg(not(unix))]
pub fn total_ram_mb() -> Option<u64> {
    None
}
