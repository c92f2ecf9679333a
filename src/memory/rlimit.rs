use crate::core::error::{Error, ErrorKind, Result};

/// Installs the hard, process-wide address-space ceiling named in §5
/// ("The memory ceiling is enforced as a process-wide address-space
/// limit set once at startup; allocations beyond the limit fail fatally
/// and are reported to the operator"). This is the backstop behind
/// `memory::tracker::MemoryTracker`'s soft, cooperative accounting: the
/// tracker decides when to reclaim *before* hitting the wall, this
/// decides what happens if something still does.
///
/// Call exactly once, at process startup, before any worker pool spins
/// up.
pub fn install_address_space_limit(limit_mb: usize) -> Result<()> {
    let limit_bytes = (limit_mb as u64).saturating_mul(1024 * 1024);

    let rlim = libc::rlimit {
        rlim_cur: limit_bytes as libc::rlim_t,
        rlim_max: limit_bytes as libc::rlim_t,
    };

    let rc = unsafe { libc::setrlimit(libc::RLIMIT_AS, &rlim) };
    if rc != 0 {
        return Err(Error::new(
            ErrorKind::Config,
            format!(
                "failed to install RLIMIT_AS of {} MB (errno {})",
                limit_mb,
                std::io::Error::last_os_error()
            ),
        ));
    }
    Ok(())
}

/// Maps an allocation/OS-level failure observed after the ceiling was
/// installed into the `ResourceExhaustion` error kind named in §7.
pub fn resource_exhausted(context: impl Into<String>) -> Error {
    Error::new(ErrorKind::OutOfMemory, context.into())
}
