use crate::local::LocalFileState;

/// Decides whether a remote file has to be copied over its local counterpart.
pub trait CopyPolicy: Send + Sync {
    fn should_copy(&self, local: &LocalFileState, remote_size: u64) -> bool;
}

/// Copy when the local file is missing or its size differs. Content is never hashed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizePolicy;

impl CopyPolicy for SizePolicy {
    fn should_copy(&self, local: &LocalFileState, remote_size: u64) -> bool {
        should_copy(local, remote_size)
    }
}

pub fn should_copy(local: &LocalFileState, remote_size: u64) -> bool {
    !local.exists || local.size != remote_size
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [u64; 6] = [0, 1, 10, 1023, 4096, u64::MAX];

    #[test]
    fn missing_local_always_copies() {
        for remote in SIZES {
            assert!(should_copy(&LocalFileState::MISSING, remote));
        }
    }

    #[test]
    fn only_equal_sizes_skip() {
        for local in SIZES {
            for remote in SIZES {
                let state = LocalFileState::present(local);
                assert_eq!(SizePolicy.should_copy(&state, remote), local != remote);
            }
        }
    }
}
