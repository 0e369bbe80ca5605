use ising_core::{derive_substream_seed, Spin};
use sha2::{Digest, Sha256};

/// Derives the deterministic seed used for a specific replica.
pub fn replica_seed(master_seed: u64, replica_index: usize) -> u64 {
    derive_substream_seed(master_seed, replica_index as u64)
}

/// Hex SHA-256 digest of a spin configuration in dense index order.
pub fn configuration_hash(spins: &[Spin]) -> String {
    let mut hasher = Sha256::new();
    for spin in spins {
        hasher.update(match spin {
            Spin::Down => b"-",
            Spin::Up => b"+",
        });
    }
    format!("{:x}", hasher.finalize())
}
