/// Construction parameters for a [`Solver`](crate::Solver).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Number of state records per pool block. Small values exercise pool
    /// growth; a search touching more states simply uses more blocks.
    pub block_size: usize,
    /// Hard ceiling on the number of pool blocks. A search that needs more
    /// fails with [`SolveError::OutOfMemory`](crate::SolveError::OutOfMemory).
    pub max_blocks: usize,
    /// Expected neighbor count per state, used to size scratch buffers.
    pub typical_adjacent: usize,
    /// Memoise solved paths and known failures between calls.
    pub path_cache: bool,
    /// Maximum number of path cache entries.
    pub path_cache_capacity: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            block_size: 250,
            max_blocks: 4096,
            typical_adjacent: 6,
            path_cache: true,
            path_cache_capacity: 16 * 1024,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = SolverConfig {
            block_size: 20,
            path_cache: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
