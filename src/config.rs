//! Engine tunables (§6: "Configuration" — affects performance only, never
//! correctness).
//!
//! Every field here has a documented default matching the original
//! accelerator-oriented tuning, reinterpreted for the CPU realization:
//! `workers_per_group` / `items_per_lane` shape the tile size each worker
//! processes per batch of its own sequential walk (what would be a
//! cooperative group's lane count and per-lane item count on the
//! accelerator); `over_subscription_factor` scales how many independent
//! workers the orchestrator dispatches relative to available parallelism;
//! `fixup_*` shape the tile size used by the boundary fixup pass.

use crate::error::SpmvError;

/// Tunables recognized by the orchestrator. None of these affect the
/// numeric result — only how the work is tiled and how many workers run
/// concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Lanes per cooperative group in the accelerator model; here, the
    /// per-worker tile width factor. Default 64.
    pub workers_per_group: usize,
    /// Items per lane; combined with `workers_per_group` this gives the
    /// tile size `TILE_ITEMS` each worker consumes per batch. Default 10.
    pub items_per_lane: usize,
    /// Multiplier applied to the backend's reported parallelism when
    /// sizing the number of independent workers `W`. Default 4.
    pub over_subscription_factor: usize,
    /// Tile width (lanes) used by the boundary fixup pass. Default 256.
    pub fixup_workers_per_group: usize,
    /// Items per lane used by the boundary fixup pass. Default 4.
    pub fixup_items_per_lane: usize,
    /// Number of times to repeat the reduction (benchmarking knob; the
    /// engine does not itself time anything — see crate root docs).
    /// Default 1.
    pub iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers_per_group: 64,
            items_per_lane: 10,
            over_subscription_factor: 4,
            fixup_workers_per_group: 256,
            fixup_items_per_lane: 4,
            iterations: 1,
        }
    }
}

impl EngineConfig {
    /// Tile size (`TILE_ITEMS`) each worker consumes per batch of its walk.
    #[inline]
    pub fn tile_items(&self) -> usize {
        self.workers_per_group * self.items_per_lane
    }

    /// Tile size used by the boundary fixup pass.
    #[inline]
    pub fn fixup_tile_items(&self) -> usize {
        self.fixup_workers_per_group * self.fixup_items_per_lane
    }

    /// Fluent setter, mirroring the crate's builder-style ergonomics
    /// elsewhere (CLI parsing of these knobs is an external collaborator's
    /// job, not this crate's).
    #[inline]
    pub fn with_workers_per_group(mut self, v: usize) -> Self {
        self.workers_per_group = v;
        self
    }

    /// See [`EngineConfig::with_workers_per_group`].
    #[inline]
    pub fn with_items_per_lane(mut self, v: usize) -> Self {
        self.items_per_lane = v;
        self
    }

    /// See [`EngineConfig::with_workers_per_group`].
    #[inline]
    pub fn with_over_subscription_factor(mut self, v: usize) -> Self {
        self.over_subscription_factor = v;
        self
    }

    /// See [`EngineConfig::with_workers_per_group`].
    #[inline]
    pub fn with_iterations(mut self, v: usize) -> Self {
        self.iterations = v;
        self
    }

    /// Validate that every tunable is in range. Called once by the
    /// orchestrator before any worker is dispatched.
    pub fn validate(&self) -> Result<(), SpmvError> {
        if self.workers_per_group == 0 {
            return Err(SpmvError::InvalidConfig("workers_per_group must be positive"));
        }
        if self.items_per_lane == 0 {
            return Err(SpmvError::InvalidConfig("items_per_lane must be positive"));
        }
        if self.over_subscription_factor == 0 {
            return Err(SpmvError::InvalidConfig(
                "over_subscription_factor must be positive",
            ));
        }
        if self.fixup_workers_per_group == 0 {
            return Err(SpmvError::InvalidConfig(
                "fixup_workers_per_group must be positive",
            ));
        }
        if self.fixup_items_per_lane == 0 {
            return Err(SpmvError::InvalidConfig(
                "fixup_items_per_lane must be positive",
            ));
        }
        if self.iterations == 0 {
            return Err(SpmvError::InvalidConfig("iterations must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.workers_per_group, 64);
        assert_eq!(cfg.items_per_lane, 10);
        assert_eq!(cfg.over_subscription_factor, 4);
        assert_eq!(cfg.fixup_workers_per_group, 256);
        assert_eq!(cfg.fixup_items_per_lane, 4);
        assert_eq!(cfg.iterations, 1);
        assert_eq!(cfg.tile_items(), 640);
        assert_eq!(cfg.fixup_tile_items(), 1024);
    }

    #[test]
    fn rejects_zero_tunables() {
        assert!(EngineConfig::default().with_items_per_lane(0).validate().is_err());
        assert!(EngineConfig::default().with_workers_per_group(0).validate().is_err());
        assert!(EngineConfig::default().with_over_subscription_factor(0).validate().is_err());
        assert!(EngineConfig::default().with_iterations(0).validate().is_err());
    }
}
