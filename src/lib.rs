//! `segreduce` — a load-balanced segmented-reduction SpMV engine.
//!
//! This crate computes a sparse-matrix x dense-vector product for matrices
//! stored in coordinate (COO) form by partitioning the irregular row
//! structure evenly across independent workers using a **merge-path
//! decomposition**, then reconciling rows that straddle worker boundaries
//! in a single fixup pass. See `DESIGN.md` for the module-by-module
//! grounding.
//!
//! ## Invariants
//!
//! - `row_idx` is non-decreasing; `col_idx[k] < col_dim`; `row_idx[k] <
//!   row_dim` for every nonzero `k` ([`CooMatrix::try_new`] enforces this
//!   up front, never mid-reduction).
//! - Reduction within a row is strict left-to-right: a fixed worker count
//!   reproduces bit-identical sums on repeated runs; different worker
//!   counts may legitimately round differently for non-associative
//!   reduces such as floating-point addition.
//! - `d_result[row]` has exactly one writer: the worker whose region
//!   contains that row's tail flag, or the boundary-fixup pass for rows
//!   whose tail lands on a worker boundary. Disjoint `&mut` slices make
//!   this a compile-time guarantee rather than a runtime convention.
//!
//! ## Layout
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`merge_path`] | Pure split-point search over the conceptual merge path (C1) |
//! | [`tile_reducer`] | Per-worker walk over an assigned diagonal range (C2) |
//! | [`reduce_by_key`] | The inclusive/exclusive segmented scan primitive shared by C2 and C4 (C3) |
//! | [`boundary_fixup`] | Reconciles rows straddling worker regions (C4) |
//! | [`orchestrator`] | Sizes the worker grid and drives C2 then C4 (C5) |
//! | [`coo`] | The read-only COO matrix view |
//! | [`reduce`] | The `Reduce` monoid the engine is generic over |
//! | [`config`] | Performance-only tunables (`EngineConfig`) |
//! | [`error`] | The crate's validation error type |

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

/// Engine tunables (workers-per-group, items-per-lane, etc.); performance-only.
pub mod config;
/// The read-only COO triple-stream view and its validation.
pub mod coo;
/// The crate's static failure surface.
pub mod error;
/// MergePathSearch (C1): pure split-point search.
pub mod merge_path;
/// Sizes the worker grid and drives TileReducer then BoundaryFixup (C5).
pub mod orchestrator;
/// The reduction monoid (`Reduce`) the engine is generic over.
pub mod reduce;
/// ReduceByKey scan primitive (C3): inclusive/exclusive segmented scan.
pub mod reduce_by_key;
/// BoundaryFixup (C4): reconciles rows straddling worker regions.
pub mod boundary_fixup;
/// TileReducer (C2): per-worker walk over an assigned merge-path region.
pub mod tile_reducer;

pub use config::EngineConfig;
pub use coo::CooMatrix;
pub use error::SpmvError;
pub use orchestrator::spmv;
pub use reduce::Reduce;
