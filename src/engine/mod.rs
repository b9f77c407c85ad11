// ==========================================
// Retail standard assortment engine - selection core
// ==========================================
// Module roster:
// - ranking:            per-category ratings and blended score
// - share_allocator:    cumulative-share interleaving fill
// - quota_redistributor: rank-greedy fill with floor rescale
// - cutoff:             final rating cutoff per category
// - orchestrator:       full run pipeline
// - strategy:           allocation policy switch
// - allocation:         common per-group result shape
// - diagnostics:        non-fatal run findings
// ==========================================

pub mod allocation;
pub mod cutoff;
pub mod diagnostics;
pub mod orchestrator;
pub mod quota_redistributor;
pub mod ranking;
pub mod share_allocator;
pub mod strategy;

pub use allocation::{GroupAllocation, SelectedItem};
pub use cutoff::AssortmentCutoff;
pub use diagnostics::{CapacityShortfall, ConsistencyIssue, Diagnostics};
pub use orchestrator::{AssortmentOrchestrator, AssortmentRun};
pub use quota_redistributor::QuotaRedistributor;
pub use ranking::{RankWeights, RankingEngine};
pub use share_allocator::ShareAllocator;
pub use strategy::AllocationStrategy;
