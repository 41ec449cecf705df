//! Vimshottari dasha (planetary period) calculations.
//!
//! Supports 5 hierarchical levels (Mahadasha through Prana) and two
//! computation paths: full tree materialisation and snapshot-only queries.

pub mod balance;
pub mod query;
pub mod subperiod;
pub mod types;
pub mod vimshottari;

pub use balance::{DashaBalance, vimshottari_balance};
pub use query::{active_dasha, find_active_period, snapshot_from_tree};
pub use subperiod::{proportional_children, snap_last_child_end};
pub use types::{
    ActiveDasha, ActivePeriod, DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaPeriod,
    DashaSnapshot, MAX_DASHA_DEPTH, VIMSHOTTARI_TOTAL_YEARS, VimshottariTree,
};
pub use vimshottari::{
    VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_YEARS, full_years, sequence_index, vimshottari_snapshot,
    vimshottari_tree,
};
