//! Property-based tests for arcdex
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `economy_props`: Economic calculator
//!   - Favorability always agrees with the sign convention of its figure
//!   - Craft cost is additive over ingredients
//!   - Stash delta is rounded to two decimals
//!
//! - `search_props`: Search engine
//!   - Every hit contains the query, case-insensitively
//!   - Results are sorted by lowercased name
//!   - Searching is deterministic
//!
//! - `schedule_props`: Event scheduler
//!   - Each event name appears at most once
//!   - Offsets are within the 24 hour rotation and groups ascend
//!
//! - `cache_props`: Record cache
//!   - A cache is valid exactly when no source file is newer
//!   - Floats survive a write/read cycle bit for bit
//!
//! By default proptest runs 256 cases per property; override with
//! `PROPTEST_CASES`.

mod economy_props;
mod schedule_props;
mod search_props;
