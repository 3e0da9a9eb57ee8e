//! Data structures and algorithms
//!
//! - `branch`: Validated branch names
//! - `checkout`: Whole-commit checkout with untracked file protection
//! - `core`: Error taxonomy and the pager writer
//! - `log`: Commit graph walks (primary-parent and full ancestry)
//! - `merge`: Split point search and three-way file merging
//! - `objects`: Object types (blob, commit) and their encoding
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
