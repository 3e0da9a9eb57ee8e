//! Command implementations
//!
//! Every user operation is an `impl Repository` block under `porcelain`.
//! Commands load the persistent state they need, validate their
//! preconditions, then mutate the repository and report through the
//! repository writer.

pub mod porcelain;
