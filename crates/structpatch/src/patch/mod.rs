//! Patch sets: generation from change records and replay against values.
//!
//! # Operations
//!
//! Only `add`, `replace` and `remove` exist. Every generation call produces a
//! forward sequence and an inverse sequence; replaying the inverse after the
//! forward one restores the starting value.

pub mod types;
pub mod generate;
pub mod apply;
pub mod codec;

pub use types::{ApplyPatchOptions, Patch, PatchError, PatchOp};
pub use generate::generate_patches;
pub use apply::{apply_patch, apply_patches};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
