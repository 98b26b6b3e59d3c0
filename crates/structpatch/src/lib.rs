//! structpatch: patch sets between snapshots of structured values.
//!
//! Given the bookkeeping a draft tracker keeps for each container it touched
//! (a [`ChangeRecord`]), [`generate_patches`] emits the forward patches and
//! their exact inverse. [`apply_patches`] replays either sequence against a
//! compatible value.
//!
//! ```
//! use structpatch::{apply_patches, generate_patches, ChangeRecord, Value};
//!
//! let base = Value::array([1, 2, 3]);
//! let copy = Value::array([1, 2, 3, 4]);
//! let record = ChangeRecord::new(base.clone(), copy.clone()).assign(3usize);
//!
//! let (mut patches, mut inverse) = (Vec::new(), Vec::new());
//! generate_patches(&record, &[], &mut patches, &mut inverse);
//!
//! let mut doc = base.clone();
//! apply_patches(&mut doc, &patches).unwrap();
//! assert_eq!(doc, copy);
//! apply_patches(&mut doc, &inverse).unwrap();
//! assert_eq!(doc, base);
//! ```

pub mod value;
pub mod clone;
pub mod change;
pub mod patch;
pub mod cli;

pub use change::{AssignedKeys, ChangeRecord, TouchState};
pub use clone::deep_clone;
pub use patch::{
    apply_patch, apply_patches, generate_patches, ApplyPatchOptions, Patch, PatchError, PatchOp,
};
pub use structpatch_pointer::{Path, PathStep};
pub use value::{ContainerKind, Value};
