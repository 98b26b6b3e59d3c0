//! Patch codecs.

pub mod json;
