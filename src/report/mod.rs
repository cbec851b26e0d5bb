//! Report module - narrative conclusions

mod conclusions;

pub use conclusions::{build_conclusions, Conclusions};
