pub mod reconcile;
pub mod sync_core;
pub mod tree;
