pub mod lighting;
pub mod raycast;
pub mod render;
#[cfg(feature = "vectors")]
pub mod vector;
