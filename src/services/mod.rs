pub mod zsync;

pub use zsync::{ZSYNC_BLOCK_ALIGNMENT, rsum06};
