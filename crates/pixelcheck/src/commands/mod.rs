mod compare;
mod init;
mod max_diff;

pub use self::compare::{compare, compare_dir};
pub use self::init::init;
pub use self::max_diff::max_diff;
