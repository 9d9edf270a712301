mod handle;
mod result;

#[cfg(test)]
mod fixtures;

pub use self::handle::Ptr;
pub use self::result::{PtrErr, Result};
