#[macro_use]
extern crate log;

mod ptr;

pub use ptr::Ptr;
pub use ptr::Result;
pub use ptr::PtrErr;
