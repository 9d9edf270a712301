use std::error;
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, PtrErr>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PtrErr {
    // The handle wraps the empty sentinel.
    Empty,

    // The group has other live handles. Carries the group's count.
    Shared(usize),
}

impl fmt::Display for PtrErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PtrErr::Empty => write!(f, "handle is empty"),
            PtrErr::Shared(count) => write!(f, "handle is shared by {} owners", count),
        }
    }
}

impl error::Error for PtrErr {}
