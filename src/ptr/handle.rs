use std::fmt;
use std::hint;
use std::ops::Deref;
use std::ptr;
use std::rc::Rc;

use super::result::{PtrErr, Result};

// A non-atomic reference-counted handle to a heap-allocated T.
//
// Every handle copied from the same source belongs to one group. The group is
// a single Rc allocation holding the (possibly empty) boxed object, and the Rc
// strong count is the group's counter. Rc is neither Send nor Sync, so a group
// can never be touched from two threads.
//
// The object is released exactly once, when the last handle in the group is
// dropped.
pub struct Ptr<T> {
    group: Rc<Option<Box<T>>>,
}

impl<T> Ptr<T> {
    pub fn new(value: T) -> Ptr<T> {
        Ptr::from(Box::new(value))
    }

    // An empty handle still has a private group with a count of 1.
    pub fn empty() -> Ptr<T> {
        trace!("construct empty");
        Ptr {
            group: Rc::new(None),
        }
    }

    /// Takes ownership of `raw`, which may be null.
    ///
    /// # Safety
    ///
    /// A non-null `raw` must come from `Box::into_raw` and must not be owned by
    /// any other live handle. Wrapping the same address twice releases it twice.
    pub unsafe fn from_raw(raw: *mut T) -> Ptr<T> {
        if raw.is_null() {
            Ptr::empty()
        } else {
            Ptr::from(Box::from_raw(raw))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_none()
    }

    // Number of live handles in this handle's group.
    pub fn use_count(&self) -> usize {
        Rc::strong_count(&self.group)
    }

    // Address of the owned object, or null for an empty handle.
    pub fn as_ptr(&self) -> *const T {
        match *self.group {
            Some(ref obj) => &**obj as *const T,
            None => ptr::null(),
        }
    }

    // True if both handles share one counter. Unlike `==`, two empty handles
    // from different groups are not ptr_eq.
    pub fn ptr_eq(this: &Ptr<T>, other: &Ptr<T>) -> bool {
        Rc::ptr_eq(&this.group, &other.group)
    }

    pub fn get(&self) -> Option<&T> {
        match *self.group {
            Some(ref obj) => Some(&**obj),
            None => None,
        }
    }

    /// Borrows the object without checking for the empty sentinel.
    ///
    /// # Safety
    ///
    /// The handle must not be empty.
    pub unsafe fn get_unchecked(&self) -> &T {
        match *self.group {
            Some(ref obj) => &**obj,
            None => hint::unreachable_unchecked(),
        }
    }

    // Mutable access is only handed out to the sole owner of a non-empty group.
    pub fn get_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(PtrErr::Empty);
        }

        let count = self.use_count();
        match Rc::get_mut(&mut self.group) {
            Some(Some(obj)) => Ok(&mut **obj),
            Some(None) => Err(PtrErr::Empty),
            None => Err(PtrErr::Shared(count)),
        }
    }

    // Leaves this handle's group and joins `other`'s.
    //
    // Assigning within a group is a no-op. So is assigning one empty handle to
    // another: there is no object to share, and each keeps its own counter.
    pub fn assign(&mut self, other: &Ptr<T>) {
        if Ptr::ptr_eq(self, other) || (self.is_empty() && other.is_empty()) {
            trace!("assign {:p}: already shared", self.as_ptr());
            return;
        }

        trace!("assign {:p} <- {:p}", self.as_ptr(), other.as_ptr());
        // Dropping the old value leaves the old group.
        *self = other.clone();
    }
}

impl<T> From<Box<T>> for Ptr<T> {
    fn from(obj: Box<T>) -> Ptr<T> {
        trace!("construct {:p}", &*obj as *const T);
        Ptr {
            group: Rc::new(Some(obj)),
        }
    }
}

impl<T> Default for Ptr<T> {
    fn default() -> Ptr<T> {
        Ptr::empty()
    }
}

impl<T> Clone for Ptr<T> {
    fn clone(&self) -> Ptr<T> {
        trace!("copy {:p}", self.as_ptr());
        Ptr {
            group: Rc::clone(&self.group),
        }
    }

    fn clone_from(&mut self, source: &Ptr<T>) {
        self.assign(source)
    }
}

// Only here for tracing. Having a Drop impl means T must strictly outlive the
// handle under drop check, which a bare Rc would not require.
impl<T> Drop for Ptr<T> {
    fn drop(&mut self) {
        let count = self.use_count();
        trace!("destroy {:p} (count {})", self.as_ptr(), count);
        if count == 1 {
            debug!("release {:p}", self.as_ptr());
        }
    }
}

impl<T> Deref for Ptr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Some(obj) => obj,
            None => panic!("Dereferenced an empty Ptr."),
        }
    }
}

// Identity of the owned object. Groups are compared rather than addresses,
// since every zero-sized T shares one dangling address. All empty handles wrap
// the same sentinel and compare equal.
impl<T> PartialEq for Ptr<T> {
    fn eq(&self, other: &Ptr<T>) -> bool {
        Ptr::ptr_eq(self, other) || (self.is_empty() && other.is_empty())
    }
}

impl<T> Eq for Ptr<T> {}

impl<T> fmt::Debug for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ptr")
            .field("addr", &self.as_ptr())
            .field("count", &self.use_count())
            .finish()
    }
}

impl<T> fmt::Pointer for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}
