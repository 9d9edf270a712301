use std::cell::Cell;
use std::rc::Rc;

// Counts how many Tracked payloads it handed out have been dropped.
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter {
            drops: Rc::new(Cell::new(0)),
        }
    }

    pub fn track(&self, value: i32) -> Tracked {
        Tracked {
            value,
            drops: self.drops.clone(),
        }
    }

    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

pub struct Tracked {
    pub value: i32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
