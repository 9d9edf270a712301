#[macro_use]
extern crate log;
extern crate rcptr;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rcptr::{Ptr, PtrErr, Result};

// Flips `released` when dropped, so the demos can report leaks.
struct Marker {
    name: &'static str,
    released: Rc<Cell<bool>>,
}

impl Marker {
    fn new(name: &'static str) -> (Marker, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        let marker = Marker {
            name,
            released: released.clone(),
        };
        (marker, released)
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        info!("~{}", self.name);
        self.released.set(true);
    }
}

fn report(name: &str, released: &Cell<bool>) {
    if released.get() {
        println!("{}: released", name);
    } else {
        println!("{}: leaked", name);
    }
}

struct Node {
    _marker: Marker,
    next: RefCell<Ptr<Node>>,
}

// A shared integer, then a node that points at itself.
fn run_self_cycle() -> Result<()> {
    let n_released;
    {
        info!("declaration of p");
        let p = Ptr::new(5);
        info!("declaration of q");
        let mut q: Ptr<i32> = Ptr::empty();
        info!("assignment of q");
        q.assign(&p);
        info!("dereferencing q");
        println!("{}", q.get().ok_or(PtrErr::Empty)?);

        info!("declaration of n");
        let (marker, released) = Marker::new("Node");
        n_released = released;
        let n = Ptr::new(Node {
            _marker: marker,
            next: RefCell::new(Ptr::empty()),
        });
        info!("assignment of n.next");
        n.next.borrow_mut().assign(&n);
        info!("return");
    }
    report("n", &n_released);
    Ok(())
}

struct A {
    _marker: Marker,
    b: RefCell<Ptr<B>>,
}

struct B {
    _marker: Marker,
    a: RefCell<Ptr<A>>,
}

// A and B point at each other, then A lets go of B before scope exit.
fn run_broken_cycle() -> Result<()> {
    let a_released;
    let b_released;
    {
        let pn = Ptr::<B>::empty();

        let (marker, released) = Marker::new("B");
        b_released = released;
        let pb = Ptr::new(B {
            _marker: marker,
            a: RefCell::new(Ptr::empty()),
        });

        let (marker, released) = Marker::new("A");
        a_released = released;
        let pa = Ptr::new(A {
            _marker: marker,
            b: RefCell::new(pb.clone()),
        });

        pb.a.borrow_mut().assign(&pa);
        debug!("pa {:?}, pb {:?}", pa, pb);

        pa.b.borrow_mut().assign(&pn);
        debug!("pa {:?}, pb {:?}", pa, pb);
    }
    report("A", &a_released);
    report("B", &b_released);
    Ok(())
}

fn run() -> Result<()> {
    run_self_cycle()?;
    run_broken_cycle()
}

fn main() {
    env_logger::init();

    match run() {
        Ok(_) => (),
        Err(e) => println!("Error: {:?}", e),
    }
}
