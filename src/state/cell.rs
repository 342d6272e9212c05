use std::cell::{Cell, RefCell};

/// Handle returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SubscriptionId(u64);

type Observer<T> = Box<dyn FnMut(&T)>;

/// A single-threaded value cell that notifies observers when it changes.
///
/// Observers run synchronously inside [`set`](Observable::set). An observer
/// may write to the cell it is watching; that write is applied at once and
/// observers see it in a follow-up round after the current one finishes.
pub(crate) struct Observable<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<(SubscriptionId, Observer<T>)>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
    cancelled: RefCell<Vec<SubscriptionId>>,
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            notifying: Cell::new(false),
            dirty: Cell::new(false),
            cancelled: RefCell::new(Vec::new()),
        }
    }

    /// Borrow the current value without cloning it
    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        if self.notifying.get() {
            self.cancelled.borrow_mut().push(id);
        }
        self.observers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    pub(crate) fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value; observers run only if it actually changed
    pub(crate) fn set(&self, value: T) {
        if *self.value.borrow() == value {
            return;
        }
        *self.value.borrow_mut() = value;
        self.notify();
    }

    pub(crate) fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = self.with(f);
        self.set(next);
    }

    /// Register `observer`; it is called right away with the current value.
    pub(crate) fn subscribe(&self, mut observer: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let current = self.get();
        observer(&current);
        self.observers.borrow_mut().push((id, Box::new(observer)));
        id
    }

    fn notify(&self) {
        if self.notifying.get() {
            self.dirty.set(true);
            return;
        }
        self.notifying.set(true);
        loop {
            self.dirty.set(false);
            let snapshot = self.get();
            let mut round = std::mem::take(&mut *self.observers.borrow_mut());
            for (_, observer) in round.iter_mut() {
                observer(&snapshot);
            }
            {
                let mut observers = self.observers.borrow_mut();
                // anything subscribed mid-round landed in the emptied list
                round.append(&mut observers);
                let mut cancelled = self.cancelled.borrow_mut();
                round.retain(|(id, _)| !cancelled.contains(id));
                cancelled.clear();
                *observers = round;
            }
            if !self.dirty.get() {
                break;
            }
        }
        self.notifying.set(false);
    }
}
