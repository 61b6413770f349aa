//! Observable values
//!
//! A [`Tracked`] owns one value and an ordered list of listeners. Fields are
//! written through [`Tracked::set`] with a [`Lens`] naming the field; the
//! listeners run synchronously, in subscription order, only when the stored
//! value actually changes.

use std::fmt;
use std::hash::Hash;

/// A value whose fields can be observed individually
pub trait Observable {
    /// Key naming one field of the value
    type Field: Copy + Eq + Hash + fmt::Debug + 'static;
}

/// Field key plus accessor for one field of `D`
pub struct Lens<D: Observable, T> {
    field: D::Field,
    access: fn(&mut D) -> &mut T,
}

impl<D: Observable, T> Lens<D, T> {
    pub const fn new(field: D::Field, access: fn(&mut D) -> &mut T) -> Self {
        Self { field, access }
    }

    pub fn field(&self) -> D::Field {
        self.field
    }
}

impl<D: Observable, T> Clone for Lens<D, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Observable, T> Copy for Lens<D, T> {}

impl<D: Observable, T> fmt::Debug for Lens<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lens").field(&self.field).finish()
    }
}

/// Change callback: full new value plus the field that changed
pub type Listener<D> = Box<dyn FnMut(&D, <D as Observable>::Field)>;

/// Handle returned by [`Tracked::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Value wrapper that notifies listeners on real changes
pub struct Tracked<D: Observable> {
    data: D,
    listeners: Vec<(ListenerId, Listener<D>)>,
    next_id: u64,
}

impl<D: Observable> Tracked<D> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current value
    #[inline]
    pub fn value(&self) -> &D {
        &self.data
    }

    /// Write one field. Returns `true` if the value changed (and listeners ran).
    ///
    /// Values are compared with `PartialEq`, so writing `NaN` into a float
    /// field always counts as a change.
    pub fn set<T: PartialEq>(&mut self, lens: Lens<D, T>, value: T) -> bool {
        let slot = (lens.access)(&mut self.data);
        if *slot == value {
            return false;
        }
        *slot = value;

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.data, lens.field);
        }
        true
    }

    /// Append a listener; it runs after every listener already registered.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&D, D::Field) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Replace every listener with `listener` (or none).
    pub fn set_listener<F>(&mut self, listener: Option<F>) -> Option<ListenerId>
    where
        F: FnMut(&D, D::Field) + 'static,
    {
        self.listeners.clear();
        listener.map(|l| self.subscribe(l))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<D: Observable + fmt::Debug> fmt::Debug for Tracked<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("data", &self.data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Probe {
        level: f32,
        wet: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum ProbeField {
        Level,
        Wet,
    }

    impl Observable for Probe {
        type Field = ProbeField;
    }

    fn level(p: &mut Probe) -> &mut f32 {
        &mut p.level
    }

    fn wet(p: &mut Probe) -> &mut bool {
        &mut p.wet
    }

    const LEVEL: Lens<Probe, f32> = Lens::new(ProbeField::Level, level);
    const WET: Lens<Probe, bool> = Lens::new(ProbeField::Wet, wet);

    type Log = Rc<RefCell<Vec<(Probe, ProbeField)>>>;

    fn tracked_with_log() -> (Tracked<Probe>, Log) {
        let mut tracked = Tracked::new(Probe {
            level: 1.0,
            wet: false,
        });
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        tracked.subscribe(move |value: &Probe, field| sink.borrow_mut().push((value.clone(), field)));
        (tracked, log)
    }

    #[test]
    fn test_same_value_write_is_silent() {
        let (mut tracked, log) = tracked_with_log();
        assert!(!tracked.set(LEVEL, 1.0));
        assert!(!tracked.set(WET, false));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_change_notifies_once_with_full_value() {
        let (mut tracked, log) = tracked_with_log();
        assert!(tracked.set(WET, true));

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0],
            (
                Probe {
                    level: 1.0,
                    wet: true
                },
                ProbeField::Wet
            )
        );
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let mut tracked = Tracked::new(Probe {
            level: 0.0,
            wet: false,
        });
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["renderer", "logger"] {
            let order = Rc::clone(&order);
            tracked.subscribe(move |_: &Probe, _| order.borrow_mut().push(tag));
        }

        tracked.set(LEVEL, -2.5);
        assert_eq!(*order.borrow(), vec!["renderer", "logger"]);
    }

    #[test]
    fn test_unsubscribe_and_replace() {
        let (mut tracked, log) = tracked_with_log();
        let extra = tracked.subscribe(|_: &Probe, _| {});
        assert_eq!(tracked.listener_count(), 2);
        assert!(tracked.unsubscribe(extra));
        assert!(!tracked.unsubscribe(extra));

        let replaced = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&replaced);
        tracked.set_listener(Some(move |_: &Probe, _| *counter.borrow_mut() += 1));
        assert_eq!(tracked.listener_count(), 1);

        tracked.set(LEVEL, 3.0);
        assert!(log.borrow().is_empty());
        assert_eq!(*replaced.borrow(), 1);

        tracked.set_listener(None::<fn(&Probe, ProbeField)>);
        assert_eq!(tracked.listener_count(), 0);
        assert!(tracked.set(LEVEL, 4.0));
    }

    #[test]
    fn test_nan_always_counts_as_change() {
        let (mut tracked, log) = tracked_with_log();
        assert!(tracked.set(LEVEL, f32::NAN));
        assert!(tracked.set(LEVEL, f32::NAN));
        assert_eq!(log.borrow().len(), 2);
    }
}
