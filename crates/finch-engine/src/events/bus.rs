use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`MessageBus::subscribe`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Subscriber<T>)>,
}

/// Typed, in-process publish/subscribe channel.
///
/// Cloning a bus yields another handle to the same subscriber list, so a bus
/// can be handed to producers and consumers independently.
///
/// Delivery rules:
/// - synchronous, on the publisher's thread
/// - in subscription order
/// - to the subscribers registered when `publish` was called; subscribers
///   added or removed by a callback take effect on the next publish
///
/// The internal borrow is released before callbacks run, so a callback may
/// subscribe, unsubscribe or publish on the same bus.
///
/// The bus is `!Send`; it lives on the driving thread.
pub struct MessageBus<T> {
    inner: Rc<RefCell<Subscribers<T>>>,
}

impl<T> MessageBus<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Subscribers {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers `callback` and returns its subscription handle.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let mut subs = self.inner.borrow_mut();
        let id = SubscriptionId(subs.next_id);
        subs.next_id += 1;
        subs.entries.push((id, Rc::new(callback)));
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.inner.borrow_mut();
        let before = subs.entries.len();
        subs.entries.retain(|(sid, _)| *sid != id);
        subs.entries.len() != before
    }

    /// Delivers `event` to every current subscriber.
    pub fn publish(&self, event: T) {
        let snapshot: Vec<Subscriber<T>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();

        for cb in snapshot {
            cb(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Drops all subscriptions.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl<T> Clone for MessageBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for MessageBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MessageBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBus")
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&u32)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let make = move |tag: &str| -> Box<dyn Fn(&u32)> {
            let l = Rc::clone(&l);
            let tag = tag.to_string();
            Box::new(move |v: &u32| l.borrow_mut().push(format!("{tag}:{v}")))
        };
        (log, make)
    }

    // ── delivery ──────────────────────────────────────────────────────────

    #[test]
    fn delivers_in_subscription_order() {
        let bus = MessageBus::<u32>::new();
        let (log, make) = recorder();

        bus.subscribe(make("a"));
        bus.subscribe(make("b"));
        bus.subscribe(make("c"));
        bus.publish(7);

        assert_eq!(*log.borrow(), vec!["a:7", "b:7", "c:7"]);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = MessageBus::<u32>::new();
        bus.publish(1);
        assert!(bus.is_empty());
    }

    #[test]
    fn clones_share_subscribers() {
        let bus = MessageBus::<u32>::new();
        let producer = bus.clone();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        bus.subscribe(move |_| h.set(h.get() + 1));

        producer.publish(1);
        producer.publish(2);
        assert_eq!(hits.get(), 2);
        assert_eq!(producer.len(), 1);
    }

    // ── unsubscribe ───────────────────────────────────────────────────────

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = MessageBus::<u32>::new();
        let (log, make) = recorder();

        let a = bus.subscribe(make("a"));
        bus.subscribe(make("b"));
        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));

        bus.publish(1);
        assert_eq!(*log.borrow(), vec!["b:1"]);
    }

    #[test]
    fn clear_drops_everything() {
        let bus = MessageBus::<u32>::new();
        bus.subscribe(|_| {});
        bus.subscribe(|_| {});
        bus.clear();
        assert_eq!(bus.len(), 0);
    }

    // ── snapshot semantics ────────────────────────────────────────────────

    #[test]
    fn subscriber_added_during_delivery_waits_for_next_publish() {
        let bus = MessageBus::<u32>::new();
        let (log, make) = recorder();
        let make = Rc::new(make);

        let inner_bus = bus.clone();
        let inner_make = Rc::clone(&make);
        let added = Rc::new(Cell::new(false));
        let added_flag = Rc::clone(&added);
        bus.subscribe(move |_| {
            if !added_flag.get() {
                added_flag.set(true);
                inner_bus.subscribe(inner_make("late"));
            }
        });
        bus.subscribe(make("early"));

        bus.publish(1);
        assert_eq!(*log.borrow(), vec!["early:1"]);

        bus.publish(2);
        assert_eq!(*log.borrow(), vec!["early:1", "early:2", "late:2"]);
    }

    #[test]
    fn subscriber_removed_during_delivery_still_receives_that_event() {
        let bus = MessageBus::<u32>::new();
        let (log, make) = recorder();

        let victim = Rc::new(Cell::new(None));
        let inner_bus = bus.clone();
        let v = Rc::clone(&victim);
        bus.subscribe(move |_| {
            if let Some(id) = v.get() {
                inner_bus.unsubscribe(id);
            }
        });
        victim.set(Some(bus.subscribe(make("victim"))));

        bus.publish(1);
        bus.publish(2);
        assert_eq!(*log.borrow(), vec!["victim:1"]);
    }

    #[test]
    fn nested_publish_does_not_panic() {
        let bus = MessageBus::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = bus.clone();
        let s = Rc::clone(&seen);
        bus.subscribe(move |v| {
            s.borrow_mut().push(*v);
            if *v > 0 {
                inner_bus.publish(v - 1);
            }
        });

        bus.publish(3);
        assert_eq!(*seen.borrow(), vec![3, 2, 1, 0]);
    }
}
