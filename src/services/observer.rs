//! Latest-value observables with synchronous callbacks.

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber callback; receives the new value.
pub type Callback<T> = Box<dyn FnMut(&T) + 'static>;

/// Holds the most recent value and pushes every change to subscribers,
/// in subscription order, before `set` returns. No history is kept.
pub struct Observable<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    /// Creates an observable holding `value`.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Registers `callback`. It is invoked immediately with the current
    /// value, then on every change.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        callback(&self.value);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        before != self.subscribers.len()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Stores `value` and notifies every subscriber.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for (_, callback) in &mut self.subscribers {
            callback(&self.value);
        }
    }
}

impl<T: PartialEq> Observable<T> {
    /// Stores and notifies only if `value` differs from the current one.
    pub fn set_if_changed(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.set(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn test_subscribe_receives_current_value() {
        let mut obs = Observable::new(1);
        let (seen, callback) = recorder();
        obs.subscribe(callback);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_set_notifies_synchronously() {
        let mut obs = Observable::new(0);
        let (seen, callback) = recorder();
        obs.subscribe(callback);

        obs.set(5);
        obs.set(5);
        assert_eq!(*seen.borrow(), vec![0, 5, 5]);
        assert_eq!(*obs.get(), 5);
    }

    #[test]
    fn test_set_if_changed() {
        let mut obs = Observable::new("a".to_string());
        let (seen, callback) = recorder();
        obs.subscribe(callback);

        assert!(!obs.set_if_changed("a".to_string()));
        assert!(obs.set_if_changed("b".to_string()));
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut obs = Observable::new(0);
        let (seen, callback) = recorder();
        let id = obs.subscribe(callback);
        let (_, other) = recorder::<i32>();
        obs.subscribe(other);

        assert!(obs.unsubscribe(id));
        assert!(!obs.unsubscribe(id));
        assert_eq!(obs.subscriber_count(), 1);

        obs.set(1);
        assert_eq!(*seen.borrow(), vec![0]);
    }
}
