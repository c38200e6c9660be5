use crate::square::Square;

/// Change notification emitted by a minefield.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MinefieldEvent {
    /// A single square changed, carrying its new state.
    SquareChanged(Square),
    /// Every square should be resynchronized.
    FullRefresh,
}

impl MinefieldEvent {
    pub const fn square(&self) -> Option<&Square> {
        match self {
            Self::SquareChanged(square) => Some(square),
            Self::FullRefresh => None,
        }
    }
}

/// Anything that can receive minefield events.
pub trait EventSink {
    fn emit(&mut self, event: MinefieldEvent);
}

impl EventSink for Vec<MinefieldEvent> {
    fn emit(&mut self, event: MinefieldEvent) {
        self.push(event);
    }
}

/// Discards every event.
impl EventSink for () {
    fn emit(&mut self, _event: MinefieldEvent) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&MinefieldEvent)>;

/// Callback registry, notified in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&MinefieldEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns whether a listener was registered under `id`.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EventSink for Listeners {
    fn emit(&mut self, event: MinefieldEvent) {
        for (_, listener) in &mut self.entries {
            listener(&event);
        }
    }
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            listeners.subscribe(move |_| log.borrow_mut().push(name));
        }
        listeners.emit(MinefieldEvent::FullRefresh);

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let hits = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();

        let id = {
            let hits = Rc::clone(&hits);
            listeners.subscribe(move |_| *hits.borrow_mut() += 1)
        };
        listeners.emit(MinefieldEvent::FullRefresh);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(MinefieldEvent::FullRefresh);

        assert_eq!(*hits.borrow(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn square_accessor() {
        let square = Square::new(3);
        assert_eq!(MinefieldEvent::SquareChanged(square).square(), Some(&square));
        assert_eq!(MinefieldEvent::FullRefresh.square(), None);
    }
}
