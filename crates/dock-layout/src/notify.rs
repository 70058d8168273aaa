use dock_core::ConnectionId;

use crate::PaneLayout;

pub type SubscriptionId = u64;

/// What a subscriber is told after a committed transition.
#[derive(Debug, Clone, Copy)]
pub enum LayoutEvent<'a> {
    /// The connection's layout changed; this is its new state.
    Updated(&'a PaneLayout),
    /// The connection's layout was torn down.
    Closed,
}

type Listener = Box<dyn FnMut(&LayoutEvent<'_>)>;

struct Subscription {
    id: SubscriptionId,
    connection: ConnectionId,
    listener: Listener,
}

/// Listeners keyed by connection. Invoked synchronously, in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: SubscriptionId,
    entries: Vec<Subscription>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, connection: &str, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Subscription {
            id,
            connection: connection.to_string(),
            listener,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, connection: &str, event: &LayoutEvent<'_>) {
        for sub in self.entries.iter_mut().filter(|s| s.connection == connection) {
            (sub.listener)(event);
        }
    }

    pub(crate) fn count(&self, connection: &str) -> usize {
        self.entries.iter().filter(|s| s.connection == connection).count()
    }
}
