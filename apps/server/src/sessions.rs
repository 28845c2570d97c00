use connector_booking::BookingWidget;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// One visitor's pass through the booking flow.
#[derive(Debug)]
struct Session {
    widget: BookingWidget,
    last_seen: Instant,
}

/// In-memory booking sessions keyed by id.
///
/// Sessions live only as long as the process; each request locks a single
/// entry while it applies its transition.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Store a freshly entered widget and return its id.
    pub fn insert(&self, widget: BookingWidget) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            Session {
                widget,
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Run `f` against the session's widget, refreshing its idle timer.
    ///
    /// Returns `None` for unknown (or already evicted) ids.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut BookingWidget) -> R) -> Option<R> {
        let mut entry = self.sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(f(&mut entry.widget))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were evicted.
    pub fn evict_idle(&self) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, session| {
            let live = session.last_seen.elapsed() < self.ttl;
            if !live {
                evicted += 1;
            }
            live
        });
        evicted
    }
}
