//! Request lifecycle of a single remote resource.
//!
//! ```text
//! Idle ──Request──▶ Loading ──Success──▶ Succeeded(T)
//!                      │
//!                      └────Fail────▶ Failed(message)
//!
//! Succeeded | Failed ──Request──▶ Loading      any ──Reset──▶ Idle
//! ```
//!
//! Every `Request` carries a [`Ticket`] issued by the store. `Success` and
//! `Fail` are only accepted when their ticket matches the pending one, so a
//! completion that arrives after a `Reset` or a newer `Request` is dropped.

use serde::{Deserialize, Serialize};

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Where a request stands. Loading, payload and error are mutually
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

/// The four transitions every resource understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction<T> {
    Request(Ticket),
    Success(Ticket, T),
    Fail(Ticket, String),
    Reset,
}

/// A resource slice: its request state plus the ticket it is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource<T> {
    state: RequestState<T>,
    pending: Option<Ticket>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            pending: None,
        }
    }
}

impl<T> Resource<T> {
    /// A resource that already holds a value, e.g. restored from storage.
    #[must_use]
    pub const fn succeeded(value: T) -> Self {
        Self {
            state: RequestState::Succeeded(value),
            pending: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &RequestState<T> {
        &self.state
    }

    #[must_use]
    pub const fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self.state, RequestState::Succeeded(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match &self.state {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T: Clone> Resource<T> {
    /// Next state after `action`. Pure.
    #[must_use]
    pub fn reduce(self, action: &ResourceAction<T>) -> Self {
        match action {
            ResourceAction::Request(ticket) => Self {
                state: RequestState::Loading,
                pending: Some(*ticket),
            },
            ResourceAction::Success(ticket, value) if self.pending == Some(*ticket) => Self {
                state: RequestState::Succeeded(value.clone()),
                pending: None,
            },
            ResourceAction::Fail(ticket, message) if self.pending == Some(*ticket) => Self {
                state: RequestState::Failed(message.clone()),
                pending: None,
            },
            ResourceAction::Success(..) | ResourceAction::Fail(..) => self,
            ResourceAction::Reset => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T1: Ticket = Ticket::new(1);
    const T2: Ticket = Ticket::new(2);

    fn loading() -> Resource<u32> {
        Resource::default().reduce(&ResourceAction::Request(T1))
    }

    #[test]
    fn test_request_enters_loading() {
        let r = loading();
        assert!(r.is_loading());
        assert_eq!(r.pending(), Some(T1));
        assert!(r.value().is_none());
        assert!(r.error().is_none());
    }

    #[test]
    fn test_request_clears_previous_error() {
        let failed = loading().reduce(&ResourceAction::Fail(T1, "boom".into()));
        assert_eq!(failed.error(), Some("boom"));

        let retry = failed.reduce(&ResourceAction::Request(T2));
        assert_eq!(retry.state(), &RequestState::Loading);
    }

    #[test]
    fn test_success_stores_payload() {
        let r = loading().reduce(&ResourceAction::Success(T1, 7));
        assert_eq!(r.state(), &RequestState::Succeeded(7));
        assert_eq!(r.pending(), None);
    }

    #[test]
    fn test_fail_stores_message() {
        let r = loading().reduce(&ResourceAction::Fail(T1, "Product Not Found".into()));
        assert_eq!(r.state(), &RequestState::Failed("Product Not Found".into()));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let r = loading().reduce(&ResourceAction::Success(T1, 7));
        assert_eq!(r.reduce(&ResourceAction::Reset), Resource::default());
    }

    #[test]
    fn test_completion_after_reset_is_ignored() {
        let r = loading().reduce(&ResourceAction::Reset);
        let r = r.reduce(&ResourceAction::Success(T1, 7));
        assert_eq!(r.state(), &RequestState::Idle);
    }

    #[test]
    fn test_superseded_completion_is_ignored() {
        let r = loading().reduce(&ResourceAction::Request(T2));
        let r = r.reduce(&ResourceAction::Success(T1, 1));
        assert!(r.is_loading());

        let r = r.reduce(&ResourceAction::Success(T2, 2));
        assert_eq!(r.value(), Some(&2));
    }

    #[test]
    fn test_completion_without_request_is_ignored() {
        let r = Resource::default().reduce(&ResourceAction::Fail(T1, "late".into()));
        assert_eq!(r, Resource::<u32>::default());
    }
}
