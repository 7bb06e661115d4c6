//! The client store: current state behind a `watch` channel.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use proshop_core::UserInfo;

use crate::actions::Action;
use crate::cart::{CartItem, CartState};
use crate::reducers::{self, AppState};
use crate::resource::{Resource, Ticket};
use crate::storage::{CART_ITEMS, LocalStorage, USER_INFO};

/// Single source of truth for client state.
///
/// `dispatch` is synchronous: the state is updated and subscribers are
/// notified before it returns, in dispatch order.
pub struct Store {
    state: watch::Sender<AppState>,
    tickets: AtomicU64,
    storage: Option<LocalStorage>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            tickets: AtomicU64::new(1),
            storage: None,
        }
    }

    /// A store whose initial cart and user come from `storage`, and which
    /// persists changes back to it.
    ///
    /// Unreadable documents are logged and treated as absent.
    #[must_use]
    pub fn from_storage(storage: LocalStorage) -> Self {
        let items = storage
            .load::<Vec<CartItem>>(CART_ITEMS)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Ignoring persisted cart");
                None
            })
            .unwrap_or_default();

        let user = storage.load::<UserInfo>(USER_INFO).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Ignoring persisted user info");
            None
        });

        let initial = AppState {
            cart: CartState::new(items),
            user_login: user.map(Resource::succeeded).unwrap_or_default(),
            ..AppState::default()
        };

        Self {
            storage: Some(storage),
            ..Self::new(initial)
        }
    }

    #[must_use]
    pub const fn storage(&self) -> Option<&LocalStorage> {
        self.storage.as_ref()
    }

    /// A fresh ticket for a `Request`.
    pub fn next_ticket(&self) -> Ticket {
        Ticket::new(self.tickets.fetch_add(1, Ordering::Relaxed))
    }

    /// Run `action` through the root reducer.
    pub fn dispatch(&self, action: Action) {
        tracing::trace!(?action, "dispatch");
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = reducers::reduce(current, &action);
        });
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }
}
