//! Change notification channels.
//!
//! Three independent channels carry board, turn and end-of-game updates.
//! A new listener is called once right away with the channel's current
//! value, then again on every change, in subscription order.
//!
//! Delivery is synchronous. Listeners may unsubscribe themselves or others
//! while a notification is in flight: the in-flight delivery works from a
//! snapshot of the list and re-checks membership before each call, so a
//! removed listener is never called again and no remaining listener is
//! skipped or called twice.

use crate::error::EngineError;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, instrument, trace, warn};

/// A notification channel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Channel {
    /// Board contents changed.
    #[strum(serialize = "onBoardChanged")]
    BoardChanged,
    /// The player to move changed.
    #[strum(serialize = "onPlayerChanged")]
    PlayerChanged,
    /// The game reached a terminal state.
    #[strum(serialize = "onGameEnded")]
    GameEnded,
}

/// Payload of [`Channel::PlayerChanged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTurn<M> {
    /// Player now to move.
    pub player: PlayerId,
    /// That player's marker.
    pub marker: M,
}

/// Payload of [`Channel::GameEnded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnd<M> {
    /// True once the game is over.
    pub ended: bool,
    /// Winning player; `None` while running or after a draw.
    pub winner: Option<PlayerId>,
    /// Winning player's marker.
    pub marker: Option<M>,
}

/// Listener for [`Channel::BoardChanged`]; receives the rendered board.
pub type BoardListener<M> = Box<dyn FnMut(&[Option<M>])>;
/// Listener for [`Channel::PlayerChanged`].
pub type PlayerListener<M> = Box<dyn FnMut(&PlayerTurn<M>)>;
/// Listener for [`Channel::GameEnded`].
pub type GameEndListener<M> = Box<dyn FnMut(&GameEnd<M>)>;

/// A listener of any channel, for the dynamic subscription path.
pub enum Listener<M> {
    /// Board listener.
    Board(BoardListener<M>),
    /// Turn listener.
    Player(PlayerListener<M>),
    /// End-of-game listener.
    GameEnd(GameEndListener<M>),
}

impl<M> Listener<M> {
    /// Channel whose payload this listener accepts.
    pub fn channel(&self) -> Channel {
        match self {
            Listener::Board(_) => Channel::BoardChanged,
            Listener::Player(_) => Channel::PlayerChanged,
            Listener::GameEnd(_) => Channel::GameEnded,
        }
    }
}

impl<M> std::fmt::Debug for Listener<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.channel())
    }
}

/// Identifier of one subscription, unique within an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct SubscriptionId(u64);

type Shared<P> = Rc<RefCell<Box<dyn FnMut(&P)>>>;

/// Subscribers of one channel, in subscription order.
struct ListenerList<P: ?Sized> {
    entries: Vec<(SubscriptionId, Shared<P>)>,
}

impl<P: ?Sized> ListenerList<P> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, id: SubscriptionId, callback: Box<dyn FnMut(&P)>) -> Shared<P> {
        let shared = Rc::new(RefCell::new(callback));
        self.entries.push((id, Rc::clone(&shared)));
        shared
    }

    fn remove(&mut self, id: SubscriptionId) -> Option<Shared<P>> {
        let position = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(position).1)
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    fn snapshot(&self) -> Vec<(SubscriptionId, Shared<P>)> {
        self.entries
            .iter()
            .map(|(id, shared)| (*id, Rc::clone(shared)))
            .collect()
    }
}

/// Per-engine listener storage. Never handed out to callers.
pub(crate) struct Registry<M> {
    next_id: u64,
    board: ListenerList<[Option<M>]>,
    player: ListenerList<PlayerTurn<M>>,
    ended: ListenerList<GameEnd<M>>,
}

impl<M> Registry<M> {
    fn new() -> Self {
        Self {
            next_id: 0,
            board: ListenerList::new(),
            player: ListenerList::new(),
            ended: ListenerList::new(),
        }
    }

    fn allocate(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    fn contains(&self, channel: Channel, id: SubscriptionId) -> bool {
        match channel {
            Channel::BoardChanged => self.board.contains(id),
            Channel::PlayerChanged => self.player.contains(id),
            Channel::GameEnded => self.ended.contains(id),
        }
    }

    fn len(&self, channel: Channel) -> usize {
        match channel {
            Channel::BoardChanged => self.board.entries.len(),
            Channel::PlayerChanged => self.player.entries.len(),
            Channel::GameEnded => self.ended.entries.len(),
        }
    }
}

/// Type-erased removal so handles need not know the marker type.
trait Unsubscribe {
    fn remove(&self, channel: Channel, id: SubscriptionId) -> bool;
    fn contains(&self, channel: Channel, id: SubscriptionId) -> bool;
}

impl<M> Unsubscribe for RefCell<Registry<M>> {
    fn remove(&self, channel: Channel, id: SubscriptionId) -> bool {
        // The listener is dropped only after the borrow ends, so its
        // captures may touch other handles from their destructors.
        let mut registry = self.borrow_mut();
        match channel {
            Channel::BoardChanged => {
                let taken = registry.board.remove(id);
                drop(registry);
                taken.is_some()
            }
            Channel::PlayerChanged => {
                let taken = registry.player.remove(id);
                drop(registry);
                taken.is_some()
            }
            Channel::GameEnded => {
                let taken = registry.ended.remove(id);
                drop(registry);
                taken.is_some()
            }
        }
    }

    fn contains(&self, channel: Channel, id: SubscriptionId) -> bool {
        self.borrow().contains(channel, id)
    }
}

/// Handle returned by every subscription.
///
/// Dropping the handle leaves the listener subscribed; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
#[derive(Clone)]
pub struct Subscription {
    channel: Channel,
    id: SubscriptionId,
    registry: Weak<dyn Unsubscribe>,
}

impl Subscription {
    /// Channel this handle belongs to.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Identifier of the subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Removes the listener from the channel it was added to.
    ///
    /// Safe to call any number of times, from inside a listener, or after
    /// the engine is gone. Returns true only on the call that removed it.
    #[instrument(skip(self), fields(channel = %self.channel, id = %self.id))]
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.remove(self.channel, self.id);
        if removed {
            debug!("Listener removed");
        }
        removed
    }

    /// True while the listener is still subscribed.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.channel, self.id))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}

/// Publishes engine changes to subscribed listeners.
pub(crate) struct Notifier<M> {
    registry: Rc<RefCell<Registry<M>>>,
}

impl<M: 'static> Notifier<M> {
    pub(crate) fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    fn handle(&self, channel: Channel, id: SubscriptionId) -> Subscription {
        let registry: Rc<dyn Unsubscribe> = self.registry.clone();
        Subscription {
            channel,
            id,
            registry: Rc::downgrade(&registry),
        }
    }

    /// Number of listeners on `channel`.
    pub(crate) fn listener_count(&self, channel: Channel) -> usize {
        self.registry.borrow().len(channel)
    }

    pub(crate) fn add_board(&self, listener: BoardListener<M>, current: &[Option<M>]) -> Subscription {
        let (id, shared) = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.allocate();
            (id, registry.board.push(id, listener))
        };
        debug!(channel = %Channel::BoardChanged, %id, "Listener added");
        invoke(&shared, current);
        self.handle(Channel::BoardChanged, id)
    }

    pub(crate) fn add_player(&self, listener: PlayerListener<M>, current: &PlayerTurn<M>) -> Subscription {
        let (id, shared) = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.allocate();
            (id, registry.player.push(id, listener))
        };
        debug!(channel = %Channel::PlayerChanged, %id, "Listener added");
        invoke(&shared, current);
        self.handle(Channel::PlayerChanged, id)
    }

    pub(crate) fn add_game_end(&self, listener: GameEndListener<M>, current: &GameEnd<M>) -> Subscription {
        let (id, shared) = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.allocate();
            (id, registry.ended.push(id, listener))
        };
        debug!(channel = %Channel::GameEnded, %id, "Listener added");
        invoke(&shared, current);
        self.handle(Channel::GameEnded, id)
    }

    pub(crate) fn board_changed(&self, board: &[Option<M>]) {
        let listeners = self.registry.borrow().board.snapshot();
        self.deliver(Channel::BoardChanged, listeners, board);
    }

    pub(crate) fn player_changed(&self, turn: &PlayerTurn<M>) {
        let listeners = self.registry.borrow().player.snapshot();
        self.deliver(Channel::PlayerChanged, listeners, turn);
    }

    pub(crate) fn game_ended(&self, end: &GameEnd<M>) {
        let listeners = self.registry.borrow().ended.snapshot();
        self.deliver(Channel::GameEnded, listeners, end);
    }

    fn deliver<P: ?Sized>(
        &self,
        channel: Channel,
        listeners: Vec<(SubscriptionId, Shared<P>)>,
        payload: &P,
    ) {
        trace!(%channel, count = listeners.len(), "Notifying listeners");
        for (id, shared) in listeners {
            // Removed by an earlier listener in this same delivery.
            if !self.registry.borrow().contains(channel, id) {
                continue;
            }
            match shared.try_borrow_mut() {
                Ok(mut callback) => (*callback)(payload),
                Err(_) => warn!(%channel, %id, "Listener re-entered its own channel, skipped"),
            }
        }
    }
}

fn invoke<P: ?Sized>(shared: &Shared<P>, payload: &P) {
    let mut callback = shared.borrow_mut();
    (*callback)(payload);
}

/// Wraps a [`Listener`] channel mismatch as an error.
pub(crate) fn check_listener<M>(channel: Channel, listener: &Listener<M>) -> Result<(), EngineError> {
    if listener.channel() == channel {
        Ok(())
    } else {
        Err(EngineError::invalid_subscription(format!(
            "{} listener cannot subscribe to {}",
            listener.channel(),
            channel
        )))
    }
}
