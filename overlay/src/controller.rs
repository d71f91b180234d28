use metrics::counter;
use tokio::sync::broadcast;

use crate::errors::OverlayError;
use crate::events::{CloseReason, InputEvent, PopupEvent};
use crate::geometry::{anchor_below_left, Anchor, Point};
use crate::listeners::{ListenerKind, ListenerRegistry, Subscription};
use crate::metrics_consts::{
    POPUP_CLOSED_COUNTER, POPUP_OPENED_COUNTER, POPUP_POSITIONING_ERROR_COUNTER,
};

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

/// Where the popup goes relative to the bottom-left corner of its trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayOptions {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 8.0,
        }
    }
}

/// The rendered popup: its placement plus whatever the view layer hosts in it.
#[derive(Debug)]
pub struct Surface<C> {
    id: SurfaceId,
    position: Point,
    content: C,
}

impl<C> Surface<C> {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupStatus {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    Unchanged,
}

#[derive(Debug)]
struct OpenPopup<C> {
    surface: Surface<C>,
    // Held only so that dropping the popup unregisters both listeners
    _listeners: [Subscription; 2],
}

#[derive(Debug)]
enum PopupState<C> {
    Closed,
    Open(OpenPopup<C>),
}

/// Owns at most one popup surface anchored to a trigger element.
///
/// Opening acquires a backdrop-click and an escape-key listener; every way of
/// closing (explicit, backdrop, escape) goes through the same teardown, which
/// drops the surface and both listener handles and notifies observers once.
#[derive(Debug)]
pub struct PopupController<C> {
    state: PopupState<C>,
    listeners: ListenerRegistry,
    events: broadcast::Sender<PopupEvent>,
    options: OverlayOptions,
    next_surface: u64,
}

impl<C> PopupController<C> {
    pub fn new(listeners: ListenerRegistry) -> Self {
        Self::with_options(listeners, OverlayOptions::default())
    }

    pub fn with_options(listeners: ListenerRegistry, options: OverlayOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: PopupState::Closed,
            listeners,
            events,
            options,
            next_surface: 0,
        }
    }

    pub fn options(&self) -> OverlayOptions {
        self.options
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PopupEvent> {
        self.events.subscribe()
    }

    pub fn status(&self) -> PopupStatus {
        match self.state {
            PopupState::Closed => PopupStatus::Closed,
            PopupState::Open(_) => PopupStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == PopupStatus::Open
    }

    pub fn surface(&self) -> Option<&Surface<C>> {
        match &self.state {
            PopupState::Open(open) => Some(&open.surface),
            PopupState::Closed => None,
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut Surface<C>> {
        match &mut self.state {
            PopupState::Open(open) => Some(&mut open.surface),
            PopupState::Closed => None,
        }
    }

    /// Opens the popup below-left of `trigger`. A no-op when already open, in
    /// which case `content` is dropped and the current surface is kept.
    pub fn open(&mut self, trigger: &dyn Anchor, content: C) -> Result<Transition, OverlayError> {
        if let PopupState::Open(open) = &self.state {
            tracing::debug!(surface = ?open.surface.id, "popup already open");
            return Ok(Transition::Unchanged);
        }

        let position = anchor_below_left(trigger, self.options.offset_x, self.options.offset_y)
            .map_err(|e| {
                let error = OverlayError::from(e);
                tracing::warn!("not opening popup: {}", error);
                counter!(POPUP_POSITIONING_ERROR_COUNTER, "error" => error.error_code())
                    .increment(1);
                error
            })?;

        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;

        let listeners = [
            self.listeners.subscribe(ListenerKind::BackdropClick),
            self.listeners.subscribe(ListenerKind::EscapeKey),
        ];
        self.state = PopupState::Open(OpenPopup {
            surface: Surface {
                id,
                position,
                content,
            },
            _listeners: listeners,
        });

        tracing::info!(surface = ?id, x = position.x, y = position.y, "popup opened");
        counter!(POPUP_OPENED_COUNTER).increment(1);
        self.notify(PopupEvent::Opened {
            surface: id,
            position,
        });

        Ok(Transition::Opened)
    }

    /// Closes the popup. A no-op when already closed.
    pub fn close(&mut self) -> Transition {
        self.teardown(CloseReason::Explicit)
    }

    pub fn toggle(&mut self, trigger: &dyn Anchor, content: C) -> Result<Transition, OverlayError> {
        match self.status() {
            PopupStatus::Open => Ok(self.close()),
            PopupStatus::Closed => self.open(trigger, content),
        }
    }

    /// Feeds an interaction from the view layer. Backdrop clicks and the
    /// escape key dismiss an open popup; anything else is ignored.
    pub fn handle_input(&mut self, event: &InputEvent) -> Transition {
        // Listeners only exist while open, so a closed popup has nothing to dismiss
        let reason = match event {
            InputEvent::BackdropClick => CloseReason::BackdropClick,
            event if event.is_escape() => CloseReason::EscapeKey,
            _ => return Transition::Unchanged,
        };

        self.teardown(reason)
    }

    fn teardown(&mut self, reason: CloseReason) -> Transition {
        let open = match std::mem::replace(&mut self.state, PopupState::Closed) {
            PopupState::Open(open) => open,
            PopupState::Closed => return Transition::Unchanged,
        };

        let surface = open.surface.id;
        // Releases the surface and both listener handles
        drop(open);

        tracing::info!(surface = ?surface, %reason, "popup closed");
        counter!(POPUP_CLOSED_COUNTER, "reason" => reason.as_str()).increment(1);
        self.notify(PopupEvent::Closed { surface, reason });

        Transition::Closed
    }

    fn notify(&self, event: PopupEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!(?event, "no popup observers");
        }
    }
}
