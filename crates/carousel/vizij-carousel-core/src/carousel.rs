//! Carousel: the selection controller.
//!
//! The only owner of "what is selected". Every input source (navigation
//! intents, keys, bound index/item writes, collection changes, gestures,
//! auto-play ticks) ends up in `commit_navigation` or in the gesture commit
//! path. At most one transition and one gesture session exist at a time;
//! starting anything new first tears down what was running.

use log::{debug, warn};

use crate::autoplay::{AutoPlayScheduler, AutoPlayState};
use crate::clock::{Clock, FrameClock};
use crate::config::{Config, GestureConfig, Orientation, TransitionKind};
use crate::error::CarouselError;
use crate::events::{Observers, SelectionChanged, SelectionChanging};
use crate::gesture::{
    DragFrame, GestureContext, GestureInterpreter, GestureRejection, GestureSample,
    GestureSession, ReleaseDecision,
};
use crate::ids::{TicketAllocator, TransitionTicket};
use crate::input::{intent_for_key, Key, NavigationIntent};
use crate::items::ItemsAdapter;
use crate::slots::{finalize_handoff, settle_visibility, PaintOrder, SlotBuffer, SlotHost};
use crate::state::{wrap_index, CarouselState, NavigationRequest};
use crate::transition::{Storyboard, TransitionRequest, TransitionRunner};

/// What a gesture settle animation does when it finishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SwipeSettle {
    Commit { target: usize },
    SnapBack { peek: Option<usize> },
}

/// The single live transition.
#[derive(Clone, Debug, PartialEq)]
enum ActiveTransition {
    /// Delegated to the injected runner; completes when it reports `ticket`.
    Runner {
        ticket: TransitionTicket,
        to: usize,
    },
    /// Release animation of a drag, driven here.
    Swipe {
        storyboard: Storyboard,
        settle: SwipeSettle,
    },
}

/// Carousel controller over an items adapter and a slot host.
#[derive(Debug)]
pub struct Carousel<A: ItemsAdapter, S: SlotHost = SlotBuffer> {
    cfg: Config,
    items: A,
    slots: S,
    item_count: usize,
    selected: Option<usize>,
    /// Mirror of the bound item property.
    selected_item: Option<A::Item>,
    active: Option<ActiveTransition>,
    session: Option<GestureSession>,
    runner: Box<dyn TransitionRunner>,
    gestures: GestureInterpreter,
    autoplay: AutoPlayScheduler,
    observers: Observers<A::Item>,
    tickets: TicketAllocator,
    viewport: [f32; 2],
    attached: bool,
    /// Set while selection mirrors are written; bound writes arriving then are echoes.
    synchronizing: bool,
}

impl<A: ItemsAdapter> Carousel<A, SlotBuffer> {
    pub fn new(items: A, cfg: Config) -> Self {
        Self::with_slots(items, SlotBuffer::new(), cfg)
    }

    /// Validate `cfg` before building.
    pub fn try_new(items: A, cfg: Config) -> Result<Self, CarouselError> {
        cfg.validate()?;
        Ok(Self::new(items, cfg))
    }
}

impl<A: ItemsAdapter, S: SlotHost> Carousel<A, S> {
    pub fn with_slots(items: A, slots: S, cfg: Config) -> Self {
        let runner = cfg.transition.build();
        let autoplay = AutoPlayScheduler::new(
            cfg.auto_play_enabled,
            cfg.auto_play_interval,
            Box::new(FrameClock::new()),
        );
        let gestures = GestureInterpreter::new(cfg.gesture.clone());
        let mut carousel = Self {
            cfg,
            items,
            slots,
            item_count: 0,
            selected: None,
            selected_item: None,
            active: None,
            session: None,
            runner,
            gestures,
            autoplay,
            observers: Observers::default(),
            tickets: TicketAllocator::new(),
            viewport: [0.0, 0.0],
            attached: true,
            synchronizing: false,
        };
        carousel.rebuild_items();
        carousel.validate_selection_bounds();
        carousel.autoplay.sync();
        carousel
    }

    /// Replace the auto-play clock.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.autoplay.set_clock(clock);
        self
    }

    // ----- accessors -----

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn items(&self) -> &A {
        &self.items
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// `-1` when nothing is selected.
    pub fn selected_index(&self) -> i32 {
        index_to_i32(self.selected)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn current_item(&self) -> Option<A::Item> {
        self.selected_item.clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_manipulating(&self) -> bool {
        self.session.is_some()
    }

    pub fn gesture_session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn auto_play_state(&self) -> AutoPlayState {
        self.autoplay.state()
    }

    pub fn transition_name(&self) -> &str {
        self.runner.name()
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            selected_index: self.selected_index(),
            item_count: self.item_count,
            is_looping: self.cfg.looping,
            is_transitioning: self.is_transitioning(),
            is_manipulating: self.is_manipulating(),
        }
    }

    /// Whether a "previous" button should be enabled.
    pub fn can_go_previous(&self) -> bool {
        self.item_count > 1 && (self.cfg.looping || self.selected.is_some_and(|i| i > 0))
    }

    /// Whether a "next" button should be enabled.
    pub fn can_go_next(&self) -> bool {
        self.item_count > 1
            && (self.cfg.looping || self.selected.is_some_and(|i| i + 1 < self.item_count))
    }

    /// Extent along the motion axis; zero before the first layout.
    pub fn viewport_extent(&self) -> f32 {
        match self.cfg.orientation {
            Orientation::Horizontal => self.viewport[0],
            Orientation::Vertical => self.viewport[1],
        }
    }

    // ----- observers -----

    pub fn on_selection_changing(
        &mut self,
        f: impl FnMut(&mut SelectionChanging<A::Item>) + 'static,
    ) {
        self.observers.on_changing(f);
    }

    pub fn on_selection_changed(&mut self, f: impl FnMut(&SelectionChanged<A::Item>) + 'static) {
        self.observers.on_changed(f);
    }

    // ----- configuration mutators -----

    pub fn set_looping(&mut self, looping: bool) {
        self.cfg.looping = looping;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.cfg.orientation != orientation {
            self.abort_gesture();
            self.cfg.orientation = orientation;
        }
    }

    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.cfg.swipe_enabled = enabled;
        if !enabled {
            self.abort_gesture();
        }
    }

    pub fn set_gesture_config(&mut self, gesture: GestureConfig) {
        self.gestures.set_config(gesture.clone());
        self.cfg.gesture = gesture;
    }

    pub fn set_auto_play_enabled(&mut self, enabled: bool) {
        self.cfg.auto_play_enabled = enabled;
        self.autoplay.set_enabled(enabled);
    }

    /// Seconds between auto-advances; `None` disables.
    pub fn set_auto_play_interval(&mut self, interval: Option<f32>) {
        self.cfg.auto_play_interval = interval;
        self.autoplay.set_interval(interval);
    }

    /// Install a runner. The current one is cancelled (settled) first.
    pub fn set_transition(&mut self, runner: Box<dyn TransitionRunner>) {
        self.cancel_transition();
        self.runner = runner;
    }

    pub fn set_transition_kind(&mut self, kind: TransitionKind) {
        self.set_transition(kind.build());
        self.cfg.transition = kind;
    }

    /// Layout pass: size of the clipping viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = [width.max(0.0), height.max(0.0)];
    }

    // ----- lifecycle -----

    pub fn attach(&mut self) {
        self.attached = true;
        self.autoplay.set_attached(true);
    }

    /// Unload: stop auto-play and settle anything in flight.
    pub fn detach(&mut self) {
        self.attached = false;
        self.autoplay.set_attached(false);
        self.abort_gesture();
        self.cancel_transition();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ----- navigation -----

    /// Select `index`. No-op when empty, out of range, or already selected.
    pub fn go_to(&mut self, index: usize, animate: bool) {
        self.commit_navigation(index, animate, true);
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: i64) {
        if self.is_transitioning() || self.item_count == 0 {
            return;
        }
        let Some(current) = self.selected else {
            return;
        };
        if let Some(target) = wrap_index(current as i64 + delta, self.item_count, self.cfg.looping)
        {
            self.go_to(target, true);
        }
    }

    pub fn navigate(&mut self, intent: NavigationIntent) {
        match intent {
            NavigationIntent::Previous => self.previous(),
            NavigationIntent::Next => self.next(),
            NavigationIntent::First => self.go_to(0, true),
            NavigationIntent::Last => {
                if self.item_count > 0 {
                    self.go_to(self.item_count - 1, true);
                }
            }
            NavigationIntent::Index(i) => self.go_to(i, true),
        }
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match intent_for_key(key, self.cfg.orientation) {
            Some(intent) => {
                self.navigate(intent);
                true
            }
            None => false,
        }
    }

    /// Write from a bound index property.
    pub fn set_selected_index(&mut self, index: i32) {
        if self.synchronizing || index < 0 || index == self.selected_index() {
            return;
        }
        self.synchronizing = true;
        self.go_to(index as usize, true);
        self.synchronizing = false;
    }

    /// Write from a bound item property.
    pub fn set_selected_item(&mut self, item: &A::Item)
    where
        A::Item: PartialEq,
    {
        if self.synchronizing {
            return;
        }
        let Some(index) = self.items.index_of(item) else {
            return;
        };
        if Some(index) == self.selected {
            return;
        }
        self.synchronizing = true;
        self.go_to(index, true);
        self.synchronizing = false;
    }

    /// Shared commit path. Forced (non-cancellable) commits keep the bounds invariant after a
    /// collection change; observers still see `SelectionChanging` first.
    fn commit_navigation(&mut self, index: usize, animate: bool, cancellable: bool) -> bool {
        if self.item_count == 0 || index >= self.item_count || Some(index) == self.selected {
            return false;
        }
        self.abort_gesture();
        self.cancel_transition();
        // settling a swipe commit may already have landed here
        if Some(index) == self.selected {
            return false;
        }

        let previous = self.selected;
        let previous_item = self.selected_item.clone();
        let new_item = self.items.item_at(index);

        let mut changing = SelectionChanging {
            previous_item: previous_item.clone(),
            new_item: new_item.clone(),
            cancel: false,
        };
        if self.observers.raise_changing(&mut changing) && cancellable {
            debug!("carousel: navigation to {index} cancelled by observer");
            return false;
        }

        let request =
            NavigationRequest::new(previous, index, animate, self.item_count, self.cfg.looping);
        self.apply_selection(Some(index), new_item.clone());

        match request.previous_index {
            Some(from) if request.animate => {
                self.start_runner(from, index, request.direction.is_forward())
            }
            _ => settle_visibility(&mut self.slots, self.item_count, Some(index)),
        }
        debug!(
            "carousel: selected {index} (from {:?}, {:?}, animate={animate})",
            previous, request.direction
        );

        self.raise_changed(previous_item, new_item, previous, Some(index));
        self.autoplay.reset();
        true
    }

    fn start_runner(&mut self, from: usize, to: usize, forward: bool) {
        let ticket = self.tickets.alloc();
        let request = TransitionRequest {
            ticket,
            from: Some(from),
            to,
            forward,
            distance: self.viewport_extent(),
        };
        match self.runner.run(&mut self.slots, request) {
            Ok(()) => self.active = Some(ActiveTransition::Runner { ticket, to }),
            Err(err) => {
                warn!(
                    "carousel: transition '{}' failed ({err}); settling at {to}",
                    self.runner.name()
                );
                self.runner.cancel(&mut self.slots);
                finalize_handoff(&mut self.slots, Some(from), to);
                settle_visibility(&mut self.slots, self.item_count, Some(to));
            }
        }
    }

    /// Settle whatever transition runs. A pending swipe commit is applied.
    fn cancel_transition(&mut self) {
        match self.active.take() {
            None => {}
            Some(ActiveTransition::Runner { to, .. }) => {
                self.runner.cancel(&mut self.slots);
                settle_visibility(&mut self.slots, self.item_count, Some(to));
            }
            Some(ActiveTransition::Swipe {
                mut storyboard,
                settle,
            }) => {
                storyboard.finish(&mut self.slots);
                self.complete_swipe(settle);
            }
        }
    }

    fn on_transition_completed(&mut self, ticket: TransitionTicket) {
        match self.active {
            Some(ActiveTransition::Runner { ticket: live, to }) if live == ticket => {
                self.active = None;
                settle_visibility(&mut self.slots, self.item_count, Some(to));
            }
            _ => debug!("carousel: dropping completion for superseded {ticket:?}"),
        }
    }

    fn apply_selection(&mut self, index: Option<usize>, item: Option<A::Item>) {
        let outer = std::mem::replace(&mut self.synchronizing, true);
        self.selected = index;
        self.selected_item = item;
        self.synchronizing = outer;
        debug_assert!(self.state().check_invariants().is_ok());
    }

    fn raise_changed(
        &mut self,
        previous_item: Option<A::Item>,
        new_item: Option<A::Item>,
        previous: Option<usize>,
        new: Option<usize>,
    ) {
        let args = SelectionChanged {
            previous_item,
            new_item,
            previous_index: index_to_i32(previous),
            new_index: index_to_i32(new),
        };
        self.observers.raise_changed(&args);
    }

    // ----- frame pump -----

    /// Advance animations and the auto-play clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if let Some(ticket) = self.runner.advance(dt, &mut self.slots) {
            self.on_transition_completed(ticket);
        }

        let swipe_done = match self.active.as_mut() {
            Some(ActiveTransition::Swipe { storyboard, .. }) => {
                storyboard.advance(dt, &mut self.slots)
            }
            _ => false,
        };
        if swipe_done {
            if let Some(ActiveTransition::Swipe { settle, .. }) = self.active.take() {
                self.complete_swipe(settle);
            }
        }

        for _ in 0..self.autoplay.advance(dt) {
            self.timer_tick();
        }
    }

    /// One auto-play tick: advance with wrap.
    pub fn timer_tick(&mut self) {
        if self.is_manipulating() || !self.autoplay.is_running() {
            return;
        }
        self.next();
    }

    pub fn pointer_entered(&mut self) {
        self.autoplay.pointer_entered();
    }

    pub fn pointer_exited(&mut self) {
        self.autoplay.pointer_exited();
    }

    // ----- collection changes -----

    /// The adapter's collection was mutated.
    ///
    /// A pending swipe commit is dropped: its target was chosen against the
    /// old collection.
    pub fn items_changed(&mut self) {
        self.abort_gesture();
        self.drop_pending_commit();
        self.cancel_transition();
        self.rebuild_items();
        self.validate_selection_bounds();
    }

    /// Mutate the adapter and propagate the change.
    ///
    /// In-flight work settles against the collection as it was before `f`.
    pub fn mutate_items<R>(&mut self, f: impl FnOnce(&mut A) -> R) -> R {
        self.abort_gesture();
        self.cancel_transition();
        let out = f(&mut self.items);
        self.items_changed();
        out
    }

    /// Swap the adapter; state is re-derived against the new collection.
    pub fn set_items(&mut self, items: A) -> A {
        self.abort_gesture();
        self.cancel_transition();
        let old = std::mem::replace(&mut self.items, items);
        self.rebuild_items();
        self.validate_selection_bounds();
        old
    }

    fn rebuild_items(&mut self) {
        self.item_count = self.items.count();
        self.slots.set_slot_count(self.item_count);
        let visible = match self.item_count {
            0 => None,
            n => Some(self.selected.unwrap_or(0).min(n - 1)),
        };
        settle_visibility(&mut self.slots, self.item_count, visible);
        if let Some(i) = self.selected.filter(|&i| i < self.item_count) {
            self.selected_item = self.items.item_at(i);
        }
    }

    fn validate_selection_bounds(&mut self) {
        if self.item_count == 0 {
            self.clear_selection();
            return;
        }
        match self.selected {
            None => {
                self.commit_navigation(0, false, false);
            }
            Some(i) if i >= self.item_count => {
                self.commit_navigation(self.item_count - 1, false, false);
            }
            Some(_) => {}
        }
    }

    fn clear_selection(&mut self) {
        let Some(previous) = self.selected else {
            return;
        };
        let previous_item = self.selected_item.clone();
        let mut changing = SelectionChanging {
            previous_item: previous_item.clone(),
            new_item: None,
            cancel: false,
        };
        // an empty collection leaves nothing to keep selected
        self.observers.raise_changing(&mut changing);
        self.apply_selection(None, None);
        debug!("carousel: selection cleared (collection empty)");
        self.raise_changed(previous_item, None, Some(previous), None);
        self.autoplay.reset();
    }

    // ----- gestures -----

    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            selected: self.selected,
            item_count: self.item_count,
            looping: self.cfg.looping,
            transitioning: self.is_transitioning(),
            swipe_enabled: self.cfg.swipe_enabled,
        }
    }

    /// Start of a drag. A refused gesture should be completed by the host.
    pub fn gesture_started(&mut self) -> Result<(), GestureRejection> {
        self.abort_gesture();
        let ctx = self.gesture_context();
        let session = self
            .gestures
            .begin(&ctx, self.cfg.orientation, self.viewport_extent())
            .map_err(|r| {
                debug!("gesture: refused ({r:?})");
                r
            })?;
        debug!("gesture: started at {}", session.origin_index);
        self.session = Some(session);
        self.autoplay.begin_gesture();
        Ok(())
    }

    pub fn gesture_sample(&mut self, sample: GestureSample) {
        let ctx = self.gesture_context();
        let extent = self.viewport_extent();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match self.gestures.sample(session, sample, extent, &ctx) {
            Some(frame) => self.apply_drag_frame(frame),
            None => warn!("gesture: ignoring sample (viewport extent {extent})"),
        }
    }

    fn apply_drag_frame(&mut self, frame: DragFrame) {
        if let Some(hidden) = frame.hide_peek {
            self.hide_slot(hidden);
        }
        self.slots
            .set_axis_offset(frame.current_index, frame.current_offset);
        if let Some(peek) = frame.peek {
            if peek.newly_shown {
                self.slots.set_opacity(peek.index, 1.0);
                self.slots.set_paint_order(peek.index, PaintOrder::Back);
                self.slots
                    .set_paint_order(frame.current_index, PaintOrder::Front);
            }
            self.slots.set_axis_offset(peek.index, peek.offset);
        }
    }

    fn hide_slot(&mut self, slot: usize) {
        if Some(slot) == self.selected {
            return;
        }
        self.slots.set_opacity(slot, 0.0);
        self.slots.set_paint_order(slot, PaintOrder::Back);
        self.slots.set_axis_offset(slot, 0.0);
    }

    /// Release: commit to the neighbour or snap back.
    pub fn gesture_ended(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.autoplay.end_gesture();
        let ctx = self.gesture_context();
        match self.gestures.release(&session, &ctx) {
            ReleaseDecision::Discard => {
                debug!("gesture: released without a usable extent");
                self.restore_rest(session.peek_index);
            }
            ReleaseDecision::Commit {
                origin,
                target,
                forward,
                extent,
            } => {
                let mut changing = SelectionChanging {
                    previous_item: self.selected_item.clone(),
                    new_item: self.items.item_at(target),
                    cancel: false,
                };
                if self.observers.raise_changing(&mut changing) {
                    debug!("gesture: commit to {target} cancelled by observer; snapping back");
                    self.start_snap_back(origin, session.peek_index, extent);
                    return;
                }
                debug!("gesture: commit {origin} -> {target} (forward={forward})");
                self.start_commit(origin, session.peek_index, target, forward, extent);
            }
            ReleaseDecision::SnapBack {
                origin,
                peek,
                extent,
            } => {
                debug!("gesture: snap back to {origin}");
                self.start_snap_back(origin, peek, extent);
            }
        }
    }

    /// Platform cancelled the drag; treated as a snap-back.
    pub fn gesture_cancelled(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.autoplay.end_gesture();
        if session.viewport_extent > 0.0 {
            self.start_snap_back(
                session.origin_index,
                session.peek_index,
                session.viewport_extent,
            );
        } else {
            self.restore_rest(session.peek_index);
        }
    }

    fn start_commit(
        &mut self,
        origin: usize,
        peek: Option<usize>,
        target: usize,
        forward: bool,
        extent: f32,
    ) {
        if peek != Some(target) {
            // released before the neighbour was ever placed (fast fling)
            if let Some(old) = peek {
                self.hide_slot(old);
            }
            let side = if forward { extent } else { -extent };
            let placed = side + self.slots.axis_offset(origin);
            self.slots.set_opacity(target, 1.0);
            self.slots.set_paint_order(target, PaintOrder::Back);
            self.slots.set_axis_offset(target, placed);
        }
        let storyboard = self.gestures.commit_storyboard(
            origin,
            self.slots.axis_offset(origin),
            target,
            self.slots.axis_offset(target),
            forward,
            extent,
        );
        self.begin_swipe(storyboard, SwipeSettle::Commit { target });
    }

    fn start_snap_back(&mut self, origin: usize, peek: Option<usize>, extent: f32) {
        let peek_pos = peek.map(|p| (p, self.slots.axis_offset(p)));
        let storyboard = self.gestures.snap_back_storyboard(
            origin,
            self.slots.axis_offset(origin),
            peek_pos,
            extent,
        );
        self.begin_swipe(storyboard, SwipeSettle::SnapBack { peek });
    }

    fn begin_swipe(&mut self, mut storyboard: Storyboard, settle: SwipeSettle) {
        storyboard.begin(&mut self.slots);
        self.active = Some(ActiveTransition::Swipe { storyboard, settle });
    }

    fn complete_swipe(&mut self, settle: SwipeSettle) {
        match settle {
            SwipeSettle::SnapBack { peek } => self.restore_rest(peek),
            SwipeSettle::Commit { target } => {
                if target >= self.item_count || Some(target) == self.selected {
                    self.restore_rest(None);
                    return;
                }
                let previous = self.selected;
                let previous_item = self.selected_item.clone();
                let new_item = self.items.item_at(target);
                self.apply_selection(Some(target), new_item.clone());
                settle_visibility(&mut self.slots, self.item_count, Some(target));
                self.raise_changed(previous_item, new_item, previous, Some(target));
                self.autoplay.reset();
            }
        }
    }

    fn drop_pending_commit(&mut self) {
        if let Some(ActiveTransition::Swipe { settle, .. }) = self.active.as_mut() {
            if let SwipeSettle::Commit { target } = *settle {
                debug!("gesture: collection changed, dropping commit to {target}");
                *settle = SwipeSettle::SnapBack { peek: Some(target) };
            }
        }
    }

    fn restore_rest(&mut self, peek: Option<usize>) {
        if let Some(p) = peek {
            self.hide_slot(p);
        }
        settle_visibility(&mut self.slots, self.item_count, self.selected);
    }

    /// Drop a live drag without animating.
    fn abort_gesture(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("gesture: aborted at {}", session.origin_index);
            self.autoplay.end_gesture();
            self.restore_rest(session.peek_index);
        }
    }
}

#[inline]
fn index_to_i32(index: Option<usize>) -> i32 {
    index.map(|i| i as i32).unwrap_or(-1)
}
