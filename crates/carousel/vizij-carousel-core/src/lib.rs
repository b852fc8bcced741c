//! Vizij Carousel Core (renderer-agnostic)
//!
//! Selection, navigation, swipe-gesture and transition logic for a carousel
//! that shows one item of an ordered collection at a time. Rendering stays in
//! the host: the core talks to it through `SlotHost` (per-item offset, opacity
//! and paint order) and reads the collection through `ItemsAdapter`.
//!
//! Everything is driven from one thread. Hosts forward input as method calls
//! and pump `Carousel::update(dt)` once per frame; transitions, gesture settle
//! animations and auto-play all advance from there.

pub mod autoplay;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod gesture;
pub mod ids;
pub mod input;
pub mod items;
pub mod slots;
pub mod state;
pub mod transition;

// Re-exports for hosts
pub use autoplay::{AutoPlayScheduler, AutoPlayState};
pub use carousel::Carousel;
pub use clock::{Clock, FrameClock};
pub use config::{Config, GestureConfig, Orientation, TransitionKind};
pub use error::{CarouselError, TransitionError};
pub use events::{SelectionChanged, SelectionChanging};
pub use gesture::{GestureRejection, GestureSample, GestureSession, ReleaseDecision};
pub use ids::TransitionTicket;
pub use input::{Key, NavigationIntent};
pub use items::{ItemsAdapter, VecItems};
pub use slots::{PaintOrder, SlotBuffer, SlotHost, SlotVisual};
pub use state::{CarouselState, Direction};
pub use transition::{
    FadeTransition, SlideTransition, TransitionRequest, TransitionRunner, FALLBACK_DISTANCE,
};
