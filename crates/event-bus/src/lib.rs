//! # Event Bus - In-Process Topic Publish/Subscribe
//!
//! Topics are plain strings. Each topic owns an ordered list of handlers;
//! publishing a topic invokes every handler with the published arguments.
//!
//! ## Dispatch Modes
//!
//! ```text
//!  publish("topic", args)
//!        │
//!        ▼
//! ┌──────────────┐   sync            ┌──────────────────────────┐
//! │  Bus         │ ────────────────▶ │ handler(args), inline    │
//! │  (registry   │                   └──────────────────────────┘
//! │   lock held) │   async           ┌──────────────────────────┐
//! │              │ ────────────────▶ │ executor: handler(args)  │
//! │              │                   └──────────────────────────┘
//! │              │   transactional   ┌──────────────────────────┐
//! │              │ ────────────────▶ │ executor, one at a time  │
//! └──────────────┘                   └──────────────────────────┘
//! ```
//!
//! - **Sync:** runs on the publishing thread before `publish` returns
//! - **Async:** runs on an independent thread; `wait_async` drains them
//! - **Transactional:** async, but never overlapping with itself
//! - **Once:** any of the above, removed after its first dispatch
//!
//! ## Usage
//!
//! ```rust,ignore
//! use event_bus::Bus;
//!
//! let bus = Bus::new();
//! bus.subscribe("user.created", |id: u64, name: String| {
//!     println!("welcome {name} ({id})");
//! })?;
//! bus.publish("user.created", (7u64, "ada".to_string()));
//! ```
//!
//! Arguments are checked when a handler runs, not when the event is
//! published: a count or type mismatch panics inside the handler call.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod args;
pub mod bus;
pub mod callback;
pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod global;
pub mod handler;
pub mod pending;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use args::{Args, IntoArgs, Value};
pub use bus::Bus;
pub use callback::{Callback, IntoCallback};
pub use config::BusConfig;
pub use controller::Controller;
pub use error::BusError;
pub use executor::{Executor, Job, SpawnError, ThreadExecutor, TokioExecutor};
pub use global::{
    default_bus, has_callback, publish, subscribe, subscribe_async, subscribe_once,
    subscribe_once_async, unsubscribe, wait_async,
};
pub use handler::DispatchMode;
pub use publisher::Publisher;
pub use subscriber::Subscriber;

/// Default name prefix for threads running asynchronous handlers.
pub const DEFAULT_ASYNC_THREAD_NAME: &str = "event-bus-async";

pub mod prelude {
    //! Re-exports of the most commonly used bus types.
    pub use crate::{
        Args, Bus, BusError, Callback, Controller, IntoArgs, IntoCallback, Publisher, Subscriber,
    };
}
