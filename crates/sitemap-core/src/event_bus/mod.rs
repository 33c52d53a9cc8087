//! # Event Bus Module
//!
//! Provides a unified event bus for decoupled communication between the
//! builder core and its host (toolbars, property panels, save indicators).
//!
//! ## Usage
//!
//! ```rust
//! use sitemap_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, ToolEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Tool]),
//!     |event| {
//!         if let AppEvent::Tool(ToolEvent::Changed { tool }) = event {
//!             println!("active tool: {tool}");
//!         }
//!     },
//! );
//!
//! bus.publish(AppEvent::Tool(ToolEvent::Changed { tool: "pan".to_string() }));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
