//! # TUI Components
//!
//! Stateless, props-based components. Each receives everything it draws as
//! struct fields and renders into the `Rect` it is handed:
//!
//! - `ViewportPane`: the visible slice of a core `Viewport` (reader and list)
//! - `LandingPage`: the "Initializing..." screen shown before the first resize
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! ViewportPane::new(&app.reader).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! ReaderPane.render(frame, area); // reads from global App
//! ```

pub mod landing;
pub mod viewport_pane;

pub use landing::LandingPage;
pub use viewport_pane::ViewportPane;
