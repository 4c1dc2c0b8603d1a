//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar showing status and the focused card
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Field`: one labelled text or choice input
//! - `BoardState` / `Board`: scrollable stack of visible cards
//! - `CardState` / `Card`: a calculator's fields and readout
//! - `ModuleManagerState` / `ModuleManager`: show, hide and reorder cards
//!
//! Each component file contains its state types, event types, rendering,
//! event handling and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── field.rs            (Text / choice input)
//! ├── card.rs             (Calculator trait + card widget)
//! ├── calculators/        (The eleven calculators)
//! ├── board.rs            (Scrollable card stack)
//! └── module_manager.rs   (Ctrl+O overlay)
//! ```

pub mod board;
pub mod calculators;
pub mod card;
pub mod field;
pub mod module_manager;
mod title_bar;

pub use board::{Board, BoardState};
pub use card::{Card, CardEvent, CardState};
pub use module_manager::{ModuleManager, ModuleManagerEvent, ModuleManagerState};
pub use title_bar::TitleBar;
