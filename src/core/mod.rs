//! # Core Application Logic
//!
//! This module contains bitbench's calculators and application state.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Calculators (pure)   │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    CLI     │
//!           │  Adapter   │              │ (main.rs)  │
//!           │ (ratatui)  │              │   (clap)   │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! Calculators:
//! - [`radix`]: arbitrary-precision base conversion
//! - [`twos`]: two's-complement encode/decode
//! - [`bits`]: bit reversal, binary padding, XOR
//! - [`units`]: time, frequency, size and throughput tables
//! - [`boolean`]: Boolean expression parsing and evaluation
//! - [`truth_table`]: truth tables for Boolean expressions
//! - [`kmap`]: Karnaugh map construction and greedy simplification
//! - [`pow2`]: powers of two and derived limits
//! - [`ascii`]: text ↔ hex dumps
//!
//! Application:
//! - [`modules`]: which calculator cards are shown, and their order
//! - [`config`]: settings with defaults → file → env → CLI resolution
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod ascii;
pub mod bits;
pub mod boolean;
pub mod config;
pub mod kmap;
pub mod modules;
pub mod pow2;
pub mod radix;
pub mod state;
pub mod truth_table;
pub mod twos;
pub mod units;
