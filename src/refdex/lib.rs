//! # Refdex Architecture
//!
//! Refdex builds **reference indexes** for numbered study books: a term, a
//! category, a book/page citation and a note per entry, exported as a JSON
//! dump or as a category-grouped PDF to print and keep next to the books.
//!
//! It is a library that happens to have a CLI client. The core never touches
//! the terminal, so the same session could sit behind a web form.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints output, writes export files     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (api.rs)                                           │
//! │  - Thin facade over commands                                │
//! │  - Owns the active index (no process-wide state)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, entry building, grouping, exports            │
//! │  - Returns `CmdResult` values, never prints                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract IndexStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of the business rules
//!    against `InMemoryStore` fixtures.
//! 2. **Session** (`api.rs`): dispatch and active-index handling.
//! 3. **Rendering** (`pdf/`, `cli/render.rs`): layout and text output are
//!    computed as data and checked without a viewer or terminal.
//! 4. **CLI** (`tests/`): end-to-end runs of the binary on a temp root.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Index`, `Entry`, `Settings`, `Category`)
//! - [`validation`]: Input checks for titles, counts, terms, books, categories
//! - [`group`]: Category grouping shared by the preview and the PDF
//! - [`pdf`]: Table layout and PDF serialization
//! - [`config`]: Configuration management
//! - [`init`]: Storage root resolution and session bootstrap
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod group;
pub mod init;
pub mod model;
pub mod pdf;
pub mod store;
pub mod validation;
