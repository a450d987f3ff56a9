//! # Folio
//!
//! A personal portfolio of Frontend and UX Design projects: a catalogue of
//! project records, list views that filter and sort them, detail pages with
//! an image gallery, and a password-gated dashboard that edits the
//! catalogue.
//!
//! # Architecture: A Deterministic Core Behind Platform Traits
//!
//! Everything the portfolio does is plain Rust state with the outside world
//! behind traits. The `folio` binary drives that core against files on disk
//! and renders every public view as static HTML.
//!
//! ```text
//!            projects.json            config.toml
//!                 │                        │
//!                 ▼                        ▼
//!   Catalogue ◀── App ──▶ AdminSession ◀── Storage (local, session)
//!       │          │
//!       │          ├──▶ Router          (page, selected project)
//!       │          ├──▶ FilterQuery×2   (one per project type)
//!       ▼          ▼
//!   filter_projects ──▶ render ──▶ dist/*.html
//!                          │
//!                          └── VisibilityAnimator, lightbox markup
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The project record and its enums (`ProjectType`, `Difficulty`) |
//! | [`catalogue`] | Project store: permissive loading, mutations, export, cache-busting URL, `check` |
//! | [`filter`] | Pure filter/sort engine behind every list view |
//! | [`visibility`] | Enter animations driven by a pluggable intersection source |
//! | [`lightbox`] | Gallery lightbox state machine over a `Platform` trait |
//! | [`storage`] | Key-value storage scopes standing in for browser storage |
//! | [`session`] | Admin password and logged-in flag |
//! | [`admin`] | Dashboard mutations, the edit form, image inlining |
//! | [`router`] | Active page and selected project |
//! | [`app`] | Root composition from explicit configuration |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`render`] | Static HTML for every public view using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Side Effects Behind Traits
//!
//! Storage, fullscreen, orientation lock, scroll lock and viewport
//! intersection are each a trait ([`storage::Storage`], [`lightbox::Platform`],
//! [`visibility::VisibilitySource`]). The controllers never touch a real
//! device, so every transition is reproducible in a unit test, and the CLI
//! supplies file-backed or headless implementations.
//!
//! ## Degrade, Never Crash
//!
//! A missing or malformed catalogue renders as an empty portfolio. Storage
//! that cannot be read or written is logged and ignored. A platform that
//! refuses fullscreen still gets a working lightbox. Each of these emits a
//! `tracing` warning instead of an error. `folio check` is the strict path
//! that reports what the permissive path papered over.
//!
//! ## One Mutation Path
//!
//! Only [`admin::Dashboard`] mutates the catalogue, and it can only be opened
//! with an authenticated session. Edits replace whole records, so a view
//! holding a snapshot never observes a half-edited project.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! Rust expressions checked at compile time and every interpolation is
//! escaped. Project text is admin-entered, so escaping by default matters.

pub mod admin;
pub mod app;
pub mod catalogue;
pub mod config;
pub mod filter;
pub mod lightbox;
pub mod output;
pub mod render;
pub mod router;
pub mod session;
pub mod storage;
pub mod types;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
