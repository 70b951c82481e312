//! # gramscope
//!
//! Collects and aggregates data about one Instagram account.
//!
//! ## Architecture
//!
//! Every operation runs the same pipeline:
//!
//! ```text
//! Guard → Backend + Paginator → Normalizer → Aggregate → ReportSink
//! ```
//!
//! - [`guard`]: username validation and the private-account access check
//! - [`fetcher`]: backend adapters and cursor pagination
//! - [`normalizer`]: converts raw backend records to domain models
//! - [`aggregate`]: one pure reduction per operation
//! - [`report`]: console summary plus text and JSON artifacts
//!
//! ## Quick Start
//!
//! ```bash
//! # Profile header
//! gramscope targetuser info
//!
//! # Hashtag frequency, saved as text and JSON
//! gramscope targetuser hashtags -f -j
//!
//! # Followers through the hiker backend
//! GRAMSCOPE_ACCESS_KEY=... gramscope targetuser followers --backend hiker
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together one session:
/// backend, downloader, resolved target and report sink.
pub mod app;

/// Aggregators, one per operation.
pub mod aggregate;

/// Command-line interface using clap.
///
/// `gramscope <target> <operation> [-f] [-j] [--backend private|hiker]`
pub mod cli;

/// Configuration loaded from `~/.config/gramscope/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Page`](domain::Page): one page of raw records and the next cursor
/// - [`Post`](domain::Post), [`Comment`](domain::Comment), [`UserRef`](domain::UserRef)
/// - [`Profile`](domain::Profile) and the session [`Target`](domain::Target)
pub mod domain;

/// Backend access.
///
/// - [`Backend`](fetcher::Backend): async trait, one method per endpoint
/// - [`PrivateApiBackend`](fetcher::PrivateApiBackend) and
///   [`HikerBackend`](fetcher::HikerBackend): the two wire formats
/// - [`Paginator`](fetcher::Paginator): drains cursor-paginated endpoints
/// - [`Downloader`](fetcher::Downloader): media retrieval
pub mod fetcher;

/// Username validation and access guard.
pub mod guard;

/// Raw record normalization.
///
/// Missing keys and explicit nulls are treated the same way, so both
/// backends' records map onto one set of domain types.
pub mod normalizer;

/// Console, text and JSON output of operation results.
pub mod report;
