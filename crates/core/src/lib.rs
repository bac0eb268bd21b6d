// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod export;
mod filter;
mod options;
mod selection;
mod stats;

#[cfg(test)]
mod tests;

pub use export::{EXPORT_HEADERS, ExportTable, export_participants};
pub use filter::{Predicate, apply_predicates, filter, predicates, registration_cutoff};
pub use options::{FilterOptions, filter_options};
pub use selection::SelectionSet;
pub use stats::{ParticipationStats, aggregate, percentage};
