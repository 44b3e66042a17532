//! Check implementations.
//!
//! This module contains pure functions that compare one locale's message
//! table against the prebuilt reference fingerprints. Each function takes
//! only the inputs it needs and returns diagnostics; none of them touch the
//! filesystem or abort on bad data.
//!
//! ## Module Structure
//!
//! - `mandatory`: untranslated mandatory keys
//! - `textual`: flat text checks (links, pilcrow character)
//! - `html`: HTML tag sequence comparison
//! - `ftl`: Fluent-specific text hygiene (literals, entities, printf,
//!   repeated keys)
//! - `placeholders`: `data-l10n-name` group comparison
//! - `functions`: formatting function call comparison
//! - `css`: CSS token comparison for `.style` messages

pub mod css;
pub mod ftl;
pub mod functions;
pub mod html;
pub mod mandatory;
pub mod placeholders;
pub mod textual;
