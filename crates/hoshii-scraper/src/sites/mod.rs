//! Site-specific extractors for the supported commerce domains.
//!
//! Each extractor independently re-verifies its hostname allow-list before
//! touching the network, fingerprints bot-interdiction pages, and converts
//! every internal failure into a diagnostic result. The parsing half of
//! each extractor is a pure function over the document text.

pub mod amazon;
pub mod rakuten;
