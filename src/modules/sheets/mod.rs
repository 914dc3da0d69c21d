//! Google Sheets integration
//!
//! The attendance "database" is a spreadsheet: append-only rows, no
//! uniqueness constraints, read back positionally. This module owns the
//! service-account token exchange and the three REST calls the features
//! need (sheet discovery, range read, row append).

mod google_token;
mod sheets_client;

pub use sheets_client::SheetsClient;
