//! Google Sheets backend for the Posyandu record store.
//!
//! [`SheetStore`] implements [`posyandu_core::store::RecordStore`] over
//! a narrow [`Worksheets`] row source — two operations, read-all-rows
//! and append-one-row, addressed by worksheet name. The live source is
//! [`SheetsClient`], a Sheets API v4 client authenticating as a Google
//! service account; tests swap in an in-memory one.

mod header;
mod store;

pub mod client;
pub mod error;

pub use client::{ServiceAccountKey, SheetsClient};
pub use error::{Error, Result};
pub use store::{SheetStore, Worksheets};
