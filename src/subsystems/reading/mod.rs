//! Reading subsystem: the list of articles and papers behind `/reading`.
//!
//! Records live in a hosted table owned elsewhere; this side only reads them,
//! once, and keeps them for the life of the process.
//!
//! - **record**: wire type of one table row.
//! - **store**: `LinkStore` backends (Supabase/PostgREST, fixed, disabled).
//! - **loader**: `ReadingList`, the single-fetch cache.
//! - **links**: display helpers: arXiv links, domains, favicons, dates.

pub mod links;
pub mod loader;
pub mod record;
pub mod store;

pub use links::{FaviconChain, FaviconState, ReadingItem};
pub use loader::{LoadState, ReadingList};
pub use record::LinkRecord;
pub use store::{FixedStore, LinkStore, StoreError, SupabaseStore};
