//! Product-link enrichment bot.
//!
//! A chat message goes through link extraction, redirect resolution and
//! cleaning, a page fetch, title and price extraction and reply formatting.
//! Transport lives in [`telegram`]; everything else is transport-agnostic.

pub mod bot;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod links;
pub mod reply;
pub mod telegram;
