//! Domain types and pure logic for the vidshare platform.
//!
//! This crate has no database dependency so it can be shared by the
//! repository layer, the worker, and any presentation layer built on top.

#[macro_use]
mod macros;

pub mod background;
pub mod error;
pub mod ids;
pub mod moderation;
pub mod notification;
pub mod ranking;
pub mod reaction;
pub mod search;
pub mod storage;
pub mod text;
pub mod types;
pub mod video;
