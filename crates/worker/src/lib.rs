//! Background jobs for the vidshare platform.
//!
//! The worker currently runs a single job: [`notifier::SubscriberNotifier`],
//! which tells subscribers about newly published videos.

pub mod config;
pub mod notifier;
