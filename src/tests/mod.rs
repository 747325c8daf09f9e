//! Crate-level integration tests exercising the public API end-to-end,
//! organized one file per concern. Per-module unit tests already cover most
//! individual behaviors; these files focus on the §8 testable properties
//! and the cross-module scenarios that only make sense from outside any
//! single module.

mod containers;
mod strings;
