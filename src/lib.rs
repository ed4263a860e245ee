#![doc(test(attr(deny(warnings))))]

//! Formkit builds data-entry forms from a typed field model and renders them to
//! HTML, through a template engine when it can and a hand-built document when
//! it cannot. Reference fields resolve codes through lookup endpoints driven by
//! a small client-side modal.

pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod lookup;
pub mod render;
pub mod screens;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("formkit tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
