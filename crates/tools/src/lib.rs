//! Developer tooling: slider inspector for overlays and headless reports.
//!
//! # Invariants
//! - Tools are read-only over the slider.

mod inspector;

pub use inspector::{ItemInfo, SliderInspector, SliderSummary};

pub fn crate_info() -> &'static str {
    "carousel-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
