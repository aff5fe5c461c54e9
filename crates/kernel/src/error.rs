/// Errors raised while building or resizing a slider.
///
/// All of them are configuration problems: the per-frame update itself
/// cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliderError {
    #[error("slider needs at least one slide")]
    NoSlides,
    #[error("degenerate viewport {width}x{height}")]
    DegenerateViewport { width: f64, height: f64 },
    #[error("derived item width {width} is not positive")]
    DegenerateItemWidth { width: f64 },
    #[error("invalid option {name}: {value}")]
    InvalidOption { name: &'static str, value: String },
}
