use carousel_common::{PlaneTransform, Viewport};
use carousel_input::Action;
use glam::Vec2;

use crate::config::SliderConfig;
use crate::error::SliderError;
use crate::item::{ItemMetrics, SlideItem};
use crate::scroll::ScrollState;

/// A wrap recorded during a frame update.
///
/// The log is append-only until drained. The app drains it for diagnostics
/// and the CLI for simulation reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapEvent {
    pub frame: u64,
    pub index: usize,
    pub from_base_x: f64,
    pub to_base_x: f64,
    pub current: f64,
}

/// The carousel container: one scroll state, N slide items.
///
/// All mutation goes through [`Slider::apply`], [`Slider::update`] and
/// [`Slider::resize`]. Items never see each other; they only read the
/// scroll state.
#[derive(Debug, Clone)]
pub struct Slider {
    config: SliderConfig,
    scroll: ScrollState,
    items: Vec<SlideItem>,
    viewport: Viewport,
    metrics: ItemMetrics,
    frame: u64,
    events: Vec<WrapEvent>,
}

impl Slider {
    /// Build a slider for `slide_count` slides. Fails on an empty strip, an
    /// invalid config or a viewport too small to lay items out.
    pub fn new(
        slide_count: usize,
        viewport: Viewport,
        config: SliderConfig,
    ) -> Result<Self, SliderError> {
        if slide_count == 0 {
            return Err(SliderError::NoSlides);
        }
        config.validate()?;
        let metrics = derive_metrics(viewport, &config)?;
        let items = (0..slide_count)
            .map(|index| SlideItem::new(index, slide_count, viewport, metrics))
            .collect();

        tracing::info!(
            slides = slide_count,
            width = metrics.width,
            viewport_width = viewport.width,
            "slider created"
        );

        Ok(Self {
            scroll: ScrollState::new(&config),
            config,
            items,
            viewport,
            metrics,
            frame: 0,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn items(&self) -> &[SlideItem] {
        &self.items
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn metrics(&self) -> ItemMetrics {
        self.metrics
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only access to the wrap log.
    pub fn events(&self) -> &[WrapEvent] {
        &self.events
    }

    /// Drain and return the wrap log.
    pub fn drain_events(&mut self) -> Vec<WrapEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed one input action.
    pub fn apply(&mut self, action: &Action) {
        match *action {
            Action::Wheel(wheel) => self.scroll.on_wheel(wheel.pixel_y),
            Action::PointerDown { x } => self.scroll.on_pointer_down(x),
            Action::PointerMove { x } => self.scroll.on_pointer_move(x),
            Action::PointerUp => self.scroll.on_pointer_up(),
            Action::Noop => {}
        }
    }

    /// Advance one frame: scroll first, then every item in index order.
    pub fn update(&mut self) {
        let _span = tracing::trace_span!("slider_update", frame = self.frame).entered();

        self.scroll.advance();

        for item in &mut self.items {
            if let Some(wrap) = item.update(&self.scroll, self.config.wrap) {
                tracing::debug!(
                    index = item.index(),
                    from = wrap.from_base_x,
                    to = wrap.to_base_x,
                    current = self.scroll.current,
                    "item wrapped"
                );
                self.events.push(WrapEvent {
                    frame: self.frame,
                    index: item.index(),
                    from_base_x: wrap.from_base_x,
                    to_base_x: wrap.to_base_x,
                    current: self.scroll.current,
                });
            }
        }

        self.frame += 1;
    }

    /// Lay every item out for a new viewport. On error the previous layout
    /// is kept untouched.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SliderError> {
        let metrics = derive_metrics(viewport, &self.config)?;
        for item in &mut self.items {
            item.layout(viewport, metrics);
        }
        self.viewport = viewport;
        self.metrics = metrics;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            item_width = metrics.width,
            "slider resized"
        );
        Ok(())
    }

    /// Change the interpolation factor at runtime.
    pub fn set_ease(&mut self, ease: f64) -> Result<(), SliderError> {
        let config = SliderConfig {
            ease,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        self.scroll.ease = ease;
        Ok(())
    }

    /// Change the idle drift at runtime.
    pub fn set_drift_step(&mut self, drift_step: f64) -> Result<(), SliderError> {
        let config = SliderConfig {
            drift_step,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        self.scroll.drift_step = drift_step;
        Ok(())
    }

    /// Where each plane should be drawn this frame, in index order.
    pub fn transforms(&self) -> impl Iterator<Item = PlaneTransform> + '_ {
        let current = self.scroll.current;
        self.items.iter().map(move |item| PlaneTransform {
            position: Vec2::new(item.render_x(current) as f32, 0.0),
            scale: item.plane().as_vec2(),
        })
    }
}

fn derive_metrics(viewport: Viewport, config: &SliderConfig) -> Result<ItemMetrics, SliderError> {
    let usable = viewport.width.is_finite()
        && viewport.height.is_finite()
        && viewport.width > 0.0
        && viewport.height > 0.0
        && viewport.rounded_half_width() != 0;
    if !usable {
        return Err(SliderError::DegenerateViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let metrics = config
        .sizing
        .derive(viewport, config.aspect_ratio, config.gap);
    let sane = |v: f64| v.is_finite() && v > 0.0;
    if !(sane(metrics.width) && sane(metrics.plane.width) && sane(metrics.plane.height)) {
        return Err(SliderError::DegenerateItemWidth {
            width: metrics.width,
        });
    }
    Ok(metrics)
}
