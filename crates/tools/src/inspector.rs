use carousel_common::Direction;
use carousel_kernel::{Slider, WrapTrigger};

/// Slider inspector for developer tooling.
///
/// Read-only queries against the slider for the debug overlay and the CLI.
pub struct SliderInspector;

impl SliderInspector {
    /// Produce a summary of the slider state.
    pub fn summary(slider: &Slider) -> SliderSummary {
        let scroll = slider.scroll();
        let items = slider.items();
        SliderSummary {
            frame: slider.frame(),
            slides: slider.len(),
            current: scroll.current,
            target: scroll.target,
            direction: scroll.direction,
            dragging: scroll.is_dragging(),
            item_width: slider.metrics().width,
            track_width: items.first().map_or(0.0, |i| i.track_width()),
            viewport: [slider.viewport().width, slider.viewport().height],
            wrap: slider.config().wrap,
            pending_wraps: slider.events().len(),
        }
    }

    /// Describe one item at the current scroll offset.
    pub fn inspect_item(slider: &Slider, index: usize) -> Option<ItemInfo> {
        let current = slider.scroll().current;
        slider.items().get(index).map(|item| {
            let render_x = item.render_x(current);
            let half_viewport = item.viewport().width / 2.0;
            let half_plane = item.plane().width / 2.0;
            ItemInfo {
                index,
                base_x: item.base_x(),
                render_x,
                plane: [item.plane().width, item.plane().height],
                visible: render_x + half_plane > -half_viewport
                    && render_x - half_plane < half_viewport,
            }
        })
    }

    /// Every item, in index order.
    pub fn list_items(slider: &Slider) -> Vec<ItemInfo> {
        (0..slider.len())
            .filter_map(|i| Self::inspect_item(slider, i))
            .collect()
    }
}

/// Summary of slider state for the inspector.
#[derive(Debug, Clone)]
pub struct SliderSummary {
    pub frame: u64,
    pub slides: usize,
    pub current: f64,
    pub target: f64,
    pub direction: Direction,
    pub dragging: bool,
    pub item_width: f64,
    pub track_width: f64,
    pub viewport: [f64; 2],
    pub wrap: WrapTrigger,
    pub pending_wraps: usize,
}

impl std::fmt::Display for SliderSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slider: frame={} slides={} current={:.3} target={:.3} dir={:?} drag={} \
             width={:.3} track={:.3} viewport={:.2}x{:.2} wrap={:?} pending_wraps={}",
            self.frame,
            self.slides,
            self.current,
            self.target,
            self.direction,
            self.dragging,
            self.item_width,
            self.track_width,
            self.viewport[0],
            self.viewport[1],
            self.wrap,
            self.pending_wraps
        )
    }
}

/// Detailed info about a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInfo {
    pub index: usize,
    pub base_x: f64,
    pub render_x: f64,
    pub plane: [f64; 2],
    /// Whether any part of the plane is inside the viewport.
    pub visible: bool,
}

impl std::fmt::Display for ItemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item [{}] base={:.2} x={:.2} plane=({:.2}, {:.2}){}",
            self.index,
            self.base_x,
            self.render_x,
            self.plane[0],
            self.plane[1],
            if self.visible { " visible" } else { "" }
        )
    }
}
