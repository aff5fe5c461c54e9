use std::hint::black_box;
use std::time::Instant;

use carousel_common::Viewport;
use carousel_input::{Action, WheelDelta, normalize_wheel};
use carousel_kernel::{Slider, SliderConfig, WrapTrigger};

fn bench_update(slides: usize, wrap: WrapTrigger, frames: usize) {
    let config = SliderConfig {
        wrap,
        ..SliderConfig::default()
    };
    let mut slider = match Slider::new(slides, Viewport::new(16.0, 9.0), config) {
        Ok(s) => s,
        Err(e) => {
            println!("  skipped: {e}");
            return;
        }
    };
    let wheel = Action::Wheel(normalize_wheel(WheelDelta::Line { x: 0.0, y: 1.0 }));

    let start = Instant::now();
    for i in 0..frames {
        if i % 10 == 0 {
            slider.apply(black_box(&wheel));
        }
        slider.update();
        slider.drain_events();
    }
    let elapsed = start.elapsed();
    let per_frame = elapsed / frames as u32;
    println!("  update ({slides} slides, {wrap:?}, {frames} frames): {per_frame:?}/frame, total {elapsed:?}");
}

fn main() {
    println!("=== Slider Frame Update Benchmarks ===\n");
    for slides in [3, 12, 100, 1_000] {
        bench_update(slides, WrapTrigger::Boundary, 10_000);
        bench_update(slides, WrapTrigger::Threshold, 10_000);
    }
}
