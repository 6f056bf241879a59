//! Frame statistics system
//!
//! Counts frames and samples the frame rate once per second. The samples
//! feed a small bar graph drawn in the top-left corner and the window title.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use xr_room_render::OverlayRect;

use crate::config::StatsConfig;

/// Interval between FPS samples
const SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);

// Panel layout in unscaled pixels
const PANEL_WIDTH: f32 = 80.0;
const PANEL_HEIGHT: f32 = 48.0;
const GRAPH_X: f32 = 3.0;
const GRAPH_Y: f32 = 15.0;
const GRAPH_WIDTH: f32 = 74.0;
const GRAPH_HEIGHT: f32 = 30.0;

const PANEL_COLOR: [f32; 4] = [0.0, 0.0, 0.13, 0.9];
const GRAPH_COLOR: [f32; 4] = [0.0, 0.05, 0.2, 0.9];
const BAR_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Frame counter and FPS history
pub struct FrameStats {
    /// Start of the current sampling window
    window_start: Instant,
    /// Time of the previous `update`
    last_update: Instant,
    frames: u32,
    fps: Option<f32>,
    min_fps: f32,
    max_fps: f32,
    frame_ms: f32,
    history: VecDeque<f32>,
    capacity: usize,
    visible: bool,
}

impl FrameStats {
    pub fn new(config: &StatsConfig, now: Instant) -> Self {
        let capacity = config.history.max(1);
        Self {
            window_start: now,
            last_update: now,
            frames: 0,
            fps: None,
            min_fps: f32::INFINITY,
            max_fps: 0.0,
            frame_ms: 0.0,
            history: VecDeque::with_capacity(capacity),
            capacity,
            visible: config.visible,
        }
    }

    /// Record a frame ending at `now`
    ///
    /// Returns the new FPS sample when a sampling window closed this frame.
    pub fn update(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        self.frame_ms = now.saturating_duration_since(self.last_update).as_secs_f32() * 1000.0;
        self.last_update = now;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < SAMPLE_INTERVAL {
            return None;
        }

        let elapsed_ms = elapsed.as_secs_f32() * 1000.0;
        let fps = self.frames as f32 * 1000.0 / elapsed_ms;
        self.record(fps);

        self.window_start = now;
        self.frames = 0;
        Some(fps)
    }

    fn record(&mut self, fps: f32) {
        self.fps = Some(fps);
        self.min_fps = self.min_fps.min(fps);
        self.max_fps = self.max_fps.max(fps);

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(fps);
    }

    /// Latest FPS sample, once a full second has passed
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }

    /// (min, max) FPS observed so far
    pub fn range(&self) -> Option<(f32, f32)> {
        self.fps.map(|_| (self.min_fps, self.max_fps))
    }

    /// Duration of the last frame in milliseconds
    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the overlay, returning the new state
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        log::info!("Stats overlay: {}", if self.visible { "ON" } else { "OFF" });
        self.visible
    }

    /// Short text for the window title, e.g. "60 FPS (58-61) 16.7 ms"
    pub fn summary(&self) -> Option<String> {
        let fps = self.fps?;
        Some(format!(
            "{:.0} FPS ({:.0}-{:.0}) {:.1} ms",
            fps, self.min_fps, self.max_fps, self.frame_ms
        ))
    }

    /// Panel rectangles for the top-left corner, sized by `scale` (the window scale factor)
    ///
    /// Empty while hidden. Bars are one per history sample, newest on the
    /// right, with heights relative to the highest FPS seen.
    pub fn overlay_rects(&self, scale: f32) -> Vec<OverlayRect> {
        if !self.visible {
            return Vec::new();
        }

        let mut rects = Vec::with_capacity(self.history.len() + 2);
        rects.push(OverlayRect::new(0.0, 0.0, PANEL_WIDTH * scale, PANEL_HEIGHT * scale, PANEL_COLOR));
        rects.push(OverlayRect::new(
            GRAPH_X * scale,
            GRAPH_Y * scale,
            GRAPH_WIDTH * scale,
            GRAPH_HEIGHT * scale,
            GRAPH_COLOR,
        ));

        if self.max_fps <= 0.0 {
            return rects;
        }

        let bar_width = GRAPH_WIDTH / self.capacity as f32;
        let first_slot = self.capacity - self.history.len();
        for (i, fps) in self.history.iter().enumerate() {
            let height = (fps / self.max_fps).clamp(0.0, 1.0) * GRAPH_HEIGHT;
            let x = GRAPH_X + (first_slot + i) as f32 * bar_width;
            let y = GRAPH_Y + GRAPH_HEIGHT - height;
            rects.push(OverlayRect::new(
                x * scale,
                y * scale,
                bar_width * scale,
                height * scale,
                BAR_COLOR,
            ));
        }
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> (FrameStats, Instant) {
        let start = Instant::now();
        (FrameStats::new(&StatsConfig::default(), start), start)
    }

    #[test]
    fn test_no_sample_before_one_second() {
        let (mut stats, start) = stats();
        for i in 1..10 {
            assert_eq!(stats.update(start + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(stats.fps(), None);
        assert!(stats.summary().is_none());
    }

    #[test]
    fn test_fps_sample() {
        let (mut stats, start) = stats();
        let mut sample = None;
        // 60 frames at 1/60 s
        for i in 1..=60u64 {
            sample = stats.update(start + Duration::from_micros(i * 16_667));
        }
        let fps = sample.expect("sample after one second");
        assert!((fps - 60.0).abs() < 0.1, "fps = {}", fps);
        assert!((stats.frame_ms() - 16.667).abs() < 0.01);
        assert_eq!(stats.history().count(), 1);
    }

    #[test]
    fn test_min_max_tracking() {
        let (mut stats, start) = stats();
        // 30 frames in the first second, 10 in the second
        let mut t = start;
        for _ in 0..30 {
            t += Duration::from_millis(1000 / 30 + 1);
            stats.update(t);
        }
        for _ in 0..10 {
            t += Duration::from_millis(100);
            stats.update(t);
        }

        let (min, max) = stats.range().unwrap();
        assert!(min < max);
        assert!(max <= 30.0 && max > 25.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let config = StatsConfig {
            visible: true,
            history: 3,
        };
        let start = Instant::now();
        let mut stats = FrameStats::new(&config, start);
        for i in 1..=5u64 {
            stats.update(start + Duration::from_secs(i));
        }
        assert_eq!(stats.history().count(), 3);
    }

    #[test]
    fn test_overlay_rects() {
        let (mut stats, start) = stats();
        // Panel and graph background only before any sample
        assert_eq!(stats.overlay_rects(1.0).len(), 2);

        stats.update(start + Duration::from_secs(1));
        stats.update(start + Duration::from_secs(2));
        let rects = stats.overlay_rects(1.0);
        assert_eq!(rects.len(), 4);

        // Every bar fits in the graph area
        for bar in &rects[2..] {
            assert!(bar.y >= GRAPH_Y - 1e-4);
            assert!(bar.y + bar.height <= GRAPH_Y + GRAPH_HEIGHT + 1e-4);
        }

        stats.toggle_visible();
        assert!(stats.overlay_rects(1.0).is_empty());
    }

    #[test]
    fn test_overlay_scaled() {
        let (stats, _) = stats();
        let rects = stats.overlay_rects(2.0);
        assert_eq!(rects[0].width, 160.0);
        assert_eq!(rects[0].height, 96.0);
    }
}
