//! Transient session state
//!
//! Everything the display needs that is never persisted: fullscreen mode,
//! the status bar clock, the fullscreen settings overlay, scroll hints for the
//! control panel and the content refresh counter. Timers take `now` explicitly
//! so the frame loop drives them and tests can fast-forward.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveTime, Timelike};
use tracing::{debug, info, warn};

use crate::constants::{overlay, timing};
use crate::render::RenderContext;

/// Frame interval while a fullscreen request awaits confirmation
const FULLSCREEN_POLL: Duration = Duration::from_millis(100);

/// Tracks the fullscreen mode the platform confirmed, plus any request still
/// waiting for confirmation
#[derive(Debug, Clone, Default)]
pub struct FullscreenTracker {
    confirmed: bool,
    pending: Option<PendingRequest>,
}

#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    target: bool,
    requested_at: Instant,
}

impl FullscreenTracker {
    pub fn is_fullscreen(&self) -> bool {
        self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a request to enter (`true`) or leave (`false`) fullscreen.
    /// Returns whether the platform needs to be asked at all.
    pub fn request(&mut self, target: bool, now: Instant) -> bool {
        if target == self.confirmed && self.pending.is_none() {
            debug!(fullscreen = target, "Fullscreen already in requested mode");
            return false;
        }
        info!(fullscreen = target, "Requesting fullscreen change");
        self.pending = Some(PendingRequest { target, requested_at: now });
        true
    }

    /// Adopt the state reported by the platform. Changes made outside the
    /// app (Escape, window manager) are taken as-is.
    /// Returns whether the confirmed state changed.
    pub fn observe(&mut self, platform_fullscreen: bool, now: Instant) -> bool {
        if let Some(pending) = self.pending {
            if pending.target == platform_fullscreen {
                self.pending = None;
            } else if now.duration_since(pending.requested_at) >= timing::FULLSCREEN_CONFIRM_TIMEOUT {
                warn!(
                    requested = pending.target,
                    actual = platform_fullscreen,
                    "Fullscreen request was not honoured, keeping current mode"
                );
                self.pending = None;
            }
        }

        if platform_fullscreen == self.confirmed {
            return false;
        }
        info!(fullscreen = platform_fullscreen, "Fullscreen mode changed");
        self.confirmed = platform_fullscreen;
        true
    }
}

/// Displayed time of day, re-read from the local clock once per tick
#[derive(Debug, Clone)]
pub struct StatusClock {
    time: NaiveTime,
    next_tick: Instant,
}

impl StatusClock {
    pub fn new(now: Instant) -> Self {
        Self::starting_at(Local::now().time(), now)
    }

    pub fn starting_at(time: NaiveTime, now: Instant) -> Self {
        Self {
            time: truncate_to_minute(time),
            next_tick: now + timing::CLOCK_TICK,
        }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Replace the displayed time if the tick elapsed; returns whether it did
    pub fn tick(&mut self, now: Instant, read_clock: impl FnOnce() -> NaiveTime) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.time = truncate_to_minute(read_clock());
        self.next_tick = now + timing::CLOCK_TICK;
        true
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time)
}

/// Settings panel shown over the display in fullscreen
#[derive(Debug, Clone, Default)]
pub struct OverlayPanel {
    hide_at: Option<Instant>,
}

impl OverlayPanel {
    pub fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Show the panel (or keep it shown) with a fresh dwell deadline
    pub fn reveal(&mut self, now: Instant) {
        if self.hide_at.is_none() {
            debug!("Revealing fullscreen settings overlay");
        }
        self.hide_at = Some(now + timing::OVERLAY_DWELL);
    }

    /// Reveal when the pointer sits in the left-edge hover zone
    pub fn hover(&mut self, pointer_x: Option<f32>, zone_left: f32, now: Instant) {
        if let Some(x) = pointer_x
            && x >= zone_left
            && x < zone_left + overlay::HOVER_ZONE_WIDTH_PX
        {
            self.reveal(now);
        }
    }

    /// Interaction inside the panel postpones the auto-hide
    pub fn touch(&mut self, now: Instant) {
        if self.is_visible() {
            self.reveal(now);
        }
    }

    pub fn close(&mut self) {
        if self.hide_at.take().is_some() {
            debug!("Closing fullscreen settings overlay");
        }
    }

    /// Hide once the dwell elapsed; returns whether it was hidden now
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.close();
                true
            }
            _ => false,
        }
    }
}

/// Whether the control panel has content beyond its visible area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollIndicators {
    pub can_scroll_up: bool,
    pub can_scroll_down: bool,
}

impl ScrollIndicators {
    pub fn measure(offset: f32, content_height: f32, viewport_height: f32) -> Self {
        Self {
            can_scroll_up: offset > 0.0,
            can_scroll_down: offset < content_height - viewport_height - 1.0,
        }
    }
}

/// Session state owned by the application root
#[derive(Debug, Clone)]
pub struct Session {
    pub fullscreen: FullscreenTracker,
    pub clock: StatusClock,
    pub overlay: OverlayPanel,
    pub scroll: ScrollIndicators,
    refresh_key: u32,
}

impl Session {
    pub fn new(now: Instant) -> Self {
        Self::with_clock(StatusClock::new(now))
    }

    pub fn with_clock(clock: StatusClock) -> Self {
        Self {
            fullscreen: FullscreenTracker::default(),
            clock,
            overlay: OverlayPanel::default(),
            scroll: ScrollIndicators::default(),
            refresh_key: 0,
        }
    }

    /// Force the content surface to reload
    pub fn refresh_content(&mut self) {
        self.refresh_key = self.refresh_key.wrapping_add(1);
        info!(refresh_key = self.refresh_key, "Refreshing content surface");
    }

    /// Adopt the platform fullscreen state; leaving fullscreen hides the overlay
    pub fn sync_fullscreen(&mut self, platform_fullscreen: bool, now: Instant) -> bool {
        let changed = self.fullscreen.observe(platform_fullscreen, now);
        if changed && !self.fullscreen.is_fullscreen() {
            self.overlay.close();
        }
        changed
    }

    /// Advance the clock and overlay timers
    pub fn tick(&mut self, now: Instant) {
        self.clock.tick(now, || Local::now().time());
        self.overlay.expire(now);
    }

    /// Earliest instant a timer needs the frame loop to run again
    pub fn next_deadline(&self, now: Instant) -> Instant {
        let mut deadline = self.clock.next_tick();
        if let Some(hide_at) = self.overlay.hide_deadline() {
            deadline = deadline.min(hide_at);
        }
        if self.fullscreen.is_pending() {
            deadline = deadline.min(now + FULLSCREEN_POLL);
        }
        deadline
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            is_fullscreen: self.fullscreen.is_fullscreen(),
            refresh_key: self.refresh_key,
            ..RenderContext::new(self.clock.time())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn test_fullscreen_request_confirmed() {
        let start = Instant::now();
        let mut tracker = FullscreenTracker::default();
        assert!(tracker.request(true, start));
        assert!(tracker.is_pending());
        assert!(!tracker.is_fullscreen());

        assert!(tracker.observe(true, start + Duration::from_millis(50)));
        assert!(tracker.is_fullscreen());
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_fullscreen_request_times_out() {
        let start = Instant::now();
        let mut tracker = FullscreenTracker::default();
        tracker.request(true, start);

        assert!(!tracker.observe(false, start + Duration::from_millis(500)));
        assert!(tracker.is_pending());

        assert!(!tracker.observe(false, start + Duration::from_secs(3)));
        assert!(!tracker.is_pending());
        assert!(!tracker.is_fullscreen());
    }

    #[test]
    fn test_fullscreen_exit_outside_app() {
        let start = Instant::now();
        let mut tracker = FullscreenTracker::default();
        tracker.request(true, start);
        tracker.observe(true, start);

        // Escape pressed, no request from us
        assert!(tracker.observe(false, start + Duration::from_secs(10)));
        assert!(!tracker.is_fullscreen());
    }

    #[test]
    fn test_redundant_request_is_skipped() {
        let mut tracker = FullscreenTracker::default();
        assert!(!tracker.request(false, Instant::now()));
    }

    #[test]
    fn test_clock_ticks_once_per_minute() {
        let start = Instant::now();
        let mut clock = StatusClock::starting_at(at(9, 41, 37), start);
        assert_eq!(clock.time(), at(9, 41, 0));

        assert!(!clock.tick(start + Duration::from_secs(30), || at(9, 42, 7)));
        assert_eq!(clock.time(), at(9, 41, 0));

        assert!(clock.tick(start + Duration::from_secs(60), || at(9, 42, 7)));
        assert_eq!(clock.time(), at(9, 42, 0));
        assert_eq!(clock.next_tick(), start + Duration::from_secs(120));
    }

    #[test]
    fn test_overlay_auto_hides_after_dwell() {
        let start = Instant::now();
        let mut panel = OverlayPanel::default();
        panel.hover(Some(10.0), 0.0, start);
        assert!(panel.is_visible());

        assert!(!panel.expire(start + Duration::from_secs(2)));
        assert!(panel.expire(start + Duration::from_secs(3)));
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_overlay_newer_reveal_replaces_deadline() {
        let start = Instant::now();
        let mut panel = OverlayPanel::default();
        panel.reveal(start);
        panel.touch(start + Duration::from_secs(2));

        assert!(!panel.expire(start + Duration::from_secs(4)));
        assert!(panel.expire(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_overlay_hover_zone_bounds() {
        let now = Instant::now();
        let mut panel = OverlayPanel::default();
        panel.hover(Some(30.0), 0.0, now);
        assert!(!panel.is_visible());
        panel.hover(None, 0.0, now);
        assert!(!panel.is_visible());
        panel.hover(Some(110.0), 100.0, now);
        assert!(panel.is_visible());
    }

    #[test]
    fn test_touch_does_not_reveal_hidden_panel() {
        let mut panel = OverlayPanel::default();
        panel.touch(Instant::now());
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_leaving_fullscreen_closes_overlay() {
        let start = Instant::now();
        let mut session = Session::with_clock(StatusClock::starting_at(at(12, 0, 0), start));
        session.fullscreen.request(true, start);
        session.sync_fullscreen(true, start);
        session.overlay.reveal(start);

        assert!(session.sync_fullscreen(false, start + Duration::from_secs(1)));
        assert!(!session.overlay.is_visible());
        assert!(!session.render_context().is_fullscreen);
    }

    #[test]
    fn test_scroll_indicators() {
        assert_eq!(
            ScrollIndicators::measure(0.0, 1200.0, 800.0),
            ScrollIndicators { can_scroll_up: false, can_scroll_down: true }
        );
        assert_eq!(
            ScrollIndicators::measure(399.5, 1200.0, 800.0),
            ScrollIndicators { can_scroll_up: true, can_scroll_down: false }
        );
        assert_eq!(ScrollIndicators::measure(0.0, 500.0, 800.0), ScrollIndicators::default());
    }

    #[test]
    fn test_next_deadline_picks_earliest_timer() {
        let start = Instant::now();
        let mut session = Session::with_clock(StatusClock::starting_at(at(12, 0, 0), start));
        assert_eq!(session.next_deadline(start), start + Duration::from_secs(60));

        session.overlay.reveal(start);
        assert_eq!(session.next_deadline(start), start + Duration::from_secs(3));

        session.fullscreen.request(true, start);
        assert_eq!(session.next_deadline(start), start + Duration::from_millis(100));
    }

    #[test]
    fn test_refresh_content_increments_key() {
        let mut session = Session::with_clock(StatusClock::starting_at(at(12, 0, 0), Instant::now()));
        assert_eq!(session.render_context().refresh_key, 0);
        session.refresh_content();
        session.refresh_content();
        assert_eq!(session.render_context().refresh_key, 2);
    }
}
