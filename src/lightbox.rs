//! Gallery lightbox controller.
//!
//! A per-detail-view state machine deciding which gallery image is
//! enlarged, plus the platform side effects that go with it: background
//! scroll lock, and on touch devices fullscreen presentation with the
//! screen locked to landscape.
//!
//! ## States
//!
//! ```text
//!                open(i)                  next / prev
//!   Closed ────────────────▶ Open(i) ◀──────────────────┐
//!     ▲                        │  └─────────────────────┘
//!     │      finish_close      │ request_close
//!     ├────────────────────────┤   (not fullscreen)
//!     │                        │
//!     │   did_exit_fullscreen  ▼ request_close (touch + fullscreen)
//!     └──────────────── Open(i), closing
//! ```
//!
//! ## Closing
//!
//! Closing is two events. [`Lightbox::request_close`] asks the platform to
//! leave fullscreen when the lightbox entered it; the state only becomes
//! `Closed` when the platform reports the exit through
//! [`Lightbox::did_exit_fullscreen`]. That same event fires for exits the
//! lightbox did not ask for (a back gesture, the OS leaving fullscreen), so
//! every close runs through one path, and the orientation lock is only
//! released after fullscreen has really ended.
//!
//! Without fullscreen (desktop, or the request was refused) `request_close`
//! closes immediately.
//!
//! ## Failures
//!
//! Fullscreen and orientation requests can be refused or unsupported. The
//! error is logged and the feature skipped; the lightbox still opens,
//! navigates and closes.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("request denied: {0}")]
    Denied(String),
    #[error("not supported: {0}")]
    Unsupported(String),
}

/// Platform capabilities the lightbox drives.
///
/// `request_fullscreen` and `exit_fullscreen` start a change; completion of
/// an exit is reported back by calling [`Lightbox::did_exit_fullscreen`].
pub trait Platform {
    fn is_touch(&self) -> bool;
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), PlatformError>;
    fn exit_fullscreen(&mut self) -> Result<(), PlatformError>;
    fn lock_landscape(&mut self) -> Result<(), PlatformError>;
    fn unlock_orientation(&mut self);
    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open { index: usize },
}

/// Which way the enter animation slides. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// Forward when `next` is the image right after `prev` (wrapping).
pub fn derive_direction(prev: usize, next: usize, len: usize) -> Direction {
    if len > 0 && (prev + 1) % len == next {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

pub struct Lightbox<P: Platform> {
    platform: P,
    len: usize,
    swipe_threshold: f64,
    state: LightboxState,
    direction: Option<Direction>,
    entered_fullscreen: bool,
    orientation_locked: bool,
    scroll_locked: bool,
    closing: bool,
    touch_start_x: Option<f64>,
    torn_down: bool,
}

impl<P: Platform> Lightbox<P> {
    /// A closed lightbox over a gallery of `len` images.
    pub fn new(platform: P, len: usize, swipe_threshold: f64) -> Self {
        Self {
            platform,
            len,
            swipe_threshold,
            state: LightboxState::Closed,
            direction: None,
            entered_fullscreen: false,
            orientation_locked: false,
            scroll_locked: false,
            closing: false,
            touch_start_x: None,
            torn_down: false,
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            LightboxState::Open { index } => Some(index),
            LightboxState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    /// A close has been requested and is waiting for the platform.
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Enlarge image `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) -> LightboxState {
        if index >= self.len {
            debug!(index, len = self.len, "ignoring open of missing image");
            return self.state;
        }
        if let LightboxState::Open { index: prev } = self.state {
            self.go_to(prev, index);
            return self.state;
        }

        self.state = LightboxState::Open { index };
        self.direction = None;
        self.closing = false;
        self.torn_down = false;
        if !self.scroll_locked {
            self.platform.set_scroll_locked(true);
            self.scroll_locked = true;
        }
        if self.platform.is_touch() {
            self.enter_fullscreen();
        }
        debug!(index, "lightbox opened");
        self.state
    }

    fn enter_fullscreen(&mut self) {
        if let Err(e) = self.platform.request_fullscreen() {
            warn!(error = %e, "fullscreen unavailable, continuing inline");
            return;
        }
        self.entered_fullscreen = true;
        match self.platform.lock_landscape() {
            Ok(()) => self.orientation_locked = true,
            Err(e) => warn!(error = %e, "orientation lock unavailable"),
        }
    }

    fn go_to(&mut self, prev: usize, next: usize) {
        self.direction = Some(derive_direction(prev, next, self.len));
        self.state = LightboxState::Open { index: next };
        debug!(from = prev, to = next, "lightbox navigated");
    }

    /// Show the following image, wrapping to the first. No-op when closed.
    pub fn next(&mut self) -> LightboxState {
        if let LightboxState::Open { index } = self.state {
            self.go_to(index, (index + 1) % self.len);
        }
        self.state
    }

    /// Show the preceding image, wrapping to the last. No-op when closed.
    pub fn prev(&mut self) -> LightboxState {
        if let LightboxState::Open { index } = self.state {
            self.go_to(index, (index + self.len - 1) % self.len);
        }
        self.state
    }

    pub fn handle_key(&mut self, key: Key) -> LightboxState {
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
            Key::Escape => self.request_close(),
            Key::Other => self.state,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        if self.is_open() {
            self.touch_start_x = Some(x);
        }
    }

    /// Finish a swipe. A leftward swipe past the threshold goes forward,
    /// a rightward one goes back; shorter movements are taps.
    pub fn touch_end(&mut self, x: f64) -> LightboxState {
        let Some(start) = self.touch_start_x.take() else {
            return self.state;
        };
        let dx = x - start;
        if dx < -self.swipe_threshold {
            self.next()
        } else if dx > self.swipe_threshold {
            self.prev()
        } else {
            self.state
        }
    }

    pub fn backdrop_click(&mut self) -> LightboxState {
        self.request_close()
    }

    /// Ask to close. Closes now unless fullscreen has to be left first, in
    /// which case the close completes on [`Self::did_exit_fullscreen`].
    pub fn request_close(&mut self) -> LightboxState {
        if !self.is_open() || self.closing {
            return self.state;
        }
        let awaiting_platform = self.platform.is_touch()
            && self.entered_fullscreen
            && self.platform.is_fullscreen();
        if !awaiting_platform {
            self.finish_close();
            return self.state;
        }
        self.closing = true;
        debug!("lightbox close requested, leaving fullscreen");
        if let Err(e) = self.platform.exit_fullscreen() {
            warn!(error = %e, "could not leave fullscreen, closing anyway");
            self.entered_fullscreen = false;
            self.finish_close();
        }
        self.state
    }

    /// The platform reports fullscreen has ended, whoever initiated it.
    pub fn did_exit_fullscreen(&mut self) -> LightboxState {
        self.entered_fullscreen = false;
        if self.is_open() {
            self.finish_close();
        }
        self.state
    }

    fn finish_close(&mut self) {
        self.state = LightboxState::Closed;
        self.closing = false;
        self.direction = None;
        self.touch_start_x = None;
        if self.orientation_locked {
            self.platform.unlock_orientation();
            self.orientation_locked = false;
        }
        if self.scroll_locked {
            self.platform.set_scroll_locked(false);
            self.scroll_locked = false;
        }
        debug!("lightbox closed");
    }

    /// Revert every side effect, whatever state the controller is in.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if self.entered_fullscreen && self.platform.is_fullscreen() {
            if let Err(e) = self.platform.exit_fullscreen() {
                warn!(error = %e, "could not leave fullscreen on teardown");
            }
        }
        self.entered_fullscreen = false;
        if self.orientation_locked {
            self.platform.unlock_orientation();
            self.orientation_locked = false;
        }
        self.platform.set_scroll_locked(false);
        self.scroll_locked = false;
        self.state = LightboxState::Closed;
        self.closing = false;
        self.direction = None;
        self.touch_start_x = None;
    }
}

impl<P: Platform> Drop for Lightbox<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// A platform without a screen to manage: tracks the requested state and
/// grants every request. Fullscreen exits take effect immediately, so a
/// driver reports them by calling `did_exit_fullscreen` once
/// `is_fullscreen` turns false.
#[derive(Debug, Default, Clone)]
pub struct HeadlessPlatform {
    pub touch: bool,
    pub fullscreen: bool,
    pub orientation_locked: bool,
    pub scroll_locked: bool,
}

impl HeadlessPlatform {
    pub fn new(touch: bool) -> Self {
        Self {
            touch,
            ..Self::default()
        }
    }
}

impl Platform for HeadlessPlatform {
    fn is_touch(&self) -> bool {
        self.touch
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        self.fullscreen = false;
        Ok(())
    }

    fn lock_landscape(&mut self) -> Result<(), PlatformError> {
        self.orientation_locked = true;
        Ok(())
    }

    fn unlock_orientation(&mut self) {
        self.orientation_locked = false;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
