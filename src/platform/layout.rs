//! Canvas sizing for desktop and mobile windows

/// Windows at most this wide use the mobile layout
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
/// Mobile canvas aspect (width / height)
pub const MOBILE_ASPECT: f32 = 9.0 / 16.0;
/// Mobile canvas may use at most this share of the window height
pub const MOBILE_MAX_HEIGHT_SHARE: f32 = 0.8;
/// Sprites are drawn smaller on mobile
pub const MOBILE_SPRITE_SCALE: f32 = 0.7;

/// CSS size of the canvas and how arena coordinates map onto it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub css_width: f32,
    pub css_height: f32,
    pub mobile: bool,
}

impl CanvasLayout {
    /// CSS pixels per arena unit horizontally
    pub fn scale(&self, arena_width: f32) -> f32 {
        self.css_width / arena_width
    }

    /// Multiplier for DOM sprite images
    pub fn sprite_scale(&self, arena_width: f32) -> f32 {
        if self.mobile {
            self.scale(arena_width) * MOBILE_SPRITE_SCALE
        } else {
            1.0
        }
    }
}

/// Pick the canvas CSS size for a window.
///
/// Desktop keeps the arena's native size. Mobile fits a 9:16 box to the window
/// width, shrinking it when it would exceed 80% of the window height.
pub fn canvas_layout(
    window_width: f32,
    window_height: f32,
    arena_width: f32,
    arena_height: f32,
) -> CanvasLayout {
    if window_width > MOBILE_MAX_WIDTH {
        return CanvasLayout {
            css_width: arena_width,
            css_height: arena_height,
            mobile: false,
        };
    }

    let mut width = window_width;
    let mut height = window_width / MOBILE_ASPECT;
    let max_height = window_height * MOBILE_MAX_HEIGHT_SHARE;
    if height > max_height {
        height = max_height;
        width = height * MOBILE_ASPECT;
    }

    CanvasLayout {
        css_width: width,
        css_height: height,
        mobile: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_keeps_arena_size() {
        let layout = canvas_layout(1280.0, 900.0, 800.0, 600.0);
        assert!(!layout.mobile);
        assert_eq!((layout.css_width, layout.css_height), (800.0, 600.0));
        assert_eq!(layout.sprite_scale(800.0), 1.0);
    }

    #[test]
    fn test_mobile_fits_width() {
        let layout = canvas_layout(360.0, 1000.0, 800.0, 600.0);
        assert!(layout.mobile);
        assert_eq!(layout.css_width, 360.0);
        assert_eq!(layout.css_height, 640.0);
        assert!((layout.scale(800.0) - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_mobile_short_window_limits_height() {
        let layout = canvas_layout(400.0, 600.0, 800.0, 600.0);
        assert!(layout.mobile);
        assert_eq!(layout.css_height, 480.0);
        assert_eq!(layout.css_width, 270.0);
    }

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(canvas_layout(768.0, 1024.0, 800.0, 600.0).mobile);
        assert!(!canvas_layout(769.0, 1024.0, 800.0, 600.0).mobile);
    }
}
