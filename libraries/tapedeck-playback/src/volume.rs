//! Volume control with logarithmic scaling
//!
//! The volume slider works in percent; the media surface takes a linear
//! gain. Percent is mapped to -60 dB..0 dB so the slider feels even.

/// Lowest level of the slider range in dB
const FLOOR_DB: f32 = -60.0;

/// Volume slider state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Slider level (0-100)
    level: u8,

    /// Mute state (preserves level)
    muted: bool,
}

impl Volume {
    /// Create a volume at `level` percent (clamped to 100)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set slider level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Slider level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute output (preserves level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute output
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain for the media surface
    ///
    /// 0% is silence, 100% is unity. The mute flag is sent to the surface
    /// separately, so this ignores it.
    pub fn gain(&self) -> f32 {
        if self.level == 0 {
            return 0.0;
        }
        let db = (100.0 - self.level as f32) / 100.0 * FLOOR_DB;
        10.0_f32.powf(db / 20.0)
    }

    /// Whether anything can be heard
    pub fn is_audible(&self) -> bool {
        !self.muted && self.level > 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_clamped() {
        let mut vol = Volume::new(150);
        assert_eq!(vol.level(), 100);

        vol.set_level(42);
        assert_eq!(vol.level(), 42);

        vol.set_level(255);
        assert_eq!(vol.level(), 100);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(80);
        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 80);
        assert!(!vol.is_audible());

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert!(vol.is_audible());
    }

    #[test]
    fn gain_mapping() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert!((Volume::new(100).gain() - 1.0).abs() < 0.001);

        // 50% is -30 dB
        assert!((Volume::new(50).gain() - 0.0316).abs() < 0.001);

        // 80% is -12 dB
        assert!((Volume::new(80).gain() - 0.251).abs() < 0.01);
    }

    #[test]
    fn gain_is_monotonic() {
        let gains: Vec<f32> = (0..=100).map(|level| Volume::new(level).gain()).collect();
        assert!(gains.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn default_is_full_volume() {
        let vol = Volume::default();
        assert_eq!(vol.level(), 100);
        assert!(!vol.is_muted());
    }
}
