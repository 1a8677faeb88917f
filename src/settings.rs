use rand::Rng;

/// Run-level settings: how many events and which random stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub events: usize,
    /// Run seed; a fresh one is drawn from the OS when `None`
    pub seed: Option<u64>,
}

impl Settings {
    pub fn new(events: usize, seed: Option<u64>) -> Self {
        Self { events, seed }
    }

    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_construction() {
        let settings = Settings::new(100, Some(42));
        assert_eq!(settings.events, 100);
        assert_eq!(settings.resolved_seed(), 42);
    }

    #[test]
    fn test_unseeded_settings_draw_a_seed() {
        let settings = Settings::new(1, None);
        let a = settings.resolved_seed();
        let b = settings.resolved_seed();
        // two 64-bit draws colliding is not a realistic outcome
        assert_ne!(a, b);
    }
}
