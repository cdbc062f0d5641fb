/// A linear one-shot attack/release envelope evaluated by elapsed time: level ramps
/// 0 to `peak` over `attack_s`, back down to 0 at `duration_s`, and stays 0 from
/// then on. `duration_s` must exceed `attack_s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRelease {
    pub attack_s: f32,
    pub peak: f32,
    pub duration_s: f32,
}

impl AttackRelease {
    /// Envelope of a single tapped wheel key.
    pub const TAP: Self = Self {
        attack_s: 0.01,
        peak: 0.28,
        duration_s: 0.6,
    };

    /// Envelope of each note in a strummed chord, with a slightly softer attack
    /// than a tapped key.
    pub const STRUM: Self = Self {
        attack_s: 0.03,
        peak: 0.28,
        duration_s: 0.6,
    };

    pub const fn with_duration_s(self, duration_s: f32) -> Self {
        Self { duration_s, ..self }
    }

    pub fn level_at(&self, t_s: f32) -> f32 {
        if t_s < 0.0 || t_s >= self.duration_s {
            0.0
        } else if t_s < self.attack_s {
            self.peak * (t_s / self.attack_s)
        } else {
            self.peak
                * (1.0
                    - ((t_s - self.attack_s)
                        / (self.duration_s - self.attack_s)))
        }
    }
}

impl Default for AttackRelease {
    fn default() -> Self {
        Self::TAP
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn silent_at_the_start() {
        assert_eq!(AttackRelease::TAP.level_at(0.0), 0.0);
    }

    #[test]
    fn peaks_at_the_end_of_the_attack() {
        assert_eq!(AttackRelease::TAP.level_at(0.01), 0.28);
        assert_eq!(AttackRelease::STRUM.level_at(0.03), 0.28);
    }

    #[test]
    fn silent_from_the_duration_onwards() {
        assert_eq!(AttackRelease::TAP.level_at(0.6), 0.0);
        assert_eq!(AttackRelease::TAP.level_at(10.0), 0.0);
    }

    #[test]
    fn silent_before_time_zero() {
        assert_eq!(AttackRelease::TAP.level_at(-0.1), 0.0);
    }

    #[test]
    fn release_ramps_down_linearly() {
        let envelope = AttackRelease {
            attack_s: 0.1,
            peak: 1.0,
            duration_s: 1.1,
        };
        assert!((envelope.level_at(0.6) - 0.5).abs() < 1e-6);
        assert!(envelope.level_at(0.9) < envelope.level_at(0.8));
    }

    #[test]
    fn attack_ramps_up_linearly() {
        let envelope = AttackRelease::TAP;
        assert!((envelope.level_at(0.005) - 0.14).abs() < 1e-6);
    }

    #[test]
    fn duration_override_keeps_the_attack() {
        let envelope = AttackRelease::STRUM.with_duration_s(1.0);
        assert_eq!(envelope.attack_s, 0.03);
        assert_eq!(envelope.duration_s, 1.0);
        assert_eq!(envelope.level_at(1.0), 0.0);
    }
}
