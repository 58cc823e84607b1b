// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The per-requester rate limiter with four discrete tiers.

use std::time::Duration;

/// Discrete rate-limit settings bounding how frequently a requester may
/// initiate loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownTier {
    /// No rate limiting.
    #[default]
    Off,
    /// One accepted request per 5 seconds.
    Short,
    /// One accepted request per 10 seconds.
    Medium,
    /// One accepted request per 30 seconds.
    Long,
}

impl CooldownTier {
    /// The tier's cooldown duration.
    pub fn duration(self) -> Duration {
        match self {
            CooldownTier::Off => Duration::ZERO,
            CooldownTier::Short => Duration::from_secs(5),
            CooldownTier::Medium => Duration::from_secs(10),
            CooldownTier::Long => Duration::from_secs(30),
        }
    }

    /// Maps an operator-surface index to a tier, clamping out-of-range
    /// values to the longest tier.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => CooldownTier::Off,
            1 => CooldownTier::Short,
            2 => CooldownTier::Medium,
            _ => CooldownTier::Long,
        }
    }

    /// The operator-surface index of this tier.
    pub fn index(self) -> usize {
        match self {
            CooldownTier::Off => 0,
            CooldownTier::Short => 1,
            CooldownTier::Medium => 2,
            CooldownTier::Long => 3,
        }
    }
}

/// Stateless policy over caller-supplied timestamps.
///
/// All timestamps are offsets from session start; the policy never reads a
/// clock. `ready_at` only ever advances while a tier is fixed: it moves
/// exclusively on accepted requests, to `now + duration`, and acceptance
/// requires `now >= ready_at`.
#[derive(Debug, Clone, Default)]
pub struct CooldownPolicy {
    tier: CooldownTier,
    ready_at: Duration,
}

impl CooldownPolicy {
    /// Creates a policy with the tier off.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected tier.
    pub fn tier(&self) -> CooldownTier {
        self.tier
    }

    /// Selects a tier. An in-progress cooldown window is left untouched.
    pub fn set_tier(&mut self, tier: CooldownTier) {
        self.tier = tier;
    }

    /// Attempts to accept a request at time `now`.
    ///
    /// A rejected attempt does not start or extend the window. An accepted
    /// attempt with a non-Off tier closes the window until
    /// `now + tier.duration()`.
    pub fn try_accept(&mut self, now: Duration) -> bool {
        if self.tier == CooldownTier::Off {
            return true;
        }
        if now < self.ready_at {
            return false;
        }
        self.ready_at = now + self.tier.duration();
        true
    }

    /// Time left until the next request will be accepted.
    pub fn remaining(&self, now: Duration) -> Duration {
        if self.tier == CooldownTier::Off {
            return Duration::ZERO;
        }
        self.ready_at.saturating_sub(now)
    }

    /// Returns `true` while a non-Off tier's window is closed.
    pub fn is_active(&self, now: Duration) -> bool {
        self.tier != CooldownTier::Off && now < self.ready_at
    }

    /// Progress of the current window in `[0, 1]`, for UI feedback.
    ///
    /// `1.0` when the tier is off or the window is open.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.tier == CooldownTier::Off {
            return 1.0;
        }
        let total = self.tier.duration().as_secs_f32();
        let remaining = self.remaining(now).as_secs_f32();
        (1.0 - remaining / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn off_tier_always_accepts() {
        let mut policy = CooldownPolicy::new();
        for n in 0..5 {
            assert!(policy.try_accept(secs(n)));
        }
        assert!(!policy.is_active(secs(0)));
        assert_eq!(policy.progress(secs(0)), 1.0);
    }

    #[test]
    fn window_closes_exactly_for_the_tier_duration() {
        let mut policy = CooldownPolicy::new();
        policy.set_tier(CooldownTier::Short);

        assert!(policy.try_accept(secs(0)));
        assert!(!policy.try_accept(secs(2)));
        assert!(!policy.try_accept(secs(4)));
        assert!(policy.try_accept(secs(5)));
    }

    #[test]
    fn rejection_does_not_extend_the_window() {
        let mut policy = CooldownPolicy::new();
        policy.set_tier(CooldownTier::Medium);

        assert!(policy.try_accept(secs(0)));
        // Hammering during the window must not push ready_at past t=10.
        for n in 1..10 {
            assert!(!policy.try_accept(secs(n)));
        }
        assert!(policy.try_accept(secs(10)));
    }

    #[test]
    fn ready_at_is_monotonic_for_a_fixed_tier() {
        let mut policy = CooldownPolicy::new();
        policy.set_tier(CooldownTier::Short);

        assert!(policy.try_accept(secs(0)));
        assert_eq!(policy.remaining(secs(0)), secs(5));
        assert!(policy.try_accept(secs(7)));
        assert_eq!(policy.remaining(secs(7)), secs(5));
    }

    #[test]
    fn progress_reports_window_fraction() {
        let mut policy = CooldownPolicy::new();
        policy.set_tier(CooldownTier::Medium);

        assert!(policy.try_accept(secs(0)));
        assert_eq!(policy.progress(secs(0)), 0.0);
        assert!((policy.progress(secs(5)) - 0.5).abs() < 1e-6);
        assert_eq!(policy.progress(secs(10)), 1.0);
        assert_eq!(policy.progress(secs(20)), 1.0);
    }

    #[test]
    fn index_mapping_clamps() {
        assert_eq!(CooldownTier::from_index(0), CooldownTier::Off);
        assert_eq!(CooldownTier::from_index(1), CooldownTier::Short);
        assert_eq!(CooldownTier::from_index(2), CooldownTier::Medium);
        assert_eq!(CooldownTier::from_index(3), CooldownTier::Long);
        assert_eq!(CooldownTier::from_index(99), CooldownTier::Long);
        assert_eq!(CooldownTier::Long.index(), 3);
    }
}
