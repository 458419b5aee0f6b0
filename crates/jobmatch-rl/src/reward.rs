//! Reward sources for simulated updates

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use jobmatch_core::{JobMatchError, Result, Reward};

/// Supplies one reward per (state, action) update
pub trait RewardSource {
    fn next_reward(&mut self, state: &str, action: &str) -> Reward;
}

/// Uniform integer rewards in a closed range
#[derive(Debug, Clone)]
pub struct UniformReward<R = StdRng> {
    low: i64,
    high: i64,
    rng: R,
}

impl UniformReward<StdRng> {
    /// Rewards in `[low, high]` from an entropy-seeded generator
    pub fn new(low: i64, high: i64) -> Result<Self> {
        Self::with_rng(low, high, StdRng::from_entropy())
    }

    /// Rewards in `[low, high]`, reproducible for a given seed
    pub fn seeded(low: i64, high: i64, seed: u64) -> Result<Self> {
        Self::with_rng(low, high, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformReward<R> {
    pub fn with_rng(low: i64, high: i64, rng: R) -> Result<Self> {
        if low > high {
            return Err(JobMatchError::InvalidArgument(format!(
                "reward range is empty: [{low}, {high}]"
            )));
        }
        Ok(Self { low, high, rng })
    }

    pub fn range(&self) -> (i64, i64) {
        (self.low, self.high)
    }
}

impl Default for UniformReward<StdRng> {
    fn default() -> Self {
        Self {
            low: -10,
            high: 10,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> RewardSource for UniformReward<R> {
    fn next_reward(&mut self, _state: &str, _action: &str) -> Reward {
        self.rng.gen_range(self.low..=self.high) as Reward
    }
}

/// The same reward for every update
#[derive(Debug, Clone, Copy)]
pub struct ConstantReward(pub Reward);

impl RewardSource for ConstantReward {
    fn next_reward(&mut self, _state: &str, _action: &str) -> Reward {
        self.0
    }
}

/// Replays a fixed list of rewards, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedReward {
    rewards: Vec<Reward>,
    position: usize,
}

impl ScriptedReward {
    pub fn new(rewards: Vec<Reward>) -> Result<Self> {
        if rewards.is_empty() {
            return Err(JobMatchError::InvalidArgument(
                "scripted reward list must not be empty".to_string(),
            ));
        }
        Ok(Self {
            rewards,
            position: 0,
        })
    }
}

impl RewardSource for ScriptedReward {
    fn next_reward(&mut self, _state: &str, _action: &str) -> Reward {
        let reward = self.rewards[self.position];
        self.position = (self.position + 1) % self.rewards.len();
        reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_reward_in_range() {
        let mut source = UniformReward::seeded(-10, 10, 42).unwrap();

        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2000 {
            let r = source.next_reward("State 1", "Cashier");
            assert!((-10.0..=10.0).contains(&r));
            assert_eq!(r, r.trunc());
            seen_low |= r == -10.0;
            seen_high |= r == 10.0;
        }
        assert!(seen_low && seen_high, "closed range endpoints should be drawn");
    }

    #[test]
    fn test_uniform_reward_is_reproducible() {
        let mut a = UniformReward::seeded(-10, 10, 9).unwrap();
        let mut b = UniformReward::seeded(-10, 10, 9).unwrap();

        for _ in 0..50 {
            assert_eq!(a.next_reward("s", "a"), b.next_reward("s", "a"));
        }
    }

    #[test]
    fn test_uniform_reward_rejects_empty_range() {
        assert!(UniformReward::seeded(5, -5, 0).is_err());
        assert!(UniformReward::seeded(3, 3, 0).is_ok());
    }

    #[test]
    fn test_default_range() {
        assert_eq!(UniformReward::<StdRng>::default().range(), (-10, 10));
    }

    #[test]
    fn test_scripted_reward_cycles() {
        let mut source = ScriptedReward::new(vec![1.0, -2.0]).unwrap();

        assert_eq!(source.next_reward("s", "a"), 1.0);
        assert_eq!(source.next_reward("s", "a"), -2.0);
        assert_eq!(source.next_reward("s", "a"), 1.0);
        assert!(ScriptedReward::new(Vec::new()).is_err());
    }
}
