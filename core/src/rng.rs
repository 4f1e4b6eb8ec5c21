//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SubsystemRng instances derived
//! from the single master seed stored on the Run record.
//!
//! Each subsystem gets its own RNG stream, re-derived per day from
//! (master_seed, subsystem slot, day). This means:
//!   - Adding a new subsystem never changes existing subsystems' streams.
//!   - Any single day of any subsystem is reproducible in isolation,
//!     without replaying the days before it.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single subsystem on a single day.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    /// Derive a stream from the master seed, a stable subsystem index,
    /// and a sequence number (the day counter, or an action counter).
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, subsystem_index: u64, sequence: u64) -> Self {
        let derived_seed = master_seed
            ^ subsystem_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ sequence.wrapping_mul(0xd1b5_4a32_d192_ed03);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an i64 in [lo, hi] (inclusive).
    pub fn next_i64_in(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "empty range");
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as i64
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick an index from a cumulative weight table.
    /// Weights need not sum to 1.0; the last entry absorbs the remainder.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weighted_index on empty table");
        let total: f64 = weights.iter().sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

/// All subsystem RNG streams for a single run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// The stream for `slot` at sequence number `sequence`
    /// (day counter for daily subsystems, action counter for dispatch).
    pub fn stream(&self, slot: SubsystemSlot, sequence: u64) -> SubsystemRng {
        SubsystemRng::new(self.master_seed, slot as u64, sequence).with_name(slot.name())
    }
}

/// Stable subsystem slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every subsystem's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SubsystemSlot {
    Calendar = 0,
    Character = 1,
    Family = 2,
    Farm = 3,
    Trade = 4,
    Mission = 5,
    Event = 6,
    Home = 7,
    // Add new subsystems here — append only.
}

impl SubsystemSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Character => "character",
            Self::Family => "family",
            Self::Farm => "farm",
            Self::Trade => "trade",
            Self::Mission => "mission",
            Self::Event => "event",
            Self::Home => "home",
        }
    }
}
