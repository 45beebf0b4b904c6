use rand::SeedableRng;
use rand::rngs::StdRng;

/// Randomness provider injected into sampling.
///
/// `System` draws a fresh OS seed for every generator; `Seeded` replays the
/// same sequence each time, which keeps tests and demo runs reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Entropy {
    #[default]
    System,
    Seeded(u64),
}

impl Entropy {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(seed)
    }

    /// Uses the seed when one is given, otherwise system entropy.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::System, Self::Seeded)
    }

    /// Returns a new generator for one sampling run.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self {
            Entropy::System => StdRng::from_os_rng(),
            Entropy::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self, Entropy::Seeded(_))
    }
}
