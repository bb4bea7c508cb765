use rand::rngs::StdRng;
use rand::SeedableRng;

/// Construct the seeded RNG a battle or world simulation threads through its
/// whole lifetime — no `thread_rng()` anywhere in the core, so a fixed seed
/// reproduces an identical run.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
