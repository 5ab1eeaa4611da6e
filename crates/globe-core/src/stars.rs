use glam::Vec3;
use rand::prelude::*;

/// `count` points spread uniformly over a sphere shell of `radius`.
pub fn scatter(count: usize, radius: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let z: f32 = rng.gen_range(-1.0..=1.0);
            let phi: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let ring = (1.0 - z * z).max(0.0).sqrt();
            Vec3::new(ring * phi.cos(), ring * phi.sin(), z) * radius
        })
        .collect()
}

/// Deterministic variant used by the globe so a page reload looks the same.
pub fn scatter_seeded(count: usize, radius: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    scatter(count, radius, &mut rng)
}
