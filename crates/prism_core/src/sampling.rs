//! Sub-pixel sampling patterns for supersampling.

use glam::DVec2;
use rand::Rng;

use crate::{SceneError, SceneResult};

/// Offsets added to a pixel's integer coordinates, one ray per offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPattern {
    points: Vec<DVec2>,
}

impl SamplingPattern {
    /// Build a pattern from explicit offsets. At least one is required.
    pub fn new(points: Vec<DVec2>) -> SceneResult<Self> {
        if points.is_empty() {
            return Err(SceneError::EmptySamplingPattern);
        }
        Ok(Self { points })
    }

    /// One ray through the pixel's integer coordinate.
    pub fn single() -> Self {
        Self {
            points: vec![DVec2::ZERO],
        }
    }

    /// `count` offsets drawn uniformly from [0.1, 1.0) on both axes.
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> SceneResult<Self> {
        let points = (0..count)
            .map(|_| DVec2::new(rng.gen_range(0.1..1.0), rng.gen_range(0.1..1.0)))
            .collect();
        Self::new(points)
    }

    /// A stratified `n`×`n` grid with one offset at the center of each cell.
    pub fn regular(n: usize) -> SceneResult<Self> {
        let step = 1.0 / n as f64;
        let points = (0..n)
            .flat_map(|j| {
                (0..n).map(move |i| DVec2::new((i as f64 + 0.5) * step, (j as f64 + 0.5) * step))
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for SamplingPattern {
    fn default() -> Self {
        Self::single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_is_zero_offset() {
        let pattern = SamplingPattern::single();
        assert_eq!(pattern.points(), &[DVec2::ZERO]);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(
            SamplingPattern::new(vec![]),
            Err(SceneError::EmptySamplingPattern)
        );
        assert!(SamplingPattern::regular(0).is_err());
    }

    #[test]
    fn test_random_offsets_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let pattern = SamplingPattern::random(64, &mut rng).unwrap();

        assert_eq!(pattern.len(), 64);
        for p in pattern.points() {
            assert!((0.1..1.0).contains(&p.x));
            assert!((0.1..1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let a = SamplingPattern::random(8, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = SamplingPattern::random(8, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_regular_grid() {
        let pattern = SamplingPattern::regular(2).unwrap();
        assert_eq!(
            pattern.points(),
            &[
                DVec2::new(0.25, 0.25),
                DVec2::new(0.75, 0.25),
                DVec2::new(0.25, 0.75),
                DVec2::new(0.75, 0.75),
            ]
        );
    }
}
