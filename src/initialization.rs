use itertools::Itertools;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::model::Point;

/// Samples `n` points uniformly within [0, width) x [0, height).
pub fn uniform_points<R: Rng>(width: f64, height: f64, n: usize, rng: &mut R) -> Vec<Point> {
    let xs = Uniform::from(0.0..width);
    let ys = Uniform::from(0.0..height);
    (0..n).map(|_| [xs.sample(rng), ys.sample(rng)]).collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_points_count() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(uniform_points(800.0, 800.0, 50, &mut rng).len(), 50);
        assert!(uniform_points(800.0, 800.0, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_uniform_points_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(13);
        for point in uniform_points(640.0, 480.0, 1000, &mut rng) {
            assert!((0.0..640.0).contains(&point[0]));
            assert!((0.0..480.0).contains(&point[1]));
        }
    }
}
