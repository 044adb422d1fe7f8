use rand::{Rng, SeedableRng};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;


/// Which shape and color the next piece gets.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct PieceChoice {
    pub shape_index: usize,
    pub color_index: usize,
}


/// Decides the shape and color of each new piece.
pub(crate) trait PieceSource {
    fn next_piece(&mut self) -> PieceChoice;
}


/// Picks shapes and colors uniformly and independently.
pub(crate) struct RandomPieceSource<R: Rng> {
    rng: R,
    shape_distribution: Uniform<usize>,
    color_distribution: Uniform<usize>,
}
impl<R: Rng> RandomPieceSource<R> {
    /// Both counts must be positive.
    pub fn new(rng: R, shape_count: usize, color_count: usize) -> Self {
        Self {
            rng,
            shape_distribution: Uniform::new(0, shape_count),
            color_distribution: Uniform::new(0, color_count),
        }
    }
}
impl<R: Rng> PieceSource for RandomPieceSource<R> {
    fn next_piece(&mut self) -> PieceChoice {
        let shape_index = self.shape_distribution.sample(&mut self.rng);
        let color_index = self.color_distribution.sample(&mut self.rng);
        PieceChoice {
            shape_index,
            color_index,
        }
    }
}


/// Creates a standard RNG, seeded from the given integer if one is provided and from the
/// operating system otherwise.
pub(crate) fn make_rng(seed: Option<u128>) -> StdRng {
    match seed {
        Some(seed_integer) => {
            let mut rng_seed = [0u8; 32];
            rng_seed[0..128/8].copy_from_slice(&seed_integer.to_be_bytes());
            StdRng::from_seed(rng_seed)
        },
        None => StdRng::from_entropy(),
    }
}
