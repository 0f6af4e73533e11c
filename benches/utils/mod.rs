mod ladder;

fn shuffle<T>(slice: &mut [T]) {
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    slice.shuffle(&mut rng);
}

pub use ladder::*;
