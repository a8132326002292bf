use crate::engines::generation::genome::Genotype;
use rand::Rng;

/// Binary tournament: two uniform draws with replacement, index of the fitter.
/// Ties keep the first draw.
pub fn binary_tournament<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let first = rng.gen_range(0..fitness.len());
    let second = rng.gen_range(0..fitness.len());

    if fitness[second] > fitness[first] {
        second
    } else {
        first
    }
}

/// Single-point crossover: swap bit suffixes past a random position
pub fn one_point_crossover<R: Rng>(
    parent1: &Genotype,
    parent2: &Genotype,
    rng: &mut R,
) -> (Genotype, Genotype) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..len);

    (parent1.splice(parent2, point), parent2.splice(parent1, point))
}

/// Flip each bit independently with `probability`, returns the number flipped
pub fn bit_flip_mutation<R: Rng>(genotype: &mut Genotype, probability: f64, rng: &mut R) -> usize {
    let mut flipped = 0;
    for index in 0..genotype.len() {
        if rng.gen::<f64>() < probability {
            genotype.flip(index);
            flipped += 1;
        }
    }
    flipped
}
