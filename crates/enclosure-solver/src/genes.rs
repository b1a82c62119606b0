//! Operators on wall placements encoded as candidate positions.
//!
//! A placement is a sorted, duplicate-free `Vec<usize>` of positions into the
//! problem's candidate set.

use rand::seq::index;
use rand::Rng;

/// Draws `k` distinct positions out of `n`, sorted.
pub fn random_positions<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    let k = k.min(n);
    let mut positions = index::sample(rng, n, k).into_vec();
    positions.sort_unstable();
    positions
}

/// Adds `count` positions not already in `genes`, then sorts.
///
/// Adds fewer if the candidate set runs out.
pub fn add_unused<R: Rng + ?Sized>(rng: &mut R, genes: &mut Vec<usize>, n: usize, count: usize) {
    let count = count.min(n.saturating_sub(genes.len()));
    if count == 0 {
        genes.sort_unstable();
        return;
    }

    if (genes.len() + count) * 2 <= n {
        // Sparse: rejection sampling terminates quickly.
        let mut added = 0;
        while added < count {
            let position = rng.random_range(0..n);
            if !genes.contains(&position) {
                genes.push(position);
                added += 1;
            }
        }
    } else {
        let unused: Vec<usize> = (0..n).filter(|p| !genes.contains(p)).collect();
        for i in index::sample(rng, unused.len(), count) {
            genes.push(unused[i]);
        }
    }
    genes.sort_unstable();
}

/// Removes 1 to 3 random positions and adds as many unused ones.
///
/// The removed positions never come back, so the result always differs from
/// the input. Leaves `genes` unchanged when no swap is possible.
pub fn mutate<R: Rng + ?Sized>(rng: &mut R, genes: &mut Vec<usize>, n: usize) {
    let free = n.saturating_sub(genes.len());
    let count = rng.random_range(1..=3).min(genes.len()).min(free);
    if count == 0 {
        return;
    }
    let victims: Vec<usize> = index::sample(rng, genes.len(), count)
        .iter()
        .map(|i| genes[i])
        .collect();
    // Refill while the victims are still present so they are not redrawn.
    add_unused(rng, genes, n, count);
    genes.retain(|p| !victims.contains(p));
}

/// Returns a mutated copy of `genes`.
pub fn neighbor<R: Rng + ?Sized>(rng: &mut R, genes: &[usize], n: usize) -> Vec<usize> {
    let mut next = genes.to_vec();
    mutate(rng, &mut next, n);
    next
}

/// Combines a random half of each parent, then pads with random unused
/// positions or subsamples down to `k`.
///
/// The first parent's half rounds up, so single-wall parents still pass on a
/// cell.
pub fn crossover<R: Rng + ?Sized>(
    rng: &mut R,
    a: &[usize],
    b: &[usize],
    n: usize,
    k: usize,
) -> Vec<usize> {
    let mut child: Vec<usize> = Vec::with_capacity(k);
    for (parent, take) in [(a, a.len().div_ceil(2)), (b, b.len() / 2)] {
        for i in index::sample(rng, parent.len(), take) {
            child.push(parent[i]);
        }
    }
    child.sort_unstable();
    child.dedup();

    if child.len() > k {
        let keep = index::sample(rng, child.len(), k);
        let mut trimmed: Vec<usize> = keep.iter().map(|i| child[i]).collect();
        trimmed.sort_unstable();
        return trimmed;
    }
    let missing = k - child.len();
    add_unused(rng, &mut child, n, missing);
    child
}

/// Draws `k` positions biased toward the front of `ranked`.
///
/// Picks from the top `2k` ranked positions, then fills any shortfall at
/// random.
pub fn seeded_positions<R: Rng + ?Sized>(
    rng: &mut R,
    ranked: &[usize],
    n: usize,
    k: usize,
) -> Vec<usize> {
    let pool = &ranked[..ranked.len().min(2 * k)];
    let take = k.min(pool.len());
    let mut genes: Vec<usize> = index::sample(rng, pool.len(), take)
        .iter()
        .map(|i| pool[i])
        .collect();
    let missing = k.saturating_sub(genes.len());
    add_unused(rng, &mut genes, n, missing);
    genes
}
