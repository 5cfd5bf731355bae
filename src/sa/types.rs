//! Core traits for Simulated Annealing.

use rand::Rng;

/// A candidate solution the annealer can evaluate and copy.
///
/// `clone` must produce a fully independent copy: the engine clones the
/// current solution, mutates the clone and throws one of the two away.
///
/// # Minimization
///
/// SA minimizes the cost. For maximization, negate it.
pub trait Solution: Clone + Send {
    /// Computes the cost of this solution. Lower is better.
    ///
    /// Must be deterministic for a given solution state.
    fn evaluate(&self) -> f64;

    /// A cost no solution can go below, if one is known.
    ///
    /// The engine stops as soon as the best cost reaches it.
    fn lower_bound(&self) -> Option<f64> {
        None
    }
}

/// An in-place perturbation of a [`Solution`].
///
/// The perturbation should be small, but the neighborhood must be connected
/// (any solution reachable from any other via a sequence of moves). A call
/// that leaves the solution unchanged is allowed.
///
/// # Examples
///
/// ```ignore
/// struct SwapTwo;
///
/// impl Mutation<Vec<usize>> for SwapTwo {
///     fn apply<R: Rng>(&self, tour: &mut Vec<usize>, rng: &mut R) {
///         let i = rng.random_range(0..tour.len());
///         let j = rng.random_range(0..tour.len());
///         tour.swap(i, j);
///     }
/// }
/// ```
pub trait Mutation<S: Solution>: Send + Sync {
    /// Perturbs `solution` in place.
    fn apply<R: Rng>(&self, solution: &mut S, rng: &mut R);
}
