use nalgebra::{DMatrix, SymmetricEigen};

/// Largest eigenvalue of `-C` for a symmetric coupling matrix `C`.
///
/// Returns `0.0` for an empty matrix.
pub fn largest_eigenvalue(coupling: &DMatrix<f64>) -> f64 {
    if coupling.nrows() == 0 {
        return 0.0;
    }
    let negated = -coupling.clone();
    let eigen = SymmetricEigen::new(negated);
    eigen
        .eigenvalues
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Pinning parameter suggested by a spectral bound: `max(λ / 2, 0)`.
pub fn pinning_from_spectral_bound(largest_eigenvalue: f64) -> f64 {
    (0.5 * largest_eigenvalue).max(0.0)
}
