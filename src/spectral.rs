use nalgebra::DMatrix;
use ndarray::ArrayView2;

/// Largest eigenvalue magnitude of a real square matrix.
///
/// The spectrum of a real matrix is complex in general, so the radius is
/// the maximum modulus over the full complex eigenvalue set. This is the
/// only place an eigensolver is touched; callers depend on the radius, not
/// on the numerical path that produced it.
pub(crate) fn spectral_radius(w: ArrayView2<f32>) -> f32 {
    let (rows, cols) = w.dim();
    debug_assert_eq!(rows, cols);

    let m = DMatrix::from_row_iterator(rows, cols, w.iter().copied());
    m.complex_eigenvalues()
        .iter()
        .map(|e| e.norm())
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn diagonal_radius_is_max_abs_entry() {
        let w = array![[3.0_f32, 0.0], [0.0, -5.0]];
        let radius = spectral_radius(w.view());
        assert!((radius - 5.0).abs() < 1e-4, "radius = {radius}");
    }

    #[test]
    fn complex_pair_radius_is_modulus() {
        // Eigenvalues of a scaled rotation are +/- 2i; only a complex
        // solver reports 2 here, a real one would see nothing.
        let w = array![[0.0_f32, -2.0], [2.0, 0.0]];
        let radius = spectral_radius(w.view());
        assert!((radius - 2.0).abs() < 1e-4, "radius = {radius}");
    }

    #[test]
    fn triangular_radius_reads_off_the_diagonal() {
        let w = array![[1.0_f32, 4.0], [0.0, 0.5]];
        let radius = spectral_radius(w.view());
        assert!((radius - 1.0).abs() < 1e-4, "radius = {radius}");
    }

    #[test]
    fn zero_matrix_has_zero_radius() {
        let w = ndarray::Array2::<f32>::zeros((4, 4));
        assert!(spectral_radius(w.view()) < 1e-12);
    }
}
