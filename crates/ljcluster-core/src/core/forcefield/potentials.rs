/// Default constant `K` of the confinement restraint.
pub const DEFAULT_CONFINEMENT_CONSTANT: f64 = 4.0;

/// Lorentz-Berthelot style combination used by the cluster: arithmetic sigma,
/// geometric epsilon.
#[inline]
pub fn combine(sigma_i: f64, epsilon_i: f64, sigma_j: f64, epsilon_j: f64) -> (f64, f64) {
    let sigma = 0.5 * (sigma_i + sigma_j);
    let epsilon = (epsilon_i * epsilon_j).sqrt();
    (sigma, epsilon)
}

/// Powers of sigma reused by the 12-6 kernels.
#[derive(Debug, Clone, Copy)]
pub struct SigmaPowers {
    pub s6: f64,
    pub s12: f64,
}

impl SigmaPowers {
    #[inline]
    pub fn new(sigma: f64) -> Self {
        let s2 = sigma * sigma;
        let s6 = s2 * s2 * s2;
        Self { s6, s12: s6 * s6 }
    }
}

/// 12-6 Lennard-Jones energy `4ε((σ/r)^12 − (σ/r)^6)` evaluated from the squared distance.
///
/// `d2` must be strictly positive; the caller is responsible for rejecting coincident atoms.
#[inline]
pub fn lennard_jones_12_6(d2: f64, sigma: SigmaPowers, epsilon: f64) -> f64 {
    let d6 = d2 * d2 * d2;
    let d12 = d6 * d6;
    4.0 * epsilon * (sigma.s12 / d12 - sigma.s6 / d6)
}

/// Radial derivative of [`lennard_jones_12_6`] divided by `r`.
///
/// Multiplying by a component of `x_i − x_j` gives that component of the gradient with
/// respect to atom `i`.
#[inline]
pub fn lennard_jones_12_6_gradient_factor(d2: f64, sigma: SigmaPowers, epsilon: f64) -> f64 {
    let d6 = d2 * d2 * d2;
    let d12 = d6 * d6;
    -24.0 * epsilon * (2.0 * sigma.s12 / d12 - sigma.s6 / d6) / d2
}

/// Soft confinement restraint `ε·(d²_cm / (K·σ)²)^10`.
#[inline]
pub fn confinement(d2_cm: f64, sigma: f64, epsilon: f64, k: f64) -> f64 {
    let scaled = k * sigma;
    let vc = d2_cm / (scaled * scaled);
    epsilon * vc.powi(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn combine_uses_arithmetic_sigma_and_geometric_epsilon() {
        let (sigma, epsilon) = combine(1.0, 4.0, 3.0, 9.0);
        assert_eq!(sigma, 2.0);
        assert_eq!(epsilon, 6.0);
    }

    #[test]
    fn lennard_jones_is_zero_at_sigma() {
        let energy = lennard_jones_12_6(4.0, SigmaPowers::new(2.0), 1.5);
        assert!(f64_approx_equal(energy, 0.0));
    }

    #[test]
    fn lennard_jones_minimum_is_negative_epsilon() {
        let r_min = 2.0_f64.powf(1.0 / 6.0);
        let energy = lennard_jones_12_6(r_min * r_min, SigmaPowers::new(1.0), 0.7);
        assert!(f64_approx_equal(energy, -0.7));
    }

    #[test]
    fn lennard_jones_matches_textbook_form() {
        let r: f64 = 1.37;
        let sigma: f64 = 1.1;
        let expected = 4.0 * 0.3 * ((sigma / r).powi(12) - (sigma / r).powi(6));
        let energy = lennard_jones_12_6(r * r, SigmaPowers::new(sigma), 0.3);
        assert!(f64_approx_equal(energy, expected));
    }

    #[test]
    fn gradient_factor_vanishes_at_minimum() {
        let r_min = 2.0_f64.powf(1.0 / 6.0) * 1.3;
        let g = lennard_jones_12_6_gradient_factor(r_min * r_min, SigmaPowers::new(1.3), 2.0);
        assert!(g.abs() < 1e-10);
    }

    #[test]
    fn gradient_factor_is_negative_when_repulsive() {
        let g = lennard_jones_12_6_gradient_factor(0.8, SigmaPowers::new(1.0), 1.0);
        assert!(g < 0.0);
    }

    #[test]
    fn confinement_equals_epsilon_at_k_sigma() {
        let sigma: f64 = 1.5;
        let d = DEFAULT_CONFINEMENT_CONSTANT * sigma;
        let v = confinement(d * d, sigma, 0.25, DEFAULT_CONFINEMENT_CONSTANT);
        assert!(f64_approx_equal(v, 0.25));
    }

    #[test]
    fn confinement_grows_with_tenth_power() {
        let v1 = confinement(1.0, 1.0, 1.0, 1.0);
        let v2 = confinement(4.0, 1.0, 1.0, 1.0);
        assert!(f64_approx_equal(v2 / v1, 1024.0 * 1024.0));
    }
}
