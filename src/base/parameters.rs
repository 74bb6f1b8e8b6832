use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds parameters for stress-strain relations (total-Lagrangian kinematics)
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamStressStrain {
    /// Compressible Neo-Hookean hyperelastic model
    ///
    /// The strain energy density in terms of the deformation gradient F is
    ///
    /// ```text
    /// ψ(F) = (μ/2) (Ic - 3) - μ ln(J) + (λ/2) ln²(J)
    /// ```
    ///
    /// with J = det(F) and Ic = trace(Fᵀ · F).
    NeoHookean {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },
}

impl ParamStressStrain {
    /// Calculates the Lamé parameters (μ, λ) from the engineering constants
    pub fn lame_parameters(&self) -> Result<(f64, f64), StrError> {
        match self {
            ParamStressStrain::NeoHookean { young, poisson } => {
                if *young <= 0.0 {
                    return Err("Young's modulus must be positive");
                }
                if *poisson <= -1.0 || *poisson >= 0.5 {
                    return Err("Poisson's coefficient must satisfy -1 < ν < 0.5");
                }
                let mu = young / (2.0 * (1.0 + poisson));
                let lambda = young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
                Ok((mu, lambda))
            }
        }
    }
}

/// Holds parameters for (hyperelastic) solid elements
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamSolid {
    /// Intrinsic (real) density
    pub density: f64,

    /// Parameters for the stress-strain model
    pub stress_strain: ParamStressStrain,

    /// Number of integration (Gauss) points
    pub ngauss: Option<usize>,
}

impl ParamSolid {
    /// Returns a sample of parameters (soft rubber-like material)
    pub fn sample_neo_hookean() -> Self {
        ParamSolid {
            density: 1.0,
            stress_strain: ParamStressStrain::NeoHookean {
                young: 10.0,
                poisson: 0.4,
            },
            ngauss: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamSolid, ParamStressStrain};
    use russell_lab::approx_eq;

    #[test]
    fn lame_parameters_work() {
        let p = ParamStressStrain::NeoHookean {
            young: 10.0,
            poisson: 0.4,
        };
        let (mu, lam) = p.lame_parameters().unwrap();
        approx_eq(mu, 10.0 / 2.8, 1e-15);
        approx_eq(lam, 10.0 * 0.4 / (1.4 * 0.2), 1e-14);
    }

    #[test]
    fn lame_parameters_capture_errors() {
        let p = ParamStressStrain::NeoHookean {
            young: -1.0,
            poisson: 0.4,
        };
        assert_eq!(p.lame_parameters().err(), Some("Young's modulus must be positive"));
        let p = ParamStressStrain::NeoHookean {
            young: 10.0,
            poisson: 0.5,
        };
        assert_eq!(
            p.lame_parameters().err(),
            Some("Poisson's coefficient must satisfy -1 < ν < 0.5")
        );
    }

    #[test]
    fn derive_works() {
        let p = ParamSolid::sample_neo_hookean();
        let clone = p.clone();
        let json = serde_json::to_string(&p).unwrap();
        let from_json: ParamSolid = serde_json::from_str(&json).unwrap();
        assert_eq!(format!("{:?}", from_json), format!("{:?}", clone));
    }
}
