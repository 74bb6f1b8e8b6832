use crate::base::ParamSolid;
use crate::StrError;
use russell_lab::{mat_inverse, Matrix};
use russell_tensor::{Mandel, Tensor2};

/// Implements the compressible Neo-Hookean hyperelastic model
///
/// The strain energy density in terms of the deformation gradient F is
///
/// ```text
/// ψ(F) = (μ/2) (Ic - 3) - μ ln(J) + (λ/2) ln²(J)
/// ```
///
/// with J = det(F) and Ic = trace(Fᵀ · F). The first Piola-Kirchhoff
/// stress follows by differentiation:
///
/// ```text
/// P = ∂ψ/∂F = μ (F - F⁻ᵀ) + λ ln(J) F⁻ᵀ
/// ```
///
/// and the material tangent (first elasticity tensor) is
///
/// ```text
/// A[i][J][k][L] = μ δ[i][k] δ[J][L]
///              + (μ - λ ln(J)) F⁻ᵀ[i][L] F⁻ᵀ[k][J]
///              + λ F⁻ᵀ[i][J] F⁻ᵀ[k][L]
/// ```
///
/// The undeformed configuration is stress free: ψ(I) = 0 and P(I) = 0.
/// A non-positive J means the element is inverted and yields an error
/// instead of NaN values.
pub struct NeoHookean {
    /// Shear modulus μ
    pub mu: f64,

    /// Lamé parameter λ
    pub lam: f64,
}

impl NeoHookean {
    /// Allocates a new instance from the solid parameters
    pub fn new(param: &ParamSolid) -> Result<Self, StrError> {
        let (mu, lam) = param.stress_strain.lame_parameters()?;
        Ok(NeoHookean { mu, lam })
    }

    /// Calculates the inverse of F and returns ln(J)
    ///
    /// `ffi` is a (3,3) workspace receiving F⁻¹. Note that
    /// F⁻ᵀ[i][J] = ffi[J][i].
    pub fn inverse_deformation_gradient(&self, ffi: &mut Matrix, ff: &Matrix) -> Result<f64, StrError> {
        let jj = mat_inverse(ffi, ff)?;
        if jj <= 0.0 {
            return Err("deformation gradient determinant is not positive");
        }
        Ok(jj.ln())
    }

    /// Calculates the strain energy density ψ(F)
    ///
    /// `ffi` is a (3,3) workspace.
    pub fn energy(&self, ffi: &mut Matrix, ff: &Matrix) -> Result<f64, StrError> {
        let ln_j = self.inverse_deformation_gradient(ffi, ff)?;
        let mut ic = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                ic += ff.get(i, j) * ff.get(i, j);
            }
        }
        Ok(0.5 * self.mu * (ic - 3.0) - self.mu * ln_j + 0.5 * self.lam * ln_j * ln_j)
    }

    /// Calculates the first Piola-Kirchhoff stress P(F) and returns ln(J)
    ///
    /// `ffi` is a (3,3) workspace receiving F⁻¹.
    pub fn first_piola(&self, pp: &mut Matrix, ffi: &mut Matrix, ff: &Matrix) -> Result<f64, StrError> {
        let ln_j = self.inverse_deformation_gradient(ffi, ff)?;
        for i in 0..3 {
            for j in 0..3 {
                // F⁻ᵀ[i][J] = ffi[J][i]
                pp.set(i, j, self.mu * ff.get(i, j) + (self.lam * ln_j - self.mu) * ffi.get(j, i));
            }
        }
        Ok(ln_j)
    }

    /// Calculates the Cauchy stress σ = J⁻¹ P Fᵀ
    ///
    /// With the left Cauchy-Green tensor B = F·Fᵀ:
    ///
    /// ```text
    /// σ = (μ (B - I) + λ ln(J) I) / J
    /// ```
    ///
    /// `ffi` is a (3,3) workspace.
    pub fn cauchy_stress(&self, sigma: &mut Tensor2, ffi: &mut Matrix, ff: &Matrix) -> Result<(), StrError> {
        let ln_j = self.inverse_deformation_gradient(ffi, ff)?;
        let jj = ln_j.exp();
        for i in 0..3 {
            for j in i..3 {
                let mut bb = 0.0;
                for k in 0..3 {
                    bb += ff.get(i, k) * ff.get(j, k);
                }
                let kronecker = if i == j { 1.0 } else { 0.0 };
                sigma.sym_set(i, j, (self.mu * (bb - kronecker) + self.lam * ln_j * kronecker) / jj);
            }
        }
        Ok(())
    }
}

/// Allocates a new Tensor2 suitable for holding the Cauchy stress
pub fn new_stress_tensor() -> Tensor2 {
    Tensor2::new(Mandel::Symmetric)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
