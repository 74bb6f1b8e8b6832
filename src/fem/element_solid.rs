use super::{ElementTrait, FemBase, FemState};
use crate::base::Config;
use crate::material::NeoHookean;
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Cell, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::{Matrix, Vector};

/// Implements a total-Lagrangian hyperelastic (Neo-Hookean) solid element
///
/// The deformation gradient at an integration point is
///
/// ```text
/// F[i][J] = δ[i][J] + Σₘ U[m][i] G[m][J]
/// ```
///
/// where G[m][J] = ∂Nᵐ/∂X[J] is the gradient of the shape function with
/// respect to the reference coordinates. The residual (internal force minus
/// body force) and the consistent tangent follow from the first
/// Piola-Kirchhoff stress P and the first elasticity tensor A:
///
/// ```text
///               ⌠                      ⌠
/// r[m][i]     = │ P[i][J] G[m][J] dV - │ Nᵐ b[i] dV
///               ⌡                      ⌡
///
///               ⌠
/// K[mi][nk]   = │ G[m][J] A[i][J][k][L] G[n][L] dV
///               ⌡
/// ```
///
/// With q[m][i] = F⁻ᵀ[i][J] G[m][J], the tangent contraction reduces to
///
/// ```text
/// K[mi][nk] = μ δ[i][k] (G[m]·G[n])
///           + (μ - λ ln(J)) q[n][i] q[m][k]
///           + λ q[m][i] q[n][k]
/// ```
pub struct ElementSolid<'a> {
    /// Global configuration
    config: &'a Config,

    /// Material model
    model: NeoHookean,

    /// Local-to-global mapping
    pub local_to_global: Vec<usize>,

    /// Scratchpad to perform numerical integration
    pad: Scratchpad,

    /// Integration (Gauss) points
    gauss: Gauss,

    /// Material density
    density: f64,

    /// Number of nodes
    nnode: usize,

    /// Deformation gradient F (3,3)
    ff: Matrix,

    /// Inverse of the deformation gradient (3,3)
    ffi: Matrix,

    /// First Piola-Kirchhoff stress (3,3)
    pp: Matrix,

    /// Pushed-forward gradients q[m][i] = F⁻ᵀ[i][J] G[m][J] (nnode,3)
    qq: Matrix,
}

impl<'a> ElementSolid<'a> {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &'a Config, cell: &Cell) -> Result<Self, StrError> {
        if mesh.ndim != 3 {
            return Err("only 3D meshes are supported");
        }
        let mut pad = Scratchpad::new(mesh.ndim, cell.kind)?;
        mesh.set_pad(&mut pad, &cell.points);
        let gauss = Gauss::new_or_sized(cell.kind, base.param.ngauss)?;
        let nnode = cell.points.len();
        Ok(ElementSolid {
            config,
            model: NeoHookean::new(&base.param)?,
            local_to_global: base.equations.local_to_global[cell.id].clone(),
            pad,
            gauss,
            density: base.param.density,
            nnode,
            ff: Matrix::new(3, 3),
            ffi: Matrix::new(3, 3),
            pp: Matrix::new(3, 3),
            qq: Matrix::new(nnode, 3),
        })
    }

    /// Calculates the gradients and the deformation gradient at ξ; returns det(J)
    fn calc_deformation_gradient(&mut self, state: &FemState, ksi: &[f64]) -> Result<f64, StrError> {
        let det_jac = self.pad.calc_gradient(ksi)?;
        let gg = &self.pad.gradient;
        let l2g = &self.local_to_global;
        for i in 0..3 {
            for j in 0..3 {
                let mut h = 0.0;
                for m in 0..self.nnode {
                    h += state.uu[l2g[i + 3 * m]] * gg.get(m, j);
                }
                let kronecker = if i == j { 1.0 } else { 0.0 };
                self.ff.set(i, j, kronecker + h);
            }
        }
        Ok(det_jac)
    }
}

impl<'a> ElementTrait for ElementSolid<'a> {
    /// Returns whether the local Jacobian matrix is symmetric or not
    fn symmetric_jacobian(&self) -> bool {
        true
    }

    /// Returns the local-to-global mapping
    fn local_to_global(&self) -> &Vec<usize> {
        &self.local_to_global
    }

    /// Calculates the residual vector
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError> {
        residual.fill(0.0);
        let with_gravity = self.config.gravity > 0.0;
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let ksi = [iota[0], iota[1], iota[2]];
            let det_jac = self.calc_deformation_gradient(state, &ksi)?;
            self.model.first_piola(&mut self.pp, &mut self.ffi, &self.ff)?;
            let coef = det_jac * self.gauss.weight(p);
            if with_gravity {
                (self.pad.fn_interp)(&mut self.pad.interp, &ksi);
            }
            let gg = &self.pad.gradient;
            for m in 0..self.nnode {
                for i in 0..3 {
                    let mut v = 0.0;
                    for j in 0..3 {
                        v += self.pp.get(i, j) * gg.get(m, j);
                    }
                    residual[i + 3 * m] += coef * v;
                }
                if with_gravity {
                    // body force b = (0, 0, -ρ g); residual holds -f_ext
                    residual[2 + 3 * m] += coef * self.pad.interp[m] * self.density * self.config.gravity;
                }
            }
        }
        Ok(())
    }

    /// Calculates the Jacobian matrix (consistent tangent)
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError> {
        jacobian.fill(0.0);
        let (mu, lam) = (self.model.mu, self.model.lam);
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let ksi = [iota[0], iota[1], iota[2]];
            let det_jac = self.calc_deformation_gradient(state, &ksi)?;
            let ln_j = self.model.inverse_deformation_gradient(&mut self.ffi, &self.ff)?;
            let coef = det_jac * self.gauss.weight(p);
            let gg = &self.pad.gradient;
            for m in 0..self.nnode {
                for i in 0..3 {
                    let mut q = 0.0;
                    for j in 0..3 {
                        // F⁻ᵀ[i][J] = ffi[J][i]
                        q += self.ffi.get(j, i) * gg.get(m, j);
                    }
                    self.qq.set(m, i, q);
                }
            }
            let a2 = mu - lam * ln_j;
            for m in 0..self.nnode {
                for n in 0..self.nnode {
                    let mut gmgn = 0.0;
                    for j in 0..3 {
                        gmgn += gg.get(m, j) * gg.get(n, j);
                    }
                    for i in 0..3 {
                        for k in 0..3 {
                            let mut val = a2 * self.qq.get(n, i) * self.qq.get(m, k)
                                + lam * self.qq.get(m, i) * self.qq.get(n, k);
                            if i == k {
                                val += mu * gmgn;
                            }
                            let (r, c) = (i + 3 * m, k + 3 * n);
                            jacobian.set(r, c, jacobian.get(r, c) + coef * val);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Calculates the stored strain energy of the element
    fn strain_energy(&mut self, state: &FemState) -> Result<f64, StrError> {
        let mut energy = 0.0;
        for p in 0..self.gauss.npoint() {
            let iota = self.gauss.coords(p);
            let ksi = [iota[0], iota[1], iota[2]];
            let det_jac = self.calc_deformation_gradient(state, &ksi)?;
            let psi = self.model.energy(&mut self.ffi, &self.ff)?;
            energy += det_jac * self.gauss.weight(p) * psi;
        }
        Ok(energy)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementSolid;
    use crate::base::{Config, Essential, ParamSolid};
    use crate::fem::{ElementTrait, FemBase, FemState};
    use gemlab::mesh::Samples;
    use russell_lab::{approx_eq, mat_approx_eq, Matrix, Vector};

    #[test]
    fn new_captures_errors() {
        let mesh = Samples::one_tri3();
        let p1 = ParamSolid::sample_neo_hookean();
        let config = Config::new(&mesh);
        let mesh3d = Samples::one_hex8();
        let base = FemBase::new(&mesh3d, p1).unwrap();
        assert_eq!(
            ElementSolid::new(&mesh, &base, &config, &mesh.cells[0]).err(),
            Some("only 3D meshes are supported")
        );
    }

    #[test]
    fn undeformed_residual_is_zero() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        let mut element = ElementSolid::new(&mesh, &base, &config, &mesh.cells[0]).unwrap();
        let mut residual = Vector::new(24);
        element.calc_residual(&mut residual, &state).unwrap();
        for i in 0..24 {
            assert_eq!(residual[i], 0.0);
        }
        assert_eq!(element.strain_energy(&state).unwrap(), 0.0);
    }

    #[test]
    fn gravity_yields_total_weight() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let mut config = Config::new(&mesh);
        config.set_gravity(10.0);
        let essential = Essential::new();
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        let mut element = ElementSolid::new(&mesh, &base, &config, &mesh.cells[0]).unwrap();
        let mut residual = Vector::new(24);
        element.calc_residual(&mut residual, &state).unwrap();
        // unit cube with ρ = 1 and g = 10: total -f_ext along z equals ρ g V = 10
        let mut total_z = 0.0;
        for m in 0..8 {
            assert_eq!(residual[0 + 3 * m], 0.0);
            assert_eq!(residual[1 + 3 * m], 0.0);
            total_z += residual[2 + 3 * m];
        }
        approx_eq(total_z, 10.0, 1e-12);
    }

    #[test]
    fn inverted_element_is_an_error() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let mut state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        // push the top nodes below the bottom plane
        for m in 0..8 {
            let z = mesh.points[mesh.cells[0].points[m]].coords[2];
            state.uu[2 + 3 * m] = -1.5 * z;
        }
        let mut element = ElementSolid::new(&mesh, &base, &config, &mesh.cells[0]).unwrap();
        let mut residual = Vector::new(24);
        assert_eq!(
            element.calc_residual(&mut residual, &state).err(),
            Some("deformation gradient determinant is not positive")
        );
        let mut jacobian = Matrix::new(24, 24);
        assert_eq!(
            element.calc_jacobian(&mut jacobian, &state).err(),
            Some("deformation gradient determinant is not positive")
        );
    }

    #[test]
    fn jacobian_is_symmetric_and_matches_finite_differences() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let mut state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        // a non-trivial displacement field keeping J > 0
        for m in 0..8 {
            let x = &mesh.points[mesh.cells[0].points[m]].coords;
            state.uu[0 + 3 * m] = 0.02 * x[0] + 0.01 * x[2];
            state.uu[1 + 3 * m] = -0.01 * x[1] + 0.005 * x[0];
            state.uu[2 + 3 * m] = 0.08 * x[2] + 0.01 * x[1];
        }
        let mut element = ElementSolid::new(&mesh, &base, &config, &mesh.cells[0]).unwrap();
        let mut jacobian = Matrix::new(24, 24);
        element.calc_jacobian(&mut jacobian, &state).unwrap();

        // symmetry
        for r in 0..24 {
            for c in (r + 1)..24 {
                approx_eq(jacobian.get(r, c), jacobian.get(c, r), 1e-12);
            }
        }

        // finite differences
        let mut numerical = Matrix::new(24, 24);
        let mut residual = Vector::new(24);
        let h = 1e-6;
        for j in 0..24 {
            let original = state.uu[j];
            state.uu[j] = original + h;
            element.calc_residual(&mut residual, &state).unwrap();
            let r_plus = residual.clone();
            state.uu[j] = original - h;
            element.calc_residual(&mut residual, &state).unwrap();
            for i in 0..24 {
                numerical.set(i, j, (r_plus[i] - residual[i]) / (2.0 * h));
            }
            state.uu[j] = original;
        }
        mat_approx_eq(&jacobian, &numerical, 1e-7);
    }
}
