use super::{FemBase, FemState};
use crate::base::{assemble_matrix, assemble_vector, Dof, SurfacePenalty};
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Feature, Mesh};
use gemlab::shapes::{GeoKind, Scratchpad};
use russell_lab::{Matrix, Vector};
use russell_sparse::CooMatrix;

/// Natural coordinates of the Hex8 reference corners
const HEX_KSI: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Implements a quadratic surface penalty on the deformation gradient over a face
///
/// The penalty augments the total potential with
///
/// ```text
///         ⌠
/// Π += κ  │ ‖F - I‖² dΓ
///         ⌡
///         Γ
/// ```
///
/// where the deformation gradient is evaluated on the cell attached to the face.
/// The term penalizes local rotations and stretches of the loaded surface.
///
/// Since the reference gradients are fixed, the corresponding stiffness is
/// constant; it is computed once upon allocation.
pub struct BcSurfacePenalty {
    /// Gradients of the attached cell shape functions at each face Gauss point
    ///
    /// Each matrix is (nnode_cell, 3) with the derivatives taken with respect
    /// to the reference coordinates.
    grads: Vec<Matrix>,

    /// Combined coefficient 2 κ w ‖t₁ × t₂‖ at each face Gauss point
    coefs: Vec<f64>,

    /// Contribution to the global residual vector
    pub residual: Vector,

    /// Constant contribution to the global Jacobian matrix
    pub jacobian: Matrix,

    /// Maps local equations (over the attached cell nodes) to global equations
    pub local_to_global: Vec<usize>,
}

/// Implements an array of surface penalty conditions
pub struct BcSurfacePenaltyArray {
    /// All surface penalty conditions
    pub all: Vec<BcSurfacePenalty>,
}

/// Evaluates the Qua4 shape functions
fn qua4_interp(ksi: f64, eta: f64) -> [f64; 4] {
    [
        (1.0 - ksi) * (1.0 - eta) / 4.0,
        (1.0 + ksi) * (1.0 - eta) / 4.0,
        (1.0 + ksi) * (1.0 + eta) / 4.0,
        (1.0 - ksi) * (1.0 + eta) / 4.0,
    ]
}

/// Evaluates the derivatives of the Qua4 shape functions
fn qua4_deriv(ksi: f64, eta: f64) -> [[f64; 2]; 4] {
    [
        [-(1.0 - eta) / 4.0, -(1.0 - ksi) / 4.0],
        [(1.0 - eta) / 4.0, -(1.0 + ksi) / 4.0],
        [(1.0 + eta) / 4.0, (1.0 + ksi) / 4.0],
        [-(1.0 + eta) / 4.0, (1.0 - ksi) / 4.0],
    ]
}

impl BcSurfacePenalty {
    /// Allocates new instance
    ///
    /// The face must be a Qua4 boundary face of a Hex8 cell.
    pub fn new(mesh: &Mesh, base: &FemBase, feature: &Feature, kappa: f64) -> Result<Self, StrError> {
        if feature.kind != GeoKind::Qua4 {
            return Err("the surface penalty requires Qua4 faces");
        }
        let cell = match mesh
            .cells
            .iter()
            .find(|c| feature.points.iter().all(|p| c.points.contains(p)))
        {
            Some(c) => c,
            None => return Err("cannot find the cell attached to the penalized face"),
        };
        if cell.kind != GeoKind::Hex8 {
            return Err("the surface penalty requires Hex8 cells");
        }

        // cell-local indices of the face nodes
        let mut face_local = [0_usize; 4];
        for (a, p) in feature.points.iter().enumerate() {
            match cell.points.iter().position(|q| q == p) {
                Some(k) => face_local[a] = k,
                None => return Err("cannot find the cell attached to the penalized face"),
            }
        }

        // face reference coordinates (columns hold the corner coordinates)
        let nnode = cell.points.len();
        let mut face_xxt = Matrix::new(3, 4);
        for a in 0..4 {
            let coords = &mesh.points[feature.points[a]].coords;
            for i in 0..3 {
                face_xxt.set(i, a, coords[i]);
            }
        }

        // local-to-global map over the attached cell
        let neq = 3 * nnode;
        let dofs = [Dof::Ux, Dof::Uy, Dof::Uz];
        let mut local_to_global = vec![0; neq];
        for m in 0..nnode {
            for (i, dof) in dofs.iter().enumerate() {
                local_to_global[i + 3 * m] = base.equations.eq(cell.points[m], *dof)?;
            }
        }

        // pad of the attached cell
        let mut pad = Scratchpad::new(mesh.ndim, cell.kind)?;
        mesh.set_pad(&mut pad, &cell.points);

        // evaluate the (constant) gradients and area coefficients at the face Gauss points
        let gauss = Gauss::new(GeoKind::Qua4);
        let mut grads = Vec::with_capacity(gauss.npoint());
        let mut coefs = Vec::with_capacity(gauss.npoint());
        let mut jacobian = Matrix::new(neq, neq);
        for p in 0..gauss.npoint() {
            let iota = gauss.coords(p);
            let (r, s) = (iota[0], iota[1]);
            let interp = qua4_interp(r, s);
            let deriv = qua4_deriv(r, s);

            // map the face point to the natural coordinates of the cell
            let mut ksi = [0.0; 3];
            for a in 0..4 {
                for j in 0..3 {
                    ksi[j] += interp[a] * HEX_KSI[face_local[a]][j];
                }
            }
            pad.calc_gradient(&ksi)?;

            // area element from the tangent vectors of the face
            let mut t1 = [0.0; 3];
            let mut t2 = [0.0; 3];
            for a in 0..4 {
                for i in 0..3 {
                    t1[i] += deriv[a][0] * face_xxt.get(i, a);
                    t2[i] += deriv[a][1] * face_xxt.get(i, a);
                }
            }
            let cx = t1[1] * t2[2] - t1[2] * t2[1];
            let cy = t1[2] * t2[0] - t1[0] * t2[2];
            let cz = t1[0] * t2[1] - t1[1] * t2[0];
            let da = f64::sqrt(cx * cx + cy * cy + cz * cz);
            let coef = 2.0 * kappa * gauss.weight(p) * da;

            // constant stiffness: coef δik (Gm · Gn)
            let gg = &pad.gradient;
            for m in 0..nnode {
                for n in 0..nnode {
                    let mut sum = 0.0;
                    for j in 0..3 {
                        sum += gg.get(m, j) * gg.get(n, j);
                    }
                    for i in 0..3 {
                        let (r, c) = (i + 3 * m, i + 3 * n);
                        jacobian.set(r, c, jacobian.get(r, c) + coef * sum);
                    }
                }
            }
            grads.push(pad.gradient.clone());
            coefs.push(coef);
        }
        Ok(BcSurfacePenalty {
            grads,
            coefs,
            residual: Vector::new(neq),
            jacobian,
            local_to_global,
        })
    }

    /// Calculates the residual contribution
    pub fn calc_residual(&mut self, state: &FemState) -> Result<(), StrError> {
        let nnode = self.local_to_global.len() / 3;
        self.residual.fill(0.0);
        for p in 0..self.grads.len() {
            let gg = &self.grads[p];
            let coef = self.coefs[p];
            // displacement gradient H = F - I
            let mut hh = [[0.0; 3]; 3];
            for m in 0..nnode {
                for k in 0..3 {
                    let u = state.uu[self.local_to_global[k + 3 * m]];
                    for j in 0..3 {
                        hh[k][j] += u * gg.get(m, j);
                    }
                }
            }
            for m in 0..nnode {
                for k in 0..3 {
                    let mut sum = 0.0;
                    for j in 0..3 {
                        sum += hh[k][j] * gg.get(m, j);
                    }
                    self.residual[k + 3 * m] += coef * sum;
                }
            }
        }
        Ok(())
    }
}

impl BcSurfacePenaltyArray {
    /// Allocates new instance
    pub fn new(mesh: &Mesh, base: &FemBase, penalty: &SurfacePenalty) -> Result<Self, StrError> {
        let mut all = Vec::with_capacity(penalty.on_faces.len());
        for (feature, kappa) in &penalty.on_faces {
            all.push(BcSurfacePenalty::new(mesh, base, feature, *kappa)?);
        }
        Ok(BcSurfacePenaltyArray { all })
    }

    /// Returns the maximum number of non-zero values in the Jacobian contributions
    pub fn nnz_sup(&self) -> usize {
        self.all.iter().map(|e| e.local_to_global.len() * e.local_to_global.len()).sum()
    }

    /// Computes the residual contributions
    pub fn calc_residuals(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.calc_residual(state)).collect()
    }

    /// Assembles the residual contributions into the global residual
    pub fn assemble_residuals(&self, rr: &mut Vector, ignore: &[bool]) {
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.residual, &e.local_to_global, ignore));
    }

    /// Assembles the (constant) Jacobian contributions into the global matrix
    pub fn assemble_jacobians(&self, kk: &mut CooMatrix, ignore: &[bool]) -> Result<(), StrError> {
        for e in &self.all {
            assemble_matrix(kk, &e.jacobian, &e.local_to_global, ignore)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
