use super::{BcPrescribed, BcSurfacePenaltyArray, Elements, FemBase};
use crate::base::Config;
use crate::StrError;
use russell_lab::Vector;
use russell_sparse::{LinSolver, SparseMatrix, Sym};

/// Holds variables to solve the global linear system
pub struct LinearSystem<'a> {
    /// Total number of global equations (total number of DOFs)
    pub n_equation: usize,

    /// Holds the supremum of the number of nonzero values (nnz) in the global matrix
    ///
    /// **Notes:**
    ///
    /// 1. The local matrices add only to parts of the global matrix yielding a banded matrix
    /// 2. The elements share DOFs; therefore, the exact nnz is (much) less than the sum below
    /// 3. The sum of the numbers of entries of all local matrices (elements and surface
    ///    penalties) plus one diagonal entry per prescribed equation gives `nnz_sup`
    pub nnz_sup: usize,

    /// Holds the residual vector R
    pub rr: Vector,

    /// Holds the global Jacobian matrix K
    pub kk: SparseMatrix,

    /// Holds the linear solver
    pub solver: LinSolver<'a>,

    /// Holds the "minus-delta-U" vector (the solution of the linear system)
    pub mdu: Vector,
}

impl<'a> LinearSystem<'a> {
    /// Allocates a new instance
    pub fn new(
        base: &FemBase,
        config: &Config,
        prescribed: &BcPrescribed,
        elements: &Elements,
        penalties: &BcSurfacePenaltyArray,
    ) -> Result<Self, StrError> {
        let n_equation = base.equations.n_equation;

        // the prescribed equations keep a unit diagonal entry
        let mut nnz_sup = prescribed.size();
        nnz_sup += elements.all.iter().fold(0, |acc, e| {
            let n = e.actual.local_to_global().len();
            acc + n * n
        });
        nnz_sup += penalties.nnz_sup();

        Ok(LinearSystem {
            n_equation,
            nnz_sup,
            rr: Vector::new(n_equation),
            kk: SparseMatrix::new_coo(n_equation, n_equation, nnz_sup, Sym::No)?,
            solver: LinSolver::new(config.lin_sol_genie)?,
            mdu: Vector::new(n_equation),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LinearSystem;
    use crate::base::{Config, Dof, Essential, ParamSolid, SurfacePenalty};
    use crate::fem::{BcPrescribed, BcSurfacePenaltyArray, Elements, FemBase};
    use gemlab::mesh::{Feature, Samples};
    use gemlab::shapes::GeoKind;
    use russell_sparse::Sym;

    #[test]
    fn new_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);

        let mut essential = Essential::new();
        essential.points(&[0, 1, 2, 3], Dof::Ux, 0.0);
        let prescribed = BcPrescribed::new(&base, &essential).unwrap();

        let top = Feature {
            kind: GeoKind::Qua4,
            points: vec![4, 5, 6, 7],
        };
        let faces = vec![&top];
        let mut penalty = SurfacePenalty::new();
        penalty.faces(&faces, 100.0);

        let elements = Elements::new(&mesh, &base, &config).unwrap();
        let penalties = BcSurfacePenaltyArray::new(&mesh, &base, &penalty).unwrap();
        let lin_sys = LinearSystem::new(&base, &config, &prescribed, &elements, &penalties).unwrap();

        let nnz_correct = 4 + 24 * 24 + 24 * 24;
        assert_eq!(lin_sys.n_equation, 24);
        assert_eq!(lin_sys.nnz_sup, nnz_correct);
        assert_eq!(lin_sys.kk.get_info(), (24, 24, 0, Sym::No));
    }
}
