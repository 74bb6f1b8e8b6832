use super::FemBase;
use crate::base::{assemble_vector, Natural, Nbc};
use crate::StrError;
use gemlab::integ::{self, CommonArgs, Gauss};
use gemlab::mesh::{Feature, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::Vector;

/// Implements a distributed natural boundary condition over a face
pub struct BcDistributed<'a> {
    /// Natural boundary condition
    nbc: Nbc,

    /// Constant magnitude of the boundary condition
    value: f64,

    /// Optional multiplier function of the load factor
    function: Option<&'a (dyn Fn(f64) -> f64 + 'a)>,

    /// Scratchpad to perform numerical integration over the face
    pad: Scratchpad,

    /// Integration (Gauss) points
    gauss: Gauss,

    /// Contribution to the global residual vector
    pub phi: Vector,

    /// Maps local equations to global equations
    pub local_to_global: Vec<usize>,
}

/// Implements an array of distributed natural boundary conditions
pub struct BcDistributedArray<'a> {
    /// All distributed boundary conditions
    pub all: Vec<BcDistributed<'a>>,
}

impl<'a> BcDistributed<'a> {
    /// Allocates new instance
    pub fn new(
        mesh: &Mesh,
        base: &FemBase,
        feature: &Feature,
        nbc: Nbc,
        value: f64,
        function: Option<&'a (dyn Fn(f64) -> f64 + 'a)>,
    ) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        if ndim == 3 && feature.kind.ndim() == 1 {
            if let Nbc::Qn = nbc {
                return Err("Qn natural boundary condition is not available for 3D edges");
            }
        }
        let mut pad = Scratchpad::new(ndim, feature.kind)?;
        mesh.set_pad(&mut pad, &feature.points);
        let gauss = Gauss::new(feature.kind);

        // local-to-global map
        let nnode = feature.points.len();
        let dofs = nbc.dof_equation_pairs(ndim, nnode);
        let n_equation_local = 1 + dofs.last().unwrap().last().unwrap().1;
        let mut local_to_global = vec![0; n_equation_local];
        for m in 0..nnode {
            for (dof, local) in &dofs[m] {
                local_to_global[*local] = base.equations.eq(feature.points[m], *dof)?;
            }
        }
        Ok(BcDistributed {
            nbc,
            value,
            function,
            pad,
            gauss,
            phi: Vector::new(n_equation_local),
            local_to_global,
        })
    }

    /// Calculates the residual contribution at the given load factor
    ///
    /// Note the negative sign: the boundary term is subtracted from the
    /// internal forces, thus it enters the residual with a minus.
    pub fn calc_phi(&mut self, time: f64) -> Result<(), StrError> {
        let value = match self.function {
            Some(f) => self.value * f(time),
            None => self.value,
        };
        let (ndim, _) = self.pad.xxt.dims();
        let mut args = CommonArgs::new(&mut self.pad, &self.gauss);
        match self.nbc {
            Nbc::Qn => integ::vec_02_nv_bry(&mut self.phi, &mut args, |v, _, un, _| {
                for i in 0..ndim {
                    v[i] = -value * un[i];
                }
                Ok(())
            }),
            Nbc::Qx => integ::vec_02_nv(&mut self.phi, &mut args, |v, _, _| {
                for i in 0..ndim {
                    v[i] = 0.0;
                }
                v[0] = -value;
                Ok(())
            }),
            Nbc::Qy => integ::vec_02_nv(&mut self.phi, &mut args, |v, _, _| {
                for i in 0..ndim {
                    v[i] = 0.0;
                }
                v[1] = -value;
                Ok(())
            }),
            Nbc::Qz => integ::vec_02_nv(&mut self.phi, &mut args, |v, _, _| {
                for i in 0..ndim {
                    v[i] = 0.0;
                }
                v[2] = -value;
                Ok(())
            }),
        }
    }
}

impl<'a> BcDistributedArray<'a> {
    /// Allocates new instance
    pub fn new(mesh: &Mesh, base: &FemBase, natural: &'a Natural) -> Result<Self, StrError> {
        let mut all = Vec::with_capacity(natural.on_faces.len());
        for (feature, nbc, value, index) in &natural.on_faces {
            let function = match index {
                Some(i) => Some(natural.functions[*i].as_ref()),
                None => None,
            };
            all.push(BcDistributed::new(mesh, base, feature, *nbc, *value, function)?);
        }
        Ok(BcDistributedArray { all })
    }

    /// Computes all residual contributions at the given load factor
    pub fn calc_phi(&mut self, time: f64) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.calc_phi(time)).collect()
    }

    /// Assembles the residual contributions into the global residual
    pub fn assemble_phi(&self, rr: &mut Vector, ignore: &[bool]) {
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.phi, &e.local_to_global, ignore));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
