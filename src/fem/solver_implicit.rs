use super::{
    BcDistributedArray, BcPrescribed, BcSurfacePenaltyArray, ControlConvergence, Elements, FemBase, FemState, FileIo,
    LinearSystem,
};
use crate::base::{validate_or_err, Config, Essential, Natural, SurfacePenalty};
use crate::StrError;
use gemlab::mesh::Mesh;
use russell_lab::{vec_copy, Vector};

/// Performs a quasi-static simulation by stepping the load factor from t_ini to t_fin
///
/// The load factor t grows by Δt at each load step and the nonlinear equations
/// are solved by Newton-Raphson iterations, warm-started from the previously
/// converged displacements. If the iterations fail, the displacements are
/// restored, the increment is halved, and the step is attempted again. After a
/// successful step, the increment is doubled again, up to the base increment
/// `(t_fin - t_ini) / n_load_steps`. The last step is clamped so the final
/// load factor lands exactly on t_fin.
pub struct SolverImplicit<'a> {
    /// Holds configuration parameters
    config: &'a Config,

    /// Holds the prescribed (essential) values
    pub prescribed: BcPrescribed,

    /// Holds the collection of elements
    pub elements: Elements<'a>,

    /// Holds the distributed natural boundary conditions
    pub boundaries: BcDistributedArray<'a>,

    /// Holds the surface penalty conditions
    pub penalties: BcSurfacePenaltyArray,

    /// Assists in controlling the convergence of the iterations
    control: ControlConvergence<'a>,

    /// Holds the variables of the global linear system
    pub linear_system: LinearSystem<'a>,
}

impl<'a> SolverImplicit<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        base: &FemBase,
        config: &'a Config,
        essential: &Essential,
        natural: &'a Natural,
        penalty: &SurfacePenalty,
    ) -> Result<Self, StrError> {
        validate_or_err(config)?;
        let prescribed = BcPrescribed::new(base, essential)?;
        let elements = Elements::new(mesh, base, config)?;
        let boundaries = BcDistributedArray::new(mesh, base, natural)?;
        let penalties = BcSurfacePenaltyArray::new(mesh, base, penalty)?;
        let control = ControlConvergence::new(config);
        let linear_system = LinearSystem::new(base, config, &prescribed, &elements, &penalties)?;
        Ok(SolverImplicit {
            config,
            prescribed,
            elements,
            boundaries,
            penalties,
            control,
            linear_system,
        })
    }

    /// Solves the nonlinear problem by stepping the load factor
    pub fn solve(&mut self, state: &mut FemState, file_io: &mut FileIo) -> Result<(), StrError> {
        let config = self.config;
        let ddt_base = config.ddt_base();

        // the prescribed values stay fixed over the whole load history
        self.prescribed.apply(&mut state.uu);

        // first output (reference configuration)
        state.t = config.t_ini;
        state.ddt = ddt_base;
        file_io.write_state(state)?;

        self.control.print_header();
        self.control.reset_failed();

        // backup of the converged displacements
        let neq = state.uu.dim();
        let mut uu_backup = Vector::new(neq);

        for timestep in 0..config.n_max_time_steps {
            if state.t >= config.t_fin {
                break;
            }

            // clamp the increment so the last step lands exactly on t_fin
            if state.t + state.ddt > config.t_fin {
                state.ddt = config.t_fin - state.t;
            }

            // advance the load factor
            let t_old = state.t;
            vec_copy(&mut uu_backup, &state.uu)?;
            state.t += state.ddt;
            state.duu.fill(0.0);
            self.control.print_timestep(timestep, state.t, state.ddt);

            match self.iterate(state) {
                Ok(()) => {
                    file_io.write_state(state)?;
                    self.control.reset_failed();
                    state.ddt = f64::min(2.0 * state.ddt, ddt_base);
                }
                Err(message) => {
                    self.control.add_failed();
                    if self.control.too_many_failures() {
                        file_io.write_state(state)?;
                        file_io.write_self()?;
                        return Err(message);
                    }
                    // restore the last converged configuration and halve the increment
                    vec_copy(&mut state.uu, &uu_backup)?;
                    state.t = t_old;
                    state.ddt /= 2.0;
                    if state.ddt < config.ddt_min {
                        return Err("Δt is smaller than the allowed minimum");
                    }
                    self.control.print_failed(state.ddt);
                }
            }
        }

        self.control.print_footer();

        // write the summary file
        file_io.write_self()?;

        if state.t < config.t_fin {
            return Err("cannot reach the final load factor within n_max_time_steps");
        }
        Ok(())
    }

    /// Returns the total strain energy stored in the elements
    pub fn strain_energy(&mut self, state: &FemState) -> Result<f64, StrError> {
        self.elements.strain_energy(state)
    }

    /// Performs the Newton-Raphson iterations for the current load factor
    fn iterate(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let config = self.config;
        let flags = &self.prescribed.flags;
        let neq = state.uu.dim();

        // accessors to the linear system
        let LinearSystem {
            rr, kk, solver, mdu, ..
        } = &mut self.linear_system;

        self.control.reset();
        for iteration in 0..config.n_max_iterations {
            // residual vector (prescribed rows are kept zero)
            rr.fill(0.0);
            self.elements.calc_residuals(state)?;
            self.boundaries.calc_phi(state.t)?;
            self.penalties.calc_residuals(state)?;
            self.elements.assemble_residuals(rr, flags);
            self.boundaries.assemble_phi(rr, flags);
            self.penalties.assemble_residuals(rr, flags);

            // check convergence on the residual
            self.control.analyze_rr(iteration, rr)?;
            if self.control.converged() {
                self.control.print_iteration(iteration);
                return Ok(());
            }
            if iteration > 0 && self.control.diverging() {
                self.control.print_iteration(iteration);
                return Err("Newton-Raphson is diverging");
            }

            // Jacobian matrix with a unit diagonal entry on the prescribed rows
            if iteration == 0 || !config.constant_tangent {
                self.elements.calc_jacobians(state)?;
                {
                    let coo = kk.get_coo_mut()?;
                    coo.reset();
                    self.elements.assemble_jacobians(coo, flags)?;
                    self.penalties.assemble_jacobians(coo, flags)?;
                    for eq in &self.prescribed.equations {
                        coo.put(*eq, *eq, 1.0)?;
                    }
                }
                solver.actual.factorize(kk, Some(config.lin_sol_params))?;
            }

            // solve K mdu = R and update U
            solver.actual.solve(mdu, kk, rr, config.verbose_lin_sys_solve)?;
            self.control.analyze_mdu(mdu, &state.uu)?;
            self.control.print_iteration(iteration);
            for i in 0..neq {
                state.uu[i] -= mdu[i];
                state.duu[i] -= mdu[i];
            }
            if self.control.converged() {
                return Ok(());
            }
        }
        Err("Newton-Raphson did not converge")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
