use crate::base::Config;
use crate::StrError;
use russell_lab::{vec_norm, Norm, Vector};

/// Assists in controlling the convergence of the Newton-Raphson iterations
///
/// Also keeps track of the number of failed load steps, so the load stepping
/// loop can give up after too many subdivision attempts.
pub struct ControlConvergence<'a> {
    /// Holds configuration parameters
    config: &'a Config,

    /// Maximum absolute component of the residual vector
    norm_rr: f64,

    /// Maximum absolute component of the residual vector in the previous iteration
    norm_rr_prev: f64,

    /// Maximum absolute component of the -ΔU vector
    norm_mdu: f64,

    /// Convergence flag on the residual norm
    converged_on_rr: bool,

    /// Convergence flag on the relative -ΔU norm
    converged_on_mdu: bool,

    /// Number of convergence failures in the current load step
    n_failed_per_step: usize,
}

impl<'a> ControlConvergence<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ControlConvergence {
            config,
            norm_rr: f64::MAX,
            norm_rr_prev: f64::MAX,
            norm_mdu: f64::MAX,
            converged_on_rr: false,
            converged_on_mdu: false,
            n_failed_per_step: 0,
        }
    }

    /// Resets the flags at the beginning of a load step
    pub fn reset(&mut self) {
        self.norm_rr = f64::MAX;
        self.norm_rr_prev = f64::MAX;
        self.norm_mdu = f64::MAX;
        self.converged_on_rr = false;
        self.converged_on_mdu = false;
    }

    /// Analyzes the residual vector and checks convergence
    pub fn analyze_rr(&mut self, iteration: usize, rr: &Vector) -> Result<(), StrError> {
        self.norm_rr_prev = if iteration == 0 { f64::MAX } else { self.norm_rr };
        self.norm_rr = vec_norm(rr, Norm::Max);
        if !self.norm_rr.is_finite() {
            return Err("found NaN or Inf in the residual vector");
        }
        self.converged_on_rr = self.norm_rr < self.config.tol_rr_abs;
        Ok(())
    }

    /// Analyzes the -ΔU vector and checks convergence
    pub fn analyze_mdu(&mut self, mdu: &Vector, uu: &Vector) -> Result<(), StrError> {
        self.norm_mdu = vec_norm(mdu, Norm::Max);
        if !self.norm_mdu.is_finite() {
            return Err("found NaN or Inf in the -ΔU vector");
        }
        let norm_uu = vec_norm(uu, Norm::Max);
        self.converged_on_mdu = self.norm_mdu < self.config.tol_mdu_rel * (1.0 + norm_uu);
        Ok(())
    }

    /// Returns whether the iterations have converged or not
    pub fn converged(&self) -> bool {
        self.converged_on_rr || self.converged_on_mdu
    }

    /// Returns whether the residual norm is growing or not
    pub fn diverging(&self) -> bool {
        self.norm_rr > self.norm_rr_prev
    }

    /// Records a convergence failure in the current load step
    pub fn add_failed(&mut self) {
        self.n_failed_per_step += 1;
    }

    /// Clears the failure counter (at the beginning of a new load step)
    pub fn reset_failed(&mut self) {
        self.n_failed_per_step = 0;
    }

    /// Returns whether too many failures have occurred in the current load step
    pub fn too_many_failures(&self) -> bool {
        self.n_failed_per_step > self.config.allowed_step_n_failure
    }

    /// Prints the table header
    pub fn print_header(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("\nhypsim ==================== load stepping ====================\n");
            println!(
                "{:>9} {:>13} {:>13} {:>5} {:>10} {:>10}",
                "timestep", "t", "Δt", "iter", "max(R)", "max(-ΔU)"
            );
        }
    }

    /// Prints the timestep data
    pub fn print_timestep(&self, timestep: usize, t: f64, ddt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>9} {:>13.6e} {:>13.6e}", timestep, t, ddt);
        }
    }

    /// Prints the iteration data
    pub fn print_iteration(&self, iteration: usize) {
        if self.config.verbose_iterations {
            let mark = if self.converged() { " ✓" } else { "" };
            let norm_mdu = if self.norm_mdu == f64::MAX {
                String::from(". ")
            } else {
                format!("{:>10.2e}", self.norm_mdu)
            };
            println!(
                "{:>9} {:>13} {:>13} {:>5} {:>10.2e} {:>10}{}",
                "", "", "", iteration, self.norm_rr, norm_mdu, mark
            );
        }
    }

    /// Prints a message about a failed load step
    pub fn print_failed(&self, ddt_new: f64) {
        if self.config.verbose_timesteps {
            println!(
                "{:>9} step failed ({} so far); retrying with Δt = {:.6e}",
                "", self.n_failed_per_step, ddt_new
            );
        }
    }

    /// Prints the footer
    pub fn print_footer(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!();
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
