use crate::StrError;
use gemlab::mesh::Mesh;
use russell_sparse::{Genie, LinSolParams};
use std::fmt;

/// Holds configuration parameters for the simulation
///
/// The pseudo-time t is the load fraction; it goes from `t_ini` (default 0)
/// to `t_fin` (default 1) in `n_load_steps` increments. A load step that
/// fails to converge is retried with a halved increment; the number of
/// retries per step is bounded by `allowed_step_n_failure`.
pub struct Config {
    /// Space dimension (from the mesh)
    pub ndim: usize,

    /// Gravity acceleration (applied as a body force ρ·g along -z)
    pub gravity: f64,

    /// Number of (base) load steps from t_ini to t_fin
    pub n_load_steps: usize,

    /// Initial pseudo-time (load fraction)
    pub t_ini: f64,

    /// Final pseudo-time (load fraction)
    pub t_fin: f64,

    /// Minimum allowed pseudo-time increment (reached by successive halvings)
    pub ddt_min: f64,

    /// Maximum number of time steps (including retried ones)
    pub n_max_time_steps: usize,

    /// Maximum number of Newton-Raphson iterations per step
    pub n_max_iterations: usize,

    /// Number of convergence failures allowed per load step (increment halvings)
    pub allowed_step_n_failure: usize,

    /// Absolute tolerance on the residual max-norm
    pub tol_rr_abs: f64,

    /// Relative tolerance on the displacement increment
    pub tol_mdu_rel: f64,

    /// Keeps the tangent matrix of the first iteration (modified Newton)
    pub constant_tangent: bool,

    /// Linear solver kind
    pub lin_sol_genie: Genie,

    /// Linear solver parameters
    pub lin_sol_params: LinSolParams,

    /// Prints a line per load step
    pub verbose_timesteps: bool,

    /// Prints a line per Newton iteration
    pub verbose_iterations: bool,

    /// Enables the linear solver verbose mode
    pub verbose_lin_sys_solve: bool,
}

impl Config {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh) -> Self {
        Config {
            ndim: mesh.ndim,
            gravity: 0.0,
            n_load_steps: 10,
            t_ini: 0.0,
            t_fin: 1.0,
            ddt_min: 1e-5,
            n_max_time_steps: 1_000,
            n_max_iterations: 10,
            allowed_step_n_failure: 8,
            tol_rr_abs: 1e-8,
            tol_mdu_rel: 1e-10,
            constant_tangent: false,
            lin_sol_genie: Genie::Umfpack,
            lin_sol_params: LinSolParams::new(),
            verbose_timesteps: true,
            verbose_iterations: true,
            verbose_lin_sys_solve: false,
        }
    }

    /// Validates all configuration parameters
    ///
    /// Returns a message with the first error found, or None if all is fine.
    pub fn validate(&self) -> Option<String> {
        if self.ndim != 3 {
            return Some(format!("ndim = {} is invalid; only 3D is available", self.ndim));
        }
        if self.gravity < 0.0 {
            return Some(format!("gravity = {:?} is incorrect; it must be ≥ 0.0", self.gravity));
        }
        if self.n_load_steps < 1 {
            return Some("n_load_steps must be ≥ 1".to_string());
        }
        if self.t_fin <= self.t_ini {
            return Some(format!(
                "t_fin = {:?} is incorrect; it must be > t_ini = {:?}",
                self.t_fin, self.t_ini
            ));
        }
        if self.ddt_min <= 0.0 {
            return Some(format!("ddt_min = {:?} is incorrect; it must be > 0.0", self.ddt_min));
        }
        if self.n_max_iterations < 1 {
            return Some("n_max_iterations must be ≥ 1".to_string());
        }
        None
    }

    /// Returns the base pseudo-time increment
    pub fn ddt_base(&self) -> f64 {
        (self.t_fin - self.t_ini) / (self.n_load_steps as f64)
    }

    /// Sets the gravity acceleration
    pub fn set_gravity(&mut self, value: f64) -> &mut Self {
        self.gravity = value;
        self
    }

    /// Sets the number of (base) load steps
    pub fn set_n_load_steps(&mut self, value: usize) -> &mut Self {
        self.n_load_steps = value;
        self
    }

    /// Sets the initial and final pseudo-times
    pub fn set_t_range(&mut self, t_ini: f64, t_fin: f64) -> &mut Self {
        self.t_ini = t_ini;
        self.t_fin = t_fin;
        self
    }

    /// Sets the minimum allowed pseudo-time increment
    pub fn set_ddt_min(&mut self, value: f64) -> &mut Self {
        self.ddt_min = value;
        self
    }

    /// Sets the maximum number of time steps
    pub fn set_n_max_time_steps(&mut self, value: usize) -> &mut Self {
        self.n_max_time_steps = value;
        self
    }

    /// Sets the maximum number of Newton-Raphson iterations per step
    pub fn set_n_max_iterations(&mut self, value: usize) -> &mut Self {
        self.n_max_iterations = value;
        self
    }

    /// Sets the number of convergence failures allowed per load step
    pub fn set_allowed_step_n_failure(&mut self, value: usize) -> &mut Self {
        self.allowed_step_n_failure = value;
        self
    }

    /// Sets the absolute tolerance on the residual max-norm
    pub fn set_tol_rr_abs(&mut self, value: f64) -> &mut Self {
        self.tol_rr_abs = value;
        self
    }

    /// Sets the relative tolerance on the displacement increment
    pub fn set_tol_mdu_rel(&mut self, value: f64) -> &mut Self {
        self.tol_mdu_rel = value;
        self
    }

    /// Sets the modified Newton flag (constant tangent matrix)
    pub fn set_constant_tangent(&mut self, flag: bool) -> &mut Self {
        self.constant_tangent = flag;
        self
    }

    /// Sets the linear solver kind
    pub fn set_lin_sol_genie(&mut self, genie: Genie) -> &mut Self {
        self.lin_sol_genie = genie;
        self
    }

    /// Sets the linear solver parameters
    pub fn set_lin_sol_params(&mut self, params: LinSolParams) -> &mut Self {
        self.lin_sol_params = params;
        self
    }

    /// Enables or disables all verbose output
    pub fn set_verbose(&mut self, timesteps: bool, iterations: bool) -> &mut Self {
        self.verbose_timesteps = timesteps;
        self.verbose_iterations = iterations;
        self
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "gravity = {:?}\n", self.gravity).unwrap();
        write!(f, "n_load_steps = {:?}\n", self.n_load_steps).unwrap();
        write!(f, "t_ini = {:?}\n", self.t_ini).unwrap();
        write!(f, "t_fin = {:?}\n", self.t_fin).unwrap();
        write!(f, "ddt_min = {:?}\n", self.ddt_min).unwrap();
        write!(f, "n_max_time_steps = {:?}\n", self.n_max_time_steps).unwrap();
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations).unwrap();
        write!(f, "allowed_step_n_failure = {:?}\n", self.allowed_step_n_failure).unwrap();
        write!(f, "tol_rr_abs = {:?}\n", self.tol_rr_abs).unwrap();
        write!(f, "tol_mdu_rel = {:?}\n", self.tol_mdu_rel).unwrap();
        write!(f, "constant_tangent = {:?}\n", self.constant_tangent).unwrap();
        write!(f, "lin_sol_genie = {:?}\n", self.lin_sol_genie).unwrap();
        Ok(())
    }
}

/// Ensures validate() passes, otherwise returns an error
pub(crate) fn validate_or_err(config: &Config) -> Result<(), StrError> {
    if let Some(msg) = config.validate() {
        println!("ERROR: {}", msg);
        return Err("cannot allocate simulation because config.validate() failed");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
