use gemlab::prelude::*;
use hypsim::prelude::*;
use hypsim::StrError;

const NAME: &str = "uniaxial_traction";

// geometry
const LX: f64 = 0.25; // width
const LY: f64 = 0.5; // depth
const LZ: f64 = 1.0; // height
const NDIV: (usize, usize, usize) = (5, 10, 20);

// material
const YOUNG: f64 = 10.0; // Young's modulus
const POISSON: f64 = 0.4; // Poisson's coefficient

// loading
const T_MAX: f64 = 10.0; // magnitude of the vertical traction at full load
const KAPPA: f64 = 100.0; // surface penalty coefficient
const N_LOAD_STEPS: usize = 10;

fn main() -> Result<(), StrError> {
    // mesh
    let mesh = generate_box_mesh((0.0, 0.0, 0.0), (LX, LY, LZ), NDIV)?;
    let features = Features::new(&mesh, false);
    let faces = BoxFaces::new(&mesh, &features)?;

    // parameters
    let param = ParamSolid {
        density: 1.0,
        stress_strain: ParamStressStrain::NeoHookean {
            young: YOUNG,
            poisson: POISSON,
        },
        ngauss: None,
    };
    let base = FemBase::new(&mesh, param)?;

    // essential boundary conditions: clamp the bottom face
    let mut essential = Essential::new();
    for dof in [Dof::Ux, Dof::Uy, Dof::Uz] {
        essential.faces(&faces.bottom, dof, 0.0);
    }

    // natural boundary conditions: ramp the vertical traction on the top face
    let mut natural = Natural::new();
    natural.faces_fn(&faces.top, Nbc::Qz, T_MAX, |t| t);

    // surface penalty on the top face
    let mut penalty = SurfacePenalty::new();
    penalty.faces(&faces.top, KAPPA);

    // configuration
    let mut config = Config::new(&mesh);
    config.set_n_load_steps(N_LOAD_STEPS);

    // solver and state
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural, &penalty)?;
    let mut state = FemState::new(&mesh, &base, &essential, &config)?;

    // output files
    let mut file_io = FileIo::new();
    file_io.activate(&mesh, &base, NAME, None)?;

    // run the load stepping
    solver.solve(&mut state, &mut file_io)?;

    // convert the snapshots for ParaView
    let post = PostProc::new(DEFAULT_OUT_DIR, NAME)?;
    for index in &post.file_io.indices {
        let snapshot = post.read_state(*index)?;
        post.file_io.write_vtu(&post.mesh, &snapshot, *index)?;
    }
    post.file_io.write_pvd()?;

    // report the vertical displacement of a top corner and the stored energy
    let top_corner = mesh
        .points
        .iter()
        .find(|p| p.coords[0] < 1e-10 && p.coords[1] < 1e-10 && (p.coords[2] - LZ).abs() < 1e-10)
        .ok_or("cannot find the top corner point")?;
    let uz = post.displacement(&state, top_corner.id, Dof::Uz)?;
    let energy = solver.strain_energy(&state)?;
    println!("\nuz(top corner) = {:.6}", uz);
    println!("strain energy  = {:.6}", energy);
    println!("results: {}", post.file_io.path_pvd());
    Ok(())
}
