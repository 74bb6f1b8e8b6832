use gemlab::prelude::*;
use hypsim::prelude::*;
use hypsim::StrError;

const NAME: &str = "test_gravity_column_3d";

// Column clamped at the bottom and loaded by its own weight only. With a
// light weight, the vertical displacement of the tip approaches the linear
// elasticity value uz = -ρ g L² / (2 E).
#[test]
fn test_gravity_column_3d() -> Result<(), StrError> {
    // mesh and face sets
    let mesh = generate_box_mesh((0.0, 0.0, 0.0), (0.5, 0.5, 2.0), (1, 1, 8))?;
    let features = Features::new(&mesh, false);
    let faces = BoxFaces::new(&mesh, &features)?;

    // parameters
    const YOUNG: f64 = 10.0;
    const DENSITY: f64 = 1.0;
    const GRAVITY: f64 = 0.1;
    const LENGTH: f64 = 2.0;
    let param = ParamSolid {
        density: DENSITY,
        stress_strain: ParamStressStrain::NeoHookean {
            young: YOUNG,
            poisson: 0.2,
        },
        ngauss: None,
    };
    let base = FemBase::new(&mesh, param)?;

    // essential boundary conditions
    let mut essential = Essential::new();
    for dof in [Dof::Ux, Dof::Uy, Dof::Uz] {
        essential.faces(&faces.bottom, dof, 0.0);
    }

    // no tractions; the weight is the only load
    let natural = Natural::new();
    let penalty = SurfacePenalty::new();

    // configuration
    let mut config = Config::new(&mesh);
    config.set_gravity(GRAVITY).set_n_load_steps(2).set_verbose(false, false);

    // solver, state, and output
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural, &penalty)?;
    let mut state = FemState::new(&mesh, &base, &essential, &config)?;
    let mut file_io = FileIo::new();
    file_io.activate(&mesh, &base, NAME, Some(DEFAULT_TEST_DIR))?;
    solver.solve(&mut state, &mut file_io)?;

    // the column shortens under its own weight
    let post = PostProc::new(DEFAULT_TEST_DIR, NAME)?;
    let top_corner = mesh
        .points
        .iter()
        .find(|p| p.coords[0] < 1e-10 && p.coords[1] < 1e-10 && (p.coords[2] - LENGTH).abs() < 1e-10)
        .ok_or("cannot find the top corner point")?;
    let uz_tip = post.displacement(&state, top_corner.id, Dof::Uz)?;
    assert!(uz_tip < 0.0);

    // compare with the linear elasticity estimate (loose tolerance because of
    // the clamped bottom and the coarse mesh)
    let uz_linear = -DENSITY * GRAVITY * LENGTH * LENGTH / (2.0 * YOUNG);
    assert!((uz_tip - uz_linear).abs() < 0.3 * uz_linear.abs());

    // the displacement magnitude grows with the height
    let mut corner = Vec::new();
    for point in &mesh.points {
        if point.coords[0] < 1e-10 && point.coords[1] < 1e-10 {
            let uz = post.displacement(&state, point.id, Dof::Uz)?;
            corner.push((point.coords[2], uz));
        }
    }
    corner.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    let mut previous = 1.0;
    for (_, uz) in &corner {
        assert!(*uz <= previous + 1e-12);
        previous = *uz;
    }
    Ok(())
}
