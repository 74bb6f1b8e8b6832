use crate::StrError;
use gemlab::mesh::{At, Block, Feature, Features, Mesh};
use gemlab::shapes::GeoKind;
use gemlab::util::any_x;

/// Generates a structured Hex8 mesh of a box
///
/// # Input
///
/// * `min` -- (xmin, ymin, zmin) corner of the box
/// * `max` -- (xmax, ymax, zmax) corner of the box
/// * `ndiv` -- (nx, ny, nz) number of subdivisions along each axis
pub fn generate_box_mesh(min: (f64, f64, f64), max: (f64, f64, f64), ndiv: (usize, usize, usize)) -> Result<Mesh, StrError> {
    let (xmin, ymin, zmin) = min;
    let (xmax, ymax, zmax) = max;
    if xmax <= xmin || ymax <= ymin || zmax <= zmin {
        return Err("the box corners are invalid; max must be greater than min along each axis");
    }
    if ndiv.0 < 1 || ndiv.1 < 1 || ndiv.2 < 1 {
        return Err("the number of subdivisions must be ≥ 1 along each axis");
    }
    let mut block = Block::new(&[
        [xmin, ymin, zmin],
        [xmax, ymin, zmin],
        [xmax, ymax, zmin],
        [xmin, ymax, zmin],
        [xmin, ymin, zmax],
        [xmax, ymin, zmax],
        [xmax, ymax, zmax],
        [xmin, ymax, zmax],
    ])?;
    block.set_ndiv(&[ndiv.0, ndiv.1, ndiv.2])?;
    block.subdivide(GeoKind::Hex8)
}

/// Holds the six boundary face sets of a box mesh
///
/// The faces are tagged by coordinate predicates against the actual box
/// extents, which are read off the mesh. A point on an edge or corner of the
/// box belongs to every face set containing it; this is harmless because
/// boundary conditions are applied per face feature, and prescribed
/// (essential) values take precedence over natural ones in the solver.
pub struct BoxFaces<'a> {
    /// Faces on x = xmin
    pub left: Vec<&'a Feature>,

    /// Faces on x = xmax
    pub right: Vec<&'a Feature>,

    /// Faces on y = ymin
    pub front: Vec<&'a Feature>,

    /// Faces on y = ymax
    pub back: Vec<&'a Feature>,

    /// Faces on z = zmin
    pub bottom: Vec<&'a Feature>,

    /// Faces on z = zmax
    pub top: Vec<&'a Feature>,
}

impl<'a> BoxFaces<'a> {
    /// Finds the six boundary face sets of a box mesh
    pub fn new(mesh: &Mesh, features: &'a Features) -> Result<Self, StrError> {
        if mesh.ndim != 3 {
            return Err("only 3D meshes are supported");
        }
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for point in &mesh.points {
            for i in 0..3 {
                min[i] = f64::min(min[i], point.coords[i]);
                max[i] = f64::max(max[i], point.coords[i]);
            }
        }
        Ok(BoxFaces {
            left: features.search_faces(At::X(min[0]), any_x)?,
            right: features.search_faces(At::X(max[0]), any_x)?,
            front: features.search_faces(At::Y(min[1]), any_x)?,
            back: features.search_faces(At::Y(max[1]), any_x)?,
            bottom: features.search_faces(At::Z(min[2]), any_x)?,
            top: features.search_faces(At::Z(max[2]), any_x)?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
