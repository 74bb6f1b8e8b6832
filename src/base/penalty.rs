use gemlab::mesh::Feature;
use std::fmt;

/// Holds surface penalty regularization terms
///
/// Each entry adds the following term to the total potential energy:
///
/// ```text
///       ⌠
/// Π = κ │ ‖F - I‖² dA
///       ⌡
///       Γ
/// ```
///
/// where F is the deformation gradient of the attached solid cell evaluated
/// on the face Γ. Since ‖F - I‖² = ‖∇u‖², this term penalizes any in-plane
/// and out-of-plane gradient of the displacement near the surface.
pub struct SurfacePenalty<'a> {
    /// Penalized faces: (face, coefficient κ)
    pub on_faces: Vec<(&'a Feature, f64)>,
}

impl<'a> SurfacePenalty<'a> {
    /// Allocates a new instance
    pub fn new() -> Self {
        SurfacePenalty { on_faces: Vec::new() }
    }

    /// Sets the penalty on faces with coefficient κ
    pub fn faces(&mut self, faces: &[&'a Feature], kappa: f64) -> &mut Self {
        for face in faces {
            self.on_faces.push((face, kappa));
        }
        self
    }
}

impl<'a> fmt::Display for SurfacePenalty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Surface penalty terms\n").unwrap();
        write!(f, "=====================\n").unwrap();
        for (face, kappa) in &self.on_faces {
            write!(f, "{:?} : κ = {:?}\n", face.points, kappa).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
