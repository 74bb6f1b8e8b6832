use super::Dof;
use gemlab::mesh::{Feature, PointId};
use std::collections::HashMap;
use std::fmt;

/// Holds essential (Dirichlet) boundary conditions
///
/// Prescribed values take precedence over any natural boundary condition or
/// surface penalty contribution sharing the same point. If the same
/// (point, DOF) pair is set more than once, the last call wins.
pub struct Essential {
    /// Holds all prescribed (point, DOF) pairs and values
    pub all: HashMap<(PointId, Dof), f64>,
}

impl Essential {
    /// Allocates a new instance
    pub fn new() -> Self {
        Essential { all: HashMap::new() }
    }

    /// Sets essential boundary condition at points
    pub fn points(&mut self, points: &[PointId], dof: Dof, value: f64) -> &mut Self {
        for point_id in points {
            self.all.insert((*point_id, dof), value);
        }
        self
    }

    /// Sets essential boundary condition on faces
    pub fn faces(&mut self, faces: &[&Feature], dof: Dof, value: f64) -> &mut Self {
        for face in faces {
            for point_id in &face.points {
                self.all.insert((*point_id, dof), value);
            }
        }
        self
    }

    /// Returns the number of prescribed (point, DOF) pairs
    pub fn size(&self) -> usize {
        self.all.len()
    }
}

impl fmt::Display for Essential {
    /// Prints a formatted summary of the essential boundary conditions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Essential boundary conditions\n").unwrap();
        write!(f, "=============================\n").unwrap();
        let mut keys: Vec<_> = self.all.keys().collect();
        keys.sort();
        for key in keys {
            let value = self.all.get(key).unwrap();
            write!(f, "{:?} : {:?} = {:?}\n", key.0, key.1, value).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Essential;
    use crate::base::Dof;
    use gemlab::mesh::Feature;
    use gemlab::shapes::GeoKind;

    #[test]
    fn essential_works() {
        let mut essential = Essential::new();
        let faces = &[&Feature {
            kind: GeoKind::Qua4,
            points: vec![0, 1, 2, 3],
        }];
        essential
            .points(&[4], Dof::Uz, -0.5)
            .faces(faces, Dof::Ux, 0.0)
            .faces(faces, Dof::Uy, 0.0)
            .faces(faces, Dof::Uz, 0.0);
        assert_eq!(essential.size(), 13);
        assert_eq!(
            format!("{}", essential),
            "Essential boundary conditions\n\
             =============================\n\
             0 : Ux = 0.0\n\
             0 : Uy = 0.0\n\
             0 : Uz = 0.0\n\
             1 : Ux = 0.0\n\
             1 : Uy = 0.0\n\
             1 : Uz = 0.0\n\
             2 : Ux = 0.0\n\
             2 : Uy = 0.0\n\
             2 : Uz = 0.0\n\
             3 : Ux = 0.0\n\
             3 : Uy = 0.0\n\
             3 : Uz = 0.0\n\
             4 : Uz = -0.5\n"
        );
    }

    #[test]
    fn last_write_wins() {
        let mut essential = Essential::new();
        essential.points(&[0], Dof::Ux, 1.0).points(&[0], Dof::Ux, 2.0);
        assert_eq!(essential.size(), 1);
        assert_eq!(*essential.all.get(&(0, Dof::Ux)).unwrap(), 2.0);
    }
}
