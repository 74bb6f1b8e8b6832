use super::Nbc;
use gemlab::mesh::Feature;
use std::fmt;

/// Holds natural (Neumann) boundary conditions
///
/// The specified value may be scaled by a function of the pseudo-time t
/// (the load fraction), enabling ramped loads.
pub struct Natural<'a> {
    /// Distributed BCs on faces: (face, condition, value, function index)
    pub on_faces: Vec<(&'a Feature, Nbc, f64, Option<usize>)>,

    /// Functions of pseudo-time scaling the respective values
    pub functions: Vec<Box<dyn Fn(f64) -> f64 + 'a>>,
}

impl<'a> Natural<'a> {
    /// Allocates a new instance
    pub fn new() -> Self {
        Natural {
            on_faces: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Sets natural boundary condition on a single face
    pub fn face(&mut self, face: &'a Feature, nbc: Nbc, value: f64) -> &mut Self {
        self.on_faces.push((face, nbc, value, None));
        self
    }

    /// Sets natural boundary conditions on faces
    pub fn faces(&mut self, faces: &[&'a Feature], nbc: Nbc, value: f64) -> &mut Self {
        for face in faces {
            self.on_faces.push((face, nbc, value, None));
        }
        self
    }

    /// Sets natural boundary conditions on faces with a multiplier function of pseudo-time
    ///
    /// The effective value at pseudo-time t is `value · f(t)`.
    pub fn faces_fn(&mut self, faces: &[&'a Feature], nbc: Nbc, value: f64, f: impl Fn(f64) -> f64 + 'a) -> &mut Self {
        let index = self.functions.len();
        self.functions.push(Box::new(f));
        for face in faces {
            self.on_faces.push((face, nbc, value, Some(index)));
        }
        self
    }
}

impl<'a> fmt::Display for Natural<'a> {
    /// Prints a formatted summary of the natural boundary conditions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Natural boundary conditions on faces\n").unwrap();
        write!(f, "====================================\n").unwrap();
        for (face, nbc, value, f_index) in &self.on_faces {
            match f_index {
                Some(i) => {
                    let fval = (self.functions[*i])(1.0);
                    write!(f, "{:?} : {:?} = {:?} × f(t), f(1) = {:?}\n", face.points, nbc, value, fval).unwrap();
                }
                None => write!(f, "{:?} : {:?} = {:?}\n", face.points, nbc, value).unwrap(),
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Natural;
    use crate::base::Nbc;
    use gemlab::mesh::Feature;
    use gemlab::shapes::GeoKind;

    #[test]
    fn natural_works() {
        let top = Feature {
            kind: GeoKind::Qua4,
            points: vec![4, 5, 6, 7],
        };
        let side = Feature {
            kind: GeoKind::Qua4,
            points: vec![0, 1, 5, 4],
        };
        let mut natural = Natural::new();
        natural
            .face(&side, Nbc::Qn, -20.0)
            .faces_fn(&[&top], Nbc::Qz, 10.0, |t| t);
        assert_eq!(natural.on_faces.len(), 2);
        assert_eq!(natural.functions.len(), 1);
        assert_eq!((natural.functions[0])(0.5), 0.5);
        assert_eq!(
            format!("{}", natural),
            "Natural boundary conditions on faces\n\
             ====================================\n\
             [0, 1, 5, 4] : Qn = -20.0\n\
             [4, 5, 6, 7] : Qz = 10.0 × f(t), f(1) = 1.0\n"
        );
    }
}
