use crate::StrError;
use russell_lab::{Matrix, Vector};
use russell_sparse::CooMatrix;

/// Assembles local vector into global vector
///
/// # Output
///
/// * `rr_global` -- is the global vector R with length = `n_equation`
///
/// # Input
///
/// * `r_local` -- is the local vector r with length = `n_equation_local`
/// * `local_to_global` -- is an array holding all equation numbers
/// * `ignore` -- tells whether a global equation number must be ignored in
///   the assembly process (e.g., because the DOF is prescribed). Its length
///   is equal to the total number of DOFs `n_equation`.
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
#[inline]
pub fn assemble_vector(rr_global: &mut Vector, r_local: &Vector, local_to_global: &[usize], ignore: &[bool]) {
    let n_equation_local = r_local.dim();
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !ignore[g] {
            rr_global[g] += r_local[l];
        }
    }
}

/// Assembles local matrix into global matrix
///
/// # Output
///
/// * `kk_global` -- is the global square matrix K with dims = (`n_equation`,`n_equation`)
///
/// # Input
///
/// * `kk_local` -- is the local square matrix K with dims = (`n_equation_local`,`n_equation_local`)
/// * `local_to_global` -- is an array holding all equation numbers
/// * `ignore` -- tells whether a global equation number must be ignored in
///   the assembly process (e.g., because the DOF is prescribed). Its length
///   is equal to the total number of DOFs `n_equation`.
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
#[inline]
pub fn assemble_matrix(
    kk_global: &mut CooMatrix,
    kk_local: &Matrix,
    local_to_global: &[usize],
    ignore: &[bool],
) -> Result<(), StrError> {
    let n_equation_local = kk_local.dims().0;
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !ignore[g] {
            for ll in 0..n_equation_local {
                let gg = local_to_global[ll];
                if !ignore[gg] {
                    kk_global.put(g, gg, kk_local.get(l, ll))?;
                }
            }
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{assemble_matrix, assemble_vector};
    use russell_lab::{Matrix, Vector};
    use russell_sparse::{CooMatrix, Sym};

    #[test]
    fn assemble_vector_works() {
        let mut rr = Vector::new(5);
        let r0 = Vector::from(&[10.0, 20.0]);
        let r1 = Vector::from(&[100.0, 200.0]);
        let l2g0 = &[0, 2];
        let l2g1 = &[2, 4];
        let ignore = &[false, false, false, false, true];
        assemble_vector(&mut rr, &r0, l2g0, ignore);
        assemble_vector(&mut rr, &r1, l2g1, ignore);
        assert_eq!(rr.as_data(), &[10.0, 0.0, 120.0, 0.0, 0.0]);
    }

    #[test]
    fn assemble_matrix_works() {
        let mut kk = CooMatrix::new(4, 4, 16, Sym::No).unwrap();
        let kke = Matrix::from(&[[1.0, 2.0], [3.0, 4.0]]);
        let l2g = &[1, 3];
        let ignore = &[false, false, false, true];
        assemble_matrix(&mut kk, &kke, l2g, ignore).unwrap();
        let dense = kk.as_dense();
        assert_eq!(dense.get(1, 1), 1.0);
        assert_eq!(dense.get(1, 3), 0.0); // ignored column
        assert_eq!(dense.get(3, 1), 0.0); // ignored row
        assert_eq!(dense.get(3, 3), 0.0);
    }
}
