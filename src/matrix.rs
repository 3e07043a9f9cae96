use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use crate::feq;
use crate::tuple::*;
use crate::error::{ TraceError, TraceResult };

/// A 2x2 matrix.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
struct Matrix2D {
    data: [f64; 4],
}

impl From<[f64; 4]> for Matrix2D {
    fn from(data: [f64; 4]) -> Matrix2D {
        Matrix2D { data }
    }
}

impl Index<(usize, usize)> for Matrix2D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 2) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix2D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 2) + index.1]
    }
}

/// A 3x3 matrix.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
struct Matrix3D {
    data: [f64; 9],
}

impl From<[f64; 9]> for Matrix3D {
    fn from(data: [f64; 9]) -> Matrix3D {
        Matrix3D { data }
    }
}

impl Index<(usize, usize)> for Matrix3D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 3) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix3D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 3) + index.1]
    }
}

/// A 4x4 matrix.
///
/// These matrices are used almost universally in the ray tracer logic.
/// Basically, these matrices encode transformations in 3D space, transforming
/// both vectors and points (`w` components of `0.0` and `1.0`, respectively).
///
/// Note that the smaller matrix types `Matrix2D` and `Matrix3D` exist only to
/// support determinant calculations on this type; they are private to the
/// module. Because each size is its own type, matrices of different
/// dimensions can never compare equal.
///
/// # Examples
///
/// Creating an identity matrix:
///
/// ```
/// # #![allow(unused)]
/// # use lumen::matrix::Matrix4D;
/// let mat = Matrix4D::identity();
/// assert_eq!(mat.determinant(), 1.0);
/// ```
///
/// Calculating a view transformation (for cameras, etc.):
///
/// ```
/// # #![allow(unused)]
/// # use lumen::tuple::Tuple4D;
/// # use lumen::matrix::Matrix4D;
/// let from = Tuple4D::point(0.0, 0.0, 0.0);
/// let to = Tuple4D::point(0.0, 0.0, 5.0);
/// let up = Tuple4D::vector(0.0, 1.0, 0.0);
/// let view = Matrix4D::view_transform(from, to, up).unwrap();
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix4D {
    data: [f64; 16],
}

impl Matrix2D {
    /// Calculates the determinant of a `Matrix2D` with the closed form
    /// `ad - bc`.
    fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

impl Matrix3D {
    /// Returns the submatrix of a `Matrix3D`.
    ///
    /// A submatrix can be thought of as a matrix which "eliminates" a row and
    /// column of a larger matrix. For example, given the following 3x3 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0, 2.0,
    ///     3.0, 1.0, 0.0,
    ///     1.0, 1.0, 1.0
    /// ]
    /// ```
    ///
    /// The corresponding submatrix for `row == 1`, `col == 2` (assuming zero
    /// index), would be a 2x2 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0,
    ///     1.0, 1.0
    /// ]
    /// ```
    fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut buf: [f64; 4] = [0.0; 4];
        let mut count = 0;

        for r in 0..3 {
            for c in 0..3 {
                if !(r == row || c == col) {
                    buf[count] = self[(r, c)];
                    count += 1;
                }
            }
        }

        Matrix2D { data: buf }
    }

    /// Returns the minor of a `Matrix3D` at row and column.
    ///
    /// The "minor" is the determinant of the submatrix at `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// Returns the cofactor of a `Matrix3D` at row and column.
    ///
    /// The "cofactor" is the minor of a matrix, negated according to the
    /// "cofactor matrix." If the sum of row and column is even, the minor
    /// remains positive; if the sum is odd, the minor is negated.
    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        m * if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
    }

    /// Calculates the determinant of a `Matrix3D` by cofactor expansion along
    /// the first row.
    fn determinant(&self) -> f64 {
        let mut sum = 0.0;
        for c in 0..3 {
            sum += self[(0, c)] * self.cofactor(0, c);
        }

        sum
    }
}

/// Determines whether two `Matrix4D`s are equal.
///
/// Matrices are compared element-wise. Note that equality is approximate, as
/// `Matrix4D` elements are floating point numbers.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix4D {
    /// Creates a new `Matrix4D`. All elements are initialized to `0.0`.
    pub fn new() -> Matrix4D {
        Matrix4D { data: [0.0; 16] }
    }

    /// Instantiates a 4x4 identity matrix.
    pub fn identity() -> Matrix4D {
        let mut buf = [0.0; 16];
        buf[0] = 1.0; buf[5] = 1.0; buf[10] = 1.0; buf[15] = 1.0;

        Matrix4D { data: buf }
    }

    /// Instantiates a 4x4 translation matrix.
    ///
    /// This matrix offsets a point by `x`, `y` and `z`. Vectors (`w == 0`)
    /// are unaffected by translation.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix.
    ///
    /// This matrix scales vectors or points by `x`, `y` and `z` along the X,
    /// Y and Z axes, respectively.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the X axis.
    ///
    /// Rotations occur clockwise. Assumes that parameter `r` is in radians.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused)]
    /// # use lumen::tuple::Tuple4D;
    /// # use lumen::matrix::Matrix4D;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Y axis.
    ///
    /// Rotations occur clockwise. Assumes that parameter `r` is in radians.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Z axis.
    ///
    /// Rotations occur clockwise. Assumes that parameter `r` is in radians.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// Each parameter alters the change of one axis with respect to another;
    /// for example, `xy` alters the change in `x` with respect to `y`.
    ///
    /// # Examples
    ///
    /// Shearing points along the `xy` slope:
    ///
    /// ```
    /// # use lumen::tuple::Tuple4D;
    /// # use lumen::matrix::Matrix4D;
    /// let point = Tuple4D::point(2.0, 3.0, 4.0);
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * point, Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// The view transform manipulates the world from the perspective of an
    /// eye. The `from` parameter is where the eye is, the `to` parameter is
    /// where the eye is looking, and the `up` parameter indicates where "up"
    /// is in the world.
    ///
    /// A "default" orientation fixes the eye at the origin, looking at a
    /// screen one unit "deep." The `up` vector points conventionally up, with
    /// `y=1`.
    ///
    /// Note that the view transformation moves the *world* with respect to
    /// the eye, not the other way around.
    ///
    /// Fails if `from` and `to` coincide or `up` has zero magnitude, since
    /// no orientation can be derived from them.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D)
        -> TraceResult<Matrix4D> {
        let forward = (to - from).normalize()?;
        let left = forward.cross(&up.normalize()?);
        let true_up = left.cross(&forward);

        let mut orientation = Matrix4D::identity();
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        Ok(orientation * Matrix4D::translation(-from.x, -from.y, -from.z))
    }

    /// Produces the transpose of a matrix, returning a new matrix.
    ///
    /// The transpose of a matrix is roughly defined by the following formula
    /// (given matrix `A`, create transpose matrix `A^T`):
    ///
    /// ```latex
    /// A^T_{ij} = A_{ji}
    /// ```
    ///
    /// Where subscripts `ij` represent the element of `A` at row `i`, column
    /// `j`.
    pub fn transposition(&self) -> Matrix4D {
        let mut buf = *self;

        for r in 0..4 {
            for c in (r+1)..4 {
                let tmp = buf[(r, c)];
                buf[(r, c)] = buf[(c, r)];
                buf[(c, r)] = tmp;
            }
        }

        buf
    }

    /// Returns the submatrix of a `Matrix4D`.
    ///
    /// The submatrix "eliminates" row `row` and column `col` of the original
    /// matrix, yielding a 3x3 matrix. See `Matrix3D::submatrix` for a worked
    /// example of the same operation one size down.
    fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        let mut buf: [f64; 9] = [0.0; 9];
        let mut count = 0;

        for r in 0..4 {
            for c in 0..4 {
                if !(r == row || c == col) {
                    buf[count] = self[(r, c)];
                    count += 1;
                }
            }
        }

        Matrix3D { data: buf }
    }

    /// Returns the minor of a `Matrix4D` at row and column.
    ///
    /// The "minor" is the determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// Returns the cofactor of a `Matrix4D` at row and column.
    ///
    /// The "cofactor" is the minor of a matrix, negated according to the
    /// "cofactor matrix." If the sum of row and column is even, the minor
    /// remains positive; if the sum is odd, the minor is negated.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        m * if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
    }

    /// Calculates the determinant of a `Matrix4D` by cofactor expansion along
    /// the first row.
    pub fn determinant(&self) -> f64 {
        let mut sum = 0.0;
        for c in 0..4 {
            sum += self[(0, c)] * self.cofactor(0, c);
        }

        sum
    }

    /// Calculates the inverse of a `Matrix4D`, if it exists.
    ///
    /// A `Matrix4D` is invertible exactly when its determinant is nonzero;
    /// otherwise this fails with `TraceError::NonInvertibleMatrix`. Nothing
    /// is substituted for a missing inverse — consumers propagate the error.
    ///
    /// The transpose of the cofactor matrix is folded into the index swap
    /// below, avoiding a separate transposition pass.
    pub fn inverse(&self) -> TraceResult<Matrix4D> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(TraceError::NonInvertibleMatrix);
        }

        let mut inv = Matrix4D::new();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Ok(inv)
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        Matrix4D { data }
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

/// Multiplication between two matrices.
///
/// Note that matrix multiplication is not commutative; in other words, for
/// matrix `A` and matrix `B`, `A * B` is not necessarily equal to `B * A`.
///
/// # Examples
///
/// ```
/// # use lumen::matrix::Matrix4D;
/// let m1 = Matrix4D::scaling(2.0, 3.0, 4.0);
/// let m2 = Matrix4D::scaling(4.0, 3.0, 2.0);
/// assert_eq!(m1 * m2, Matrix4D::scaling(8.0, 9.0, 8.0));
/// ```
impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::new();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)]
            }
        }

        res
    }
}

/// Multiplication between a matrix and a `Tuple4D`.
///
/// Note that `Tuple4D`s are multiplied on the right; the tuple is treated as
/// a 4-row, 1-column matrix.
///
/// # Examples
///
/// ```
/// # use lumen::tuple::Tuple4D;
/// # use lumen::matrix::Matrix4D;
/// let v = Tuple4D::vector(1.0, 4.0, 5.0);
/// let m = Matrix4D::scaling(2.0, 2.0, 2.0);
/// assert_eq!(m * v, Tuple4D::vector(2.0, 8.0, 10.0));
/// ```
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let mut buf: [f64; 4] = Default::default();

        for r in 0..4 {
            buf[r] = self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w;
        }

        Tuple4D { x: buf[0], y: buf[1], z: buf[2], w: buf[3] }
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
}

#[test]
fn transpose() {
     let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                         9.0, 8.0, 0.0, 8.0,
                         1.0, 8.0, 5.0, 3.0,
                         0.0, 0.0, 5.0, 8.0, ].into();

     let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                         9.0, 8.0, 8.0, 0.0,
                         3.0, 0.0, 5.0, 5.0,
                         0.0, 8.0, 3.0, 8.0, ].into();

     assert_eq!(t, a.transposition());
     assert_eq!(t.transposition(), a);
}

#[test]
fn transpose_identity() {
    let i = Matrix4D::identity();
    assert_eq!(i, i.transposition());
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
     let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                         -8.0, 5.0,  8.0, 6.0,
                         -1.0, 0.0,  8.0, 2.0,
                         -7.0, 1.0, -1.0, 1.0, ].into();

     let s: Matrix3D = [ -6.0,  1.0, 6.0,
                         -8.0,  8.0, 6.0,
                         -7.0, -1.0, 1.0, ].into();

     assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_minor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(1, 0), 25.0);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
     let a: Matrix3D = [  1.0, 2.0,  6.0,
                         -5.0, 8.0, -4.0,
                          2.0, 6.0,  4.0, ].into();

     assert_eq!(a.cofactor(0, 0), 56.0);
     assert_eq!(a.cofactor(0, 1), 12.0);
     assert_eq!(a.cofactor(0, 2), -46.0);
     assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
     let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                         -3.0,  1.0,  7.0,  3.0,
                          1.0,  2.0, -9.0,  6.0,
                         -6.0,  7.0,  7.0, -9.0, ].into();

     assert_eq!(a.cofactor(0, 0), 690.0);
     assert_eq!(a.cofactor(0, 1), 447.0);
     assert_eq!(a.cofactor(0, 2), 210.0);
     assert_eq!(a.cofactor(0, 3), 51.0);
     assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_inverse() {
     let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                          7.0,  5.0,  6.0,  1.0,
                         -6.0,  0.0,  9.0,  6.0,
                         -3.0,  0.0, -9.0, -4.0, ].into();

     let i: Matrix4D = [ -0.15385, -0.15385, -0.28205, -0.53846,
                         -0.07692,  0.12308,  0.02564,  0.03077,
                          0.35897,  0.35897,  0.43590,  0.92308,
                         -0.69231, -0.69231, -0.76923, -1.92308, ].into();

     assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_mult() {
     let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                          3.0,  8.0,  2.0, -9.0,
                         -4.0,  4.0,  4.0,  1.0,
                         -6.0,  5.0, -1.0,  1.0, ].into();

     let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                         3.0, -1.0, 7.0, 0.0,
                         7.0,  0.0, 5.0, 4.0,
                         6.0, -2.0, 0.0, 5.0  ].into();

     let c = a * b;

     assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn mat4_inverse_times_original_is_identity() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    assert_eq!(a * a.inverse().unwrap(), Matrix4D::identity());
}

#[test]
fn mat4_inverse_of_identity_is_identity() {
    let i = Matrix4D::identity();

    assert_eq!(i.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_of_transpose_is_transpose_of_inverse() {
    let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                         7.0,  5.0,  6.0,  1.0,
                        -6.0,  0.0,  9.0,  6.0,
                        -3.0,  0.0, -9.0, -4.0, ].into();

    assert_eq!(
        a.transposition().inverse().unwrap(),
        a.inverse().unwrap().transposition()
    );
}

#[test]
fn mat4_singular_matrix_has_no_inverse() {
    let a: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert_eq!(a.inverse(), Err(TraceError::NonInvertibleMatrix));
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
}

#[test]
fn mat4_translation_inverse() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(-8.0, 7.0, 3.0));
}

#[test]
fn mat4_translation_vector() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-8.0, 18.0, 32.0));
}

#[test]
fn mat4_scaling_inverse() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0).inverse().unwrap();
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-2.0, 2.0, 2.0));
}

#[test]
fn mat4_scaling_reflection() {
    let transform = Matrix4D::scaling(-1.0, 1.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotate_x() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_y() {
    let half_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_z() {
    let half_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn mat4_shear_xz() {
    let transform = Matrix4D::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(6.0, 3.0, 4.0));
}

#[test]
fn mat4_shear_yx() {
    let transform = Matrix4D::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 5.0, 4.0));
}

#[test]
fn mat4_shear_zy() {
    let transform = Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 3.0, 7.0));
}

#[test]
fn chained_transforms() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);

    let t = c * b * a;
    let p = Tuple4D::point(1.0, 0.0, 1.0);

    assert_eq!(t * p, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::identity(),
        Matrix4D::view_transform(from, to, up).unwrap());
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple4D::point(0.0, 0.0, 8.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(),
        Matrix4D::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let a: Matrix4D = [  -0.50709, 0.50709,  0.67612, -2.36643,
                          0.76772, 0.60609,  0.12122, -2.82843,
                         -0.35857, 0.59761, -0.71714,  0.00000,
                         -0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(), a);
}

#[test]
fn view_with_coincident_from_and_to_fails() {
    let from = Tuple4D::point(1.0, 2.0, 3.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, from, up),
        Err(TraceError::DegenerateVector));
}
