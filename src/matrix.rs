use std::fmt::{Debug, Formatter};

use crate::ring::*;

///
/// A dense, row-major matrix that owns its elements.
///
/// As with ring elements, the entries don't know their ring, so operations
/// that need ring arithmetic take the ring as additional parameter.
///
pub struct OwnedMatrix<T> {
    data: Vec<T>,
    col_count: usize
}

impl<T> OwnedMatrix<T> {

    ///
    /// Creates the `row_count x col_count` [`OwnedMatrix`] whose `(i, j)`-th entry
    /// is the output of the given function on `(i, j)`.
    ///
    pub fn from_fn<F>(row_count: usize, col_count: usize, mut f: F) -> Self
        where F: FnMut(usize, usize) -> T
    {
        let mut data = Vec::with_capacity(row_count * col_count);
        for i in 0..row_count {
            for j in 0..col_count {
                data.push(f(i, j));
            }
        }
        return Self { data, col_count };
    }

    ///
    /// Creates the matrix whose rows are the given vectors, which must all have the same length.
    ///
    pub fn from_rows<I>(rows: I, col_count: usize) -> Self
        where I: IntoIterator<Item = Vec<T>>
    {
        let mut data = Vec::new();
        for row in rows {
            assert_eq!(col_count, row.len());
            data.extend(row);
        }
        return Self { data, col_count };
    }

    pub fn row_count(&self) -> usize {
        if self.col_count == 0 { 0 } else { self.data.len() / self.col_count }
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn at(&self, i: usize, j: usize) -> &T {
        assert!(j < self.col_count);
        &self.data[i * self.col_count + j]
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        assert!(j < self.col_count);
        &mut self.data[i * self.col_count + j]
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[(i * self.col_count)..((i + 1) * self.col_count)]
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i != j {
            for k in 0..self.col_count {
                self.data.swap(i * self.col_count + k, j * self.col_count + k);
            }
        }
    }

    pub fn clone_matrix<R: RingStore>(&self, ring: R) -> Self
        where R::Type: RingBase<Element = T>
    {
        Self { data: self.data.iter().map(|x| ring.clone_el(x)).collect(), col_count: self.col_count }
    }
}

impl<T: Debug> Debug for OwnedMatrix<T> {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries((0..self.row_count()).map(|i| self.row(i))).finish()
    }
}

impl<T: Clone> Clone for OwnedMatrix<T> {

    fn clone(&self) -> Self {
        Self { data: self.data.clone(), col_count: self.col_count }
    }
}

#[test]
fn test_layout() {
    let mut A = OwnedMatrix::from_fn(2, 3, |i, j| (3 * i + j) as i128);
    assert_eq!(2, A.row_count());
    assert_eq!(3, A.col_count());
    assert_eq!(&[3, 4, 5], A.row(1));
    A.swap_rows(0, 1);
    assert_eq!(3, *A.at(0, 0));
    *A.at_mut(1, 2) = 10;
    assert_eq!("[[3, 4, 5], [0, 1, 10]]", format!("{:?}", A));
}
