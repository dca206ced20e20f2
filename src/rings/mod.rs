
///
/// This module contains [`integer::IntegerRing`], the ring of integers `Z` based on `i128`.
///
pub mod integer;

///
/// This module contains [`rational::RationalField`], which provides an implementation of the field of
/// rational numbers `Q`.
///
pub mod rational;

///
/// This module contains [`zn::PrimeField`], the prime field `Z/pZ`.
///
pub mod zn;

///
/// This module contains the trait [`poly::PolyRing`] for all rings that represent a
/// univariate polynomial ring `R[X]` over any base ring, and the implementation
/// [`poly::dense_poly::DensePolyRing`].
///
pub mod poly;

///
/// This module contains [`rational_function::RationalFunctionField`], the field of rational
/// functions `Fp(t)` over a prime field.
///
pub mod rational_function;

///
/// This module contains [`extension::number_field::NumberField`], representing a number field
/// `Q[X]/(f)`, and its equation order `Z[X]/(f)`.
///
pub mod extension;

///
/// This module contains the trait [`finite::FiniteRing`] for all rings with finitely many elements.
///
pub mod finite;

///
/// This module contains the different implementations of finite fields that can be used
/// as arithmetic backend of a residue field, and the logic of choosing one of them.
///
pub mod finite_field;
