#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
#![allow(rustdoc::private_intra_doc_links)]

#![doc = include_str!("../Readme.md")]

#[macro_use]
pub mod ring;
pub mod homomorphism;
pub mod divisibility;
pub mod field;
pub mod serialization;
pub mod error;
pub mod tracing;
pub mod matrix;
pub mod algorithms;
pub mod rings;
pub mod ideal;
pub mod residue_field;
