///
/// Contains gaussian elimination over fields, together with the derived
/// functionality (rank, inverse, determinant).
///
pub mod gauss;
