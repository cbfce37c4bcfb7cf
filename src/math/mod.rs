//! Integer arithmetic for pricing and liquidity accounting.
//!
//! - [`CheckedArithmetic`]: overflow-safe operations on domain newtypes.
//! - [`div_round`] / [`mul_div`]: division with an explicit rounding
//!   direction.
//! - [`get_input_price`] / [`get_output_price`]: the constant-product
//!   pricing primitives.

mod checked;
mod pricing;
mod rounding;

pub use checked::CheckedArithmetic;
pub use pricing::{get_input_price, get_output_price};
pub use rounding::{div_round, mul_div};
