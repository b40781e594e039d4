//! Volume unit module
//!
//! Unit tags and conversions between milliliters, liters, fluid ounces and gallons.

pub mod converter;
pub mod volume;

pub use converter::{convert, to_gal, to_ml};
pub use volume::{
    scale_to_ml, NutrientUnit, UnitError, VolUnit, ML_PER_FL_OZ, ML_PER_GALLON, ML_PER_LITER,
    ML_PER_ML,
};
