/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Options, parameter values, actions and envelope types
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod action;
pub mod envelope;
pub mod options;
pub mod params;

pub use action::*;
pub use envelope::*;
pub use options::*;
pub use params::*;
