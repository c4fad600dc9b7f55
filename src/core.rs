//! Core abstractions and types for shooting.
//!
//! *Users* are mainly interested in [`InitialGuess`] and [`Bounds`], which are
//! both built from [`PathCondition`]s spread over the shooting grid according
//! to an [`InterpolationType`].

mod base;
mod bounds;
mod condition;
mod guess;
mod interpolation;

pub use base::*;
pub use bounds::*;
pub use condition::*;
pub use guess::*;
pub use interpolation::*;
