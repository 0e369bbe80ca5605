#![deny(missing_docs)]
#![doc = "Core data types, error taxonomy and random source shared by the Ising crates."]

pub mod errors;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, IsingError};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{InitialConfiguration, NodeLabel, Spin, SIGN_OF_ZERO};
