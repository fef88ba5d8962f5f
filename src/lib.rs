pub use sqlmod_core::*;
