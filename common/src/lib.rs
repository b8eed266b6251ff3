pub mod config;
pub mod errors;
pub mod http;
pub mod pkgbuild;
pub mod version;

pub use crate::pkgbuild::{Pkgbuild, Value};
pub use crate::version::Version;
