pub mod driver;
pub mod fingerprint;
pub mod launch;
pub mod page;
