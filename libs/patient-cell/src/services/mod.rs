pub mod registry;

pub use registry::PatientRegistry;
