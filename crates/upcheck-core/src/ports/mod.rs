//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod host;

pub use host::{
    BootEnvironment, CpuTopology, EdidBlob, HostPlatform, InternetState, MemoryStatus, OsVersion,
    ProcessorRegistry, SecureBootState, TpmInfo,
};

#[cfg(test)]
pub use host::MockHostPlatform;
