/// AWS service clients
pub mod parameters;
pub mod s3;
pub mod ses;

// Re-export service traits
pub use parameters::ParameterStore;
pub use s3::StorageService;
pub use ses::EmailSender;
