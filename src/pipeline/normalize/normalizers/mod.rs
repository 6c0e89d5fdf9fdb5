// Individual marketplace normalizer implementations
pub mod amazon;
pub mod noon;
pub mod revibe;
pub mod unsupported;

// Re-export the main components
pub use amazon::AmazonNormalizer;
pub use noon::NoonNormalizer;
pub use revibe::RevibeNormalizer;
pub use unsupported::UnsupportedNormalizer;
