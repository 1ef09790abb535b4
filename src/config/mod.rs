pub mod traits;
pub mod mapping;
pub mod mutation;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use mapping::MappingConfig;
pub use mutation::{MutationConfig, SitePolicy, ValuePolicy};
pub use traits::ConfigSection;
