pub mod providers;
mod content;
mod digest;
mod generator;
mod registry;

pub use content::{build_prompt, clean_content, decode_entities, strip_tags};
pub use digest::{DigestService, SaveContext};
pub use generator::{GenerationRequest, Generator};
pub use providers::{Endpoints, ProviderAdapter, ProviderCredentials};
pub use registry::{get_model, labels_only, list_models, ModelEntry, Provider};
