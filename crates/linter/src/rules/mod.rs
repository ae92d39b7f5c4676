/// Service rule implementations, one per file.
mod empty_service;
mod invalid_method_signature;
mod missing_required_method;
mod resource_method_not_allowed;
mod unknown_remote_method;

pub use empty_service::EmptyServiceRuleImpl;
pub use invalid_method_signature::InvalidMethodSignatureRuleImpl;
pub use missing_required_method::MissingRequiredMethodRuleImpl;
pub use resource_method_not_allowed::ResourceMethodNotAllowedRuleImpl;
pub use unknown_remote_method::UnknownRemoteMethodRuleImpl;
