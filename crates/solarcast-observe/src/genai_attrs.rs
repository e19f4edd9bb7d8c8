//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! String slices usable as field names in `tracing::info_span!`, so chat
//! completion spans line up with the OTel GenAI conventions.

/// The name of the operation being performed.
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "azure").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model (Azure deployment) requested.
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";
