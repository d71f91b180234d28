// Flag evaluation counters
pub const FLAG_EVALUATION_COUNTER: &str = "flags_flag_evaluation_total";
pub const FLAG_EVALUATION_ERROR_COUNTER: &str = "flags_flag_evaluation_error_total";

// Registry
pub const REGISTRY_DEFINITIONS_LOADED_COUNTER: &str = "flags_registry_definitions_loaded_total";
pub const REGISTRY_REJECTED_BATCH_COUNTER: &str = "flags_registry_rejected_batch_total";
