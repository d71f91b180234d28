pub mod feature_flag_list;
pub mod flag_match_reason;
pub mod flag_matching;
pub mod flag_models;
pub mod flag_registry;
