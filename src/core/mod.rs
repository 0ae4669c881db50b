// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod reasons;
pub mod state_machine;
pub mod vocabulary;

pub use filters::{passes_hard_filters, FilterConfig};
pub use matcher::{CandidateFilter, MatchResult};
pub use reasons::derive_match_reasons;
pub use state_machine::{canonicalize_pair, normalize_pagination, record_action_outcome, update_action_outcome};
