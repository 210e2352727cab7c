mod executor;
pub mod form;
pub mod fsm;

pub use executor::Analyzer;
pub use form::{AnalyzeForm, FormSource};
pub use fsm::{AnalyzeEvent, AnalyzeState, AnalyzeStateMachine};
