mod evaluation_service;

pub use evaluation_service::{color_map, EvaluationService};
