mod evaluation_level;

pub use evaluation_level::EvaluationLevel;
