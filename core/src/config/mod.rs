mod samples;
mod settings;

pub use samples::ConfigSampleSet;
pub use settings::ConfigSettings;
