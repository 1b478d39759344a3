mod settings;

pub use settings::{DasPreset, InputSettings};
