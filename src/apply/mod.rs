pub mod submitter;

pub use submitter::{ApplicationSubmitter, ApplyForm, ApplySurface, InputVariant};
