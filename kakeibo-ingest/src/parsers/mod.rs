pub mod prestia;
pub mod usaa_clip;
