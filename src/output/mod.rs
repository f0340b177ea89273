//! Section-tagged output for the monitoring pipeline

mod section;

pub use section::{Section, SectionWriter};
