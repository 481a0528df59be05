//! Widget lifecycle glue: mounts one enrichment widget per search result on a
//! shared channel and runs the effects the core produces.
pub mod collaborators;
pub mod config;
mod effects;
mod page;
mod widget;

pub use collaborators::{
    EligibilitySource, Extractor, Navigator, RecordLinks, TemplateRecordLinks,
};
pub use config::{ConfigError, WidgetConfig};
pub use effects::EffectRunner;
pub use page::ResultsPage;
pub use widget::ResultWidget;
