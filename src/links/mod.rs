//! Music link detection and cross-service conversion.
//!
//! [`detector`] finds the first supported link in chat text, [`hosts`]
//! decides which service owns it, [`resolver`] turns it into a canonical
//! SyncFM entity, [`builder`] rebuilds the link on every other service and
//! [`pipeline`] runs the four steps end to end.

pub mod builder;
pub mod detector;
pub mod hosts;
pub mod pipeline;
pub mod resolver;
pub mod types;

pub use builder::build_service_links;
pub use detector::{detect_music_url, extract_music_url};
pub use hosts::{HostRule, HostTable, ServiceClassifier};
pub use pipeline::{ConversionOutcome, ConversionPipeline, PipelineStage};
pub use resolver::SyncFmClient;
pub use types::{
    CallOptions, ConversionResult, EntityKind, LinkOrigin, MusicService, NormalizedUrl,
    ServiceLink, SyncEntity, TrackRef,
};
