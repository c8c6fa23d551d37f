use super::builder::build_service_links;
use super::detector::detect_music_url;
use super::hosts::ServiceClassifier;
use super::resolver::SyncFmClient;
use super::types::{CallOptions, ConversionResult, MusicService, NormalizedUrl, ServiceLink};
use crate::config::Config;
use crate::error::ConversionFailure;
use crate::runtime::observability::{Observer, ObserverEvent, ObserverMetric};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Where a pipeline run currently is.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Extracting,
    Classifying,
    Resolving,
    BuildingLinks,
    Done,
    Failed(ConversionFailure),
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl ConversionFailure {
    /// Stage that was running when the pipeline gave up.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::NoLinkFound => PipelineStage::Extracting,
            Self::ResolutionFailed { .. } => PipelineStage::Resolving,
        }
    }
}

/// Successful run: the canonical entity plus every link that could be built.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub source_url: NormalizedUrl,
    pub source_service: MusicService,
    pub conversion: ConversionResult,
    pub links: Vec<ServiceLink>,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Every stage the run passed through, ending in `Done`.
    #[serde(skip)]
    pub stages: Vec<PipelineStage>,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl ConversionOutcome {
    /// Converted, but no per-service link could be built.
    pub fn is_canonical_only(&self) -> bool {
        self.links.len() <= 1
    }

    pub fn service_links(&self) -> &[ServiceLink] {
        self.links.get(1..).unwrap_or_default()
    }

    pub fn final_stage(&self) -> Option<&PipelineStage> {
        self.stages.last()
    }
}

/// Extract → classify → resolve → build links for one message.
///
/// Holds no per-run state; share it behind an `Arc` across concurrent runs.
pub struct ConversionPipeline {
    classifier: ServiceClassifier,
    client: SyncFmClient,
    observer: Arc<dyn Observer>,
    services: Vec<MusicService>,
}

impl ConversionPipeline {
    pub fn new(classifier: ServiceClassifier, client: SyncFmClient, observer: Arc<dyn Observer>) -> Self {
        let services = classifier.table().services().collect();
        Self {
            classifier,
            client,
            observer,
            services,
        }
    }

    pub fn from_config(config: &Config, observer: Arc<dyn Observer>) -> Self {
        let classifier = ServiceClassifier::with_generic_video_hosts(config.discord.enable_youtube);
        let client = SyncFmClient::new(&config.syncfm, Arc::clone(&observer));
        Self::new(classifier, client, observer)
    }

    pub fn classifier(&self) -> &ServiceClassifier {
        &self.classifier
    }

    pub fn client(&self) -> &SyncFmClient {
        &self.client
    }

    pub async fn run(
        &self,
        text: &str,
        options: &CallOptions,
    ) -> Result<ConversionOutcome, ConversionFailure> {
        let mut trail = StageTrail::default();
        trail.advance(PipelineStage::Extracting);

        let Some((source_url, detected)) = detect_music_url(text, &self.classifier) else {
            self.observer.record_event(&ObserverEvent::NoSupportedLink);
            return Err(trail.fail(ConversionFailure::NoLinkFound));
        };

        trail.advance(PipelineStage::Classifying);
        let source_service = self
            .classifier
            .classify_normalized(&source_url)
            .unwrap_or(detected);

        trail.advance(PipelineStage::Resolving);
        self.observer.record_event(&ObserverEvent::ConversionStart {
            source_service,
            source_url: source_url.to_string(),
        });

        let started = Instant::now();
        let Some(conversion) = self.client.resolve(&source_url, options).await else {
            let elapsed = started.elapsed();
            self.observer.record_event(&ObserverEvent::ConversionFailed {
                source_service,
                source_url: source_url.to_string(),
                duration: elapsed,
            });
            return Err(trail.fail(ConversionFailure::ResolutionFailed {
                source_url: source_url.into_string(),
            }));
        };
        let resolve_elapsed = started.elapsed();
        self.observer
            .record_metric(&ObserverMetric::RequestLatency(resolve_elapsed));

        self.observer.record_event(&ObserverEvent::ConversionSuccess {
            source_service,
            sync_id: conversion.entity.sync_id.clone(),
            entity_type: conversion.kind,
            has_shortcode: conversion.entity.shortcode().is_some(),
            available_services: conversion.entity.available_services(),
            link: conversion.link.clone(),
            duration: resolve_elapsed,
        });

        trail.advance(PipelineStage::BuildingLinks);
        let links = build_service_links(&self.client, &conversion, &self.services, options).await;

        trail.advance(PipelineStage::Done);
        Ok(ConversionOutcome {
            source_url,
            source_service,
            conversion,
            links,
            elapsed: started.elapsed(),
            stages: trail.into_stages(),
        })
    }
}

struct StageTrail {
    stages: Vec<PipelineStage>,
}

impl Default for StageTrail {
    fn default() -> Self {
        Self {
            stages: vec![PipelineStage::Idle],
        }
    }
}

impl StageTrail {
    fn current(&self) -> &PipelineStage {
        self.stages.last().unwrap_or(&PipelineStage::Idle)
    }

    fn advance(&mut self, next: PipelineStage) {
        tracing::debug!(from = %self.current(), to = %next, "pipeline stage");
        self.stages.push(next);
    }

    fn fail(&mut self, failure: ConversionFailure) -> ConversionFailure {
        tracing::info!(stage = %self.current(), reason = %failure, "conversion failed");
        self.stages.push(PipelineStage::Failed(failure.clone()));
        failure
    }

    fn into_stages(self) -> Vec<PipelineStage> {
        self.stages
    }
}
