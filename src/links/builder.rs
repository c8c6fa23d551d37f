use super::resolver::SyncFmClient;
use super::types::{CallOptions, ConversionResult, MusicService, ServiceLink};
use crate::runtime::observability::{ObserverEvent, ObserverMetric};
use futures_util::future::join_all;

/// Build the canonical link plus one link per service the entity exists on.
///
/// Services without an external id are skipped without a request. The
/// remaining `createUrl` calls run concurrently and are all awaited; a
/// failed call only drops its own link. Output keeps `services` order with
/// the canonical link first.
pub async fn build_service_links(
    client: &SyncFmClient,
    conversion: &ConversionResult,
    services: &[MusicService],
    options: &CallOptions,
) -> Vec<ServiceLink> {
    let candidates: Vec<MusicService> = services
        .iter()
        .copied()
        .filter(|service| conversion.entity.external_id(*service).is_some())
        .collect();

    let attempts = candidates.iter().map(|service| async move {
        let outcome = client
            .create_service_url(*service, &conversion.entity, conversion.kind, options)
            .await;
        (*service, outcome)
    });

    let mut links = Vec::with_capacity(candidates.len() + 1);
    links.push(ServiceLink::canonical(&conversion.link));

    for (service, outcome) in join_all(attempts).await {
        match outcome {
            Ok(url) => links.push(ServiceLink::for_service(service, url)),
            Err(error) => {
                tracing::warn!(service = %service, error = %error, "createUrl failed");
                client.observer().record_event(&ObserverEvent::Error {
                    component: format!("link_builder:{service}"),
                    message: error.to_string(),
                });
            }
        }
    }

    client
        .observer()
        .record_metric(&ObserverMetric::ServiceLinksBuilt {
            attempted: candidates.len() as u64,
            built: (links.len() - 1) as u64,
        });
    links
}
