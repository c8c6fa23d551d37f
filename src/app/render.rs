use crate::links::{ConversionOutcome, EntityKind, LinkOrigin};
use crate::transport::channels::discord::RegisteredCommand;

/// Plain-text rendering of a successful conversion.
pub fn render_outcome(outcome: &ConversionOutcome) -> Vec<String> {
    let entity = &outcome.conversion.entity;
    let kind = outcome.conversion.kind;
    let mut lines = Vec::with_capacity(outcome.links.len() + 3);

    let title = entity.display_title(kind);
    let artists = entity
        .artists
        .as_deref()
        .filter(|a| kind != EntityKind::Artist && !a.is_empty());
    match artists {
        Some(artists) => lines.push(format!("{title} by {} ({kind})", artists.join(", "))),
        None => lines.push(format!("{title} ({kind})")),
    }
    if let Some(album) = entity.album.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("album: {album}"));
    }
    if let Some(artwork) = entity.image_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("artwork: {artwork}"));
    }
    lines.push(format!(
        "from {}: {}",
        outcome.source_service.display_name(),
        outcome.source_url
    ));

    for link in &outcome.links {
        let marker = match link.origin {
            LinkOrigin::SyncFm => "◆",
            LinkOrigin::Service(_) => "→",
        };
        lines.push(format!("  {marker} {}: {}", link.label, link.url));
    }

    if outcome.is_canonical_only() {
        lines.push("  (no per-service links available)".to_string());
    }
    lines
}

pub fn render_commands(commands: &[RegisteredCommand]) -> Vec<String> {
    if commands.is_empty() {
        return vec!["No commands registered.".to_string()];
    }
    commands
        .iter()
        .map(|cmd| {
            if cmd.description.is_empty() {
                format!("{} [{}] {}", cmd.name, cmd.kind_label(), cmd.id)
            } else {
                format!(
                    "{} [{}] {} - {}",
                    cmd.name,
                    cmd.kind_label(),
                    cmd.id,
                    cmd.description
                )
            }
        })
        .collect()
}
