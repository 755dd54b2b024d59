use anyhow::{Result, bail};
use city_explorer_service::{Coordinator, ResourceQuery, Resolved};

pub(crate) async fn run(coordinator: &Coordinator, query: ResourceQuery) -> Result<()> {
    let resource = query.resource();
    let resolved = coordinator.resolve(query).await?;

    if matches!(&resolved, Resolved::Location(r) if r.is_empty()) {
        bail!("no location matches the query");
    }
    tracing::info!(%resource, source = ?resolved.source(), count = resolved.len(), "Resolved");
    println!("{}", serde_json::to_string_pretty(&resolved.records_json()?)?);
    Ok(())
}
