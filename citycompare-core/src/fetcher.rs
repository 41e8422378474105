use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{CityQuery, CompareError, ResultSet, WeatherProvider, WeatherResult};

/// Look up every city at once and join the answers back in input order.
///
/// Each lookup runs as its own task. The first failure ends the wait and is
/// returned as-is; the remaining tasks are left running and their results are
/// dropped when they finish.
pub async fn fetch_all<P>(provider: Arc<P>, cities: &[CityQuery]) -> Result<ResultSet, CompareError>
where
    P: WeatherProvider + ?Sized + 'static,
{
    let mut pending: FuturesUnordered<_> = cities
        .iter()
        .cloned()
        .enumerate()
        .map(|(idx, city)| {
            let provider = Arc::clone(&provider);
            let task = {
                let city = city.clone();
                tokio::spawn(async move { provider.current(&city).await })
            };
            async move { (idx, city, task.await) }
        })
        .collect();

    let mut slots: Vec<Option<WeatherResult>> = vec![None; cities.len()];

    while let Some((idx, city, joined)) = pending.next().await {
        match joined {
            Ok(Ok(result)) => {
                debug!(%city, temperature_c = result.temperature_c, "lookup finished");
                slots[idx] = Some(result);
            }
            Ok(Err(err)) => {
                warn!(%city, error = %err, outstanding = pending.len(), "lookup failed, abandoning batch");
                return Err(err);
            }
            Err(join_err) => {
                warn!(%city, error = %join_err, "lookup task did not complete");
                return Err(CompareError::Interrupted { city: city.to_string() });
            }
        }
    }

    Ok(ResultSet::new(slots.into_iter().flatten().collect()))
}
