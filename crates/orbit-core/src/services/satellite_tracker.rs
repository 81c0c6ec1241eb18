//! On-demand satellite position refresh.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::domain::{ObserverLocation, SatellitePosition};
use crate::events::AppEvent;
use crate::ports::{AppEventEmitter, SatelliteError, SatellitePort};

/// Fetches the satellite position when asked and remembers the last good one.
///
/// There is no background polling; callers decide when to refresh.
#[derive(Clone)]
pub struct SatelliteTracker {
    port: Arc<dyn SatellitePort>,
    emitter: Arc<dyn AppEventEmitter>,
    observer: ObserverLocation,
    latest: Arc<Mutex<Option<SatellitePosition>>>,
}

impl SatelliteTracker {
    pub fn new(
        port: Arc<dyn SatellitePort>,
        emitter: Arc<dyn AppEventEmitter>,
        observer: ObserverLocation,
    ) -> Self {
        Self {
            port,
            emitter,
            observer,
            latest: Arc::new(Mutex::new(None)),
        }
    }

    /// Fetch the current position.
    ///
    /// On success the position is stored and a `SatelliteUpdated` event is
    /// emitted. On failure an error message is emitted and the previously
    /// stored position is kept.
    pub async fn refresh(&self) -> Result<SatellitePosition, SatelliteError> {
        match self.port.position(self.observer).await {
            Ok(position) => {
                info!(
                    satellite = %position.satellite_name,
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "Satellite position updated"
                );
                *self.latest.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(position.clone());
                self.emitter.emit(AppEvent::SatelliteUpdated {
                    position: position.clone(),
                });
                Ok(position)
            }
            Err(err) => {
                warn!(error = %err, "Satellite refresh failed");
                self.emitter.emit(AppEvent::error_message(format!(
                    "Couldn't get the space station's position: {err}"
                )));
                Err(err)
            }
        }
    }

    /// The last successfully fetched position.
    pub fn latest(&self) -> Option<SatellitePosition> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub const fn observer(&self) -> ObserverLocation {
        self.observer
    }
}
