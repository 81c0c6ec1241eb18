//! Formatting for command output.

use chrono::Local;
use orbit_core::{ConversationTurn, PlanetFact, SatellitePosition, ServiceStatusResponse};

/// Render the satellite panel.
pub fn format_position(position: &SatellitePosition) -> String {
    let observed = position.observed_at().map_or_else(
        || "unknown".to_string(),
        |at| at.with_timezone(&Local).format("%H:%M:%S").to_string(),
    );
    format!(
        "🛰  {name}\n   Position: {coords}\n   Altitude: {alt:.1} km\n   Currently {region}\n   Updated:  {observed}",
        name = position.satellite_name,
        coords = position.formatted_coordinates(),
        alt = position.altitude_km,
        region = position.region(),
    )
}

/// Render one planet's facts.
pub fn format_planet(planet: &PlanetFact) -> String {
    format!(
        "🪐 {name} ({kind})\n   Distance from the Sun: {distance} million km\n   Day length: {day}\n   Moons: {moons}\n   Fun fact: {fact}",
        name = planet.name,
        kind = planet.kind,
        distance = planet.distance_from_sun_mkm,
        day = planet.day_length,
        moons = planet.moons,
        fact = planet.fun_fact,
    )
}

/// One line per planet.
pub fn format_planet_list(planets: &[PlanetFact]) -> String {
    planets
        .iter()
        .map(|planet| format!("  {:<8} {}", planet.name, planet.kind))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the remembered conversation, oldest first.
pub fn format_history(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return "No conversation yet.".to_string();
    }
    history
        .iter()
        .enumerate()
        .map(|(i, turn)| format!("{}. You: {}\n   Guide: {}", i + 1, turn.question, turn.response))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the backend status.
pub fn format_status(status: &ServiceStatusResponse) -> String {
    let mark = |configured: bool| if configured { "configured" } else { "missing" };
    format!(
        "Backend: {state}{message}\n  N2YO (ISS tracking): {n2yo}\n  Gemini (answers):    {gemini}",
        state = if status.is_success() { "up" } else { "reporting problems" },
        message = status
            .message
            .as_deref()
            .map(|m| format!(" ({m})"))
            .unwrap_or_default(),
        n2yo = mark(status.apis_configured.n2yo),
        gemini = mark(status.apis_configured.gemini),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::ApisConfigured;
    use orbit_core::domain::planets;

    #[test]
    fn test_format_position() {
        let position = SatellitePosition {
            satellite_name: "SPACE STATION".to_string(),
            latitude: -33.5,
            longitude: 151.2,
            altitude_km: 417.25,
            timestamp: 1_700_000_000,
        };
        let panel = format_position(&position);
        assert!(panel.contains("33.5000° S, 151.2000° E"));
        assert!(panel.contains("417.2 km") || panel.contains("417.3 km"));
        assert!(panel.contains("over the Pacific Ocean"));
    }

    #[test]
    fn test_format_planet() {
        let text = format_planet(planets::lookup("saturn").unwrap());
        assert!(text.starts_with("🪐 Saturn (gas giant)"));
        assert!(text.contains("Moons: 146"));
    }

    #[test]
    fn test_format_planet_list_has_all() {
        let text = format_planet_list(planets::all());
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().next().unwrap().contains("Mercury"));
    }

    #[test]
    fn test_format_history() {
        assert_eq!(format_history(&[]), "No conversation yet.");
        let text = format_history(&[ConversationTurn::new("Mars?", "Red!")]);
        assert_eq!(text, "1. You: Mars?\n   Guide: Red!");
    }

    #[test]
    fn test_format_status() {
        let status = ServiceStatusResponse {
            status: "success".to_string(),
            message: Some("Flask app is running!".to_string()),
            apis_configured: ApisConfigured {
                n2yo: false,
                gemini: true,
            },
        };
        let text = format_status(&status);
        assert!(text.starts_with("Backend: up (Flask app is running!)"));
        assert!(text.contains("N2YO (ISS tracking): missing"));
        assert!(text.contains("Gemini (answers):    configured"));
    }
}
