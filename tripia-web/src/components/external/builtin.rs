//! Travel components the agent can stream into a conversation.

use serde::Deserialize;
use serde_json::{Map, Value};
use tripia_shared::models::ComponentError;
use yew::{Callback, Html, html};

use super::loader::{Artifact, ComponentContext};

pub const FLIGHTS: &str = "flights";
pub const HOTELS: &str = "hotels";

#[derive(Debug, Clone, Deserialize)]
struct Segment {
    origin: String,
    destination: String,
    #[serde(default)]
    departure_time: String,
    #[serde(default)]
    arrival_time: String,
    #[serde(default)]
    flight_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiFlight {
    id: String,
    #[serde(default)]
    airline: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    segments: Vec<Segment>,
}

/// A flight ready for display: first departure to last arrival.
#[derive(Debug, Clone, PartialEq)]
struct Itinerary {
    id: String,
    airline: String,
    origin: String,
    destination: String,
    departure: String,
    arrival: String,
    stops: usize,
    price: Option<String>,
    legs: Vec<String>,
}

fn convert_flight(raw: &Value) -> Result<Itinerary, ComponentError> {
    let flight: ApiFlight = serde_json::from_value(raw.clone()).map_err(|error| {
        ComponentError::runtime(format!("convertApiFlightToItinerary: {error}"))
    })?;
    let (Some(first), Some(last)) = (flight.segments.first(), flight.segments.last()) else {
        return Err(ComponentError::runtime(format!(
            "convertApiFlightToItinerary: flight {} has no segments",
            flight.id
        )));
    };
    let legs = flight
        .segments
        .iter()
        .map(|segment| {
            format!(
                "{} {} → {} ({} - {})",
                segment.flight_number.as_deref().unwrap_or_default(),
                segment.origin,
                segment.destination,
                segment.departure_time,
                segment.arrival_time
            )
            .trim()
            .to_string()
        })
        .collect();
    Ok(Itinerary {
        origin: first.origin.clone(),
        destination: last.destination.clone(),
        departure: first.departure_time.clone(),
        arrival: last.arrival_time.clone(),
        stops: flight.segments.len() - 1,
        price: flight.price.map(|price| {
            format!("{} {price:.2}", flight.currency.as_deref().unwrap_or("BRL"))
        }),
        legs,
        id: flight.id,
        airline: flight.airline,
    })
}

fn flight_list(props: &Value) -> Result<&Vec<Value>, ComponentError> {
    props
        .get("flights")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ComponentError::runtime("Cannot read properties of undefined (reading 'flights')")
        })
}

pub fn render_flights(context: &ComponentContext) -> Result<Html, ComponentError> {
    let itineraries = flight_list(&context.descriptor.props)?
        .iter()
        .map(convert_flight)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        <div class="grid gap-3 my-2" data-component={FLIGHTS}>
            { for itineraries.into_iter().map(|itinerary| flight_card(itinerary, &context.open_artifact)) }
        </div>
    })
}

/// Details panel for one flight; selecting it tells the agent which flight
/// the user is looking at.
fn flight_artifact(itinerary: &Itinerary) -> Artifact {
    let mut context = Map::new();
    context.insert("selected_flight".into(), Value::String(itinerary.id.clone()));
    Artifact {
        title: format!("{} → {}", itinerary.origin, itinerary.destination),
        body: itinerary.legs.join("\n"),
        context,
    }
}

fn flight_card(itinerary: Itinerary, open_artifact: &Callback<Artifact>) -> Html {
    let stops = match itinerary.stops {
        0 => "Direct".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    };
    let on_details = {
        let open_artifact = open_artifact.clone();
        let artifact = flight_artifact(&itinerary);
        Callback::from(move |_| open_artifact.emit(artifact.clone()))
    };

    html! {
        <div key={itinerary.id.clone()} class="card bg-base-200 shadow-sm">
            <div class="card-body p-4 gap-1">
                <div class="flex items-center justify-between">
                    <span class="font-semibold">{ itinerary.airline }</span>
                    { for itinerary.price.map(|price| html! { <span class="badge badge-primary">{ price }</span> }) }
                </div>
                <div class="text-lg">
                    { format!("{} → {}", itinerary.origin, itinerary.destination) }
                </div>
                <div class="text-sm text-base-content/70">
                    { format!("{} - {} · {stops}", itinerary.departure, itinerary.arrival) }
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm btn-ghost" type="button" onclick={on_details}>
                        {"Details"}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// A `selected_flight` must name one of the listed flights.
pub fn check_selected_flight(context: &ComponentContext) -> Result<(), ComponentError> {
    let props = &context.descriptor.props;
    let Some(selected) = props.get("selected_flight").and_then(Value::as_str) else {
        return Ok(());
    };
    let listed = flight_list(props)?
        .iter()
        .any(|flight| flight.get("id").and_then(Value::as_str) == Some(selected));
    if listed {
        Ok(())
    } else {
        Err(ComponentError::runtime(format!(
            "getFlightDetails: flight {selected} not found"
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Hotel {
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
}

pub fn render_hotels(context: &ComponentContext) -> Result<Html, ComponentError> {
    let hotels: Vec<Hotel> = context
        .descriptor
        .props
        .get("hotels")
        .cloned()
        .ok_or_else(|| ComponentError::InvalidProps {
            name: HOTELS.into(),
            message: "expected a `hotels` list".into(),
        })
        .and_then(|raw| {
            serde_json::from_value(raw).map_err(|error| ComponentError::InvalidProps {
                name: HOTELS.into(),
                message: error.to_string(),
            })
        })?;

    Ok(html! {
        <div class="grid gap-3 my-2" data-component={HOTELS}>
            { for hotels.into_iter().map(|hotel| html! {
                <div class="card bg-base-200 shadow-sm">
                    <div class="card-body p-4 gap-1">
                        <div class="flex items-center justify-between">
                            <span class="font-semibold">{ hotel.name }</span>
                            { for hotel.rating.map(|rating| html! { <span class="badge">{ format!("★ {rating:.1}") }</span> }) }
                        </div>
                        { for hotel.address.map(|address| html! { <div class="text-sm text-base-content/70">{ address }</div> }) }
                        { for hotel.price.map(|price| html! {
                            <div class="text-sm">
                                { format!("{} {price:.2}", hotel.currency.as_deref().unwrap_or("BRL")) }
                            </div>
                        }) }
                    </div>
                </div>
            }) }
        </div>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tripia_shared::models::{FailureKind, classify_failure, is_known_failure};

    #[test]
    fn flights_span_first_departure_to_last_arrival() {
        let itinerary = convert_flight(&json!({
            "id": "f1",
            "airline": "TAP",
            "price": 3120.5,
            "currency": "BRL",
            "segments": [
                {"origin": "GIG", "destination": "OPO", "departure_time": "22:10", "arrival_time": "10:55", "flight_number": "TP76"},
                {"origin": "OPO", "destination": "LIS", "departure_time": "12:30", "arrival_time": "13:25"}
            ]
        }))
        .unwrap();

        assert_eq!(itinerary.origin, "GIG");
        assert_eq!(itinerary.destination, "LIS");
        assert_eq!(itinerary.stops, 1);
        assert_eq!(itinerary.price.as_deref(), Some("BRL 3120.50"));
        assert_eq!(itinerary.legs[0], "TP76 GIG → OPO (22:10 - 10:55)");
    }

    #[test]
    fn flight_details_select_the_flight() {
        let itinerary = convert_flight(&json!({
            "id": "TP123",
            "segments": [{"origin": "GIG", "destination": "LIS", "flight_number": "TP76"}]
        }))
        .unwrap();

        let artifact = flight_artifact(&itinerary);

        assert_eq!(artifact.title, "GIG → LIS");
        assert_eq!(artifact.body, "TP76 GIG → LIS ( - )");
        assert_eq!(artifact.context["selected_flight"], "TP123");
    }

    #[test]
    fn flights_without_segments_are_flight_data_failures() {
        let error = convert_flight(&json!({"id": "f2", "segments": []})).unwrap_err();
        let message = error.to_string();
        assert!(is_known_failure(&message));
        assert_eq!(classify_failure(&message), FailureKind::FlightData);
    }

    #[test]
    fn missing_flight_list_is_a_known_generic_failure() {
        let error = flight_list(&json!({})).unwrap_err().to_string();
        assert!(is_known_failure(&error));
        assert_eq!(classify_failure(&error), FailureKind::Generic);
    }
}
