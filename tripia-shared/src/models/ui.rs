//! Agent-supplied UI fragments and their failure taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error substrings produced by known failure modes of the travel components.
pub const KNOWN_FAILURE_MARKERS: [&str; 4] = [
    "Cannot read properties of undefined",
    "convertApiFlightToItinerary",
    "getFlightDetails",
    "fetchFlight",
];

/// Markers that point at flight data rather than the component itself.
const FLIGHT_DATA_MARKERS: [&str; 3] = [
    "convertApiFlightToItinerary",
    "getFlightDetails",
    "fetchFlight",
];

/// An external component descriptor streamed in the thread's `ui` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiDescriptor {
    /// Identifying key; required before anything is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Registered component name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Component props, passed through untouched.
    #[serde(default)]
    pub props: Value,
    /// Association data such as `message_id`.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl UiDescriptor {
    /// Interprets an arbitrary JSON value as a descriptor.
    ///
    /// Values that are not objects yield `None`; objects with odd field types
    /// are read leniently so that a bad `props` never hides the `id`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Some(Self {
            id: text("id"),
            name: text("name"),
            props: object.get("props").cloned().unwrap_or(Value::Null),
            metadata: object
                .get("metadata")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        })
    }

    /// Message this fragment belongs to.
    pub fn message_id(&self) -> Option<&str> {
        self.metadata.get("message_id").and_then(Value::as_str)
    }

    /// Returns `true` when the descriptor carries a non-empty id.
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Runs both validation gates.
    pub fn check(descriptor: Option<&Self>) -> DescriptorCheck {
        match descriptor {
            None => DescriptorCheck::Missing,
            Some(descriptor) if !descriptor.has_id() => DescriptorCheck::MissingId,
            Some(_) => DescriptorCheck::Ready,
        }
    }
}

/// Outcome of validating a descriptor before loading it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorCheck {
    /// No descriptor at all.
    Missing,
    /// A descriptor without an identifying key.
    MissingId,
    /// Safe to load.
    Ready,
}

/// Which notice a component failure is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The agent sent flight data the component could not process.
    FlightData,
    /// Any other failure.
    Generic,
}

impl FailureKind {
    /// Notice title.
    pub fn title(self) -> &'static str {
        match self {
            FailureKind::FlightData => "Flight Data Processing Error",
            FailureKind::Generic => "Component Loading Failed",
        }
    }

    /// Notice body.
    pub fn description(self) -> &'static str {
        match self {
            FailureKind::FlightData => {
                "There was an issue processing the flight data. The flight information may be incomplete or missing required fields."
            }
            FailureKind::Generic => {
                "External component could not be loaded. This might be due to a network issue or missing dependencies."
            }
        }
    }
}

/// Returns `true` when `message` matches one of [`KNOWN_FAILURE_MARKERS`].
pub fn is_known_failure(message: &str) -> bool {
    KNOWN_FAILURE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Picks the notice for a raw error message.
pub fn classify_failure(message: &str) -> FailureKind {
    if FLIGHT_DATA_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
    {
        FailureKind::FlightData
    } else {
        FailureKind::Generic
    }
}
