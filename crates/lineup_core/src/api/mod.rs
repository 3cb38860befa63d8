pub mod lineup_json;

pub use lineup_json::{
    apply_action_json, build_layout_json, build_layout_json_with, request_schema_json, short_label,
    LayoutRequest, LayoutResponse, PitchPin, PlaceholderPin, SCHEMA_VERSION,
};
