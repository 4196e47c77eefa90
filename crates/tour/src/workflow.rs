//! The City Foodie Tour workflow sent to the platform at provisioning time.

use anyhow::{Context, Result};
use serde_json::Value;

/// Task definition in the platform's YAML workflow syntax.
///
/// The user message reads `city`, `weather` and `dietary_preferences` from
/// the execution input.
pub const TASK_YAML: &str = r#"
name: City Foodie Tour
description: Generate a food itinerary for a given city based on weather, cuisine, and dietary preferences
main:
  - prompt:
      - role: system
        content: |
          You are a local food expert and trip planner. Given a city, its weather, and dietary preferences, do the following:
          1. List exactly 3 iconic local dishes.
          2. Decide indoor or outdoor dining based on the weather.
          3. Recommend breakfast, lunch, and dinner, each one based on those iconic dishes.
          4. Mention top-rated restaurants for those dishes.
          5. Describe each meal's experience like a narrative.
          6. Do not use Markdown or special formatting like #, *, or ** and keep the output plain and clean.
          7. Consider dietary preferences when recommending dishes and restaurants.
      - role: user
        content: |
          City: ${steps[0].input.city}
          Weather: ${steps[0].input.weather}
          Dietary Preferences: ${steps[0].input.dietary_preferences}
"#;

/// Parse [`TASK_YAML`] into the JSON body for task creation.
pub fn definition() -> Result<Value> {
    serde_yml::from_str(TASK_YAML).context("invalid embedded task definition")
}
