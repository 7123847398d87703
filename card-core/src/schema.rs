//! Serialized layout document used for import and export.

use serde::{Deserialize, Serialize};

use crate::{CanvasGrid, CardError, CardLayoutSchema, CardResult};

/// Import/export shape: a schema plus the legacy single-number grid size.
///
/// Older documents carry `"gridSize": n` instead of a structured `grid`;
/// that value becomes a snapping `n × n` grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    /// Schema fields.
    #[serde(flatten)]
    pub schema: CardLayoutSchema,
    /// Legacy square grid cell size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<f64>,
}

impl From<&CardLayoutSchema> for LayoutDocument {
    fn from(schema: &CardLayoutSchema) -> Self {
        let mut schema = schema.clone();
        schema.grid = Some(schema.grid_or_default());
        Self {
            schema,
            grid_size: None,
        }
    }
}

impl LayoutDocument {
    /// Parse a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Serialization`] if the JSON is malformed or does
    /// not describe a layout.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(CardError::Serialization)
    }

    /// Resolve the grid (structured, legacy, or default) and return the schema.
    ///
    /// The returned schema always has a sanitized `grid`.
    #[must_use]
    pub fn into_schema(self) -> CardLayoutSchema {
        let mut schema = self.schema;
        let grid = match (schema.grid, self.grid_size) {
            (Some(grid), _) => grid,
            (None, Some(cell)) => {
                tracing::warn!(schema = %schema.id, cell, "importing legacy gridSize");
                CanvasGrid::square(cell)
            }
            (None, None) => CanvasGrid::default(),
        };
        schema.grid = Some(grid.sanitized());
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridSize;

    #[test]
    fn test_legacy_grid_size() {
        let json = r#"{"id":"old","width":1000,"height":600,"gridSize":20,"elements":[]}"#;
        let schema = LayoutDocument::from_json(json).expect("parse").into_schema();
        assert_eq!(
            schema.grid,
            Some(CanvasGrid {
                snap: true,
                size: GridSize { x: 20.0, y: 20.0 },
            })
        );
    }

    #[test]
    fn test_structured_grid_wins_over_legacy() {
        let json = r#"{
            "id": "both",
            "width": 100,
            "height": 100,
            "grid": { "snap": false, "size": { "x": 8, "y": 4 } },
            "gridSize": 20
        }"#;
        let schema = LayoutDocument::from_json(json).expect("parse").into_schema();
        let grid = schema.grid.expect("grid");
        assert!(!grid.snap);
        assert!((grid.size.x - 8.0).abs() < f64::EPSILON);
        assert!((grid.size.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_grid_uses_default() {
        let json = r#"{"id":"plain","width":100,"height":100}"#;
        let schema = LayoutDocument::from_json(json).expect("parse").into_schema();
        assert_eq!(schema.grid, Some(CanvasGrid::default()));
    }

    #[test]
    fn test_bad_grid_sanitized() {
        let json = r#"{"id":"bad","width":100,"height":100,"gridSize":0}"#;
        let schema = LayoutDocument::from_json(json).expect("parse").into_schema();
        assert_eq!(schema.grid, Some(CanvasGrid::default()));
    }

    #[test]
    fn test_export_always_has_grid() {
        let schema = CardLayoutSchema::new("c", 10.0, 10.0);
        let json = LayoutDocument::from(&schema).to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("value");
        assert_eq!(value["grid"]["snap"], true);
        assert!(value.get("gridSize").is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LayoutDocument::from_json("{ not json"),
            Err(CardError::Serialization(_))
        ));
        assert!(LayoutDocument::from_json(r#"{"id":"x"}"#).is_err());
    }
}
