//! Plain-data scene snapshot, loadable from TOML

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::SceneError;
use crate::routing::RouterConfig;

use super::shape::{Arrow, Shape, ShapeId};
use super::SceneQuery;

/// An immutable set of shapes and arrows
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    shapes: Vec<Shape>,
    arrows: Vec<Arrow>,
    index: HashMap<ShapeId, usize>,
    /// Router settings stored alongside the scene, if any
    pub router: Option<RouterConfig>,
}

/// TOML structure for deserializing scenes
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlScene {
    router: Option<RouterConfig>,
    #[serde(default)]
    shapes: Vec<Shape>,
    #[serde(default)]
    arrows: Vec<Arrow>,
}

impl SceneSnapshot {
    /// Build a snapshot from shapes, rejecting duplicate ids and negative sizes
    pub fn new(shapes: Vec<Shape>) -> Result<Self, SceneError> {
        let mut index = HashMap::with_capacity(shapes.len());
        for (i, shape) in shapes.iter().enumerate() {
            if !(shape.width >= 0.0 && shape.height >= 0.0) {
                return Err(SceneError::invalid_shape(
                    shape.id.as_str(),
                    shape.width,
                    shape.height,
                ));
            }
            if index.insert(shape.id.clone(), i).is_some() {
                return Err(SceneError::DuplicateShape(shape.id.to_string()));
            }
        }

        Ok(Self {
            shapes,
            arrows: Vec::new(),
            index,
            router: None,
        })
    }

    /// Attach arrows to the snapshot
    pub fn with_arrows(mut self, arrows: Vec<Arrow>) -> Self {
        self.arrows = arrows;
        self
    }

    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;
        let mut scene = Self::new(parsed.shapes)?.with_arrows(parsed.arrows);
        scene.router = parsed.router;
        Ok(scene)
    }

    /// Every shape, deleted ones included
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Look up an arrow by id
    pub fn arrow(&self, id: &str) -> Result<&Arrow, SceneError> {
        self.arrows
            .iter()
            .find(|arrow| arrow.id == id)
            .ok_or_else(|| SceneError::UnknownArrow(id.to_string()))
    }
}

impl SceneQuery for SceneSnapshot {
    fn non_deleted_shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_> {
        Box::new(self.shapes.iter().filter(|shape| !shape.deleted))
    }

    fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.index
            .get(id)
            .map(|&i| &self.shapes[i])
            .filter(|shape| !shape.deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::scene::ShapeKind;

    const SCENE: &str = r#"
[router]
step_limit = 20

[[shapes]]
id = "a"
x = 0.0
y = 0.0
width = 100.0
height = 100.0

[[shapes]]
id = "b"
kind = "diamond"
x = 200.0
y = 0.0
width = 80.0
height = 80.0
angle = 0.5
deleted = true

[[arrows]]
id = "a-to-b"
x = 100.0
y = 50.0
points = [[0.0, 0.0], [100.0, -10.0]]
start_binding = "a"
end_binding = "b"
"#;

    #[test]
    fn test_parse_scene() {
        let scene = SceneSnapshot::from_str(SCENE).unwrap();
        assert_eq!(scene.shapes().len(), 2);
        assert_eq!(scene.shapes()[0].kind, ShapeKind::Rectangle);
        assert_eq!(scene.shapes()[1].kind, ShapeKind::Diamond);
        assert_eq!(scene.shapes()[1].angle, 0.5);
        assert_eq!(scene.router.as_ref().map(|r| r.step_limit), Some(20));

        let arrow = scene.arrow("a-to-b").unwrap();
        assert_eq!(arrow.points[1], Point::new(100.0, -10.0));
        assert_eq!(arrow.end_binding, Some(ShapeId::new("b")));
    }

    #[test]
    fn test_deleted_shapes_are_hidden() {
        let scene = SceneSnapshot::from_str(SCENE).unwrap();
        assert_eq!(scene.non_deleted_shapes().count(), 1);
        assert!(scene.shape(&ShapeId::new("a")).is_some());
        assert!(scene.shape(&ShapeId::new("b")).is_none());
    }

    #[test]
    fn test_unknown_arrow() {
        let scene = SceneSnapshot::from_str(SCENE).unwrap();
        assert!(matches!(
            scene.arrow("missing"),
            Err(SceneError::UnknownArrow(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_duplicate_shape_rejected() {
        let result = SceneSnapshot::new(vec![
            Shape::rectangle("a", 0.0, 0.0, 10.0, 10.0),
            Shape::rectangle("a", 20.0, 0.0, 10.0, 10.0),
        ]);
        assert!(matches!(result, Err(SceneError::DuplicateShape(id)) if id == "a"));
    }

    #[test]
    fn test_negative_size_rejected() {
        let result = SceneSnapshot::new(vec![Shape::rectangle("a", 0.0, 0.0, -10.0, 10.0)]);
        assert!(matches!(result, Err(SceneError::InvalidShape { .. })));
    }

    #[test]
    fn test_bad_toml() {
        let result = SceneSnapshot::from_str("[[shapes]]\nid = 3\n");
        assert!(matches!(result, Err(SceneError::ParseError(_))));
    }
}
