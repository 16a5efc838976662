//! Material catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tool_core::{MaterialId, MaterialStats};

use crate::loaders::{LoadResult, read_file};

/// Material catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCatalog {
    pub materials: Vec<(MaterialId, MaterialStats)>,
}

/// Loader for material part stats from RON files.
pub struct MaterialLoader;

impl MaterialLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(MaterialId, MaterialStats)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(MaterialId, MaterialStats)>> {
        let catalog: MaterialCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse material catalog RON: {}", e))?;

        Ok(catalog.materials)
    }
}

#[cfg(test)]
mod tests {
    use tool_core::Identifier;

    use super::*;

    #[test]
    fn missing_slots_stay_empty() {
        let materials = MaterialLoader::parse(
            r#"(
                materials: [
                    ("tool:iron", (head: Some((durability: 250.0, harvest_tier: 2)))),
                    ("tool:wood", (handle: Some((durability: 1.1)))),
                ],
            )"#,
        )
        .unwrap();

        let (id, iron) = &materials[0];
        assert_eq!(id, &Identifier::from_static("tool", "iron"));
        let head = iron.head.unwrap();
        assert_eq!(head.durability, 250.0);
        assert_eq!(head.harvest_tier, 2);
        assert_eq!(head.mining_speed, 1.0);
        assert!(iron.handle.is_none());

        let handle = materials[1].1.handle.unwrap();
        assert_eq!(handle.durability, 1.1);
        assert_eq!(handle.attack_speed, 1.0);
    }

    #[test]
    fn invalid_identifier_is_rejected() {
        assert!(MaterialLoader::parse(r#"(materials: [("Iron Ore", ())])"#).is_err());
    }
}
