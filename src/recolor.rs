//! Subtree recoloring
//!
//! Overwrite the material color of every renderer under a root node,
//! skipping nodes by exact name match.

use crate::color::{Color, ColorError};
use crate::scene::{NodeId, Scene};

/// Recolor the root node and every descendant (inactive ones included).
///
/// `hex` is an HTML-style color ("#FF0000" or "#F00"). Nodes whose name
/// appears in `exclude` keep their color, but their children are still
/// visited - exclusion is per node, never per subtree. Nodes without a
/// renderer are skipped silently. Returns how many renderers were
/// recolored.
pub fn recolor(
    scene: &mut Scene,
    root: NodeId,
    hex: &str,
    exclude: &[&str],
) -> Result<usize, ColorError> {
    let color = Color::from_hex(hex)?;

    let mut targets = vec![root];
    targets.extend(scene.descendants(root));

    let mut touched = 0;
    for id in targets {
        let Some(node) = scene.get_mut(id) else { continue };
        if exclude.contains(&node.name.as_str()) {
            continue;
        }
        if let Some(renderer) = &mut node.renderer {
            renderer.color = color;
            touched += 1;
        }
    }
    Ok(touched)
}
