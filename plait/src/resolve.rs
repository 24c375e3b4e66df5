//! Resolvers for the passthrough contributions: decorator lists, style
//! maps, accessibility descriptors.
//!
//! Each resolver is a pure function of (explicit host values, manifest
//! sequence); plugin order is the only priority mechanism.

use plait_core::{
    AccessibilityProps, Decorator, DocumentState, HookArgs, PluginManifest, StyleMap,
};

/// Flatten decorator contributions into one ordered list: the explicit
/// top-level list first (in its given order), then each manifest's
/// decorators in plugin order, each preserving its internal order.
///
/// The resulting order determines decoration priority downstream; the
/// engine guarantees determinism only, not conflict resolution.
pub fn decorators<E: HookArgs, S: DocumentState>(
    explicit: &[Decorator],
    manifests: &[PluginManifest<E, S>],
) -> Vec<Decorator> {
    explicit
        .iter()
        .cloned()
        .chain(manifests.iter().flat_map(|m| m.decorators().iter().cloned()))
        .collect()
}

/// Merge style maps: manifests in plugin order, then the explicit host map
/// last; later sources override earlier key-by-key.
pub fn style_map<E: HookArgs, S: DocumentState>(
    manifests: &[PluginManifest<E, S>],
    explicit: &StyleMap,
) -> StyleMap {
    let mut merged = StyleMap::new();
    for manifest in manifests {
        merged.merge_from(manifest.style_map());
    }
    merged.merge_from(explicit);
    merged
}

/// Merge accessibility descriptors in plugin order under the rules of
/// [`AccessibilityProps::merge_from`]: generic fields later-wins, the two
/// popup flags sticky.
pub fn accessibility<E: HookArgs, S: DocumentState>(
    manifests: &[PluginManifest<E, S>],
) -> AccessibilityProps {
    let mut merged = AccessibilityProps::new();
    for manifest in manifests {
        if let Some(props) = manifest.accessibility() {
            merged.merge_from(props);
        }
    }
    merged
}
