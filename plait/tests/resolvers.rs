//! Derived-value resolution: decorator ordering, style-map overrides,
//! accessibility merging.

use plait::{AccessibilityProps, ARIA_TRUE, Decorator, PluginHost, PluginManifest, StyleMap};
use serde_json::json;

mod common;
use common::{Doc, Key, doc};

type Manifest = PluginManifest<Key, Doc>;

#[test]
fn decorators_resolve_explicit_first_then_plugin_order() {
    let host = PluginHost::builder(doc("base"))
        .decorator(Decorator::new("d0"))
        .plugin(Manifest::new().decorator(Decorator::new("d1")))
        .plugin(Manifest::new())
        .plugin(Manifest::new().decorator(Decorator::new("d2")))
        .build()
        .unwrap();

    let composition = host.composition();
    let names: Vec<_> = composition
        .decorators()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["d0", "d1", "d2"]);
}

#[test]
fn plugin_internal_decorator_order_is_preserved() {
    let host = PluginHost::builder(doc("base"))
        .plugin(
            Manifest::new()
                .decorator(Decorator::new("link"))
                .decorator(Decorator::new("mention")),
        )
        .build()
        .unwrap();

    let composition = host.composition();
    let names: Vec<_> = composition
        .decorators()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["link", "mention"]);
}

#[test]
fn style_maps_merge_with_explicit_map_last() {
    let host = PluginHost::builder(doc("base"))
        .style("CODE", json!({"font": "consolas"}))
        .plugin(Manifest::new().style("CODE", json!({"font": "mono"})))
        .plugin(Manifest::new().style("BOLD", json!({"weight": 700})))
        .build()
        .unwrap();

    let composition = host.composition();
    let styles = composition.style_map();
    assert_eq!(styles.get("CODE"), Some(&json!({"font": "consolas"})));
    assert_eq!(styles.get("BOLD"), Some(&json!({"weight": 700})));
}

#[test]
fn later_plugin_style_overrides_earlier() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().style("CODE", json!({"font": "mono"})))
        .plugin(Manifest::new().style("CODE", json!({"font": "menlo"})))
        .build()
        .unwrap();

    let composition = host.composition();
    assert_eq!(
        composition.style_map().get("CODE"),
        Some(&json!({"font": "menlo"}))
    );
}

#[test]
fn whole_style_map_builder_replaces_explicit_map() {
    let host: PluginHost<Key, Doc> = PluginHost::builder(doc("base"))
        .style_map(StyleMap::new().with("STRIKE", json!({"decoration": "line-through"})))
        .build()
        .unwrap();

    let composition = host.composition();
    assert_eq!(
        composition.style_map().get("STRIKE"),
        Some(&json!({"decoration": "line-through"}))
    );
}

#[test]
fn popup_claim_survives_later_omission() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().aria(AccessibilityProps::new().has_popup(ARIA_TRUE)))
        .plugin(Manifest::new().aria(AccessibilityProps::new()))
        .build()
        .unwrap();

    let composition = host.composition();
    assert_eq!(
        composition.accessibility_props().aria_has_popup.as_deref(),
        Some(ARIA_TRUE)
    );
}

#[test]
fn setting_true_again_is_idempotent() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().aria(AccessibilityProps::new().expanded(ARIA_TRUE)))
        .plugin(Manifest::new().aria(AccessibilityProps::new().expanded(ARIA_TRUE)))
        .build()
        .unwrap();

    let composition = host.composition();
    assert_eq!(
        composition.accessibility_props().aria_expanded.as_deref(),
        Some(ARIA_TRUE)
    );
}

#[test]
fn popup_claim_cannot_be_downgraded() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().aria(AccessibilityProps::new().has_popup(ARIA_TRUE)))
        .plugin(Manifest::new().aria(AccessibilityProps::new().has_popup("false")))
        .build()
        .unwrap();

    let composition = host.composition();
    assert_eq!(
        composition.accessibility_props().aria_has_popup.as_deref(),
        Some(ARIA_TRUE)
    );
}

#[test]
fn generic_accessibility_fields_later_wins() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().aria(AccessibilityProps::new().field("ariaLabel", json!("a"))))
        .plugin(Manifest::new().aria(AccessibilityProps::new().field("ariaLabel", json!("b"))))
        .build()
        .unwrap();

    let composition = host.composition();
    assert_eq!(
        composition.accessibility_props().extra.get("ariaLabel"),
        Some(&json!("b"))
    );
}
