use std::sync::Arc;

use molecules::registry::global;
use molecules::style::{properties, StyleDefinition, StyleSlot};
use molecules::stylesheet::{StylesheetFormat, StylesheetSet};
use molecules::{
    catalog, implementation, resolve, InteractionState, RegistrationPolicy, Registry,
    RegistryConfig, StyleResolver, Theme, ThemeContext, VariantSelection,
};
use serial_test::serial;

type Render = Box<dyn Fn(&str) -> String + Send + Sync>;

fn default_card() -> Arc<Render> {
    let render: Render = Box::new(|title: &str| format!("[card {}]", title));
    Arc::new(render)
}

fn widget_styles() -> StyleDefinition {
    StyleDefinition::new().slot(
        "root",
        StyleSlot::new()
            .with("color", "red")
            .variant("state", "disabled", properties([("opacity", 0.5)])),
    )
}

#[test]
fn test_widget_disabled_scenario() {
    let mut registry = Registry::new();
    registry.register_styles("Widget", widget_styles()).unwrap();
    let styles = registry.styles_with_fallback("Widget", Arc::new(StyleDefinition::new()));
    let theme = Theme::light();

    let idle = resolve(&styles, &VariantSelection::new(), &theme);
    assert_eq!(
        idle.slot("root").unwrap(),
        &properties([("color", "red")])
    );

    let disabled = resolve(
        &styles,
        &VariantSelection::new().with_state(InteractionState::DISABLED),
        &theme,
    );
    let root = disabled.slot("root").unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(root["color"].as_text(), Some("red"));
    assert_eq!(root["opacity"].as_number(), Some(0.5));
}

#[test]
fn test_custom_card_scenario() {
    let mut registry = Registry::new();

    let card = registry.component_with_fallback("Card", default_card());
    assert_eq!(card("Hello"), "[card Hello]");

    let custom: Render = Box::new(|title: &str| format!("<custom {}>", title));
    registry
        .register_components([("Card", implementation(custom))])
        .unwrap();

    let card = registry.component_with_fallback("Card", default_card());
    assert_eq!(card("Hello"), "<custom Hello>");
}

#[test]
fn test_later_axis_wins_for_shared_property() {
    let def = StyleDefinition::new().slot(
        "root",
        StyleSlot::new()
            .with("backgroundColor", "white")
            .variant("variant", "filled", properties([("backgroundColor", "blue")]))
            .variant("state", "pressed", properties([("backgroundColor", "navy")])),
    );
    let theme = Theme::light();

    let state_last = VariantSelection::new()
        .with("variant", "filled")
        .with("state", "pressed");
    let resolved = resolve(&def, &state_last, &theme);
    assert_eq!(
        resolved.slot("root").unwrap()["backgroundColor"].as_text(),
        Some("navy")
    );

    let variant_last = VariantSelection::new()
        .with("state", "pressed")
        .with("variant", "filled");
    let resolved = resolve(&def, &variant_last, &theme);
    assert_eq!(
        resolved.slot("root").unwrap()["backgroundColor"].as_text(),
        Some("blue")
    );
}

#[test]
fn test_composite_parts_override_independently() {
    let mut set = StylesheetSet::new();
    set.add_inline_source(
        r#"{"Card_Header": {"title": {"color": "{{ colors.primary }}", "fontSize": 18}}}"#,
        StylesheetFormat::Json,
    )
    .unwrap();

    let mut registry = Registry::new();
    set.register_into(&mut registry).unwrap();

    let theme = Theme::dark();
    let header = catalog::styles_for(&registry, catalog::CARD_HEADER);
    let resolved = resolve(&header, &VariantSelection::new(), &theme);
    let title = resolved.slot("title").unwrap();
    assert_eq!(title["color"].as_text(), theme.color("primary"));
    assert_eq!(title["fontSize"].as_number(), Some(18.0));
    assert!(resolved.slot("root").is_none());

    let content = catalog::styles_for(&registry, catalog::CARD_CONTENT);
    assert!(Arc::ptr_eq(
        &content,
        &catalog::default_styles(catalog::CARD_CONTENT).unwrap()
    ));
}

#[test]
fn test_theme_change_invalidates_memoized_styles() {
    let mut context = ThemeContext::new(Theme::light());
    let mut resolver = StyleResolver::new();
    let card = catalog::default_styles(catalog::CARD).unwrap();
    let selection = VariantSelection::new().with("variant", "outlined");

    let light = resolver.resolve(&card, &selection, &context.snapshot());
    assert!(Arc::ptr_eq(
        &light,
        &resolver.resolve(&card, &selection, &context.snapshot())
    ));

    assert!(context.set_theme(Theme::dark()));
    let dark = resolver.resolve(&card, &selection, &context.snapshot());
    assert_eq!(
        dark.slot("root").unwrap()["backgroundColor"].as_text(),
        Theme::dark().color("surface")
    );
    assert_ne!(*light, *dark);
}

#[test]
fn test_reject_duplicates_batch_is_all_or_nothing() {
    let mut registry = Registry::with_config(
        RegistryConfig::default().with_policy(RegistrationPolicy::RejectDuplicates),
    );
    registry.register_styles("Switch", StyleDefinition::new()).unwrap();

    let result = registry.register_styles_batch([
        ("Avatar", Arc::new(StyleDefinition::new())),
        ("Switch", Arc::new(widget_styles())),
    ]);
    assert!(result.is_err());
    assert!(!registry.styles().contains("Avatar"));
}

#[test]
#[serial(global_registry)]
fn test_global_registry_scenario() {
    global::install(Registry::new());

    let card = molecules::get_component_with_fallback("Card", default_card());
    assert_eq!(card("x"), "[card x]");

    let custom: Render = Box::new(|title: &str| format!("<{}>", title));
    molecules::register_components([("Card", implementation(custom))]).unwrap();
    molecules::register_styles("Widget", widget_styles()).unwrap();

    let card = molecules::get_component_with_fallback("Card", default_card());
    assert_eq!(card("x"), "<x>");
    let styles =
        molecules::get_styles_with_fallback("Widget", Arc::new(StyleDefinition::new()));
    assert!(styles.static_slots().unwrap().contains_key("root"));

    global::install(Registry::new());
}
