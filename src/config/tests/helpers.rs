//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::PullgenConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`PullgenConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> PullgenConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    PullgenConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Configuration naming a complete repository with no credentials.
pub fn repository_config() -> PullgenConfig {
    PullgenConfig {
        base_url: Some("https://bitbucket.example.com".to_owned()),
        project: Some("PROJECT".to_owned()),
        repo: Some("REPO".to_owned()),
        ..Default::default()
    }
}
