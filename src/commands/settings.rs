use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 1;
pub const DEFAULT_SETTINGS_FILE: &str = "ecolens.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub product_table: PathBuf,
    pub material_table: PathBuf,
    pub alternatives_limit: usize,
    pub min_recognition_confidence: f64,
    pub output_format: OutputFormat,
}

pub fn get_settings(path: &Path) -> Result<Value, String> {
    load_settings_from_disk(path)
}

pub fn save_settings(path: &Path, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(path, settings)
}

/// Typed settings; relative table paths resolve against the settings file's directory.
pub fn load_effective_settings(path: &Path) -> Result<EffectiveSettings, String> {
    let settings = load_settings_from_disk(path)?;
    Ok(effective_from_value(&settings, path.parent()))
}

fn effective_from_value(settings: &Value, base_dir: Option<&Path>) -> EffectiveSettings {
    let resolve = |key: &str, default: &str| {
        let raw = PathBuf::from(settings.get(key).and_then(Value::as_str).unwrap_or(default));
        match base_dir {
            Some(dir) if raw.is_relative() && !dir.as_os_str().is_empty() => dir.join(raw),
            _ => raw,
        }
    };

    let output_format = match settings.get("outputFormat").and_then(Value::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    EffectiveSettings {
        product_table: resolve("productTable", "product.csv"),
        material_table: resolve("materialTable", "material.csv"),
        alternatives_limit: settings
            .get("alternativesLimit")
            .and_then(Value::as_u64)
            .unwrap_or(5)
            .clamp(1, 20) as usize,
        min_recognition_confidence: settings
            .get("minRecognitionConfidence")
            .and_then(Value::as_f64)
            .unwrap_or(0.6)
            .clamp(0.0, 1.0),
        output_format,
    }
}

/// A missing file yields the defaults; nothing is written on load.
pub fn load_settings_from_disk(path: &Path) -> Result<Value, String> {
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(migrate_settings(json!({})));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let original = serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
        log::warn!("ignoring malformed settings in {}: {e}", path.display());
        json!({})
    });

    Ok(migrate_settings(original))
}

pub fn save_settings_to_disk(path: &Path, settings: Value) -> Result<Value, String> {
    let mut merged = load_settings_from_disk(path).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(path, &migrated)?;
    Ok(migrated)
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    }
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn migrate_settings(input: Value) -> Value {
    let defaults = default_settings();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    deep_merge_defaults(&mut out, &defaults);
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "productTable": "product.csv",
        "materialTable": "material.csv",
        "alternativesLimit": 5,
        "minRecognitionConfidence": 0.6,
        "outputFormat": "text"
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "alternativesLimit", 1, 20, 5);
    sanitize_confidence(obj);
    sanitize_enum(obj, "outputFormat", &["text", "json"], "text");
    ensure_non_empty_str(obj, "productTable", "product.csv");
    ensure_non_empty_str(obj, "materialTable", "material.csv");
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

/// Accepts percentages (e.g. 60) as well as fractions.
fn sanitize_confidence(map: &mut Map<String, Value>) {
    let raw = map
        .get("minRecognitionConfidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.6);
    let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
    map.insert(
        "minRecognitionConfidence".to_string(),
        json!(fraction.clamp(0.0, 1.0)),
    );
}

fn sanitize_enum(map: &mut Map<String, Value>, key: &str, allowed: &[&str], default: &str) {
    let valid = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| allowed.contains(value))
        .unwrap_or(default);
    map.insert(key.to_string(), json!(valid));
}

fn ensure_non_empty_str(map: &mut Map<String, Value>, key: &str, default: &str) {
    let value = map
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string();
    map.insert(key.to_string(), json!(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_out_of_range_values() {
        let migrated = migrate_settings(json!({
            "alternativesLimit": 500,
            "minRecognitionConfidence": 85,
            "outputFormat": "yaml",
            "productTable": "   "
        }));

        assert_eq!(migrated["alternativesLimit"], json!(20));
        assert_eq!(migrated["minRecognitionConfidence"], json!(0.85));
        assert_eq!(migrated["outputFormat"], json!("text"));
        assert_eq!(migrated["productTable"], json!("product.csv"));
        assert_eq!(migrated["schema_version"], json!(SETTINGS_SCHEMA_VERSION));
    }

    #[test]
    fn merges_partial_settings_without_losing_existing_values() {
        let mut existing = default_settings();
        merge_settings(&mut existing, &json!({ "alternativesLimit": 3 }));
        let migrated = migrate_settings(existing);

        assert_eq!(migrated["alternativesLimit"], json!(3));
        assert_eq!(migrated["materialTable"], json!("material.csv"));
    }

    #[test]
    fn non_object_input_falls_back_to_defaults() {
        let migrated = migrate_settings(json!([1, 2, 3]));
        assert_eq!(migrated["alternativesLimit"], json!(5));
    }

    #[test]
    fn relative_tables_resolve_against_settings_directory() {
        let settings = migrate_settings(json!({ "productTable": "data/p.csv" }));
        let effective = effective_from_value(&settings, Some(Path::new("/srv/eco")));

        assert_eq!(effective.product_table, PathBuf::from("/srv/eco/data/p.csv"));
        assert_eq!(effective.material_table, PathBuf::from("/srv/eco/material.csv"));
        assert_eq!(effective.alternatives_limit, 5);
        assert_eq!(effective.output_format, OutputFormat::Text);
    }
}
