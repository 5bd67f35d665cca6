use std::collections::{BTreeMap, HashMap};

use fieldkit::constants::PLACEHOLDER_DICT_KEY;
use fieldkit::{
    build_template, BoxError, Converters, Convertible, DefaultFactory, Describe, Key, Model,
    ModelSchema, SchemaError, Shape, ToValue, Value,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

struct Player;

impl Model for Player {
    fn schema() -> ModelSchema {
        ModelSchema::builder("Player")
            .required::<String>("name")
            .optional("admin", false)
            .optional("highest_score", 1.0)
            .required::<HashMap<String, String>>("extra_data")
            .build()
    }
}

impl Describe for Player {
    fn shape() -> Shape {
        Shape::model::<Self>()
    }
}

#[derive(Default)]
struct Settings {
    volume: i64,
}

impl Model for Settings {
    fn schema() -> ModelSchema {
        ModelSchema::builder("Settings")
            .optional("volume", 7i64)
            .required::<String>("theme")
            .build()
    }
}

impl Describe for Settings {
    fn shape() -> Shape {
        Shape::model::<Self>()
    }
}

impl ToValue for Settings {
    fn to_value(&self) -> Value {
        Value::map([("volume", Value::Int(self.volume))])
    }
}

struct Level(i64);

impl Convertible for Level {
    fn converters(decl: &mut Converters<Self>) {
        decl.add("convert_int", |v: i64| Ok::<_, BoxError>(Level(v)));
    }
}

impl Describe for Level {
    fn shape() -> Shape {
        Shape::convertible::<Self>()
    }
}

struct GameSystem;

impl Model for GameSystem {
    fn schema() -> ModelSchema {
        ModelSchema::builder("GameSystem")
            .required::<String>("title")
            .required::<Vec<Player>>("players")
            .required::<BTreeMap<i64, Vec<String>>>("high_scores")
            .required::<Level>("level")
            .factory::<Settings>("settings", DefaultFactory::model::<Settings>())
            .factory::<Vec<String>>("tags", DefaultFactory::seq(Vec::<String>::new))
            .factory::<String>("motd", DefaultFactory::other(|| "welcome"))
            .optional_value("release", "2024")
            .build()
    }
}

struct Node;

impl Model for Node {
    fn schema() -> ModelSchema {
        ModelSchema::builder("Node")
            .required::<String>("label")
            .required_shape("children", Shape::seq(Shape::model::<Node>()))
            .build()
    }
}

struct Empty;

impl Model for Empty {
    fn schema() -> ModelSchema {
        ModelSchema::builder("Empty").build()
    }
}

struct NoConverters;

impl Convertible for NoConverters {
    fn converters(_: &mut Converters<Self>) {}
}

struct Holder;

impl Model for Holder {
    fn schema() -> ModelSchema {
        ModelSchema::builder("Holder")
            .required_shape("inner", Shape::convertible::<NoConverters>())
            .build()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn template_player_end_to_end_matrix() {
    let template = build_template::<Player>().unwrap();
    assert_eq!(
        template.to_json(),
        json!({
            "name": "NAME",
            "admin": false,
            "highest_score": 1.0,
            "extra_data": { "KEY_NAME": "EXTRA_DATA" },
        })
    );
    let keys: Vec<_> = template.as_map().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            Key::from("name"),
            Key::from("admin"),
            Key::from("highest_score"),
            Key::from("extra_data"),
        ]
    );
}

#[test]
fn template_game_system_nested_matrix() {
    let template = build_template::<GameSystem>().unwrap();
    assert_eq!(
        template.to_json(),
        json!({
            "title": "TITLE",
            "players": [{
                "name": "NAME",
                "admin": false,
                "highest_score": 1.0,
                "extra_data": { "KEY_NAME": "EXTRA_DATA" },
            }],
            "high_scores": { "0": ["HIGH_SCORES"] },
            "level": 0,
            "settings": { "volume": 7, "theme": "THEME" },
            "tags": ["TAGS"],
            "motd": "welcome",
            "release": "2024",
        })
    );
    assert_eq!(
        template["high_scores"].get(&Key::Int(0)),
        Some(&Value::Seq(vec![Value::from("HIGH_SCORES")]))
    );
}

#[test]
fn template_model_factory_ignores_runtime_instance_matrix() {
    let template = build_template::<GameSystem>().unwrap();
    // Settings::default() would give volume 0 and no theme.
    assert_eq!(template["settings"]["volume"], Value::Int(7));
    assert_eq!(template["settings"]["theme"], Value::from("THEME"));
}

#[test]
fn template_sentinel_key_matrix() {
    let template = build_template::<Player>().unwrap();
    let extra = template["extra_data"].as_map().unwrap();
    assert_eq!(extra.len(), 1);
    assert_eq!(
        extra.get(&Key::from(PLACEHOLDER_DICT_KEY)),
        Some(&Value::from("EXTRA_DATA"))
    );
}

#[test]
fn template_empty_model_matrix() {
    assert_eq!(build_template::<Empty>().unwrap(), Value::empty_map());
}

#[test]
fn template_self_nesting_is_rejected_matrix() {
    let err = build_template::<Node>().unwrap_err();
    assert!(matches!(&err, SchemaError::Recursive { path, .. } if path.matches("Node").count() == 2));
}

#[test]
fn template_empty_convertible_is_rejected_matrix() {
    let err = build_template::<Holder>().unwrap_err();
    assert!(matches!(
        err,
        SchemaError::Converter(fieldkit::ConverterDefinitionError::Empty { .. })
    ));
}

#[test]
fn template_renders_with_serde_matrix() {
    let template = build_template::<Player>().unwrap();
    let text = serde_json::to_string(&template).unwrap();
    assert_eq!(
        text,
        r#"{"name":"NAME","admin":false,"highest_score":1.0,"extra_data":{"KEY_NAME":"EXTRA_DATA"}}"#
    );
}
