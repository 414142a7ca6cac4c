use serde_json::json;
use simplejson::{build, build_array, JsonArray, JsonError, JsonObject, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn builder_roundtrip_through_typed_accessors() {
    init_tracing();
    let json = build(|o| {
        o.put("a", "x")?;
        o.put_object("b", |b| {
            b.put("c", 14)?;
            b.put("d", "y")?;
            Ok(())
        })?;
        Ok(())
    })
    .expect("build ok");

    assert_eq!(json.get::<String>("a").unwrap(), "x");
    let b = json.get::<JsonObject>("b").unwrap();
    assert_eq!(b.get::<i32>("c").unwrap(), 14);
    assert_eq!(b.get::<String>("d").unwrap(), "y");
    assert_eq!(
        json.to_pretty_string().unwrap(),
        "{\n    \"a\": \"x\",\n    \"b\": {\n        \"c\": 14,\n        \"d\": \"y\"\n    }\n}"
    );
}

#[test]
fn builder_overwrite_keeps_size_and_position() {
    let json = build(|o| {
        o.put("first", 1)?;
        o.put("second", 2)?;
        let previous = o.put("first", "replaced")?;
        assert_eq!(previous, Some(json!(1)));
        assert_eq!(o.len(), 2);
        Ok(())
    })
    .unwrap();

    assert_eq!(json.len(), 2);
    assert_eq!(json.get::<String>("first").unwrap(), "replaced");
    assert!(json.get::<i32>("first").is_err());
    assert_eq!(json.keys().collect::<Vec<_>>(), vec!["first", "second"]);
}

#[test]
fn builder_overwrite_object_with_nested_block() {
    let json = build(|o| {
        o.put("slot", "scalar")?;
        let previous = o.put_object("slot", |s| {
            s.put("inner", true)?;
            Ok(())
        })?;
        assert_eq!(previous, Some(json!("scalar")));
        Ok(())
    })
    .unwrap();
    assert_eq!(Value::from(json), json!({"slot": {"inner": true}}));
}

#[test]
fn builder_deep_nesting_matches_block_shape() {
    let json = build(|l0| {
        l0.put("level", 0)?;
        l0.put_object("next", |l1| {
            l1.put("level", 1)?;
            l1.put_object("next", |l2| {
                l2.put("level", 2)?;
                l2.put_object("next", |l3| {
                    l3.put("level", 3)?;
                    l3.put_object("next", |l4| {
                        l4.put("level", 4)?;
                        l4.put_object("next", |l5| {
                            l5.put("level", 5)?;
                            l5.put("leaf", "bottom")?;
                            Ok(())
                        })?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    let mut current = json;
    for level in 0..5 {
        assert_eq!(current.get::<i32>("level").unwrap(), level);
        assert_eq!(current.len(), 2);
        current = current.get::<JsonObject>("next").unwrap();
    }
    assert_eq!(current.get::<i32>("level").unwrap(), 5);
    assert_eq!(current.get::<String>("leaf").unwrap(), "bottom");
    assert!(matches!(
        current.get::<JsonObject>("next"),
        Err(JsonError::MissingKey(_))
    ));
}

#[test]
fn builder_recursive_depth() {
    fn nest(o: &mut simplejson::ObjectBuilder, remaining: usize) -> Result<(), JsonError> {
        o.put("depth", o.depth())?;
        if remaining > 0 {
            o.put_object("child", |child| nest(child, remaining - 1))?;
        }
        Ok(())
    }

    let json = build(|o| nest(o, 12)).unwrap();
    let pointer = "/child".repeat(12) + "/depth";
    assert_eq!(json.get_at::<i64>(&pointer).unwrap(), 12);
}

#[test]
fn builder_error_aborts_whole_build() {
    let mut reached_after_error = false;
    let result = build(|o| {
        o.put("a", 1)?;
        o.put_object("b", |b| {
            b.put("bad", f32::NAN)?;
            Ok(())
        })?;
        reached_after_error = true;
        Ok(())
    });
    assert!(matches!(result, Err(JsonError::NonFiniteNumber(_))));
    assert!(!reached_after_error);
}

#[test]
fn builder_accepts_prebuilt_values() {
    let tags = JsonArray::from_items(["x", "y"]).unwrap();
    let meta = JsonObject::from_json(r#"{"owner": "me"}"#).unwrap();
    let json = build(|o| {
        o.put("tags", tags)?;
        o.put("meta", meta)?;
        o.put("raw", json!({"k": [1, 2]}))?;
        o.put("maybe", None::<i32>)?;
        o.put("list", vec![1_i64, 2, 3])?;
        Ok(())
    })
    .unwrap();

    assert_eq!(json.get::<JsonArray>("tags").unwrap().collect::<String>().unwrap(), vec!["x", "y"]);
    assert_eq!(json.get_at::<String>("/meta/owner").unwrap(), "me");
    assert_eq!(json.get_at::<i32>("/raw/k/1").unwrap(), 2);
    assert!(json.has_key("maybe"));
    assert_eq!(json.get_or_null::<i32>("maybe").unwrap(), None);
    assert_eq!(json.get_array("list").unwrap().collect::<i64>().unwrap(), vec![1, 2, 3]);
}

#[test]
fn build_array_with_nested_scopes() {
    let arr = build_array(|a| {
        a.push("head")?;
        a.push_object(|o| {
            o.put("id", 1)?;
            o.put_array("pair", |p| {
                p.push(true)?;
                p.push(false)
            })?;
            Ok(())
        })?;
        a.push_array(|inner| inner.push(2.5))?;
        a.push_null();
        Ok(())
    })
    .unwrap();

    assert_eq!(
        Value::from(arr.clone()),
        json!(["head", {"id": 1, "pair": [true, false]}, [2.5], null])
    );
    assert_eq!(arr.get_object(1).unwrap().get_array("pair").unwrap().len(), 2);
    assert_eq!(arr.get_at::<f64>("/2/0").unwrap(), 2.5);
}
