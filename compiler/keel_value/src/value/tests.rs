use super::*;
use pretty_assertions::assert_eq;

#[test]
fn only_undef_and_false_are_falsy() {
    assert!(!Value::Undef.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Integer(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::array(vec![]).is_truthy());
    assert!(Value::Default.is_truthy());
}

#[test]
fn undef_and_default_are_distinct_singletons() {
    assert_eq!(Value::Undef, Value::Undef);
    assert_eq!(Value::Default, Value::Default);
    assert_ne!(Value::Undef, Value::Default);
    assert_ne!(Value::Undef, Value::string(""));
    assert_ne!(Value::Default, Value::string("default"));
}

#[test]
fn display_scalars() {
    assert_eq!(Value::Undef.to_string(), "");
    assert_eq!(Value::Default.to_string(), "default");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Integer(-4).to_string(), "-4");
    assert_eq!(Value::Float(1.0).to_string(), "1.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
}

#[test]
fn display_collections() {
    let arr = Value::array(vec![Value::Integer(1), Value::string("a")]);
    assert_eq!(arr.to_string(), "[1, a]");

    let map = Value::map_from_pairs([
        (Value::string("a"), Value::Integer(1)),
        (Value::string("b"), arr),
    ]);
    assert_eq!(map.to_string(), "{a => 1, b => [1, a]}");
}

#[test]
fn display_types_and_regex() {
    let t = Value::type_ref(TypeRef::with_params(
        "Integer",
        vec![Value::Integer(1), Value::Integer(10)],
    ));
    assert_eq!(t.to_string(), "Integer[1, 10]");
    assert_eq!(format!("{t:?}"), "Type(Integer[1, 10])");

    let re = Value::regex(regex::Regex::new("^a+$").unwrap());
    assert_eq!(re.to_string(), "/^a+$/");
}

#[test]
fn interpolation_of_undef_is_empty() {
    assert_eq!(Value::Undef.to_interpolated(), "");
    assert_eq!(Value::string("x").to_interpolated(), "x");
    assert_eq!(Value::Integer(3).to_interpolated(), "3");
}

#[test]
fn hash_equality_ignores_order() {
    let a = Value::map_from_pairs([
        (Value::string("x"), Value::Integer(1)),
        (Value::string("y"), Value::Integer(2)),
    ]);
    let b = Value::map_from_pairs([
        (Value::string("y"), Value::Integer(2)),
        (Value::string("x"), Value::Integer(1)),
    ]);
    assert_eq!(a, b);
}

#[test]
fn map_from_pairs_later_duplicate_wins() {
    let m = Value::map_from_pairs([
        (Value::string("k"), Value::Integer(1)),
        (Value::string("k"), Value::Integer(2)),
    ]);
    let map = m.as_hash().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Value::string("k")), Some(&Value::Integer(2)));
}

#[test]
fn regex_equality_by_source() {
    let a = Value::regex(regex::Regex::new("a.c").unwrap());
    let b = Value::regex(regex::Regex::new("a.c").unwrap());
    let c = Value::regex(regex::Regex::new("abc").unwrap());
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn match_data_groups() {
    let re = regex::Regex::new("(a)(x)?(b)").unwrap();
    let caps = re.captures("ab").unwrap();
    let data = MatchData::from_captures(&caps);
    assert_eq!(data.len(), 4);
    assert_eq!(data.group(0), Value::string("ab"));
    assert_eq!(data.group(1), Value::string("a"));
    assert_eq!(data.group(2), Value::Undef);
    assert_eq!(data.group(3), Value::string("b"));
    assert_eq!(data.group(9), Value::Undef);
}

#[test]
fn type_names() {
    assert_eq!(Value::Undef.type_name(), "Undef");
    assert_eq!(Value::Float(0.5).type_name(), "Float");
    assert_eq!(Value::map(ValueMap::default()).type_name(), "Hash");
}
