use pretty_assertions::assert_eq;

use crate::{Builtin, Value, Word};

#[test]
fn values_render_as_written() {
    assert_eq!(Word::int(-42).to_string(), "-42");
    assert_eq!(Word::text("hello world").to_string(), "hello world");
}

#[test]
fn blocks_render_bracketed() {
    let block = Word::block([
        Word::int(1),
        Word::builtin(Builtin::Add),
        Word::call("add-one"),
    ]);
    assert_eq!(block.to_string(), "[ 1 + add-one ]");
    assert_eq!(Word::block([]).to_string(), "[ ]");
}

#[test]
fn nested_blocks_render_recursively() {
    let block = Word::block([Word::block([Word::int(1)]), Word::builtin(Builtin::Apply)]);
    assert_eq!(block.to_string(), "[ [ 1 ] apply ]");
}

#[test]
fn function_refs_render_by_name() {
    assert_eq!(Word::builtin(Builtin::Equal).to_string(), "equal?");
    assert_eq!(Word::call("main").to_string(), "main");
}

#[test]
fn equality_is_for_values_only() {
    assert!(Word::int(3).is_equal(&Word::int(3)));
    assert!(Word::text("a").is_equal(&Word::text("a")));
    assert!(!Word::int(3).is_equal(&Word::int(4)));
    assert!(!Word::int(1).is_equal(&Word::text("1")));

    let block = Word::block([Word::int(1)]);
    assert!(!block.is_equal(&block.clone()));
    let add = Word::builtin(Builtin::Add);
    assert!(!add.is_equal(&add));
}

#[test]
fn kind_names() {
    assert_eq!(Word::int(1).kind_name(), "integer");
    assert_eq!(Word::text("x").kind_name(), "text");
    assert_eq!(Word::block([]).kind_name(), "block");
    assert_eq!(Word::builtin(Builtin::Dup).kind_name(), "builtin");
    assert_eq!(Word::call("f").kind_name(), "function");
}

#[test]
fn builtin_names_round_trip() {
    for builtin in Builtin::ALL {
        assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
    }
    assert_eq!(Builtin::from_name("drop"), None);
}

#[test]
fn value_conversions() {
    assert_eq!(Value::from(true), Value::Integer(1));
    assert_eq!(Value::from(false), Value::Integer(0));
    assert_eq!(Word::from(Value::from("x")), Word::text("x"));
    assert_eq!(Value::Integer(5).as_integer(), Some(5));
    assert_eq!(Value::Text("t".into()).as_text(), Some("t"));
}
