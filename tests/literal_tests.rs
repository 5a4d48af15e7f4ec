//! Literal coverage: every typed literal the format can express, parsed from
//! text and written back.

use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use sdlang::{ser, SdlValue, Tag};
use std::str::FromStr;

/// Parses a single-statement document and returns its one tag.
fn first_tag(text: &str) -> Tag {
    let root = sdlang::parse_str(text).unwrap();
    assert_eq!(root.children().len(), 1, "one statement in {:?}", text);
    root.children()[0].clone()
}

/// Parses `name <literal>` and returns the literal.
fn first_value(text: &str) -> SdlValue {
    first_tag(text).values()[0].clone()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ymd_hms_milli(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
    ymd(y, m, d).and_hms_milli_opt(h, min, s, ms).unwrap()
}

#[test]
fn plain_strings() {
    assert_eq!(first_value("string1 \"hello\""), SdlValue::from("hello"));
    assert_eq!(
        first_value("unicode \"日本語テスト\""),
        SdlValue::from("日本語テスト")
    );
    assert_eq!(first_value("empty \"\""), SdlValue::from(""));
}

#[test]
fn string_escapes() {
    assert_eq!(
        first_value(r#"string2 "hi \"you\"""#),
        SdlValue::from("hi \"you\"")
    );
    assert_eq!(
        first_value(r#"string3 "escapes \n\t\\""#),
        SdlValue::from("escapes \n\t\\")
    );
}

#[test]
fn string_line_continuation_joins_and_trims() {
    assert_eq!(
        first_value("string4 \"hi \\\n    there\""),
        SdlValue::from("hi there")
    );
    assert_eq!(
        first_value("string5 \"a \\\n  b \\\n  c\""),
        SdlValue::from("a b c")
    );
}

#[test]
fn quoted_string_with_real_newline_is_multiline() {
    assert_eq!(
        first_value("string6 \"line1\nline2\""),
        SdlValue::MultilineString("line1\nline2".to_string())
    );
}

#[test]
fn raw_string_blocks() {
    assert_eq!(
        first_value("raw1 `anything \\n \"goes\"\nhere`"),
        SdlValue::MultilineString("anything \\n \"goes\"\nhere".to_string())
    );
    assert_eq!(
        first_value("raw2 \"\"\"triple \"quoted\"\ntext\"\"\""),
        SdlValue::MultilineString("triple \"quoted\"\ntext".to_string())
    );
}

#[test]
fn characters() {
    assert_eq!(first_value("char1 'a'"), SdlValue::Character('a'));
    assert_eq!(first_value("char2 '\\n'"), SdlValue::Character('\n'));
    assert_eq!(first_value("char3 '\\''"), SdlValue::Character('\''));
    assert_eq!(first_value("char4 '本'"), SdlValue::Character('本'));
}

#[test]
fn integers() {
    assert_eq!(first_value("int1 0"), SdlValue::Int(0));
    assert_eq!(first_value("int2 5"), SdlValue::Int(5));
    assert_eq!(first_value("int3 -100"), SdlValue::Int(-100));
    assert_eq!(first_value("long1 5L"), SdlValue::Long(5));
    assert_eq!(
        first_value("long2 5000000000L"),
        SdlValue::Long(5_000_000_000)
    );
}

#[test]
fn floats_doubles_decimals() {
    assert_eq!(first_value("float1 0.23F"), SdlValue::Float(0.23));
    assert_eq!(first_value("double1 2.34D"), SdlValue::Double(2.34));
    assert_eq!(first_value("double2 2.34"), SdlValue::Double(2.34));
    assert_eq!(
        first_value("decimal1 11.111111111111111111BD"),
        SdlValue::Decimal(BigDecimal::from_str("11.111111111111111111").unwrap())
    );
}

#[test]
fn booleans_and_null() {
    assert_eq!(first_value("b1 true"), SdlValue::Boolean(true));
    assert_eq!(first_value("b2 false"), SdlValue::Boolean(false));
    assert_eq!(first_value("b3 on"), SdlValue::Boolean(true));
    assert_eq!(first_value("b4 off"), SdlValue::Boolean(false));
    assert_eq!(first_value("n1 null"), SdlValue::Null);
}

#[test]
fn dates() {
    assert_eq!(
        first_value("date1 2005/12/31"),
        SdlValue::Date(ymd(2005, 12, 31))
    );
    assert_eq!(
        first_value("date2 1882/5/2"),
        SdlValue::Date(ymd(1882, 5, 2))
    );
}

#[test]
fn date_times() {
    assert_eq!(
        first_value("dt1 2005/12/31 12:30"),
        SdlValue::DateTime {
            local: ymd_hms_milli(2005, 12, 31, 12, 30, 0, 0),
            zone: None,
        }
    );
    assert_eq!(
        first_value("dt2 2005/12/31 12:30:23.12"),
        SdlValue::DateTime {
            local: ymd_hms_milli(2005, 12, 31, 12, 30, 23, 120),
            zone: None,
        }
    );
    assert_eq!(
        first_value("dt3 1882/5/2 12:30:23.123-JST"),
        SdlValue::DateTime {
            local: ymd_hms_milli(1882, 5, 2, 12, 30, 23, 123),
            zone: Some("JST".to_string()),
        }
    );
    assert_eq!(
        first_value("dt4 1882/5/2 12:30:23-GMT-08:30"),
        SdlValue::DateTime {
            local: ymd_hms_milli(1882, 5, 2, 12, 30, 23, 0),
            zone: Some("GMT-08:30".to_string()),
        }
    );
}

#[test]
fn durations() {
    assert_eq!(
        first_value("time1 12:30:00"),
        SdlValue::Duration(Duration::hours(12) + Duration::minutes(30))
    );
    assert_eq!(
        first_value("time2 24:00:00"),
        SdlValue::Duration(Duration::days(1))
    );
    assert_eq!(
        first_value("time3 1d:12:30:00"),
        SdlValue::Duration(Duration::days(1) + Duration::hours(12) + Duration::minutes(30))
    );
    assert_eq!(
        first_value("time4 12:30:23.123"),
        SdlValue::Duration(
            Duration::hours(12)
                + Duration::minutes(30)
                + Duration::seconds(23)
                + Duration::milliseconds(123)
        )
    );
    assert_eq!(
        first_value("time5 -12:30:00"),
        SdlValue::Duration(-(Duration::hours(12) + Duration::minutes(30)))
    );
}

#[test]
fn negative_duration_sign_covers_the_whole_span() {
    // The leading sign negates days, time, and milliseconds as one magnitude.
    let span = Duration::days(1)
        + Duration::hours(2)
        + Duration::minutes(3)
        + Duration::seconds(4)
        + Duration::milliseconds(5);
    assert_eq!(
        first_value("time6 -1d:02:03:04.005"),
        SdlValue::Duration(-span)
    );
    assert_eq!(
        first_value("time7 -1D:02:03:04.005"),
        SdlValue::Duration(-span)
    );
}

#[test]
fn binaries() {
    assert_eq!(
        first_value("key [aGVsbG8=]"),
        SdlValue::Binary(b"hello".to_vec())
    );
    assert_eq!(
        first_value("wrapped [aGVs\n    bG8=]"),
        SdlValue::Binary(b"hello".to_vec())
    );
}

#[test]
fn triple_quoted_with_backtick_and_quote_round_trips() {
    // A raw block holding a backtick and a quote on one line cannot use the
    // backtick output form; the multi-line variant must still survive.
    let root = sdlang::parse_str("x \"\"\"a`b\"c\"\"\"").unwrap();
    assert_eq!(
        root.children()[0].values()[0],
        SdlValue::MultilineString("a`b\"c".to_string())
    );
    let written = ser::document_to_string(&root);
    assert_eq!(written, "x \"\"\"a`b\"c\"\"\"\n");
    assert_eq!(sdlang::parse_str(&written).unwrap(), root);
}

#[test]
fn basic_types_document_round_trips() {
    let text = concat!(
        "strings \"one\" \"two \\\"quoted\\\"\" `raw\nblock`\n",
        "chars 'a' '\\n'\n",
        "numbers 0 5 -100 5L 0.23F 2.34D 11.1BD 3.5\n",
        "flags true false on off null\n",
        "date1 2005/12/31\n",
        "dt1 2005/12/31 12:30:23.120-JST\n",
        "spans 12:30:00 1d:02:03:04.005 -00:00:01\n",
        "key [aGVsbG8=]\n",
    );
    let root = sdlang::parse_str(text).unwrap();
    let written = ser::document_to_string(&root);
    let again = sdlang::parse_str(&written).unwrap();
    assert_eq!(root, again);
    // Canonical text is a fixed point of the serializer.
    assert_eq!(written, ser::document_to_string(&again));
}

#[test]
fn serde_export_of_literals() {
    let root = sdlang::parse_str("item \"book\" count=4 price=2.34D due=2015/12/06").unwrap();
    let json = serde_json::to_value(&root.children()[0]).unwrap();
    assert_eq!(json["name"], "item");
    assert_eq!(json["values"][0], "book");
    assert_eq!(json["attributes"]["count"], 4);
    assert_eq!(json["attributes"]["price"], 2.34);
    assert_eq!(json["attributes"]["due"], "2015/12/06");
}
