//! Structural coverage: statements, attributes, child blocks, namespaces, and
//! whole-document round trips.

use sdlang::{ser, SdlValue, Tag};

#[test]
fn empty_tag() {
    let root = sdlang::parse_str("ping").unwrap();
    assert_eq!(root.children(), &[Tag::new("ping")]);
}

#[test]
fn value_list_with_comments_and_continuation() {
    let text = "numbers 1 2 3 # trailing note\nmore 4 5 \\\n    6 7 // joined\n";
    let root = sdlang::parse_str(text).unwrap();
    assert_eq!(
        root.child_named("numbers").unwrap().values(),
        &[SdlValue::Int(1), SdlValue::Int(2), SdlValue::Int(3)]
    );
    assert_eq!(
        root.child_named("more").unwrap().values(),
        &[
            SdlValue::Int(4),
            SdlValue::Int(5),
            SdlValue::Int(6),
            SdlValue::Int(7)
        ]
    );
}

#[test]
fn block_comment_in_the_middle_of_a_statement() {
    let root = sdlang::parse_str("numbers 1 /* two\nis skipped */ 3").unwrap();
    assert_eq!(
        root.children(),
        &[Tag::new("numbers").value(1).value(3)]
    );
}

#[test]
fn attributes_only() {
    let root = sdlang::parse_str("atag name=\"joe\" size=5 smoker=false").unwrap();
    let expected = Tag::new("atag")
        .attribute("name", "joe")
        .attribute("size", 5)
        .attribute("smoker", false);
    assert_eq!(root.children(), &[expected]);
}

#[test]
fn values_and_attributes_together() {
    let root = sdlang::parse_str("folder \"myFiles\" color=\"yellow\" protection=on").unwrap();
    let folder = root.child_named("folder").unwrap();
    assert_eq!(folder.first_value(), Some(&SdlValue::from("myFiles")));
    assert_eq!(
        folder.attribute_value("color"),
        Some(&SdlValue::from("yellow"))
    );
    assert_eq!(
        folder.attribute_value("protection"),
        Some(&SdlValue::Boolean(true))
    );
}

#[test]
fn semicolons_split_statements() {
    let root = sdlang::parse_str("a 1; b 2; c 3").unwrap();
    assert_eq!(
        root.children(),
        &[
            Tag::new("a").value(1),
            Tag::new("b").value(2),
            Tag::new("c").value(3),
        ]
    );
}

#[test]
fn nested_children_and_recursive_lookup() {
    let text = "grandparent {\n    parent {\n        child \"Alice\"\n        child \"Bob\"\n    }\n    parent {\n        child \"Carol\"\n        daughter {\n            child \"Dawn\"\n        }\n    }\n    child \"Eve\"\n}";
    let root = sdlang::parse_str(text).unwrap();
    let grandparent = root.child_named("grandparent").unwrap();

    // Direct lookup sees only immediate children.
    assert_eq!(
        grandparent.child_named("child").unwrap().first_value(),
        Some(&SdlValue::from("Eve"))
    );
    // Recursive lookup is depth-first.
    assert_eq!(
        grandparent.child_recursive("child").unwrap().first_value(),
        Some(&SdlValue::from("Alice"))
    );
    let all = grandparent.children_named("child", true);
    let names: Vec<_> = all
        .iter()
        .map(|t| t.first_value().unwrap().as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dawn", "Eve"]);
}

#[test]
fn matrix_rows_via_anonymous_content_tags() {
    let root = sdlang::parse_str("matrix {\n    1 2 3\n    4 5 6\n}").unwrap();
    let rows = root.child_named("matrix").unwrap().children_values("content");
    assert_eq!(
        rows,
        vec![
            vec![SdlValue::Int(1), SdlValue::Int(2), SdlValue::Int(3)],
            vec![SdlValue::Int(4), SdlValue::Int(5), SdlValue::Int(6)],
        ]
    );
}

#[test]
fn namespaces_across_the_tree() {
    let text = concat!(
        "people {\n",
        "    person:grandfather \"Alfred\" {\n",
        "        person:father \"Brian\" person:age=68 {\n",
        "            person:son \"Clive\"\n",
        "            person:daughter \"Debbie\"\n",
        "        }\n",
        "        person:uncle \"Edward\"\n",
        "    }\n",
        "    person:grandmother \"Florence\"\n",
        "    friend \"Gary\"\n",
        "    person:cousin \"Harriet\" {\n",
        "        pet:dog \"Rex\"\n",
        "        person:niece \"Iris\"\n",
        "    }\n",
        "}",
    );
    let root = sdlang::parse_str(text).unwrap();
    let people = root.child_named("people").unwrap();

    assert_eq!(people.children_in_namespace("person", true).len(), 8);
    assert_eq!(people.children_in_namespace("pet", true).len(), 1);
    // Only `friend` sits in the default namespace below `people`.
    assert_eq!(people.children_in_namespace("", true).len(), 1);

    let father = people.child_recursive("father").unwrap();
    assert_eq!(father.namespace(), "person");
    assert_eq!(
        father.attribute_value_in("person", "age"),
        Some(&SdlValue::Int(68))
    );
    assert_eq!(father.attribute_value("age"), None);
    assert_eq!(father.attributes_in("person").len(), 1);
}

#[test]
fn inline_blocks_parse_like_multiline_ones() {
    let inline = sdlang::parse_str("a { b 1; c 2 }").unwrap();
    let multiline = sdlang::parse_str("a {\n    b 1\n    c 2\n}").unwrap();
    assert_eq!(inline, multiline);
}

#[test]
fn structural_equality_ignores_formatting() {
    let spread = sdlang::parse_str("t 1 \\\n  2 a=3 /* x */ b=4").unwrap();
    let tight = sdlang::parse_str("t 1 2 b=4 a=3").unwrap();
    assert_eq!(spread, tight);
}

#[test]
fn whole_document_round_trips() {
    let text = concat!(
        "title \"files\"\n",
        "folder \"myFiles\" color=\"yellow\" protection=on {\n",
        "    folder \"my images\" {\n",
        "        file \"myHouse.jpg\" color=true date=2005/11/05\n",
        "    }\n",
        "    file \"myMusic.mp3\" size=3.5F\n",
        "    matrix {\n",
        "        1 2 3\n",
        "        4 5 6\n",
        "    }\n",
        "}\n",
        "meta:note \"end\" meta:rank=1\n",
    );
    let root = sdlang::parse_str(text).unwrap();
    let written = ser::document_to_string(&root);
    let again = sdlang::parse_str(&written).unwrap();
    assert_eq!(root, again);
    assert_eq!(written, ser::document_to_string(&again));
}

#[test]
fn built_and_parsed_trees_compare_equal() {
    let built = Tag::new("folder")
        .value("myFiles")
        .attribute("color", "yellow")
        .child(Tag::new("file").value("a.txt"));
    let parsed = sdlang::parse_str("folder \"myFiles\" color=\"yellow\" {\n file \"a.txt\"\n}")
        .unwrap();
    assert_eq!(parsed.children(), &[built]);
}

#[test]
fn serde_export_of_a_tree() {
    let root = sdlang::parse_str("ns:box \"label\" {\n    item 1\n    item 2\n}").unwrap();
    let json = serde_json::to_value(&root.children()[0]).unwrap();
    assert_eq!(json["name"], "box");
    assert_eq!(json["namespace"], "ns");
    assert_eq!(json["children"][0]["values"][0], 1);
    assert_eq!(json["children"][1]["values"][0], 2);
}
