use sqlmapper_core::{Error, Location};

fn load_err(src: &str) -> Error {
    sqlmapper_xml::parse(src).unwrap_err()
}

fn location(err: &Error) -> Location {
    err.mapper_location().cloned().unwrap()
}

#[test]
fn malformed_markup() {
    let err = load_err("<mapper namespace=\"m\"><select id=\"a\">");
    assert!(err.is_invalid_mapper());
    assert!(err.to_string().contains("unterminated"));
}

#[test]
fn missing_namespace() {
    let err = load_err("<mapper><select id=\"a\">SELECT 1</select></mapper>");
    assert!(err.is_invalid_mapper());
    assert!(err.to_string().contains("namespace"));
}

#[test]
fn wrong_root() {
    let err = load_err("<config namespace=\"m\"/>");
    assert!(err.to_string().contains("expected a `<mapper>` root element"));
}

#[test]
fn unknown_tag_names_statement_and_snippet() {
    let err = load_err(
        r#"<mapper namespace="users">
            <select id="find">SELECT * FROM users <iff test="x">WHERE x</iff></select>
        </mapper>"#,
    );

    assert!(err.is_invalid_mapper());
    assert_eq!(location(&err), Location::namespace("users").statement("find"));
    assert_eq!(
        err.to_string(),
        "invalid mapper (namespace `users`, statement `find`): unknown tag `<iff test=\"x\">`"
    );
}

#[test]
fn unterminated_tag_in_body() {
    let err = load_err(
        r#"<mapper namespace="users">
            <select id="find">SELECT * FROM users <if test="x">WHERE x</select>
        </mapper>"#,
    );

    assert!(err.is_invalid_mapper());
    assert!(err
        .to_string()
        .contains("unterminated `<if test=\"x\">` in `<select id=\"find\">`"));
}

#[test]
fn missing_required_attribute() {
    let err = load_err(
        r#"<mapper namespace="m"><select id="a">SELECT 1 <if>x</if></select></mapper>"#,
    );
    assert!(err
        .to_string()
        .contains("`<if>` is missing the `test` attribute"));

    let err = load_err(r#"<mapper namespace="m"><select>SELECT 1</select></mapper>"#);
    assert!(err.to_string().contains("`<select>` is missing the `id` attribute"));
}

#[test]
fn duplicate_statement_id() {
    let err = load_err(
        r#"<mapper namespace="m">
            <select id="a">SELECT 1</select>
            <delete id="a">DELETE FROM t</delete>
        </mapper>"#,
    );

    assert!(err.is_invalid_mapper());
    assert_eq!(location(&err), Location::namespace("m").statement("a"));
    assert!(err.to_string().contains("duplicate statement id"));
}

#[test]
fn raw_substitution_is_unsupported() {
    let err = load_err(
        r#"<mapper namespace="m"><select id="a">SELECT * FROM t ORDER BY ${col}</select></mapper>"#,
    );

    assert!(err.is_invalid_mapper());
    assert!(err.any(Error::is_unsupported_feature));
}

#[test]
fn when_outside_choose() {
    let err = load_err(
        r#"<mapper namespace="m"><select id="a"><when test="x">1</when></select></mapper>"#,
    );
    assert!(err.to_string().contains("outside of `<choose>`"));
}

#[test]
fn unknown_mapper_element() {
    let err = load_err(r#"<mapper namespace="m"><query id="a">SELECT 1</query></mapper>"#);
    assert!(err.to_string().contains("unknown element `<query id=\"a\">`"));
}

#[test]
fn invalid_boolean_attribute() {
    let err = load_err(
        r#"<mapper namespace="m"><select id="a" useCache="yes">SELECT 1</select></mapper>"#,
    );
    assert!(err.to_string().contains("`useCache` must be `true` or `false`"));
}

#[test]
fn file_is_reported() {
    let err = sqlmapper_xml::Parser::new()
        .file("mappers/m.xml")
        .parse(r#"<mapper namespace="m"><select id="a"><bogus/></select></mapper>"#)
        .unwrap_err();

    assert_eq!(
        location(&err),
        Location::namespace("m").file("mappers/m.xml").statement("a")
    );
}
